// [libs/domain/models/src/team.rs]
/*!
 * =================================================================
 * APARATO: TEAM DOMAIN CONTRACTS (V2.1 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: GRAMÁTICA SOBERANA DE LA UNIDAD FACTURABLE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL RESOURCE MODES: Un equipo consume del pool compartido con
 *    cuotas explícitas, o sella nodos exclusivos cuya capacidad física
 *    se convierte en su límite nominal.
 * 2. RESERVED NAME SHIELD: Los nombres del vocabulario interno del pool
 *    quedan vetados en la creación.
 * 3. TYPESHARE SYNERGY: Contratos alineados con el Dashboard.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use typeshare::typeshare;

/// Nombres vetados para equipos: colisionan con el vocabulario del pool.
pub const RESERVED_TEAM_NAMES: [&str; 6] =
    ["shared", "disabled", "unmanaged", "system", "default", "admin"];

/// Modelo de recursos del equipo dentro del cluster.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TeamMode {
    /// Consume del pool compartido bajo cuotas explícitas.
    Shared,
    /// Sella nodos físicos completos mediante la etiqueta 'team-<name>'.
    Exclusive,
}

impl Default for TeamMode {
    fn default() -> Self {
        TeamMode::Shared
    }
}

/// Clase del sujeto propietario de un equipo.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OwnerKind {
    User,
    Group,
}

/// Referencia nominal a un propietario del equipo.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerReference {
    pub kind: OwnerKind,
    pub name: String,
}

/// Unidad facturable soberana: dueña de proyectos, billetera y cuota.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Nombre único (etiqueta DNS) que identifica al tenant proyectado.
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Propietarios declarados (usuarios o grupos).
    #[serde(default)]
    pub owners: Vec<OwnerReference>,
    #[serde(default)]
    pub mode: TeamMode,
    /// Nodos sellados en modo exclusivo. Requiere al menos uno.
    #[serde(default)]
    pub exclusive_nodes: Vec<String>,
    /// Cuota nominal: recurso canónico -> cantidad ("4", "16Gi").
    #[serde(default)]
    pub quota: BTreeMap<String, String>,
    /// Cuota consumida, agregada de los pods en ejecución (solo lectura).
    #[serde(default)]
    pub used_quota: BTreeMap<String, String>,
    /// Sello de cuarentena aplicado por el motor de facturación o un admin.
    #[serde(default)]
    pub suspended: bool,
}

impl Team {
    /// Evalúa si el nombre pertenece al vocabulario vetado del pool.
    pub fn is_reserved_name(candidate: &str) -> bool {
        RESERVED_TEAM_NAMES.contains(&candidate)
    }

    /**
     * Valida la forma DNS-label del nombre del equipo.
     *
     * # Logic:
     * Minúsculas alfanuméricas y guiones interiores, 1..=63 caracteres,
     * sin guion inicial ni final. Misma gramática que exige el cluster.
     */
    pub fn is_valid_name(candidate: &str) -> bool {
        let length_within_bounds = !candidate.is_empty() && candidate.len() <= 63;
        let charset_ok = candidate
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        let edges_ok = !candidate.starts_with('-') && !candidate.ends_with('-');
        length_within_bounds && charset_ok && edges_ok
    }
}
