// [libs/domain/models/src/scripts.rs]
/*!
 * =================================================================
 * APARATO: INIT SCRIPT CATALOG CONTRACTS (V1.5 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: GRAMÁTICA DE GRUPOS DE SCRIPTS DE APROVISIONAMIENTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BUILT-IN SHIELD: Los grupos de fábrica aceptan edición y apagado
 *    pero rechazan el borrado.
 * 2. PLATFORM SELECTORS: Cada script declara selectores de OS y
 *    arquitectura; el comodín '*' habilita la degradación ordenada.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Comodín de selector de plataforma.
pub const PLATFORM_WILDCARD: &str = "*";

/// Fase del ciclo de onboarding en la que corre el grupo.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScriptPhase {
    #[serde(rename = "pre-join")]
    PreJoin,
    #[serde(rename = "post-join")]
    PostJoin,
}

/// Script ejecutable con selectores de plataforma.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitScript {
    pub id: String,
    /// Selector de sistema operativo ('ubuntu', 'centos', '*').
    pub os: String,
    /// Selector de arquitectura ('amd64', 'arm64', '*').
    pub arch: String,
    /// Contenido shell, entubado por stdin a 'bash -s' en el nodo remoto.
    pub content: String,
}

/// Grupo ordenado de scripts específicos por plataforma.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub phase: ScriptPhase,
    #[serde(default)]
    pub enabled: bool,
    /// Posición monótona dentro del catálogo.
    #[serde(default)]
    pub order: i32,
    /// Los grupos de fábrica no pueden borrarse.
    #[serde(default)]
    pub built_in: bool,
    #[serde(default)]
    pub scripts: Vec<InitScript>,
}
