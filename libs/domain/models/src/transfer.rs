// [libs/domain/models/src/transfer.rs]
/*!
 * =================================================================
 * APARATO: CONFIG TRANSFER CONTRACTS (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: SOBRE VERSIONADO DE EXPORTACIÓN Y RESULTADOS DE IMPORT
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. VERSION GATE: El preview rechaza en bloque cualquier sobre cuya
 *    versión difiera de EXPORT_VERSION.
 * 2. RAW SECTION PAYLOADS: Las secciones viajan como JSON crudo; el
 *    parseo canónico ocurre en el preview y el apply, nunca antes.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Versión vigente del sobre de exportación.
pub const EXPORT_VERSION: &str = "1.0";

/// Nombres canónicos de las secciones transferibles.
pub const SECTION_BILLING: &str = "billing";
pub const SECTION_ALERTS: &str = "alerts";
pub const SECTION_RESOURCES: &str = "resources";
pub const SECTION_CONTROL_PLANE: &str = "controlPlane";
pub const SECTION_INIT_SCRIPTS: &str = "initScripts";

/// Universo de secciones reconocidas por el transfer.
pub const KNOWN_SECTIONS: [&str; 5] = [
    SECTION_BILLING,
    SECTION_ALERTS,
    SECTION_RESOURCES,
    SECTION_CONTROL_PLANE,
    SECTION_INIT_SCRIPTS,
];

/// Sobre versionado con las secciones seleccionadas en crudo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub exported_by: String,
    /// Sección -> documento JSON crudo de la fuente de verdad.
    pub sections: BTreeMap<String, serde_json::Value>,
}

/// Cambio campo a campo en una sección simple.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: String,
    pub current: serde_json::Value,
    pub imported: serde_json::Value,
}

/// Clase de cambio en una sección de lista.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListChangeKind {
    Added,
    Modified,
    Removed,
}

/// Cambio sobre un elemento de lista, identificado por su llave lógica.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChange {
    pub kind: ListChangeKind,
    /// 'name' para recursos, 'id' para grupos de scripts.
    pub key: String,
}

/// Veredicto de preview de una sección individual.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPreview {
    pub section: String,
    pub valid: bool,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
    #[serde(default)]
    pub list_changes: Vec<ListChange>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Veredicto completo del preview de un sobre.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub valid: bool,
    pub version: String,
    #[serde(default)]
    pub sections: Vec<SectionPreview>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Resultado de la aplicación selectiva de un sobre.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutcome {
    pub message: String,
    #[serde(default)]
    pub applied: Vec<String>,
    #[serde(default)]
    pub skipped: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}
