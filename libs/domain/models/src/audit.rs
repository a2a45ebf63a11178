// [libs/domain/models/src/audit.rs]
/*!
 * =================================================================
 * APARATO: AUDIT TRAIL CONTRACTS (V1.1 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: RASTRO FORENSE DE OPERACIONES MUTANTES
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use typeshare::typeshare;

/// Retención máxima de asientos del rastro de auditoría.
pub const AUDIT_RETENTION: usize = 10_000;

/// Asiento inmutable del rastro de auditoría.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Identificador unívoco universal del asiento (UUID v4).
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Operador autenticado que ejecutó la acción.
    pub operator: String,
    /// Verbo de la acción ('create', 'delete', 'recharge', 'suspend'...).
    pub action: String,
    /// Clase del recurso afectado ('team', 'project', 'node', 'wallet'...).
    pub resource: String,
    /// Nombre del recurso afectado.
    pub target: String,
    #[serde(default)]
    pub detail: BTreeMap<String, String>,
    #[serde(default)]
    pub source_ip: String,
    #[serde(default)]
    pub user_agent: String,
}
