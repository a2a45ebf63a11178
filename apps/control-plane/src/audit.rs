// [apps/control-plane/src/audit.rs]
/*!
 * =================================================================
 * APARATO: AUDIT TRAIL SERVICE (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: APPLICATION SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: RASTRO FORENSE ACOTADO DE OPERACIONES MUTANTES
 *
 * # Invariante:
 * Un fallo del rastro jamás falla la operación del usuario: se registra
 * en el log y se traga. Retención FIFO de 10 000 asientos.
 * =================================================================
 */

use bison_domain_models::audit::AUDIT_RETENTION;
use bison_domain_models::AuditEntry;
use bison_infra_cluster::{names, BlobVault};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

/// Clave del rastro dentro de su blob.
const ENTRIES_KEY: &str = "entries";

#[derive(Clone)]
pub struct AuditTrail {
    vault: BlobVault,
}

impl AuditTrail {
    pub fn new(vault: BlobVault) -> Self {
        Self { vault }
    }

    /**
     * Sella un asiento del rastro; los fallos se degradan a log.
     */
    pub async fn record(
        &self,
        operator: &str,
        action: &str,
        resource: &str,
        target: &str,
        detail: BTreeMap<String, String>,
    ) {
        let entry = AuditEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            operator: operator.to_string(),
            action: action.to_string(),
            resource: resource.to_string(),
            target: target.to_string(),
            detail,
            source_ip: String::new(),
            user_agent: String::new(),
        };

        let seal_verdict = self
            .vault
            .mutate(names::AUDIT_LOGS, move |data| {
                let mut entries = data
                    .get(ENTRIES_KEY)
                    .and_then(|raw| serde_json::from_str::<Vec<AuditEntry>>(raw).ok())
                    .unwrap_or_default();
                entries.push(entry.clone());
                if entries.len() > AUDIT_RETENTION {
                    let overflow = entries.len() - AUDIT_RETENTION;
                    entries.drain(0..overflow);
                }
                data.insert(ENTRIES_KEY.to_string(), serde_json::to_string(&entries)?);
                Ok(())
            })
            .await;

        if let Err(seal_fault) = seal_verdict {
            warn!("🧾 [AUDIT_TRAIL]: Entry dropped ({} {}): {}", action, target, seal_fault);
        }
    }

    /// Asientos recientes, el más nuevo primero.
    pub async fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        let entries = self
            .vault
            .read_document::<Vec<AuditEntry>>(names::AUDIT_LOGS, ENTRIES_KEY)
            .await
            .ok()
            .flatten()
            .unwrap_or_default();

        let mut recent = entries;
        recent.reverse();
        recent.truncate(limit);
        recent
    }
}
