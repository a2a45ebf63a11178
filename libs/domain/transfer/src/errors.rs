// [libs/domain/transfer/src/errors.rs]
/*!
 * =================================================================
 * APARATO: TRANSFER ERROR CATALOG (V1.1 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN CORE (ESTRATO L2)
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE TRANSFERENCIA
 * =================================================================
 */

use bison_infra_cluster::ClusterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    /// El sobre no respeta la forma mínima exigida.
    #[error("[L2_TRANSFER_POLICY]: INVALID_ENVELOPE -> {0}")]
    InvalidEnvelope(String),

    #[error(transparent)]
    Store(#[from] ClusterError),
}
