// [libs/domain/wallet/src/errors.rs]
/*!
 * =================================================================
 * APARATO: WALLET ERROR CATALOG (V1.2 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN CORE (ESTRATO L2)
 * RESPONSABILIDAD: CATALOGACIÓN DE VIOLACIONES FINANCIERAS
 * =================================================================
 */

use bison_infra_cluster::ClusterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    /// Abonos y débitos exigen magnitudes estrictamente positivas.
    #[error("[L2_WALLET_POLICY]: NON_POSITIVE_AMOUNT -> {0}")]
    NonPositiveAmount(f64),

    /// Fallo del almacén durable; el llamador decide el reintento.
    #[error(transparent)]
    Store(#[from] ClusterError),
}
