// [libs/domain/alerting/src/errors.rs]
/*!
 * =================================================================
 * APARATO: ALERT ERROR CATALOG (V1.2 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN CORE (ESTRATO L2)
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE EVALUACIÓN Y ENTREGA
 * =================================================================
 */

use bison_domain_wallet::WalletError;
use bison_infra_cluster::ClusterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    /// El umbral configurado es incoherente.
    #[error("[L2_ALERT_POLICY]: INVALID_THRESHOLD -> {0}")]
    InvalidThreshold(f64),

    /// El canal nombrado no existe en la configuración.
    #[error("[L2_ALERT_FAULT]: CHANNEL_NOT_FOUND -> {0}")]
    ChannelNotFound(String),

    /// El adaptador de entrega rechazó o no alcanzó el destino.
    #[error("[L2_ALERT_DELIVERY_FAULT]: {0}")]
    Delivery(String),

    #[error(transparent)]
    Store(#[from] ClusterError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl From<reqwest::Error> for AlertError {
    fn from(fault: reqwest::Error) -> Self {
        AlertError::Delivery(fault.to_string())
    }
}
