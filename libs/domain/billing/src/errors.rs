// [libs/domain/billing/src/errors.rs]
/*!
 * =================================================================
 * APARATO: BILLING ERROR CATALOG (V2.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN CORE (ESTRATO L2)
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DEL CICLO FINANCIERO
 * =================================================================
 */

use bison_domain_tenancy::TenancyError;
use bison_domain_wallet::WalletError;
use bison_infra_cluster::ClusterError;
use bison_infra_cost_oracle::OracleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    /// Precondición de estado rechazada (reanudar en negativo...).
    #[error("[L2_BILLING_POLICY]: PRECONDITION_REJECTED -> {0}")]
    Precondition(String),

    /// El plan de recarga declarado es incoherente.
    #[error("[L2_BILLING_POLICY]: INVALID_RECHARGE_PLAN -> {0}")]
    InvalidPlan(String),

    #[error(transparent)]
    Store(#[from] ClusterError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Tenancy(#[from] TenancyError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
