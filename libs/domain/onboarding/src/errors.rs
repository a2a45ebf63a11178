// [libs/domain/onboarding/src/errors.rs]
/*!
 * =================================================================
 * APARATO: ONBOARDING ERROR CATALOG (V2.1 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN CORE (ESTRATO L2)
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DEL FLUJO DE INCORPORACIÓN
 * =================================================================
 */

use bison_domain_tenancy::TenancyError;
use bison_infra_cluster::ClusterError;
use bison_infra_ssh::SshError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OnboardError {
    /// La petición de incorporación es incoherente.
    #[error("[L2_ONBOARD_POLICY]: INVALID_REQUEST -> {0}")]
    InvalidRequest(String),

    /// Otra incorporación pendiente o en curso ocupa la IP objetivo.
    #[error("[L2_ONBOARD_POLICY]: TARGET_OCCUPIED -> {0}")]
    AlreadyRunning(String),

    /// El trabajo o grupo solicitado no existe.
    #[error("[L2_ONBOARD_FAULT]: NOT_FOUND")]
    NotFound,

    /// Los grupos de fábrica rechazan el borrado.
    #[error("[L2_ONBOARD_POLICY]: BUILT_IN_PROTECTED")]
    BuiltInProtected,

    /// Precondición de estado rechazada (cancelar un trabajo terminal...).
    #[error("[L2_ONBOARD_POLICY]: PRECONDITION_REJECTED -> {0}")]
    Precondition(String),

    /// Un escalón del flujo falló; el trabajo queda terminal.
    #[error("[L2_ONBOARD_FAULT]: STEP_{step}_FAILED -> {detail}")]
    StepFailed { step: u32, detail: String },

    /// El worker observó la señal de cancelación y abandonó el flujo.
    #[error("[L2_ONBOARD_FLOW]: CANCELLED")]
    Cancelled,

    #[error(transparent)]
    Ssh(#[from] SshError),

    #[error(transparent)]
    Store(#[from] ClusterError),

    #[error(transparent)]
    Tenancy(#[from] TenancyError),
}
