// [libs/infra/cluster/src/errors.rs]
/*!
 * =================================================================
 * APARATO: CLUSTER ERROR CATALOG (V3.1 - SOBERANO)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DEL UPLINK
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SEMANTIC SURFACING: Cada variante mapea de forma estable a un
 *    código HTTP en el estrato de adaptación (404/409/400/5xx).
 * 2. PANOPTICON COMPLIANCE: Mensajes con prefijo de estrato para el
 *    renderizado cromático en el Dashboard.
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClusterError {
    /// El objeto solicitado no existe en el plano de control.
    #[error("[L3_CLUSTER_FAULT]: OBJECT_NOT_FOUND")]
    NotFound,

    /// Violación de unicidad o de revisión optimista.
    #[error("[L3_CLUSTER_FAULT]: WRITE_CONFLICT")]
    Conflict,

    /// Precondición de estado rechazada por el adaptador.
    #[error("[L3_CLUSTER_FAULT]: PRECONDITION_REJECTED -> {0}")]
    Precondition(String),

    /// Fallo de red o del gateway del API de control.
    #[error("[L3_CLUSTER_NET_FAULT]: UPLINK_SEVERED -> {0}")]
    Transport(String),

    /// Fallo en la transformación JSON entre el blob y el dominio.
    #[error("[L3_CLUSTER_MAPPING_FAULT]: DATA_MAPPING_VIOLATION -> {0}")]
    Serialization(#[from] serde_json::Error),

    /// Estado interno inalcanzable o invariante roto.
    #[error("[L3_CLUSTER_FAULT]: INTERNAL_COLLAPSE -> {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ClusterError {
    fn from(fault: reqwest::Error) -> Self {
        ClusterError::Transport(fault.to_string())
    }
}
