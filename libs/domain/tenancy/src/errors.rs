// [libs/domain/tenancy/src/errors.rs]
/*!
 * =================================================================
 * APARATO: TENANCY ERROR CATALOG (V2.1 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN CORE (ESTRATO L2)
 * RESPONSABILIDAD: CATALOGACIÓN DE VIOLACIONES DE TENENCIA
 * =================================================================
 */

use bison_infra_cluster::ClusterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenancyError {
    /// El nombre pertenece al vocabulario vetado del pool.
    #[error("[L2_TENANCY_POLICY]: RESERVED_NAME -> {0}")]
    ReservedName(String),

    /// El nombre no respeta la gramática DNS-label.
    #[error("[L2_TENANCY_POLICY]: INVALID_NAME -> {0}")]
    InvalidName(String),

    /// El modo exclusivo exige al menos un nodo sellado.
    #[error("[L2_TENANCY_POLICY]: EXCLUSIVE_NODES_REQUIRED")]
    ExclusiveNodesRequired,

    /// El proyecto declara dos veces al mismo usuario.
    #[error("[L2_TENANCY_POLICY]: DUPLICATE_MEMBER -> {0}")]
    DuplicateMember(String),

    /// El objeto de dominio solicitado no existe.
    #[error("[L2_TENANCY_FAULT]: NOT_FOUND")]
    NotFound,

    /// Violación de unicidad en la creación.
    #[error("[L2_TENANCY_FAULT]: ALREADY_EXISTS")]
    Conflict,

    /// Precondición de estado rechazada (pool, cuarentena...).
    #[error("[L2_TENANCY_POLICY]: PRECONDITION_REJECTED -> {0}")]
    Precondition(String),

    /// Fallo del uplink del cluster.
    #[error(transparent)]
    Store(#[from] ClusterError),

    /// Fallo de mapeo JSON de anotaciones.
    #[error("[L2_TENANCY_MAPPING_FAULT]: ANNOTATION_VIOLATION -> {0}")]
    Serialization(#[from] serde_json::Error),
}
