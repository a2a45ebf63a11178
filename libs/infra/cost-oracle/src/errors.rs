// [libs/infra/cost-oracle/src/errors.rs]
/*!
 * =================================================================
 * APARATO: COST ORACLE ERROR CATALOG (V1.1 - SOBERANO)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DEL ENLACE CON EL ORÁCULO
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    /// Fallo de red contra el endpoint del oráculo.
    #[error("[L3_ORACLE_NET_FAULT]: ORACLE_UPLINK_SEVERED -> {0}")]
    Transport(#[from] reqwest::Error),

    /// El oráculo respondió con un estado HTTP de rechazo.
    #[error("[L3_ORACLE_FAULT]: QUERY_REJECTED -> HTTP_{0}")]
    Rejected(u16),

    /// La respuesta no respeta la forma de asignación esperada.
    #[error("[L3_ORACLE_MAPPING_FAULT]: ALLOCATION_SHAPE_VIOLATION -> {0}")]
    Malformed(String),
}
