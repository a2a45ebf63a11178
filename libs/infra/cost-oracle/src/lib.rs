// [libs/infra/cost-oracle/src/lib.rs]
/*!
 * =================================================================
 * APARATO: COST ORACLE UPLINK (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CONSULTAS DE COSTO Y USO CONTRA EL ORÁCULO EXTERNO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CAPABILITY DEGRADATION: Un oráculo ausente se modela con el binding
 *    'DisabledCostOracle' que reporta uso y costo cero; ningún Option
 *    se propaga hacia los estratos de dominio.
 * 2. NOISE FILTERING: Las filas '__idle__' y '__unmounted__' se filtran
 *    de todos los reportes.
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod types;

pub use client::AllocationOracleClient;
pub use errors::OracleError;
pub use types::{CostTrendPoint, NamespaceUsage};

use async_trait::async_trait;
use std::sync::Arc;

/// Contrato de capacidad del oráculo de costos.
#[async_trait]
pub trait CostOracle: Send + Sync {
    /// Falso cuando el oráculo no está configurado en el despliegue.
    fn is_enabled(&self) -> bool;

    /// Uso y costo agregados por namespace sobre la ventana ("1h", "7d").
    async fn usage_by_namespace(&self, window: &str) -> Result<Vec<NamespaceUsage>, OracleError>;

    /// Misma forma, agregada por la etiqueta de usuario.
    async fn usage_by_user(&self, window: &str) -> Result<Vec<NamespaceUsage>, OracleError>;

    /// Filas de detalle para un namespace concreto.
    async fn allocation_for_namespace(
        &self,
        window: &str,
        namespace: &str,
    ) -> Result<Vec<NamespaceUsage>, OracleError>;

    /// Costo total del cluster sobre la ventana.
    async fn total_cost(&self, window: &str) -> Result<f64, OracleError>;

    /// Serie diaria de costo total.
    async fn cost_trend(&self, window: &str) -> Result<Vec<CostTrendPoint>, OracleError>;
}

/// Binding nulo: uso cero, costo cero, siempre alcanzable.
pub struct DisabledCostOracle;

#[async_trait]
impl CostOracle for DisabledCostOracle {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn usage_by_namespace(&self, _window: &str) -> Result<Vec<NamespaceUsage>, OracleError> {
        Ok(Vec::new())
    }

    async fn usage_by_user(&self, _window: &str) -> Result<Vec<NamespaceUsage>, OracleError> {
        Ok(Vec::new())
    }

    async fn allocation_for_namespace(
        &self,
        _window: &str,
        _namespace: &str,
    ) -> Result<Vec<NamespaceUsage>, OracleError> {
        Ok(Vec::new())
    }

    async fn total_cost(&self, _window: &str) -> Result<f64, OracleError> {
        Ok(0.0)
    }

    async fn cost_trend(&self, _window: &str) -> Result<Vec<CostTrendPoint>, OracleError> {
        Ok(Vec::new())
    }
}

/**
 * Resuelve el binding del oráculo según la configuración del despliegue.
 *
 * # Logic:
 * Endpoint ausente o vacío degrada al binding nulo; el resto de los
 * estratos consume el trait sin distinguir ambos mundos.
 */
pub fn resolve_oracle(endpoint: Option<String>) -> Arc<dyn CostOracle> {
    match endpoint.filter(|candidate| !candidate.trim().is_empty()) {
        Some(base_url) => Arc::new(AllocationOracleClient::new(base_url)),
        None => Arc::new(DisabledCostOracle),
    }
}
