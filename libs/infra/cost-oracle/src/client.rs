// [libs/infra/cost-oracle/src/client.rs]
/*!
 * =================================================================
 * APARATO: ALLOCATION ORACLE CLIENT (V2.2 - GOLD MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: EJECUCIÓN DE CONSULTAS DE ASIGNACIÓN SOBRE HTTP
 * =================================================================
 */

use crate::errors::OracleError;
use crate::types::{
    buckets_to_trend, flatten_buckets, AllocationEnvelope, CostTrendPoint, NamespaceUsage,
};
use crate::CostOracle;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Etiqueta de agregación para los reportes por usuario.
const USER_AGGREGATE: &str = "label:user";

pub struct AllocationOracleClient {
    network_session_client: Client,
    oracle_base_endpoint: String,
}

impl AllocationOracleClient {
    pub fn new(base_url: String) -> Self {
        Self {
            network_session_client: Client::builder()
                .user_agent("Bison-Cost-Uplink/V2")
                .timeout(Duration::from_secs(60))
                .build()
                .expect("FATAL: Cost oracle client initialization failed."),
            oracle_base_endpoint: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ejecuta una consulta de asignación y devuelve el sobre crudo.
    async fn query_allocation(
        &self,
        window: &str,
        aggregate: &str,
        step: Option<&str>,
    ) -> Result<AllocationEnvelope, OracleError> {
        let mut query_parameters = vec![
            ("window".to_string(), window.to_string()),
            ("aggregate".to_string(), aggregate.to_string()),
        ];
        if let Some(step_expression) = step {
            query_parameters.push(("step".to_string(), step_expression.to_string()));
        }

        let target_url = format!("{}/allocation", self.oracle_base_endpoint);
        debug!("💰 [COST_ORACLE]: Querying allocation window [{}] by [{}].", window, aggregate);

        let network_response = self
            .network_session_client
            .get(&target_url)
            .query(&query_parameters)
            .send()
            .await?;

        if !network_response.status().is_success() {
            return Err(OracleError::Rejected(network_response.status().as_u16()));
        }

        Ok(network_response.json::<AllocationEnvelope>().await?)
    }
}

#[async_trait]
impl CostOracle for AllocationOracleClient {
    fn is_enabled(&self) -> bool {
        true
    }

    #[instrument(skip(self))]
    async fn usage_by_namespace(&self, window: &str) -> Result<Vec<NamespaceUsage>, OracleError> {
        let envelope = self.query_allocation(window, "namespace", None).await?;
        flatten_buckets(envelope)
    }

    #[instrument(skip(self))]
    async fn usage_by_user(&self, window: &str) -> Result<Vec<NamespaceUsage>, OracleError> {
        let envelope = self.query_allocation(window, USER_AGGREGATE, None).await?;
        flatten_buckets(envelope)
    }

    #[instrument(skip(self))]
    async fn allocation_for_namespace(
        &self,
        window: &str,
        namespace: &str,
    ) -> Result<Vec<NamespaceUsage>, OracleError> {
        let envelope = self.query_allocation(window, "namespace", None).await?;
        Ok(flatten_buckets(envelope)?
            .into_iter()
            .filter(|report_row| report_row.name == namespace)
            .collect())
    }

    #[instrument(skip(self))]
    async fn total_cost(&self, window: &str) -> Result<f64, OracleError> {
        let report_rows = self.usage_by_namespace(window).await?;
        Ok(report_rows.iter().map(|row| row.total_cost).sum())
    }

    #[instrument(skip(self))]
    async fn cost_trend(&self, window: &str) -> Result<Vec<CostTrendPoint>, OracleError> {
        let envelope = self.query_allocation(window, "namespace", Some("1d")).await?;
        buckets_to_trend(envelope)
    }
}
