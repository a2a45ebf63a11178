/**
 * =================================================================
 * APARATO: END-TO-END BILLING INTEGRATION TEST (V1.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el circuito completo equipo -> débito -> alerta
 *           sobre el estado maestro del plano de control.
 * =================================================================
 */

use async_trait::async_trait;
use bison_control_plane::state::AppState;
use bison_domain_billing::CycleOutcome;
use bison_domain_models::resource::default_resource_catalog;
use bison_domain_models::{
    AlertConfig, AlertKind, BillingConfig, LedgerKind, Project, Team, TeamMode,
};
use bison_infra_cluster::{names, ClusterControlApi, MemoryCluster};
use bison_infra_cost_oracle::{CostOracle, CostTrendPoint, NamespaceUsage, OracleError};
use bison_infra_ssh::{SshConnector, SshEndpoint, SshError, SshExecutor};
use chrono::Utc;
use std::sync::Arc;

struct ScriptedOracle;

#[async_trait]
impl CostOracle for ScriptedOracle {
    fn is_enabled(&self) -> bool {
        true
    }
    async fn usage_by_namespace(&self, _window: &str) -> Result<Vec<NamespaceUsage>, OracleError> {
        Ok(vec![NamespaceUsage {
            name: "ns-a".to_string(),
            cpu_core_hours: 10.0,
            ram_gb_hours: 20.0,
            gpu_hours: 2.0,
            ..NamespaceUsage::default()
        }])
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

struct InertSsh;

#[async_trait]
impl SshConnector for InertSsh {
    async fn connect(&self, _endpoint: &SshEndpoint) -> Result<Box<dyn SshExecutor>, SshError> {
        Err(SshError::Dial("inert connector".to_string()))
    }
}

async fn forge_state() -> AppState {
    std::env::set_var("BISON_ADMIN_PASSWORD", "integration-secret");
    let cluster: Arc<dyn ClusterControlApi> = Arc::new(MemoryCluster::new());
    let state = AppState::new(cluster, Arc::new(ScriptedOracle), Arc::new(InertSsh));
    state.seed_defaults().await.unwrap();
    state
}

#[tokio::test]
async fn certify_full_billing_circuit() {
    let state = forge_state().await;

    // 1. TENENCIA: equipo con su proyecto.
    state
        .team_service
        .create(&Team { name: "t1".to_string(), mode: TeamMode::Shared, ..Team::default() })
        .await
        .unwrap();
    state
        .project_service
        .create(&Project { name: "ns-a".to_string(), team: "t1".to_string(), ..Project::default() })
        .await
        .unwrap();

    // 2. POLÍTICA: precios del escenario y motor habilitado.
    let mut catalog = default_resource_catalog();
    for definition in &mut catalog {
        definition.price = match definition.name.as_str() {
            "cpu" => 0.10,
            "memory" => 0.05,
            _ => 5.00,
        };
    }
    state.vault.write_document(names::RESOURCE_CONFIG, "resources", &catalog).await.unwrap();
    let config = BillingConfig { enabled: true, ..BillingConfig::default() };
    state
        .vault
        .write_document(names::BILLING_CONFIG, names::SINGLETON_KEY, &config)
        .await
        .unwrap();

    // 3. BILLETERA: fondeo inicial.
    state.wallet_service.recharge("t1", 50.0, "admin", "seed").await.unwrap();

    // 4. PASADA DE FACTURACIÓN: débito de 12.00.
    let outcome = state.billing_engine.run_cycle_at(Utc::now()).await.unwrap();
    assert_eq!(outcome, CycleOutcome::Completed);

    let snapshot = state.wallet_service.get("t1").await.unwrap();
    assert!((snapshot.amount - 38.0).abs() < 1e-9);
    let ledger = state.wallet_service.history("t1", 5).await.unwrap();
    assert_eq!(ledger[0].kind, LedgerKind::Deduction);

    // 5. EVALUADOR DE ALERTAS: el balance queda bajo el umbral.
    state
        .alert_evaluator
        .save_config(&AlertConfig { balance_threshold: 40.0, channels: Vec::new() })
        .await
        .unwrap();
    let emitted = state.alert_evaluator.run_cycle().await.unwrap();
    assert_eq!(emitted, 1);

    let history = state.alert_evaluator.history(5).await.unwrap();
    assert_eq!(history[0].kind, AlertKind::LowBalance);
    assert_eq!(history[0].target, "t1");
    println!("✅ INTEGRATION: Full billing circuit certified.");
}
