/**
 * =================================================================
 * APARATO: BILLING DEBIT CYCLE TEST (V1.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la pasada de débito con precios del catálogo.
 * =================================================================
 */

use async_trait::async_trait;
use bison_domain_billing::{BillingEngine, CycleOutcome, SuspensionControl};
use bison_domain_models::resource::default_resource_catalog;
use bison_domain_models::{BillingConfig, LedgerKind, Project, Team, TeamMode};
use bison_domain_tenancy::{ProjectService, TeamService};
use bison_domain_wallet::WalletService;
use bison_infra_cluster::{names, BlobVault, ClusterControlApi, MemoryCluster};
use bison_infra_cost_oracle::{CostOracle, CostTrendPoint, NamespaceUsage, OracleError};
use chrono::Utc;
use std::sync::Arc;

/// Oráculo guionado para el proving grounds.
struct ScriptedOracle {
    enabled: bool,
    rows: Vec<NamespaceUsage>,
}

#[async_trait]
impl CostOracle for ScriptedOracle {
    fn is_enabled(&self) -> bool {
        self.enabled
    }
    async fn usage_by_namespace(&self, _window: &str) -> Result<Vec<NamespaceUsage>, OracleError> {
        Ok(self.rows.clone())
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

struct Rig {
    vault: BlobVault,
    wallet: WalletService,
    engine: BillingEngine,
}

async fn forge_rig(oracle: ScriptedOracle) -> Rig {
    let cluster: Arc<dyn ClusterControlApi> = Arc::new(MemoryCluster::new());
    let vault = BlobVault::new(cluster.clone());
    let wallet = WalletService::new(vault.clone());
    let teams = TeamService::new(cluster.clone());
    let projects = ProjectService::new(cluster.clone());
    let suspension = SuspensionControl::new(cluster.clone(), teams.clone(), wallet.clone());

    // Equipo t1 con el proyecto ns-a.
    teams
        .create(&Team {
            name: "t1".to_string(),
            mode: TeamMode::Shared,
            ..Team::default()
        })
        .await
        .unwrap();
    projects
        .create(&Project {
            name: "ns-a".to_string(),
            team: "t1".to_string(),
            ..Project::default()
        })
        .await
        .unwrap();

    // Catálogo con precios: cpu 0.10, memory 0.05, gpu 5.00.
    let mut catalog = default_resource_catalog();
    for definition in &mut catalog {
        definition.price = match definition.name.as_str() {
            "cpu" => 0.10,
            "memory" => 0.05,
            _ => 5.00,
        };
    }
    vault.write_document(names::RESOURCE_CONFIG, "resources", &catalog).await.unwrap();

    // Política habilitada, ventana horaria, gracia de 3 días.
    let config = BillingConfig {
        enabled: true,
        ..BillingConfig::default()
    };
    vault.write_document(names::BILLING_CONFIG, names::SINGLETON_KEY, &config).await.unwrap();

    let engine = BillingEngine::new(
        vault.clone(),
        wallet.clone(),
        teams,
        projects,
        suspension,
        Arc::new(oracle),
    );
    Rig { vault, wallet, engine }
}

fn scenario_rows() -> Vec<NamespaceUsage> {
    vec![NamespaceUsage {
        name: "ns-a".to_string(),
        cpu_core_hours: 10.0,
        ram_gb_hours: 20.0,
        gpu_hours: 2.0,
        minutes: 60.0,
        ..NamespaceUsage::default()
    }]
}

#[tokio::test]
async fn certify_debit_path_scenario() {
    let rig = forge_rig(ScriptedOracle { enabled: true, rows: scenario_rows() }).await;
    rig.wallet.recharge("t1", 50.0, "op", "seed").await.unwrap();

    let outcome = rig.engine.run_cycle_at(Utc::now()).await.unwrap();
    assert_eq!(outcome, CycleOutcome::Completed);

    // 10×0.10 + 20×0.05 + 2×5.00 = 12.00; balance 38.00.
    let snapshot = rig.wallet.get("t1").await.unwrap();
    assert!((snapshot.amount - 38.0).abs() < 1e-9, "Balance {} != 38.00", snapshot.amount);
    assert!(snapshot.overdue_at.is_none());

    let ledger = rig.wallet.history("t1", 10).await.unwrap();
    let tail = &ledger[0];
    assert_eq!(tail.kind, LedgerKind::Deduction);
    assert!((tail.amount + 12.0).abs() < 1e-9, "Asiento {} != -12.00", tail.amount);
    assert!((tail.balance - 38.0).abs() < 1e-9);
    println!("✅ BILLING: Debit path scenario certified.");
}

#[tokio::test]
async fn certify_disabled_policy_skips() {
    let rig = forge_rig(ScriptedOracle { enabled: true, rows: scenario_rows() }).await;

    // Política apagada: la pasada aborta temprano sin débitos.
    let config = BillingConfig::default();
    rig.vault
        .write_document(names::BILLING_CONFIG, names::SINGLETON_KEY, &config)
        .await
        .unwrap();

    match rig.engine.run_cycle_at(Utc::now()).await.unwrap() {
        CycleOutcome::Skipped(reason) => assert!(reason.contains("billing disabled")),
        other => panic!("Se esperaba Skipped, llegó {:?}", other),
    }
    assert!(rig.wallet.history("t1", 10).await.unwrap().is_empty());
    println!("✅ BILLING: Disabled policy skip certified.");
}

#[tokio::test]
async fn certify_absent_oracle_skips() {
    let rig = forge_rig(ScriptedOracle { enabled: false, rows: scenario_rows() }).await;

    match rig.engine.run_cycle_at(Utc::now()).await.unwrap() {
        CycleOutcome::Skipped(reason) => assert!(reason.contains("oracle")),
        other => panic!("Se esperaba Skipped, llegó {:?}", other),
    }
    println!("✅ BILLING: Absent oracle skip certified.");
}

#[tokio::test]
async fn certify_unpriced_resources_use_oracle_costs() {
    let rig = forge_rig(ScriptedOracle {
        enabled: true,
        rows: vec![NamespaceUsage {
            name: "ns-a".to_string(),
            cpu_core_hours: 10.0,
            cpu_cost: 3.25,
            ram_gb_hours: 5.0,
            ram_cost: 1.75,
            ..NamespaceUsage::default()
        }],
    })
    .await;

    // Catálogo sin precios: las columnas del oráculo mandan tal cual.
    rig.vault
        .write_document(names::RESOURCE_CONFIG, "resources", &default_resource_catalog())
        .await
        .unwrap();
    rig.wallet.recharge("t1", 10.0, "op", "seed").await.unwrap();

    rig.engine.run_cycle_at(Utc::now()).await.unwrap();
    let snapshot = rig.wallet.get("t1").await.unwrap();
    assert!((snapshot.amount - 5.0).abs() < 1e-9, "10 - (3.25+1.75) = 5, llegó {}", snapshot.amount);
    println!("✅ BILLING: Oracle cost fallback certified.");
}
