// [apps/control-plane/src/state.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN STATE ORCHESTRATOR (V4.0 - GOLD MASTER)
 * CLASIFICACIÓN: APPLICATION STATE (ESTRATO L1-APP)
 * RESPONSABILIDAD: COMPOSICIÓN DE SERVICIOS, MOTORES Y ADAPTADORES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COMPOSITION ROOT: Todos los estratos (wallet, tenancy, billing,
 *    alerting, onboarding, transfer) se hidratan aquí una única vez y
 *    viajan como Arc compartidos hacia handlers y daemons.
 * 2. SEED PASS: La primera ignición siembra el catálogo de recursos,
 *    los grupos de scripts de fábrica y la política de facturación.
 * =================================================================
 */

use crate::audit::AuditTrail;
use crate::auth::TokenVault;
use crate::services::TaskRunner;
use bison_domain_alerting::{AlertEvaluator, HttpAlertTransport};
use bison_domain_billing::{AutoRechargeScheduler, BillingEngine, SuspensionControl};
use bison_domain_models::resource::default_resource_catalog;
use bison_domain_models::BillingConfig;
use bison_domain_onboarding::{OnboardingOrchestrator, ScriptCatalog};
use bison_domain_tenancy::{NodePoolController, ProjectService, TeamService};
use bison_domain_transfer::ConfigTransfer;
use bison_domain_wallet::WalletService;
use bison_infra_cluster::{names, BlobVault, ClusterControlApi};
use bison_infra_cost_oracle::CostOracle;
use bison_infra_ssh::SshConnector;
use std::sync::Arc;
use tracing::{debug, info};

/// Contenedor de estado compartido (Thread-Safe) del plano de control.
#[derive(Clone)]
pub struct AppState {
    pub cluster_uplink: Arc<dyn ClusterControlApi>,
    pub vault: BlobVault,
    pub cost_oracle: Arc<dyn CostOracle>,

    // --- ESTRATO L2: SERVICIOS DE DOMINIO ---
    pub wallet_service: WalletService,
    pub team_service: TeamService,
    pub project_service: ProjectService,
    pub node_pools: NodePoolController,
    pub suspension_control: SuspensionControl,
    pub script_catalog: ScriptCatalog,
    pub config_transfer: ConfigTransfer,

    // --- MOTORES PERIÓDICOS Y WORKERS ---
    pub billing_engine: Arc<BillingEngine>,
    pub recharge_scheduler: Arc<AutoRechargeScheduler>,
    pub alert_evaluator: Arc<AlertEvaluator>,
    pub onboarding: Arc<OnboardingOrchestrator>,
    pub task_runner: Arc<TaskRunner>,

    // --- ESTRATO L4: SEGURIDAD Y RASTRO ---
    pub token_vault: Arc<TokenVault>,
    pub audit_trail: AuditTrail,
}

impl AppState {
    /**
     * Forja el estado maestro inyectando los bindings del despliegue.
     */
    pub fn new(
        cluster_uplink: Arc<dyn ClusterControlApi>,
        cost_oracle: Arc<dyn CostOracle>,
        ssh_connector: Arc<dyn SshConnector>,
    ) -> Self {
        debug!("🧬 [APP_STATE]: Executing sovereign ignition sequence V4.0...");

        let vault = BlobVault::new(Arc::clone(&cluster_uplink));

        let wallet_service = WalletService::new(vault.clone());
        let team_service = TeamService::new(Arc::clone(&cluster_uplink));
        let project_service = ProjectService::new(Arc::clone(&cluster_uplink));
        let node_pools = NodePoolController::new(Arc::clone(&cluster_uplink));
        let suspension_control = SuspensionControl::new(
            Arc::clone(&cluster_uplink),
            team_service.clone(),
            wallet_service.clone(),
        );

        let billing_engine = Arc::new(BillingEngine::new(
            vault.clone(),
            wallet_service.clone(),
            team_service.clone(),
            project_service.clone(),
            suspension_control.clone(),
            Arc::clone(&cost_oracle),
        ));
        let recharge_scheduler =
            Arc::new(AutoRechargeScheduler::new(vault.clone(), wallet_service.clone()));
        let alert_evaluator = Arc::new(AlertEvaluator::new(
            vault.clone(),
            wallet_service.clone(),
            Arc::new(HttpAlertTransport::new()),
        ));

        let script_catalog = ScriptCatalog::new(vault.clone());
        let onboarding = Arc::new(OnboardingOrchestrator::new(
            vault.clone(),
            Arc::clone(&cluster_uplink),
            script_catalog.clone(),
            node_pools.clone(),
            ssh_connector,
        ));

        Self {
            config_transfer: ConfigTransfer::new(vault.clone()),
            audit_trail: AuditTrail::new(vault.clone()),
            token_vault: Arc::new(TokenVault::from_environment()),
            task_runner: Arc::new(TaskRunner::new()),
            wallet_service,
            team_service,
            project_service,
            node_pools,
            suspension_control,
            script_catalog,
            billing_engine,
            recharge_scheduler,
            alert_evaluator,
            onboarding,
            cost_oracle,
            vault,
            cluster_uplink,
        }
    }

    /**
     * Siembra los blobs de configuración ausentes en la primera ignición.
     */
    pub async fn seed_defaults(&self) -> Result<(), bison_infra_cluster::ClusterError> {
        if self
            .vault
            .read_document::<Vec<bison_domain_models::ResourceDefinition>>(
                names::RESOURCE_CONFIG,
                "resources",
            )
            .await?
            .is_none()
        {
            self.vault
                .write_document(names::RESOURCE_CONFIG, "resources", &default_resource_catalog())
                .await?;
            info!("🌱 [SEED_PASS]: Default resource catalog sealed.");
        }

        if self
            .vault
            .read_document::<BillingConfig>(names::BILLING_CONFIG, names::SINGLETON_KEY)
            .await?
            .is_none()
        {
            self.vault
                .write_document(names::BILLING_CONFIG, names::SINGLETON_KEY, &BillingConfig::default())
                .await?;
            info!("🌱 [SEED_PASS]: Default billing policy sealed (disabled).");
        }

        if let Err(seed_fault) = self.script_catalog.seed_builtins().await {
            // El catálogo degradará a vacío; la ignición continúa.
            tracing::warn!("🌱 [SEED_PASS]: Script catalog seeding failed: {}", seed_fault);
        }

        Ok(())
    }

    /// Arma los bucles periódicos del núcleo.
    pub fn launch_background_loops(&self) {
        self.task_runner.launch_core_loops(
            Arc::clone(&self.billing_engine),
            Arc::clone(&self.recharge_scheduler),
            Arc::clone(&self.alert_evaluator),
        );
    }
}
