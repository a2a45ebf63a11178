// [libs/domain/billing/src/engine.rs]
/*!
 * =================================================================
 * APARATO: BILLING CYCLE ENGINE (V4.1 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PASADA HORARIA DE DÉBITO Y MÁQUINA DE MOROSIDAD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WINDOW DUALITY: El intervalo configurado es a la vez el periodo
 *    del ciclo y la ventana de consulta al oráculo de costos.
 * 2. PARTIAL PROGRESS: El fallo de un equipo se registra y la pasada
 *    continúa; la pasada no es transaccional.
 * 3. OVERDUE SOVEREIGNTY: Solo este motor sella y limpia 'overdue_at';
 *    la expiración de la gracia dispara la cuarentena.
 * =================================================================
 */

use crate::errors::BillingError;
use crate::pricing::{round_currency, PriceTable};
use crate::suspension::SuspensionControl;
use bison_domain_models::resource::default_resource_catalog;
use bison_domain_models::{BillingConfig, ResourceDefinition};
use bison_domain_tenancy::{ProjectService, TeamService};
use bison_domain_wallet::{grace, WalletService};
use bison_infra_cluster::{names, BlobVault};
use bison_infra_cost_oracle::CostOracle;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Veredicto de una pasada de un motor periódico.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    /// La pasada abortó temprano por configuración; el motivo queda sellado.
    Skipped(String),
}

pub struct BillingEngine {
    vault: BlobVault,
    wallet_service: WalletService,
    team_service: TeamService,
    project_service: ProjectService,
    suspension_control: SuspensionControl,
    cost_oracle: Arc<dyn CostOracle>,
}

impl BillingEngine {
    pub fn new(
        vault: BlobVault,
        wallet_service: WalletService,
        team_service: TeamService,
        project_service: ProjectService,
        suspension_control: SuspensionControl,
        cost_oracle: Arc<dyn CostOracle>,
    ) -> Self {
        Self {
            vault,
            wallet_service,
            team_service,
            project_service,
            suspension_control,
            cost_oracle,
        }
    }

    /// Política viva del motor; por defecto cuando el blob aún no existe.
    pub async fn load_config(&self) -> Result<BillingConfig, BillingError> {
        Ok(self
            .vault
            .read_document::<BillingConfig>(names::BILLING_CONFIG, names::SINGLETON_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn load_resource_catalog(&self) -> Result<Vec<ResourceDefinition>, BillingError> {
        Ok(self
            .vault
            .read_document::<Vec<ResourceDefinition>>(names::RESOURCE_CONFIG, "resources")
            .await?
            .unwrap_or_else(default_resource_catalog))
    }

    /// Pasada completa anclada al instante presente.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, BillingError> {
        self.run_cycle_at(Utc::now()).await
    }

    /**
     * Pasada completa del ciclo de facturación.
     *
     * # Logic:
     * 1. Carga de política; aborto temprano si el motor u oráculo están
     *    apagados.
     * 2. Consulta de uso por namespace sobre la ventana del intervalo.
     * 3. Atribución namespace -> equipo y débito del costo agregado.
     * 4. Evaluación de la máquina morosidad/gracia/cuarentena.
     */
    #[instrument(skip(self))]
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> Result<CycleOutcome, BillingError> {
        let config = self.load_config().await?;
        if !config.enabled {
            return Ok(CycleOutcome::Skipped("billing disabled".to_string()));
        }
        if !self.cost_oracle.is_enabled() {
            return Ok(CycleOutcome::Skipped("cost oracle disabled".to_string()));
        }

        let window_expression = format!("{}h", config.interval);
        let usage_rows = self.cost_oracle.usage_by_namespace(&window_expression).await?;
        let namespace_index = self.project_service.namespace_team_index().await?;

        let price_table = PriceTable::resolve(&config, &self.load_resource_catalog().await?);

        // --- ATRIBUCIÓN DE COSTO POR EQUIPO ---
        let mut team_costs: BTreeMap<String, f64> = BTreeMap::new();
        for usage_row in &usage_rows {
            let Some(owning_team) = namespace_index.get(&usage_row.name) else {
                continue;
            };
            *team_costs.entry(owning_team.clone()).or_insert(0.0) +=
                price_table.cost_of(usage_row);
        }

        // --- DÉBITO (progreso parcial: un equipo fallido no aborta) ---
        for (team_name, accumulated_cost) in &team_costs {
            let debit_amount = round_currency(*accumulated_cost);
            if debit_amount <= 0.0 {
                continue;
            }
            let debit_reason = format!("usage {} window", window_expression);
            if let Err(debit_fault) = self
                .wallet_service
                .deduct(team_name, debit_amount, &debit_reason)
                .await
            {
                error!(
                    "💳 [BILLING_CYCLE]: Debit failed for [{}], continuing: {}",
                    team_name, debit_fault
                );
            }
        }

        self.evaluate_overdue_machine(&config, now).await?;

        info!(
            "💳 [BILLING_CYCLE]: Pass sealed; {} teams billed over {}.",
            team_costs.len(),
            window_expression
        );
        Ok(CycleOutcome::Completed)
    }

    /**
     * Máquina de estados de morosidad sobre todas las billeteras.
     *
     * # Logic:
     * balance >= 0 con sello -> limpiar. balance < 0 sin sello -> sellar
     * ahora. balance < 0 con gracia vencida -> cuarentena del equipo si
     * no estaba ya en ella.
     */
    async fn evaluate_overdue_machine(
        &self,
        config: &BillingConfig,
        now: DateTime<Utc>,
    ) -> Result<(), BillingError> {
        for wallet_snapshot in self.wallet_service.get_all().await? {
            let team_name = wallet_snapshot.team.clone();
            let verdict: Result<(), BillingError> = async {
                if wallet_snapshot.amount >= 0.0 {
                    if wallet_snapshot.overdue_at.is_some() {
                        self.wallet_service.set_overdue_at(&team_name, None).await?;
                        info!("💳 [OVERDUE_CLEAR]: Team [{}] returned to solvency.", team_name);
                    }
                    return Ok(());
                }

                match wallet_snapshot.overdue_at {
                    None => {
                        self.wallet_service.set_overdue_at(&team_name, Some(now)).await?;
                        warn!(
                            "💳 [OVERDUE_SEAL]: Team [{}] crossed below zero ({:.2}); grace window opened.",
                            team_name, wallet_snapshot.amount
                        );
                    }
                    Some(overdue_since) => {
                        let grace_expired = grace::is_grace_expired(
                            overdue_since,
                            now,
                            config.grace_period_value,
                            config.grace_period_unit,
                        );
                        if grace_expired {
                            let team = self.team_service.get(&team_name).await?;
                            if !team.suspended {
                                warn!(
                                    "💳 [GRACE_EXPIRED]: Team [{}] grace exhausted; quarantining.",
                                    team_name
                                );
                                self.suspension_control.suspend(&team_name).await?;
                            }
                        }
                    }
                }
                Ok(())
            }
            .await;

            if let Err(team_fault) = verdict {
                error!(
                    "💳 [OVERDUE_MACHINE]: Evaluation failed for [{}], continuing: {}",
                    team_name, team_fault
                );
            }
        }
        Ok(())
    }
}
