// [libs/domain/billing/src/suspension.rs]
/*!
 * =================================================================
 * APARATO: SUSPENSION SIDE-EFFECT CONTROL (V2.2 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CUARENTENA Y REANUDACIÓN DE CARGAS DEL EQUIPO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. REPLICA MEMORY: El conteo previo de réplicas queda sellado en la
 *    anotación de origen antes del escalado a cero; la reanudación lo
 *    restaura y limpia la anotación.
 * 2. ORPHAN PURGE: Los pods sin dueño de los namespaces del equipo se
 *    purgan durante la cuarentena.
 * 3. NON-NEGATIVE GATE: La reanudación exige balance >= 0.
 * =================================================================
 */

use crate::errors::BillingError;
use bison_domain_tenancy::TeamService;
use bison_domain_wallet::WalletService;
use bison_infra_cluster::api::ANNOTATION_ORIGINAL_REPLICAS;
use bison_infra_cluster::ClusterControlApi;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct SuspensionControl {
    cluster_uplink: Arc<dyn ClusterControlApi>,
    team_service: TeamService,
    wallet_service: WalletService,
}

impl SuspensionControl {
    pub fn new(
        cluster_uplink: Arc<dyn ClusterControlApi>,
        team_service: TeamService,
        wallet_service: WalletService,
    ) -> Self {
        Self {
            cluster_uplink,
            team_service,
            wallet_service,
        }
    }

    /**
     * Pone al equipo en cuarentena: sello, escalado a cero y purga.
     *
     * # Logic:
     * Por cada namespace del equipo, los workloads con réplicas > 0
     * sellan su conteo en la anotación de origen y escalan a cero;
     * después se purgan los pods huérfanos.
     */
    #[instrument(skip(self))]
    pub async fn suspend(&self, team_name: &str) -> Result<(), BillingError> {
        self.team_service.set_suspended(team_name, true).await?;

        for namespace in self.team_service.namespaces_of(team_name).await? {
            for workload in self.cluster_uplink.list_workloads(&namespace.name).await? {
                if workload.replicas <= 0 {
                    continue;
                }
                self.cluster_uplink
                    .annotate_workload(
                        &namespace.name,
                        workload.kind,
                        &workload.name,
                        ANNOTATION_ORIGINAL_REPLICAS,
                        Some(workload.replicas.to_string()),
                    )
                    .await?;
                self.cluster_uplink
                    .scale_workload(&namespace.name, workload.kind, &workload.name, 0)
                    .await?;
            }

            for pod in self.cluster_uplink.list_pods(&namespace.name).await? {
                if pod.owner_references.is_empty() {
                    if let Err(purge_fault) =
                        self.cluster_uplink.delete_pod(&namespace.name, &pod.name).await
                    {
                        warn!(
                            "🧊 [SUSPEND_PURGE]: Orphan pod [{}/{}] eviction failed: {}",
                            namespace.name, pod.name, purge_fault
                        );
                    }
                }
            }
        }

        info!("🧊 [SUSPEND]: Team [{}] quarantined; workloads scaled to zero.", team_name);
        Ok(())
    }

    /**
     * Reanuda al equipo restaurando las réplicas selladas.
     *
     * # Errors:
     * - 'Precondition' si el balance sigue siendo negativo.
     */
    #[instrument(skip(self))]
    pub async fn resume(&self, team_name: &str) -> Result<(), BillingError> {
        let wallet_snapshot = self.wallet_service.get(team_name).await?;
        if wallet_snapshot.amount < 0.0 {
            return Err(BillingError::Precondition(format!(
                "team {} balance still negative ({:.2})",
                team_name, wallet_snapshot.amount
            )));
        }

        self.team_service.set_suspended(team_name, false).await?;

        for namespace in self.team_service.namespaces_of(team_name).await? {
            for workload in self.cluster_uplink.list_workloads(&namespace.name).await? {
                let Some(recorded_replicas) =
                    workload.annotations.get(ANNOTATION_ORIGINAL_REPLICAS)
                else {
                    continue;
                };
                let Ok(original_replicas) = recorded_replicas.parse::<i32>() else {
                    warn!(
                        "🧊 [RESUME]: Unreadable replica seal on [{}/{}]: {}",
                        namespace.name, workload.name, recorded_replicas
                    );
                    continue;
                };

                self.cluster_uplink
                    .scale_workload(&namespace.name, workload.kind, &workload.name, original_replicas)
                    .await?;
                self.cluster_uplink
                    .annotate_workload(
                        &namespace.name,
                        workload.kind,
                        &workload.name,
                        ANNOTATION_ORIGINAL_REPLICAS,
                        None,
                    )
                    .await?;
            }
        }

        info!("🧊 [RESUME]: Team [{}] restored to recorded replica counts.", team_name);
        Ok(())
    }
}
