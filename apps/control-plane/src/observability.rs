// [apps/control-plane/src/observability.rs]
/*!
 * =================================================================
 * APARATO: OBSERVABILITY SNAPSHOT ASSEMBLER (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: APPLICATION SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: SALUD DE DEPENDENCIAS + CONTEOS + RASTRO DE TICKS
 * =================================================================
 */

use crate::state::AppState;
use bison_domain_models::status::{AggregateCounts, DependencyHealth, StatusSnapshot};
use bison_domain_tenancy::node_pools::{classify, NodePoolState};
use chrono::Utc;
use tracing::warn;

/// Límite de filas del task runner expuestas en la instantánea.
const RECENT_TASK_LIMIT: usize = 50;

/**
 * Ensambla la instantánea completa de la superficie de observabilidad.
 *
 * # Logic:
 * Las dependencias se sondean en vivo; un conteo fallido degrada a
 * cero con rastro en el log en vez de tumbar la instantánea.
 */
pub async fn assemble_snapshot(application_state: &AppState) -> StatusSnapshot {
    let mut dependencies = Vec::new();
    let mut counts = AggregateCounts::default();

    // --- UPLINK DEL CLUSTER ---
    let cluster_reachable = application_state.cluster_uplink.ping().await.is_ok();
    dependencies.push(DependencyHealth {
        name: "cluster".to_string(),
        reachable: cluster_reachable,
        detail: if cluster_reachable { "ok".to_string() } else { "unreachable".to_string() },
    });

    // --- ORÁCULO DE COSTOS ---
    let oracle_enabled = application_state.cost_oracle.is_enabled();
    dependencies.push(DependencyHealth {
        name: "cost-oracle".to_string(),
        reachable: oracle_enabled,
        detail: if oracle_enabled { "enabled".to_string() } else { "disabled".to_string() },
    });

    // --- CONTEOS AGREGADOS (degradación a cero ante fallos) ---
    match application_state.team_service.list().await {
        Ok(teams) => counts.teams = teams.len() as u32,
        Err(count_fault) => warn!("📊 [STATUS]: Team count failed: {}", count_fault),
    }
    match application_state.project_service.list(None).await {
        Ok(projects) => counts.projects = projects.len() as u32,
        Err(count_fault) => warn!("📊 [STATUS]: Project count failed: {}", count_fault),
    }
    match application_state.cluster_uplink.list_nodes().await {
        Ok(nodes) => {
            for node in &nodes {
                match classify(node) {
                    NodePoolState::Shared => counts.nodes_shared += 1,
                    NodePoolState::Exclusive(_) => counts.nodes_exclusive += 1,
                    NodePoolState::Disabled => counts.nodes_disabled += 1,
                    NodePoolState::Unmanaged => counts.nodes_unmanaged += 1,
                }
            }
        }
        Err(count_fault) => warn!("📊 [STATUS]: Node census failed: {}", count_fault),
    }
    match application_state.wallet_service.low_balance(0.0).await {
        Ok(negative_wallets) => counts.wallets_negative = negative_wallets.len() as u32,
        Err(count_fault) => warn!("📊 [STATUS]: Wallet census failed: {}", count_fault),
    }
    match application_state.onboarding.active_count().await {
        Ok(active_jobs) => counts.onboarding_active = active_jobs as u32,
        Err(count_fault) => warn!("📊 [STATUS]: Onboarding census failed: {}", count_fault),
    }

    StatusSnapshot {
        timestamp: Utc::now(),
        dependencies,
        counts,
        recent_tasks: application_state.task_runner.recent(RECENT_TASK_LIMIT),
    }
}
