// [libs/domain/models/src/status.rs]
/*!
 * =================================================================
 * APARATO: OBSERVABILITY SURFACE CONTRACTS (V1.2 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: INSTANTÁNEA DE SALUD Y RASTRO DEL TASK RUNNER
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Retención del anillo de ejecuciones del task runner.
pub const TASK_RING_RETENTION: usize = 1000;

/// Veredicto de una pasada de un bucle periódico.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Success,
    Failed,
    /// La pasada abortó temprano por configuración (motor u oráculo apagado).
    Skipped,
}

/// Fila de ejecución registrada por el task runner al cierre de cada pasada.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskExecution {
    /// Nombre del bucle ('billing', 'auto-recharge', 'alerts').
    pub task: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Salud de una dependencia externa del plano de control.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyHealth {
    pub name: String,
    pub reachable: bool,
    #[serde(default)]
    pub detail: String,
}

/// Conteos agregados del estado del cluster gestionado.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCounts {
    pub teams: u32,
    pub projects: u32,
    pub nodes_shared: u32,
    pub nodes_exclusive: u32,
    pub nodes_disabled: u32,
    pub nodes_unmanaged: u32,
    pub wallets_negative: u32,
    pub onboarding_active: u32,
}

/// Instantánea completa expuesta por la superficie de observabilidad.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub timestamp: DateTime<Utc>,
    pub dependencies: Vec<DependencyHealth>,
    pub counts: AggregateCounts,
    /// Ejecuciones recientes del task runner, la más nueva primero.
    pub recent_tasks: Vec<TaskExecution>,
}
