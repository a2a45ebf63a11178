// [libs/domain/models/src/onboarding.rs]
/*!
 * =================================================================
 * APARATO: NODE ONBOARDING CONTRACTS (V2.3 - PRODUCTION MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: GRAMÁTICA DEL TRABAJO DE INCORPORACIÓN DE NODOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NINE-STEP LADDER: El trabajo avanza por nueve escalones sellados;
 *    cada transición persiste índice, mensaje y sub-pasos.
 * 2. TERMINAL INTEGRITY: Los estados success/failed/cancelled son
 *    terminales; ninguna actualización posterior los sobreescribe.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Total nominal de escalones del flujo de incorporación.
pub const ONBOARDING_STEP_TOTAL: u32 = 9;

/// Estado del trabajo de incorporación.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Success,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Los estados terminales sellan el registro contra sobreescrituras.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Failed | JobStatus::Cancelled)
    }

    /// Estados que vetan un nuevo trabajo para la misma IP.
    pub fn occupies_target(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Running)
    }
}

/// Plataforma detectada en el host remoto.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NodePlatform {
    /// Identificador del OS según /etc/os-release ('ubuntu', 'centos').
    pub os: String,
    pub version: String,
    /// Arquitectura normalizada ('amd64', 'arm64').
    pub arch: String,
}

/// Resultado de un sub-paso (un grupo de scripts) dentro de un escalón.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubStepStatus {
    Success,
    Failed,
    Skipped,
}

/// Rastro de ejecución de un grupo de scripts.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSubStep {
    /// Nombre del grupo de scripts ejecutado.
    pub name: String,
    pub status: SubStepStatus,
    #[serde(default)]
    pub detail: String,
}

/// Registro durable del trabajo de incorporación de un nodo remoto.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingJob {
    /// Identificador unívoco universal del trabajo (UUID v4).
    pub id: String,
    /// IP objetivo del aprovisionamiento SSH.
    pub target_ip: String,
    /// Hostname detectado en el escalón de plataforma.
    #[serde(default)]
    pub node_name: String,
    #[serde(default)]
    pub platform: NodePlatform,
    pub status: JobStatus,
    /// Escalón actual (1..=9).
    pub step_index: u32,
    pub step_total: u32,
    #[serde(default)]
    pub step_message: String,
    #[serde(default)]
    pub sub_steps: Vec<JobSubStep>,
    #[serde(default)]
    pub error: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl OnboardingJob {
    /// Forja un trabajo recién aceptado, aún sin worker asignado.
    pub fn accepted(id: String, target_ip: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            target_ip,
            node_name: String::new(),
            platform: NodePlatform::default(),
            status: JobStatus::Pending,
            step_index: 0,
            step_total: ONBOARDING_STEP_TOTAL,
            step_message: "queued".to_string(),
            sub_steps: Vec::new(),
            error: String::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}
