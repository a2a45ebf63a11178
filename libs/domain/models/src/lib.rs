// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CONTROL PLANE DOMAIN CONTRACTS (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DE CONTRATOS SOBERANOS DEL PLANO DE CONTROL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CONTRACT SOVEREIGNTY: Toda estructura durable del sistema (blobs del
 *    particionado administrativo) y todo payload de la API viven aquí.
 * 2. TYPESHARE ALIGNMENT: Los contratos expuestos al Dashboard llevan el
 *    puente de tipos para la generación automática de interfaces.
 * 3. NOMINAL PURITY: Nomenclatura nominal absoluta en los módulos.
 *
 * # Mathematical Proof (Wire Determinism):
 * Los mapas de los contratos usan BTreeMap, garantizando que la
 * serialización JSON sea estable byte a byte entre exportaciones.
 * =================================================================
 */

pub mod alert;
pub mod audit;
pub mod billing_config;
pub mod control_plane;
pub mod onboarding;
pub mod project;
pub mod resource;
pub mod schedule;
pub mod scripts;
pub mod status;
pub mod team;
pub mod transfer;
pub mod wallet;

pub use alert::{AlertConfig, AlertKind, AlertRecord, AlertSeverity, ChannelType, NotifyChannel};
pub use audit::AuditEntry;
pub use billing_config::{BillingConfig, GracePeriodUnit, PriceEntry};
pub use control_plane::{ControlPlaneSshConfig, SshAuthMethod, REDACTED_SENTINEL};
pub use onboarding::{JobStatus, JobSubStep, NodePlatform, OnboardingJob, SubStepStatus};
pub use project::{MemberRole, Project, ProjectMember};
pub use resource::{ResourceCategory, ResourceDefinition};
pub use schedule::{AutoRechargePlan, RechargeCadence};
pub use scripts::{InitScript, ScriptGroup, ScriptPhase, PLATFORM_WILDCARD};
pub use status::{StatusSnapshot, TaskExecution, TaskStatus};
pub use team::{OwnerKind, OwnerReference, Team, TeamMode, RESERVED_TEAM_NAMES};
pub use transfer::{
    ApplyOutcome, ExportEnvelope, FieldChange, ImportPreview, ListChange, ListChangeKind,
    SectionPreview, EXPORT_VERSION, KNOWN_SECTIONS,
};
pub use wallet::{LedgerEntry, LedgerKind, WalletSnapshot};
