// [libs/infra/cluster/src/names.rs]
/*!
 * =================================================================
 * APARATO: BLOB NAME REGISTRY (V1.0 - SOBERANO)
 * CLASIFICACIÓN: INFRASTRUCTURE CONTRACT (ESTRATO L3)
 * RESPONSABILIDAD: NOMBRES CANÓNICOS DE LOS BLOBS ADMINISTRATIVOS
 * =================================================================
 */

/// Mapa equipo -> instantánea de billetera.
pub const BALANCES: &str = "balances";

/// Mapa equipo -> ledger serializado.
pub const RECHARGE_HISTORY: &str = "recharge-history";

/// Mapa equipo -> plan de recarga automática.
pub const AUTO_RECHARGE: &str = "auto-recharge";

/// Configuración del evaluador de alertas (clave 'config').
pub const ALERT_CONFIG: &str = "alert-config";

/// Historial de señales emitidas (clave 'entries').
pub const ALERT_HISTORY: &str = "alert-history";

/// Catálogo de definiciones de recursos (clave 'resources').
pub const RESOURCE_CONFIG: &str = "resource-config";

/// Catálogo de grupos de scripts (clave 'groups').
pub const INIT_SCRIPTS: &str = "init-scripts";

/// Mapa id -> trabajo de incorporación.
pub const ONBOARDING_JOBS: &str = "onboarding-jobs";

/// Política del motor de facturación (clave 'config').
pub const BILLING_CONFIG: &str = "billing-config";

/// Credenciales SSH del plano de control (clave 'config').
pub const CONTROL_PLANE_CONFIG: &str = "control-plane-config";

/// Rastro de auditoría (clave 'entries').
pub const AUDIT_LOGS: &str = "audit-logs";

/// Clave de documento único dentro de un blob de configuración.
pub const SINGLETON_KEY: &str = "config";
