// [libs/infra/ssh/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SSH EXECUTION SEAM (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CONTRATO DE EJECUCIÓN REMOTA PARA EL ONBOARDING
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SEAM FIRST: El orquestador consume los traits 'SshConnector' y
 *    'SshExecutor'; el binding real (ssh2 sobre hilos bloqueantes) y los
 *    dobles de prueba comparten el mismo contrato.
 * 2. HOST-KEY POSTURE: La llave del host remoto se ignora; el endurecido
 *    con known-hosts queda como extensión de despliegue.
 * =================================================================
 */

pub mod errors;
pub mod executor;

pub use errors::SshError;
pub use executor::BlockingSshConnector;

use async_trait::async_trait;

/// Material de autenticación contra el host remoto.
#[derive(Debug, Clone)]
pub enum SshAuth {
    Password(String),
    /// Llave privada en formato PEM.
    PrivateKey(String),
}

/// Coordenadas de un host alcanzable por SSH.
#[derive(Debug, Clone)]
pub struct SshEndpoint {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub auth: SshAuth,
}

/// Resultado de un comando remoto.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub exit_status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_status == 0
    }
}

/// Sesión lógica capaz de ejecutar comandos sobre un host.
#[async_trait]
pub trait SshExecutor: Send + Sync {
    /// Ejecuta un comando directo y captura su salida completa.
    async fn run(&self, command: &str) -> Result<CommandOutput, SshError>;

    /// Ejecuta un comando entubando 'stdin_payload' por la entrada estándar.
    async fn run_with_stdin(
        &self,
        command: &str,
        stdin_payload: &str,
    ) -> Result<CommandOutput, SshError>;
}

/// Fábrica de sesiones hacia endpoints arbitrarios.
#[async_trait]
pub trait SshConnector: Send + Sync {
    async fn connect(&self, endpoint: &SshEndpoint) -> Result<Box<dyn SshExecutor>, SshError>;
}
