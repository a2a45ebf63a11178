// [libs/infra/ssh/src/errors.rs]
/*!
 * =================================================================
 * APARATO: SSH ERROR CATALOG (V1.1 - SOBERANO)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DEL ENLACE REMOTO
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SshError {
    /// Fallo de socket o de resolución del host remoto.
    #[error("[L3_SSH_NET_FAULT]: DIAL_FAILED -> {0}")]
    Dial(String),

    /// Handshake o autenticación rechazados por el host.
    #[error("[L3_SSH_AUTH_FAULT]: AUTH_REJECTED -> {0}")]
    Auth(String),

    /// Fallo del protocolo durante la ejecución del comando.
    #[error("[L3_SSH_EXEC_FAULT]: CHANNEL_COLLAPSE -> {0}")]
    Channel(String),

    /// El worker bloqueante terminó de forma anómala.
    #[error("[L3_SSH_RUNTIME_FAULT]: BLOCKING_WORKER_LOST -> {0}")]
    Runtime(String),
}

impl From<ssh2::Error> for SshError {
    fn from(fault: ssh2::Error) -> Self {
        SshError::Channel(fault.to_string())
    }
}

impl From<std::io::Error> for SshError {
    fn from(fault: std::io::Error) -> Self {
        SshError::Dial(fault.to_string())
    }
}
