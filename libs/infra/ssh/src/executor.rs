// [libs/infra/ssh/src/executor.rs]
/*!
 * =================================================================
 * APARATO: BLOCKING SSH EXECUTOR (V2.1 - GOLD MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE BINDING (ESTRATO L3)
 * RESPONSABILIDAD: EJECUCIÓN REMOTA SOBRE ssh2 EN HILOS BLOQUEANTES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ISOLATED DIALS: Cada comando abre su propia sesión; un canal roto
 *    jamás contamina al comando siguiente del flujo de onboarding.
 * 2. RUNTIME BRIDGE: ssh2 es bloqueante; todo el trabajo corre dentro
 *    de 'spawn_blocking' para no congelar el reactor de Tokio.
 *
 * # Invariante:
 * El orquestador acota cada comando con su propio deadline; la sesión
 * porta además un timeout duro de protocolo como red de contención.
 * =================================================================
 */

use crate::errors::SshError;
use crate::{CommandOutput, SshAuth, SshConnector, SshEndpoint, SshExecutor};
use async_trait::async_trait;
use ssh2::Session;
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, instrument};

/// Timeout del dial TCP hacia el host remoto.
const DIAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout duro de protocolo para operaciones de la sesión (ms).
const SESSION_TIMEOUT_MILLIS: u32 = 600_000;

/// Fábrica de sesiones sobre ssh2.
pub struct BlockingSshConnector;

#[async_trait]
impl SshConnector for BlockingSshConnector {
    async fn connect(&self, endpoint: &SshEndpoint) -> Result<Box<dyn SshExecutor>, SshError> {
        Ok(Box::new(Ssh2Executor {
            endpoint: endpoint.clone(),
        }))
    }
}

/// Ejecutor con re-dial por comando sobre un endpoint fijo.
pub struct Ssh2Executor {
    endpoint: SshEndpoint,
}

impl Ssh2Executor {
    /// Abre y autentica una sesión bloqueante contra el endpoint.
    fn open_session(endpoint: &SshEndpoint) -> Result<Session, SshError> {
        let socket_address = format!("{}:{}", endpoint.host, endpoint.port)
            .to_socket_addrs()
            .map_err(|fault| SshError::Dial(fault.to_string()))?
            .next()
            .ok_or_else(|| SshError::Dial(format!("unresolvable host {}", endpoint.host)))?;

        let tcp_stream = TcpStream::connect_timeout(&socket_address, DIAL_TIMEOUT)?;

        let mut session = Session::new().map_err(|fault| SshError::Dial(fault.to_string()))?;
        session.set_timeout(SESSION_TIMEOUT_MILLIS);
        session.set_tcp_stream(tcp_stream);
        session
            .handshake()
            .map_err(|fault| SshError::Auth(format!("handshake: {}", fault)))?;

        match &endpoint.auth {
            SshAuth::Password(password) => session
                .userauth_password(&endpoint.user, password)
                .map_err(|fault| SshError::Auth(fault.to_string()))?,
            SshAuth::PrivateKey(private_key_pem) => session
                .userauth_pubkey_memory(&endpoint.user, None, private_key_pem, None)
                .map_err(|fault| SshError::Auth(fault.to_string()))?,
        }

        if !session.authenticated() {
            return Err(SshError::Auth("authentication incomplete".to_string()));
        }
        Ok(session)
    }

    /// Ejecuta el comando dentro de una sesión fresca, con stdin opcional.
    fn execute_blocking(
        endpoint: &SshEndpoint,
        command: &str,
        stdin_payload: Option<&str>,
    ) -> Result<CommandOutput, SshError> {
        let session = Self::open_session(endpoint)?;
        let mut channel = session.channel_session()?;
        channel.exec(command)?;

        if let Some(payload) = stdin_payload {
            channel.write_all(payload.as_bytes())?;
            channel.send_eof()?;
        }

        let mut stdout_buffer = String::new();
        channel.read_to_string(&mut stdout_buffer)?;

        let mut stderr_buffer = String::new();
        channel.stderr().read_to_string(&mut stderr_buffer)?;

        channel.wait_close()?;
        let exit_status = channel.exit_status()?;

        Ok(CommandOutput {
            exit_status,
            stdout: stdout_buffer,
            stderr: stderr_buffer,
        })
    }

    async fn dispatch(
        &self,
        command: String,
        stdin_payload: Option<String>,
    ) -> Result<CommandOutput, SshError> {
        let endpoint = self.endpoint.clone();
        tokio::task::spawn_blocking(move || {
            Self::execute_blocking(&endpoint, &command, stdin_payload.as_deref())
        })
        .await
        .map_err(|join_fault| SshError::Runtime(join_fault.to_string()))?
    }
}

#[async_trait]
impl SshExecutor for Ssh2Executor {
    #[instrument(skip(self, command))]
    async fn run(&self, command: &str) -> Result<CommandOutput, SshError> {
        debug!("🔐 [SSH_EXEC]: Dispatching command to [{}].", self.endpoint.host);
        self.dispatch(command.to_string(), None).await
    }

    #[instrument(skip(self, command, stdin_payload))]
    async fn run_with_stdin(
        &self,
        command: &str,
        stdin_payload: &str,
    ) -> Result<CommandOutput, SshError> {
        debug!("🔐 [SSH_EXEC]: Piping script to [{}].", self.endpoint.host);
        self.dispatch(command.to_string(), Some(stdin_payload.to_string()))
            .await
    }
}
