// [libs/domain/onboarding/src/orchestrator.rs]
/*!
 * =================================================================
 * APARATO: NODE ONBOARDING ORCHESTRATOR (V4.2 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: EJECUCIÓN DEL FLUJO DE NUEVE ESCALONES SOBRE SSH
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ASYNC ACCEPTANCE: La petición retorna de inmediato con el trabajo
 *    aceptado; un worker dedicado ejecuta la escalera completa.
 * 2. CANCEL REGISTRY: El índice de trabajos vivos guarda el emisor de
 *    cancelación en memoria, jamás en el blob store.
 * 3. TERMINAL SEAL: Las actualizaciones del worker respetan los estados
 *    terminales; una cancelación externa nunca es sobreescrita.
 * 4. IDEMPOTENCE PER ATTEMPT: Un trabajo fallido o cancelado deja
 *    estado parcial en el objetivo; el reintento arranca del escalón 1.
 * =================================================================
 */

use crate::catalog::ScriptCatalog;
use crate::errors::OnboardError;
use crate::platform::detect_platform;
use bison_domain_models::{
    ControlPlaneSshConfig, JobStatus, JobSubStep, NodePlatform, OnboardingJob, ScriptPhase,
    SshAuthMethod, SubStepStatus,
};
use bison_domain_tenancy::NodePoolController;
use bison_infra_cluster::{names, BlobVault, ClusterControlApi};
use bison_infra_ssh::{SshAuth, SshConnector, SshEndpoint, SshExecutor};
use chrono::Utc;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Deadline del comando de join en el nodo objetivo.
const JOIN_TIMEOUT: Duration = Duration::from_secs(300);

/// Cadencia y presupuesto del sondeo de Ready (5s x 60 = 5 min).
const READY_POLL_INTERVAL: Duration = Duration::from_secs(5);
const READY_POLL_BUDGET: u32 = 60;

fn default_ssh_port() -> u16 {
    22
}

/// Petición de incorporación de un nodo remoto.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardRequest {
    pub ip: String,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub private_key: String,
}

impl OnboardRequest {
    fn endpoint(&self) -> SshEndpoint {
        let auth = if self.private_key.trim().is_empty() {
            SshAuth::Password(self.password.clone())
        } else {
            SshAuth::PrivateKey(self.private_key.clone())
        };
        SshEndpoint {
            host: self.ip.clone(),
            port: self.port,
            user: self.user.clone(),
            auth,
        }
    }
}

pub struct OnboardingOrchestrator {
    vault: BlobVault,
    cluster_uplink: Arc<dyn ClusterControlApi>,
    script_catalog: ScriptCatalog,
    node_pools: NodePoolController,
    ssh_connector: Arc<dyn SshConnector>,
    /// Índice trabajo vivo -> emisor de cancelación (solo memoria).
    running_jobs: Mutex<HashMap<String, watch::Sender<bool>>>,
}

impl OnboardingOrchestrator {
    pub fn new(
        vault: BlobVault,
        cluster_uplink: Arc<dyn ClusterControlApi>,
        script_catalog: ScriptCatalog,
        node_pools: NodePoolController,
        ssh_connector: Arc<dyn SshConnector>,
    ) -> Self {
        Self {
            vault,
            cluster_uplink,
            script_catalog,
            node_pools,
            ssh_connector,
            running_jobs: Mutex::new(HashMap::new()),
        }
    }

    // --- SUPERFICIE DE CONSULTA ---

    pub async fn get_job(&self, job_id: &str) -> Result<OnboardingJob, OnboardError> {
        self.vault
            .read_document::<OnboardingJob>(names::ONBOARDING_JOBS, job_id)
            .await?
            .ok_or(OnboardError::NotFound)
    }

    /// Trabajos registrados, el más reciente primero.
    pub async fn list_jobs(&self) -> Result<Vec<OnboardingJob>, OnboardError> {
        let Some(jobs_blob) = self.vault.get(names::ONBOARDING_JOBS).await? else {
            return Ok(Vec::new());
        };

        let mut jobs: Vec<OnboardingJob> = jobs_blob
            .data
            .values()
            .filter_map(|raw_job| serde_json::from_str::<OnboardingJob>(raw_job).ok())
            .collect();
        jobs.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(jobs)
    }

    /// Trabajos pendientes o en curso (para la superficie de estado).
    pub async fn active_count(&self) -> Result<usize, OnboardError> {
        Ok(self
            .list_jobs()
            .await?
            .iter()
            .filter(|job| job.status.occupies_target())
            .count())
    }

    // --- ACEPTACIÓN Y CANCELACIÓN ---

    /**
     * Acepta un trabajo nuevo y lanza su worker dedicado.
     *
     * # Errors:
     * - 'AlreadyRunning' si otra incorporación pendiente o en curso ya
     *   ocupa la IP objetivo.
     */
    #[instrument(skip(self, request), fields(target_ip = %request.ip))]
    pub async fn start(
        self: &Arc<Self>,
        request: OnboardRequest,
    ) -> Result<OnboardingJob, OnboardError> {
        if request.ip.trim().is_empty() {
            return Err(OnboardError::InvalidRequest("target ip required".to_string()));
        }
        if request.user.trim().is_empty() {
            return Err(OnboardError::InvalidRequest("ssh user required".to_string()));
        }
        if request.password.trim().is_empty() && request.private_key.trim().is_empty() {
            return Err(OnboardError::InvalidRequest(
                "password or private key required".to_string(),
            ));
        }

        let occupied = self
            .list_jobs()
            .await?
            .iter()
            .any(|job| job.target_ip == request.ip && job.status.occupies_target());
        if occupied {
            return Err(OnboardError::AlreadyRunning(request.ip.clone()));
        }

        let job = OnboardingJob::accepted(Uuid::new_v4().to_string(), request.ip.clone(), Utc::now());
        self.vault
            .write_document(names::ONBOARDING_JOBS, &job.id, &job)
            .await?;

        let (cancel_sender, cancel_receiver) = watch::channel(false);
        self.running_jobs
            .lock()
            .expect("onboarding registry lock poisoned")
            .insert(job.id.clone(), cancel_sender);

        let orchestrator = Arc::clone(self);
        let worker_job_id = job.id.clone();
        tokio::spawn(async move {
            orchestrator.execute(worker_job_id, request, cancel_receiver).await;
        });

        info!("🛠️ [ONBOARD_ACCEPT]: Job [{}] accepted for [{}].", job.id, job.target_ip);
        Ok(job)
    }

    /// Cancela un trabajo no terminal y señala a su worker.
    #[instrument(skip(self))]
    pub async fn cancel(&self, job_id: &str) -> Result<OnboardingJob, OnboardError> {
        let job = self.get_job(job_id).await?;
        if job.status.is_terminal() {
            return Err(OnboardError::Precondition(format!(
                "job {} already terminal",
                job_id
            )));
        }

        let cancelled = self
            .update_job(job_id, |job| {
                job.status = JobStatus::Cancelled;
                job.step_message = "cancelled by operator".to_string();
                job.completed_at = Some(Utc::now());
            })
            .await?;

        if let Some(cancel_sender) = self
            .running_jobs
            .lock()
            .expect("onboarding registry lock poisoned")
            .remove(job_id)
        {
            let _ = cancel_sender.send(true);
        }

        warn!("🛠️ [ONBOARD_CANCEL]: Job [{}] cancelled by operator.", job_id);
        Ok(cancelled)
    }

    // --- PERSISTENCIA DEL TRABAJO ---

    /**
     * Mutación sellada del registro del trabajo.
     *
     * # Logic:
     * Los estados terminales son inmutables: la mutación no se aplica y
     * el registro vigente retorna tal cual, permitiendo al worker
     * detectar una cancelación externa.
     */
    async fn update_job<F>(&self, job_id: &str, mut apply: F) -> Result<OnboardingJob, OnboardError>
    where
        F: FnMut(&mut OnboardingJob) + Send,
    {
        let job_key = job_id.to_string();
        let updated = self
            .vault
            .mutate(names::ONBOARDING_JOBS, move |data| {
                let raw_job = data.get(&job_key).cloned().unwrap_or_default();
                let mut job = serde_json::from_str::<OnboardingJob>(&raw_job)
                    .map_err(bison_infra_cluster::ClusterError::Serialization)?;
                if !job.status.is_terminal() {
                    apply(&mut job);
                    job.updated_at = Utc::now();
                }
                data.insert(job_key.clone(), serde_json::to_string(&job)?);
                Ok(job)
            })
            .await?;
        Ok(updated)
    }

    /// Avanza el escalón; una cancelación externa aborta la escalera.
    async fn advance(
        &self,
        job_id: &str,
        step_index: u32,
        step_message: &str,
    ) -> Result<(), OnboardError> {
        let message = step_message.to_string();
        let job = self
            .update_job(job_id, move |job| {
                job.status = JobStatus::Running;
                job.step_index = step_index;
                job.step_message = message.clone();
            })
            .await?;

        if job.status == JobStatus::Cancelled {
            return Err(OnboardError::Cancelled);
        }
        Ok(())
    }

    // --- WORKER ---

    /// Cuerpo del worker: ejecuta la escalera y sella el veredicto.
    async fn execute(
        self: Arc<Self>,
        job_id: String,
        request: OnboardRequest,
        cancel_receiver: watch::Receiver<bool>,
    ) {
        let verdict = self.run_ladder(&job_id, &request, cancel_receiver).await;

        let finalize_verdict = match verdict {
            Ok(ready_node_name) => {
                info!("🛠️ [ONBOARD_SUCCESS]: Job [{}] sealed; node [{}] ready.", job_id, ready_node_name);
                self.update_job(&job_id, move |job| {
                    job.status = JobStatus::Success;
                    job.step_index = 9;
                    job.step_message = "node enabled into shared pool".to_string();
                    job.completed_at = Some(Utc::now());
                })
                .await
                .map(|_| ())
            }
            Err(OnboardError::Cancelled) => {
                // La cancelación ya selló el registro; nada que escribir.
                info!("🛠️ [ONBOARD_CANCELLED]: Job [{}] worker stood down.", job_id);
                Ok(())
            }
            Err(ladder_fault) => {
                error!("🛠️ [ONBOARD_FAILED]: Job [{}] -> {}", job_id, ladder_fault);
                let failure_detail = ladder_fault.to_string();
                self.update_job(&job_id, move |job| {
                    job.status = JobStatus::Failed;
                    job.error = failure_detail.clone();
                    job.completed_at = Some(Utc::now());
                })
                .await
                .map(|_| ())
            }
        };

        if let Err(seal_fault) = finalize_verdict {
            error!("🛠️ [ONBOARD_SEAL_FAULT]: Job [{}] verdict not persisted: {}", job_id, seal_fault);
        }

        self.running_jobs
            .lock()
            .expect("onboarding registry lock poisoned")
            .remove(&job_id);
    }

    fn step_failure(step: u32, detail: impl Into<String>) -> OnboardError {
        OnboardError::StepFailed {
            step,
            detail: detail.into(),
        }
    }

    fn check_cancel(cancel_receiver: &watch::Receiver<bool>) -> Result<(), OnboardError> {
        if *cancel_receiver.borrow() {
            return Err(OnboardError::Cancelled);
        }
        Ok(())
    }

    /// La escalera de nueve escalones; retorna el nombre del nodo listo.
    async fn run_ladder(
        &self,
        job_id: &str,
        request: &OnboardRequest,
        mut cancel_receiver: watch::Receiver<bool>,
    ) -> Result<String, OnboardError> {
        let control_plane_config = self.load_control_plane_config().await?;
        let target_session = self.ssh_connector.connect(&request.endpoint()).await?;

        // ESCALÓN 1: prueba de conectividad.
        self.advance(job_id, 1, "testing ssh connectivity").await?;
        let echo_probe = target_session.run("echo ok").await.map_err(|fault| {
            Self::step_failure(1, format!("ssh session failed: {}", fault))
        })?;
        if !echo_probe.succeeded() || echo_probe.stdout.trim() != "ok" {
            return Err(Self::step_failure(1, "connection probe did not answer 'ok'"));
        }
        Self::check_cancel(&cancel_receiver)?;

        // ESCALÓN 2: detección de plataforma.
        self.advance(job_id, 2, "detecting platform").await?;
        let os_release = target_session.run("cat /etc/os-release").await?;
        let machine = target_session.run("uname -m").await?;
        let hostname_probe = target_session.run("hostname").await?;
        let platform = detect_platform(&os_release.stdout, &machine.stdout);
        let node_name = hostname_probe.stdout.trim().to_string();
        if node_name.is_empty() {
            return Err(Self::step_failure(2, "remote hostname is empty"));
        }
        let detected_platform = platform.clone();
        let detected_node_name = node_name.clone();
        self.update_job(job_id, move |job| {
            job.platform = detected_platform.clone();
            job.node_name = detected_node_name.clone();
        })
        .await?;
        Self::check_cancel(&cancel_receiver)?;

        // ESCALÓN 3: verificación del entorno.
        self.advance(job_id, 3, "checking kubeadm/kubelet").await?;
        for required_binary in ["kubeadm", "kubelet"] {
            let probe = target_session
                .run(&format!("command -v {}", required_binary))
                .await?;
            if !probe.succeeded() {
                return Err(Self::step_failure(3, format!("{} not installed", required_binary)));
            }
        }
        Self::check_cancel(&cancel_receiver)?;

        // Variables inyectadas en los scripts del catálogo.
        let mut script_variables = BTreeMap::new();
        script_variables.insert("NODE_IP".to_string(), request.ip.clone());
        script_variables.insert("NODE_NAME".to_string(), node_name.clone());
        script_variables.insert("CONTROL_PLANE_IP".to_string(), control_plane_config.host.clone());

        // ESCALÓN 4: scripts pre-join.
        self.advance(job_id, 4, "running pre-join scripts").await?;
        self.run_phase(
            job_id,
            4,
            ScriptPhase::PreJoin,
            &platform,
            &script_variables,
            target_session.as_ref(),
            &cancel_receiver,
        )
        .await?;

        // ESCALÓN 5: adquisición del join token en el plano de control.
        self.advance(job_id, 5, "acquiring join token").await?;
        let join_command = self.acquire_join_command(&control_plane_config).await?;
        Self::check_cancel(&cancel_receiver)?;

        // ESCALÓN 6: join con deadline dedicado.
        self.advance(job_id, 6, "joining the cluster").await?;
        let join_outcome = tokio::select! {
            _ = cancel_receiver.changed() => return Err(OnboardError::Cancelled),
            outcome = tokio::time::timeout(JOIN_TIMEOUT, target_session.run(&join_command)) => outcome,
        };
        let join_result = join_outcome
            .map_err(|_| Self::step_failure(6, "kubeadm join timed out after 5 minutes"))??;
        if !join_result.succeeded() {
            return Err(Self::step_failure(
                6,
                format!("kubeadm join exited {}: {}", join_result.exit_status, join_result.stderr),
            ));
        }

        // ESCALÓN 7: scripts post-join.
        self.advance(job_id, 7, "running post-join scripts").await?;
        self.run_phase(
            job_id,
            7,
            ScriptPhase::PostJoin,
            &platform,
            &script_variables,
            target_session.as_ref(),
            &cancel_receiver,
        )
        .await?;

        // ESCALÓN 8: espera del estado Ready en el cluster.
        self.advance(job_id, 8, "waiting for node ready").await?;
        let ready_node_name = self
            .wait_for_ready(&request.ip, &node_name, &mut cancel_receiver)
            .await?;

        // ESCALÓN 9: habilitación en el pool compartido.
        self.advance(job_id, 9, "enabling node in shared pool").await?;
        self.node_pools
            .enable(&ready_node_name)
            .await
            .map_err(|fault| Self::step_failure(9, fault.to_string()))?;

        Ok(ready_node_name)
    }

    /// Ejecuta los grupos habilitados de una fase como sub-pasos.
    #[allow(clippy::too_many_arguments)]
    async fn run_phase(
        &self,
        job_id: &str,
        step_index: u32,
        phase: ScriptPhase,
        platform: &NodePlatform,
        variables: &BTreeMap<String, String>,
        target_session: &dyn SshExecutor,
        cancel_receiver: &watch::Receiver<bool>,
    ) -> Result<(), OnboardError> {
        for group in self.script_catalog.enabled_for_phase(phase).await? {
            Self::check_cancel(cancel_receiver)?;

            let Some(selected_script) = ScriptCatalog::match_script(&group, platform) else {
                // Sin selección para la plataforma: el grupo se omite.
                self.record_sub_step(job_id, &group.name, SubStepStatus::Skipped, "no platform match")
                    .await?;
                continue;
            };

            let rendered_content =
                ScriptCatalog::substitute_variables(&selected_script.content, variables);
            let execution = target_session.run_with_stdin("bash -s", &rendered_content).await?;

            if execution.succeeded() {
                self.record_sub_step(job_id, &group.name, SubStepStatus::Success, "").await?;
            } else {
                let failure_detail = format!(
                    "exit {}: {}",
                    execution.exit_status,
                    execution.stderr.trim()
                );
                self.record_sub_step(job_id, &group.name, SubStepStatus::Failed, &failure_detail)
                    .await?;
                return Err(Self::step_failure(
                    step_index,
                    format!("script group '{}' failed ({})", group.name, failure_detail),
                ));
            }
        }
        Ok(())
    }

    async fn record_sub_step(
        &self,
        job_id: &str,
        group_name: &str,
        status: SubStepStatus,
        detail: &str,
    ) -> Result<(), OnboardError> {
        let sub_step = JobSubStep {
            name: group_name.to_string(),
            status,
            detail: detail.to_string(),
        };
        self.update_job(job_id, move |job| {
            job.sub_steps.push(sub_step.clone());
        })
        .await?;
        Ok(())
    }

    /// Lectura íntegra (sin censura) de las credenciales del plano.
    async fn load_control_plane_config(&self) -> Result<ControlPlaneSshConfig, OnboardError> {
        self.vault
            .read_document::<ControlPlaneSshConfig>(names::CONTROL_PLANE_CONFIG, names::SINGLETON_KEY)
            .await?
            .filter(|config| !config.host.trim().is_empty())
            .ok_or_else(|| Self::step_failure(5, "control plane ssh endpoint not configured"))
    }

    /// Emite el join token desde el host del plano de control.
    async fn acquire_join_command(
        &self,
        control_plane_config: &ControlPlaneSshConfig,
    ) -> Result<String, OnboardError> {
        let auth = match control_plane_config.auth_method {
            SshAuthMethod::Password => SshAuth::Password(control_plane_config.password.clone()),
            SshAuthMethod::PrivateKey => {
                SshAuth::PrivateKey(control_plane_config.private_key.clone())
            }
        };
        let control_plane_session = self
            .ssh_connector
            .connect(&SshEndpoint {
                host: control_plane_config.host.clone(),
                port: control_plane_config.port,
                user: control_plane_config.user.clone(),
                auth,
            })
            .await?;

        let token_probe = control_plane_session
            .run("kubeadm token create --print-join-command")
            .await?;
        let join_command = token_probe.stdout.trim().to_string();
        if !token_probe.succeeded() || join_command.is_empty() {
            return Err(Self::step_failure(5, "empty join command from control plane"));
        }
        Ok(join_command)
    }

    /// Sondeo del nodo hasta Ready, con deadline de 5 minutos.
    async fn wait_for_ready(
        &self,
        target_ip: &str,
        detected_hostname: &str,
        cancel_receiver: &mut watch::Receiver<bool>,
    ) -> Result<String, OnboardError> {
        for _poll_round in 0..READY_POLL_BUDGET {
            Self::check_cancel(cancel_receiver)?;

            for node in self.cluster_uplink.list_nodes().await? {
                let address_match = node.internal_ip == target_ip;
                let hostname_match =
                    node.name == detected_hostname || node.hostname == detected_hostname;
                if (address_match || hostname_match) && node.ready {
                    return Ok(node.name);
                }
            }

            tokio::select! {
                _ = cancel_receiver.changed() => return Err(OnboardError::Cancelled),
                _ = tokio::time::sleep(READY_POLL_INTERVAL) => {}
            }
        }
        Err(Self::step_failure(8, "node did not become Ready within 5 minutes"))
    }
}
