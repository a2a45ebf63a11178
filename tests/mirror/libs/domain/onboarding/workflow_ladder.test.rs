/**
 * =================================================================
 * APARATO: ONBOARDING WORKFLOW LADDER TEST (V1.2 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la escalera de nueve escalones, la exclusión
 *           por IP y la cancelación cooperativa.
 * =================================================================
 */

use async_trait::async_trait;
use bison_domain_models::{ControlPlaneSshConfig, JobStatus, OnboardingJob, SubStepStatus};
use bison_domain_onboarding::{OnboardError, OnboardRequest, OnboardingOrchestrator, ScriptCatalog};
use bison_domain_tenancy::NodePoolController;
use bison_infra_cluster::api::LABEL_POOL;
use bison_infra_cluster::{names, BlobVault, ClusterControlApi, MemoryCluster, NodeObject};
use bison_infra_ssh::{CommandOutput, SshConnector, SshEndpoint, SshError, SshExecutor};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        exit_status: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Ejecutor guionado que responde las sondas de la escalera.
struct ScriptedExecutor {
    fail_probe: bool,
    executed_scripts: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SshExecutor for ScriptedExecutor {
    async fn run(&self, command: &str) -> Result<CommandOutput, SshError> {
        if command == "echo ok" {
            if self.fail_probe {
                return Ok(CommandOutput {
                    exit_status: 1,
                    stdout: String::new(),
                    stderr: "connection refused".to_string(),
                });
            }
            return Ok(ok("ok\n"));
        }
        if command == "cat /etc/os-release" {
            return Ok(ok("NAME=\"Ubuntu\"\nID=ubuntu\nVERSION_ID=\"22.04\"\n"));
        }
        if command == "uname -m" {
            return Ok(ok("x86_64\n"));
        }
        if command == "hostname" {
            return Ok(ok("worker-05\n"));
        }
        if command.starts_with("command -v") {
            return Ok(ok("/usr/bin/present\n"));
        }
        if command == "kubeadm token create --print-join-command" {
            return Ok(ok("kubeadm join 10.0.0.1:6443 --token tok.en --discovery-token-ca-cert-hash sha256:abc\n"));
        }
        if command.starts_with("kubeadm join") {
            return Ok(ok("This node has joined the cluster\n"));
        }
        Ok(ok(""))
    }

    async fn run_with_stdin(
        &self,
        _command: &str,
        stdin_payload: &str,
    ) -> Result<CommandOutput, SshError> {
        self.executed_scripts.lock().unwrap().push(stdin_payload.to_string());
        Ok(ok(""))
    }
}

struct ScriptedConnector {
    fail_probe: bool,
    executed_scripts: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SshConnector for ScriptedConnector {
    async fn connect(&self, _endpoint: &SshEndpoint) -> Result<Box<dyn SshExecutor>, SshError> {
        Ok(Box::new(ScriptedExecutor {
            fail_probe: self.fail_probe,
            executed_scripts: self.executed_scripts.clone(),
        }))
    }
}

struct Rig {
    cluster: Arc<MemoryCluster>,
    orchestrator: Arc<OnboardingOrchestrator>,
    executed_scripts: Arc<Mutex<Vec<String>>>,
}

async fn forge_rig(fail_probe: bool, seed_ready_node: bool) -> Rig {
    let engine = Arc::new(MemoryCluster::new());
    let uplink: Arc<dyn ClusterControlApi> = engine.clone();
    let vault = BlobVault::new(uplink.clone());

    if seed_ready_node {
        engine.seed_node(NodeObject {
            name: "worker-05".to_string(),
            internal_ip: "10.0.0.5".to_string(),
            hostname: "worker-05".to_string(),
            ready: true,
            ..NodeObject::default()
        });
    }

    // Credenciales del plano de control para la emisión del join token.
    vault
        .write_document(
            names::CONTROL_PLANE_CONFIG,
            names::SINGLETON_KEY,
            &ControlPlaneSshConfig {
                host: "10.0.0.1".to_string(),
                ..ControlPlaneSshConfig::default()
            },
        )
        .await
        .unwrap();

    let catalog = ScriptCatalog::new(vault.clone());
    catalog.seed_builtins().await.unwrap();

    let executed_scripts = Arc::new(Mutex::new(Vec::new()));
    let orchestrator = Arc::new(OnboardingOrchestrator::new(
        vault,
        uplink.clone(),
        catalog,
        NodePoolController::new(uplink),
        Arc::new(ScriptedConnector {
            fail_probe,
            executed_scripts: executed_scripts.clone(),
        }),
    ));

    Rig { cluster: engine, orchestrator, executed_scripts }
}

fn request(ip: &str) -> OnboardRequest {
    serde_json::from_value(serde_json::json!({
        "ip": ip,
        "user": "root",
        "password": "secret"
    }))
    .unwrap()
}

async fn wait_terminal(orchestrator: &OnboardingOrchestrator, job_id: &str) -> OnboardingJob {
    for _ in 0..200 {
        let job = orchestrator.get_job(job_id).await.unwrap();
        if job.status.is_terminal() {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("El trabajo {} no alcanzó estado terminal a tiempo.", job_id);
}

#[tokio::test]
async fn certify_happy_path_ladder() {
    let rig = forge_rig(false, true).await;

    let accepted = rig.orchestrator.start(request("10.0.0.5")).await.unwrap();
    assert_eq!(accepted.status, JobStatus::Pending);
    assert_eq!(accepted.step_total, 9);

    let sealed = wait_terminal(&rig.orchestrator, &accepted.id).await;
    assert_eq!(sealed.status, JobStatus::Success, "error: {}", sealed.error);
    assert_eq!(sealed.node_name, "worker-05");
    assert_eq!(sealed.platform.os, "ubuntu");
    assert_eq!(sealed.platform.version, "22.04");
    assert_eq!(sealed.platform.arch, "amd64");
    assert_eq!(sealed.step_index, 9);
    assert!(sealed.completed_at.is_some());

    // Los grupos de fábrica corrieron como sub-pasos exitosos.
    assert!(!sealed.sub_steps.is_empty());
    assert!(sealed.sub_steps.iter().all(|sub_step| sub_step.status == SubStepStatus::Success));

    // Las variables se inyectaron literalmente en los scripts.
    let executed = rig.executed_scripts.lock().unwrap();
    assert!(!executed.is_empty());

    // Escalón 9: el nodo quedó habilitado en el pool compartido.
    let node = rig.cluster.get_node("worker-05").await.unwrap().unwrap();
    assert_eq!(node.labels.get(LABEL_POOL).map(String::as_str), Some("shared"));
    println!("✅ ONBOARD: Happy path ladder certified.");
}

#[tokio::test]
async fn certify_probe_failure_is_terminal_and_releases_ip() {
    let rig = forge_rig(true, true).await;

    let accepted = rig.orchestrator.start(request("10.0.0.7")).await.unwrap();
    let sealed = wait_terminal(&rig.orchestrator, &accepted.id).await;

    assert_eq!(sealed.status, JobStatus::Failed);
    assert!(!sealed.error.is_empty(), "El fallo queda capturado en el registro.");

    // Un trabajo terminal libera la IP para el reintento desde el escalón 1.
    let retry = rig.orchestrator.start(request("10.0.0.7")).await.unwrap();
    assert_eq!(retry.status, JobStatus::Pending);
    println!("✅ ONBOARD: Terminal failure and IP release certified.");
}

#[tokio::test]
async fn certify_per_ip_exclusion_and_cancel() {
    // Sin nodo sembrado: la escalera queda sondeando en el escalón 8.
    let rig = forge_rig(false, false).await;

    let accepted = rig.orchestrator.start(request("10.0.0.9")).await.unwrap();

    // Esperamos a que el worker alcance el sondeo de Ready.
    for _ in 0..200 {
        let job = rig.orchestrator.get_job(&accepted.id).await.unwrap();
        if job.step_index == 8 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // Exclusión por IP mientras el trabajo sigue vivo.
    match rig.orchestrator.start(request("10.0.0.9")).await {
        Err(OnboardError::AlreadyRunning(_)) => {}
        other => panic!("La IP ocupada debe rechazarse, llegó {:?}", other.is_ok()),
    }

    // Cancelación cooperativa.
    let cancelled = rig.orchestrator.cancel(&accepted.id).await.unwrap();
    assert_eq!(cancelled.status, JobStatus::Cancelled);

    let sealed = wait_terminal(&rig.orchestrator, &accepted.id).await;
    assert_eq!(sealed.status, JobStatus::Cancelled, "La cancelación es terminal.");

    // Cancelar un trabajo terminal: precondición rechazada.
    match rig.orchestrator.cancel(&accepted.id).await {
        Err(OnboardError::Precondition(_)) => {}
        other => panic!("Cancelar un terminal debe rechazarse, llegó {:?}", other.is_ok()),
    }
    println!("✅ ONBOARD: Per-IP exclusion and cancel certified.");
}
