// [apps/control-plane/src/services/task_runner.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN TASK RUNNER (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: BACKGROUND INFRASTRUCTURE (ESTRATO L4)
 * RESPONSABILIDAD: BUCLES PERIÓDICOS, APAGADO COOPERATIVO Y ANILLO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PANIC CONTAINMENT: Un pánico dentro de una pasada se recupera,
 *    queda registrado como fila fallida y el bucle continúa; los
 *    daemons jamás tumban el proceso.
 * 2. BOUNDED FORENSICS: El anillo retiene las 1000 filas más recientes
 *    y las expone la más nueva primero a la superficie de estado.
 * 3. COOPERATIVE QUIT: Un canal broadcast de apagado detiene los tres
 *    bucles sin cortar una pasada a medias.
 * =================================================================
 */

use bison_domain_alerting::AlertEvaluator;
use bison_domain_billing::{AutoRechargeScheduler, BillingEngine, CycleOutcome};
use bison_domain_models::status::TASK_RING_RETENTION;
use bison_domain_models::{TaskExecution, TaskStatus};
use chrono::Utc;
use futures::FutureExt;
use std::collections::VecDeque;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{error, info};

pub const BILLING_LOOP: &str = "billing";
pub const RECHARGE_LOOP: &str = "auto-recharge";
pub const ALERT_LOOP: &str = "alerts";

const BILLING_PERIOD: Duration = Duration::from_secs(60 * 60);
const RECHARGE_PERIOD: Duration = Duration::from_secs(60 * 60);
const ALERT_PERIOD: Duration = Duration::from_secs(15 * 60);

/// Veredicto de una pasada, listo para el anillo.
type TickVerdict = Result<(TaskStatus, Option<String>), String>;

pub struct TaskRunner {
    quit_sender: broadcast::Sender<()>,
    execution_ring: Arc<RwLock<VecDeque<TaskExecution>>>,
}

impl TaskRunner {
    pub fn new() -> Self {
        let (quit_sender, _) = broadcast::channel(4);
        Self {
            quit_sender,
            execution_ring: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Filas recientes del anillo, la más nueva primero.
    pub fn recent(&self, limit: usize) -> Vec<TaskExecution> {
        self.execution_ring
            .read()
            .expect("task ring lock poisoned")
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Cierra el canal de apagado; los bucles terminan su pasada y salen.
    pub fn shutdown(&self) {
        let _ = self.quit_sender.send(());
    }

    fn seal_row(ring: &Arc<RwLock<VecDeque<TaskExecution>>>, row: TaskExecution) {
        let mut guard = ring.write().expect("task ring lock poisoned");
        guard.push_back(row);
        while guard.len() > TASK_RING_RETENTION {
            guard.pop_front();
        }
    }

    /**
     * Lanza un bucle perpetuo con recuperación de pánicos y registro.
     */
    pub fn spawn_loop<F, Fut>(&self, task_name: &'static str, period: Duration, task_factory: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = TickVerdict> + Send + 'static,
    {
        let ring = Arc::clone(&self.execution_ring);
        let mut quit_receiver = self.quit_sender.subscribe();

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            info!("⏱️ [TASK_RUNNER]: Loop [{}] armed ({}s period).", task_name, period.as_secs());

            loop {
                tokio::select! {
                    _ = quit_receiver.recv() => {
                        info!("⏱️ [TASK_RUNNER]: Loop [{}] standing down.", task_name);
                        break;
                    }
                    _ = ticker.tick() => {}
                }

                let started_at = Utc::now();
                let tick_verdict = AssertUnwindSafe(task_factory()).catch_unwind().await;

                let (status, error_detail) = match tick_verdict {
                    Ok(Ok((status, detail))) => (status, detail),
                    Ok(Err(failure_detail)) => {
                        error!("⏱️ [TASK_RUNNER]: Loop [{}] tick failed: {}", task_name, failure_detail);
                        (TaskStatus::Failed, Some(failure_detail))
                    }
                    Err(_) => {
                        error!("⏱️ [TASK_RUNNER]: Loop [{}] tick panicked; recovered.", task_name);
                        (TaskStatus::Failed, Some("panic recovered inside tick".to_string()))
                    }
                };

                Self::seal_row(
                    &ring,
                    TaskExecution {
                        task: task_name.to_string(),
                        started_at,
                        ended_at: Utc::now(),
                        status,
                        error: error_detail,
                    },
                );
            }
        });
    }

    /**
     * Arma los tres bucles del núcleo: facturación, recargas y alertas.
     */
    pub fn launch_core_loops(
        &self,
        billing_engine: Arc<BillingEngine>,
        recharge_scheduler: Arc<AutoRechargeScheduler>,
        alert_evaluator: Arc<AlertEvaluator>,
    ) {
        let billing = Arc::clone(&billing_engine);
        self.spawn_loop(BILLING_LOOP, BILLING_PERIOD, move || {
            let engine = Arc::clone(&billing);
            async move {
                match engine.run_cycle().await {
                    Ok(CycleOutcome::Completed) => Ok((TaskStatus::Success, None)),
                    Ok(CycleOutcome::Skipped(reason)) => Ok((TaskStatus::Skipped, Some(reason))),
                    Err(cycle_fault) => Err(cycle_fault.to_string()),
                }
            }
        });

        let recharge = Arc::clone(&recharge_scheduler);
        self.spawn_loop(RECHARGE_LOOP, RECHARGE_PERIOD, move || {
            let scheduler = Arc::clone(&recharge);
            async move {
                match scheduler.run_cycle().await {
                    Ok(CycleOutcome::Completed) => Ok((TaskStatus::Success, None)),
                    Ok(CycleOutcome::Skipped(reason)) => Ok((TaskStatus::Skipped, Some(reason))),
                    Err(cycle_fault) => Err(cycle_fault.to_string()),
                }
            }
        });

        let alerts = Arc::clone(&alert_evaluator);
        self.spawn_loop(ALERT_LOOP, ALERT_PERIOD, move || {
            let evaluator = Arc::clone(&alerts);
            async move {
                match evaluator.run_cycle().await {
                    Ok(_emitted_count) => Ok((TaskStatus::Success, None)),
                    Err(cycle_fault) => Err(cycle_fault.to_string()),
                }
            }
        });
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}
