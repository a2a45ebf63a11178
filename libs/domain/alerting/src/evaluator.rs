// [libs/domain/alerting/src/evaluator.rs]
/*!
 * =================================================================
 * APARATO: ALERT THRESHOLD EVALUATOR (V3.1 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: EVALUACIÓN PERIÓDICA Y SELLADO DEL HISTORIAL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SEVERITY LADDER: 0 <= balance < umbral -> warning (low_balance);
 *    balance < 0 -> critical (negative_balance).
 * 2. BOUNDED FORENSICS: El historial retiene las 1000 señales más
 *    recientes; el evaluador es su único escritor.
 * =================================================================
 */

use crate::channels::{kind_label, AlertTransport};
use crate::errors::AlertError;
use bison_domain_models::alert::ALERT_HISTORY_RETENTION;
use bison_domain_models::{AlertConfig, AlertKind, AlertRecord, AlertSeverity, NotifyChannel};
use bison_domain_wallet::WalletService;
use bison_infra_cluster::{names, BlobVault};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Clave del historial dentro de su blob.
const HISTORY_KEY: &str = "entries";

pub struct AlertEvaluator {
    vault: BlobVault,
    wallet_service: WalletService,
    transport: Arc<dyn AlertTransport>,
}

impl AlertEvaluator {
    pub fn new(
        vault: BlobVault,
        wallet_service: WalletService,
        transport: Arc<dyn AlertTransport>,
    ) -> Self {
        Self {
            vault,
            wallet_service,
            transport,
        }
    }

    // --- CONFIGURACIÓN ---

    pub async fn load_config(&self) -> Result<AlertConfig, AlertError> {
        Ok(self
            .vault
            .read_document::<AlertConfig>(names::ALERT_CONFIG, names::SINGLETON_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn save_config(&self, config: &AlertConfig) -> Result<(), AlertError> {
        if config.balance_threshold < 0.0 {
            return Err(AlertError::InvalidThreshold(config.balance_threshold));
        }
        self.vault
            .write_document(names::ALERT_CONFIG, names::SINGLETON_KEY, config)
            .await?;
        Ok(())
    }

    // --- EVALUACIÓN PERIÓDICA ---

    /// Pasada anclada al instante presente; retorna señales emitidas.
    pub async fn run_cycle(&self) -> Result<usize, AlertError> {
        self.run_cycle_at(Utc::now()).await
    }

    /**
     * Evalúa todas las billeteras contra el umbral y emite señales.
     *
     * # Logic:
     * Cada pasada re-emite las señales vigentes (sin supresión). El
     * abanico recorre los canales habilitados; un acuse sella 'sent'.
     */
    #[instrument(skip(self))]
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> Result<usize, AlertError> {
        let config = self.load_config().await?;
        let breached_wallets = self.wallet_service.low_balance(config.balance_threshold).await?;

        let mut emitted_records = Vec::new();
        for wallet_snapshot in breached_wallets {
            let (kind, severity) = if wallet_snapshot.amount < 0.0 {
                (AlertKind::NegativeBalance, AlertSeverity::Critical)
            } else {
                (AlertKind::LowBalance, AlertSeverity::Warning)
            };

            let message = format!(
                "team {} balance {:.2} is below threshold {:.2}",
                wallet_snapshot.team, wallet_snapshot.amount, config.balance_threshold
            );

            let record = self
                .fan_out(kind, severity, &wallet_snapshot.team, &message, &config.channels, now)
                .await;
            emitted_records.push(record);
        }

        let emitted_count = emitted_records.len();
        if emitted_count > 0 {
            self.append_history(emitted_records).await?;
            info!("🚨 [HERALD_CYCLE]: {} signals emitted and sealed.", emitted_count);
        }
        Ok(emitted_count)
    }

    /// Señal de prueba disparada manualmente contra un canal concreto.
    #[instrument(skip(self))]
    pub async fn emit_test(&self, channel_id: &str) -> Result<AlertRecord, AlertError> {
        let config = self.load_config().await?;
        let channel = config
            .channels
            .iter()
            .find(|candidate| candidate.id == channel_id)
            .ok_or_else(|| AlertError::ChannelNotFound(channel_id.to_string()))?;

        let record = self
            .fan_out(
                AlertKind::Test,
                AlertSeverity::Info,
                "system",
                "test signal from the control plane",
                std::slice::from_ref(channel),
                Utc::now(),
            )
            .await;

        self.append_history(vec![record.clone()]).await?;
        Ok(record)
    }

    /// Historial de señales, la más reciente primero.
    pub async fn history(&self, limit: usize) -> Result<Vec<AlertRecord>, AlertError> {
        let mut entries = self
            .vault
            .read_document::<Vec<AlertRecord>>(names::ALERT_HISTORY, HISTORY_KEY)
            .await?
            .unwrap_or_default();
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }

    // --- NÚCLEO DE ABANICO ---

    /// Entrega por todos los canales habilitados y forja el registro.
    async fn fan_out(
        &self,
        kind: AlertKind,
        severity: AlertSeverity,
        target: &str,
        message: &str,
        channels: &[NotifyChannel],
        now: DateTime<Utc>,
    ) -> AlertRecord {
        let mut record = AlertRecord {
            id: Uuid::new_v4().to_string(),
            timestamp: now,
            kind,
            severity,
            target: target.to_string(),
            message: message.to_string(),
            sent: false,
            sent_at: None,
            delivered_channels: Vec::new(),
        };

        for channel in channels.iter().filter(|candidate| candidate.enabled) {
            match self.transport.deliver(channel, &record).await {
                Ok(()) => {
                    record.delivered_channels.push(channel.name.clone());
                }
                Err(delivery_fault) => {
                    // Un canal caído jamás aborta el abanico.
                    warn!(
                        "🚨 [HERALD_FANOUT]: Channel [{}] rejected {}: {}",
                        channel.name,
                        kind_label(kind),
                        delivery_fault
                    );
                }
            }
        }

        if !record.delivered_channels.is_empty() {
            record.sent = true;
            record.sent_at = Some(now);
        }
        record
    }

    /// Append acotado del historial (retención FIFO de 1000).
    async fn append_history(&self, new_records: Vec<AlertRecord>) -> Result<(), AlertError> {
        self.vault
            .mutate(names::ALERT_HISTORY, move |data| {
                let mut entries = data
                    .get(HISTORY_KEY)
                    .and_then(|raw| serde_json::from_str::<Vec<AlertRecord>>(raw).ok())
                    .unwrap_or_default();
                entries.extend(new_records.iter().cloned());
                if entries.len() > ALERT_HISTORY_RETENTION {
                    let overflow = entries.len() - ALERT_HISTORY_RETENTION;
                    entries.drain(0..overflow);
                }
                data.insert(HISTORY_KEY.to_string(), serde_json::to_string(&entries)?);
                Ok(())
            })
            .await?;
        Ok(())
    }
}
