// [libs/domain/alerting/src/channels.rs]
/*!
 * =================================================================
 * APARATO: ALERT DELIVERY ADAPTERS (V2.2 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN ADAPTER (ESTRATO L2/L3)
 * RESPONSABILIDAD: MATERIALIZACIÓN DE SEÑALES SOBRE LOS TRANSPORTES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WIRE FIDELITY: Webhook entrega el JSON canónico de la señal;
 *    dingtalk y wechat comparten el sobre 'msgtype: text'; email solo
 *    deja rastro en el log (SMTP fuera de alcance).
 * 2. HTTP VERDICT: Todo estado >= 400 cuenta como fallo de entrega.
 * =================================================================
 */

use crate::errors::AlertError;
use bison_domain_models::{AlertKind, AlertRecord, AlertSeverity, ChannelType, NotifyChannel};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{info, instrument};

/// Etiqueta legible de la clase de señal.
pub fn kind_label(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::LowBalance => "low_balance",
        AlertKind::NegativeBalance => "negative_balance",
        AlertKind::Test => "test",
    }
}

/// Etiqueta legible de la severidad.
pub fn severity_label(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Info => "info",
        AlertSeverity::Warning => "warning",
        AlertSeverity::Critical => "critical",
    }
}

/// Transporte de señales hacia un canal configurado.
#[async_trait]
pub trait AlertTransport: Send + Sync {
    async fn deliver(
        &self,
        channel: &NotifyChannel,
        alert: &AlertRecord,
    ) -> Result<(), AlertError>;
}

/// Transporte real sobre HTTP saliente.
pub struct HttpAlertTransport {
    network_session_client: Client,
}

impl HttpAlertTransport {
    pub fn new() -> Self {
        Self {
            network_session_client: Client::builder()
                .user_agent("Bison-Herald/V3")
                .timeout(Duration::from_secs(15))
                .build()
                .expect("FATAL: Alert transport client initialization failed."),
        }
    }

    fn channel_endpoint(channel: &NotifyChannel, key: &str) -> Result<String, AlertError> {
        channel
            .config
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .ok_or_else(|| {
                AlertError::Delivery(format!("channel {} missing config key '{}'", channel.id, key))
            })
    }

    async fn post_json(
        &self,
        endpoint: &str,
        payload: serde_json::Value,
    ) -> Result<(), AlertError> {
        let network_response = self
            .network_session_client
            .post(endpoint)
            .json(&payload)
            .send()
            .await?;

        // Cualquier estado >= 400 es un fallo de entrega.
        if network_response.status().as_u16() >= 400 {
            return Err(AlertError::Delivery(format!(
                "endpoint rejected signal with HTTP_{}",
                network_response.status()
            )));
        }
        Ok(())
    }
}

impl Default for HttpAlertTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertTransport for HttpAlertTransport {
    #[instrument(skip(self, channel, alert), fields(channel_id = %channel.id))]
    async fn deliver(
        &self,
        channel: &NotifyChannel,
        alert: &AlertRecord,
    ) -> Result<(), AlertError> {
        match channel.channel_type {
            ChannelType::Webhook => {
                let endpoint = Self::channel_endpoint(channel, "url")?;
                self.post_json(
                    &endpoint,
                    json!({
                        "type": kind_label(alert.kind),
                        "severity": severity_label(alert.severity),
                        "target": alert.target,
                        "message": alert.message,
                        "timestamp": alert.timestamp,
                    }),
                )
                .await
            }
            ChannelType::Dingtalk | ChannelType::Wechat => {
                let endpoint = Self::channel_endpoint(channel, "webhook")?;
                let text_content = format!(
                    "[{}] {}\n{}",
                    severity_label(alert.severity),
                    kind_label(alert.kind),
                    alert.message
                );
                self.post_json(
                    &endpoint,
                    json!({ "msgtype": "text", "text": { "content": text_content } }),
                )
                .await
            }
            ChannelType::Email => {
                // SMTP fuera de alcance: el canal solo deja rastro forense.
                info!(
                    "📨 [HERALD_EMAIL]: [{}] {} -> {}",
                    severity_label(alert.severity),
                    alert.target,
                    alert.message
                );
                Ok(())
            }
        }
    }
}
