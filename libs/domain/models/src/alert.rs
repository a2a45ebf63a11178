// [libs/domain/models/src/alert.rs]
/*!
 * =================================================================
 * APARATO: HERALD ALERT CONTRACTS (V2.0 - STRICT ALIGNMENT)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: GRAMÁTICA DE SEÑALES FINANCIERAS Y CANALES DE ENTREGA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MULTI-CHANNEL FAN-OUT: El registro captura qué canales aceptaron
 *    la señal; un solo acuse basta para sellar 'sent'.
 * 2. BOUNDED FORENSICS: El historial de alertas retiene las 1000 señales
 *    más recientes en el blob administrativo.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use typeshare::typeshare;

/// Retención máxima de señales en el historial de alertas.
pub const ALERT_HISTORY_RETENTION: usize = 1000;

/// Clase semántica de la señal emitida.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Balance positivo pero por debajo del umbral configurado.
    LowBalance,
    /// Balance negativo: el equipo corre sobre el periodo de gracia.
    NegativeBalance,
    /// Señal de prueba disparada manualmente contra un canal.
    Test,
}

/// Urgencia de la señal para el tratamiento visual y de entrega.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Registro de una señal emitida, sellado en el historial acotado.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    /// Identificador unívoco universal de la señal (UUID v4).
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    /// Equipo objetivo de la señal.
    pub target: String,
    pub message: String,
    /// Verdadero si al menos un canal aceptó la entrega.
    #[serde(default)]
    pub sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    /// Canales que confirmaron la recepción de la señal.
    #[serde(default)]
    pub delivered_channels: Vec<String>,
}

/// Tipo de transporte de un canal de notificación.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Webhook,
    Dingtalk,
    Wechat,
    Email,
}

/// Canal de entrega configurable para el abanico de alertas.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyChannel {
    pub id: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub name: String,
    /// Configuración específica del transporte (url, webhook, smtp...).
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    #[serde(default)]
    pub enabled: bool,
}

/// Configuración persistida del evaluador de alertas.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConfig {
    /// Umbral de balance bajo. Las señales se emiten para amount < umbral.
    #[serde(default)]
    pub balance_threshold: f64,
    #[serde(default)]
    pub channels: Vec<NotifyChannel>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            balance_threshold: 0.0,
            channels: Vec::new(),
        }
    }
}
