// [libs/domain/models/src/wallet.rs]
/*!
 * =================================================================
 * APARATO: WALLET DOMAIN CONTRACTS (V2.2 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: GRAMÁTICA DEL BALANCE Y DEL LEDGER ACOTADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. OVERDUE PRECISION: El sello 'overdue_at' captura el instante exacto
 *    del primer cruce bajo cero y se limpia al retornar a territorio
 *    no negativo.
 * 2. LEDGER IMMUTABILITY: Cada asiento registra el balance resultante,
 *    permitiendo la auditoría encadenada e₂.balance = e₁.balance + e₂.amount.
 *
 * # Mathematical Proof (Bounded Retention):
 * El ledger retiene como máximo LEDGER_RETENTION asientos por equipo;
 * el recorte es FIFO, preservando siempre la cola más reciente.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Retención máxima de asientos del ledger por equipo.
pub const LEDGER_RETENTION: usize = 1000;

/// Naturaleza de un asiento del ledger financiero.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// Abono manual ejecutado por un operador.
    Recharge,
    /// Débito por consumo, emitido únicamente por el motor de facturación.
    Deduction,
    /// Abono programado, emitido únicamente por el planificador de recargas.
    AutoRecharge,
}

/// Asiento inmutable del ledger de un equipo.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Identificador unívoco universal del asiento (UUID v4).
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: LedgerKind,
    /// Magnitud con signo: negativa para débitos, positiva para abonos.
    pub amount: f64,
    /// Sujeto que originó el movimiento ('system' para débitos automáticos).
    pub operator: String,
    #[serde(default)]
    pub reason: String,
    /// Balance resultante tras aplicar este asiento.
    pub balance: f64,
}

/// Instantánea del estado financiero de un equipo.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub team: String,
    /// Balance con signo. Puede ser negativo durante el periodo de gracia.
    pub amount: f64,
    pub last_updated: DateTime<Utc>,
    /// Instante del primer cruce bajo cero desde el último retorno a >= 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdue_at: Option<DateTime<Utc>>,
    /// Proyección del agotamiento del balance según el consumo promedio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_overdue_at: Option<DateTime<Utc>>,
    /// Promedio diario de consumo de los últimos 7 días.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_consumption: Option<f64>,
}

impl WalletSnapshot {
    /// Billetera vacía: balance cero y sin sellos de morosidad.
    pub fn empty(team: &str, now: DateTime<Utc>) -> Self {
        Self {
            team: team.to_string(),
            amount: 0.0,
            last_updated: now,
            overdue_at: None,
            estimated_overdue_at: None,
            daily_consumption: None,
        }
    }
}
