// [libs/domain/wallet/src/service.rs]
/*!
 * =================================================================
 * APARATO: WALLET LEDGER SERVICE (V3.2 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: BALANCE, LEDGER ACOTADO Y PROYECCIÓN DE CONSUMO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CHAINED AUDIT: Cada asiento sella el balance resultante; la cadena
 *    e₂.balance = e₁.balance + e₂.amount es verificable de punta a punta.
 * 2. CORRUPTION TOLERANCE: Una entrada ilegible del blob se registra y
 *    degrada a 'sin billetera' en vez de abortar el listado completo.
 *
 * # Mathematical Proof (Retention):
 * El ledger conserva los últimos LEDGER_RETENTION asientos por equipo;
 * el recorte FIFO ocurre en la misma mutación que el append, por lo que
 * ningún lector observa un ledger por encima del tope.
 * =================================================================
 */

use crate::errors::WalletError;
use bison_domain_models::wallet::LEDGER_RETENTION;
use bison_domain_models::{LedgerEntry, LedgerKind, WalletSnapshot};
use bison_infra_cluster::BlobVault;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Blob del mapa equipo -> instantánea de billetera.
const BALANCES_BLOB: &str = bison_infra_cluster::names::BALANCES;

/// Blob del mapa equipo -> ledger serializado.
const HISTORY_BLOB: &str = bison_infra_cluster::names::RECHARGE_HISTORY;

/// Operador sellado en los movimientos automáticos.
pub const SYSTEM_OPERATOR: &str = "system";

/// Ventana de observación del consumo promedio.
const CONSUMPTION_WINDOW_DAYS: f64 = 7.0;

/// Piso del span observado para la proyección (una hora en días).
const CONSUMPTION_SPAN_FLOOR: f64 = 1.0 / 24.0;

#[derive(Clone)]
pub struct WalletService {
    vault: BlobVault,
}

impl WalletService {
    pub fn new(vault: BlobVault) -> Self {
        Self { vault }
    }

    // --- LECTURA ---

    /// Decodifica la instantánea cruda; lo corrupto degrada a None.
    fn decode_snapshot(team: &str, raw_document: &str) -> Option<WalletSnapshot> {
        match serde_json::from_str::<WalletSnapshot>(raw_document) {
            Ok(snapshot) => Some(snapshot),
            Err(decoding_fault) => {
                warn!(
                    "💰 [WALLET_CORRUPTION]: Unreadable balance entry for [{}]: {}",
                    team, decoding_fault
                );
                None
            }
        }
    }

    /// Billetera del equipo; vacía cuando aún no tiene asientos.
    pub async fn get(&self, team: &str) -> Result<WalletSnapshot, WalletError> {
        let now = Utc::now();
        let stored = self
            .vault
            .get(BALANCES_BLOB)
            .await?
            .and_then(|blob| blob.data.get(team).and_then(|raw| Self::decode_snapshot(team, raw)));

        let mut snapshot = stored.unwrap_or_else(|| WalletSnapshot::empty(team, now));
        self.enrich_projection(&mut snapshot, now).await?;
        Ok(snapshot)
    }

    /// Todas las billeteras con asiento persistido.
    pub async fn get_all(&self) -> Result<Vec<WalletSnapshot>, WalletError> {
        let now = Utc::now();
        let Some(balances_blob) = self.vault.get(BALANCES_BLOB).await? else {
            return Ok(Vec::new());
        };

        let mut snapshots = Vec::new();
        for (team, raw_document) in &balances_blob.data {
            if let Some(mut snapshot) = Self::decode_snapshot(team, raw_document) {
                self.enrich_projection(&mut snapshot, now).await?;
                snapshots.push(snapshot);
            }
        }
        Ok(snapshots)
    }

    /// Billeteras con balance estrictamente inferior al umbral.
    pub async fn low_balance(&self, threshold: f64) -> Result<Vec<WalletSnapshot>, WalletError> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|snapshot| snapshot.amount < threshold)
            .collect())
    }

    /// Ledger del equipo, el asiento más reciente primero.
    pub async fn history(&self, team: &str, limit: usize) -> Result<Vec<LedgerEntry>, WalletError> {
        let mut ledger = self.read_ledger(team).await?;
        ledger.reverse();
        ledger.truncate(limit);
        Ok(ledger)
    }

    // --- MOVIMIENTOS ---

    /// Abono manual. Rechaza magnitudes no positivas.
    #[instrument(skip(self, reason))]
    pub async fn recharge(
        &self,
        team: &str,
        amount: f64,
        operator: &str,
        reason: &str,
    ) -> Result<WalletSnapshot, WalletError> {
        if amount <= 0.0 {
            return Err(WalletError::NonPositiveAmount(amount));
        }
        let snapshot = self
            .apply_delta(team, amount, LedgerKind::Recharge, operator, reason)
            .await?;
        info!("💰 [WALLET_RECHARGE]: [{}] credited {:.2} by {}.", team, amount, operator);
        Ok(snapshot)
    }

    /// Abono programado sellado por el planificador.
    #[instrument(skip(self, reason))]
    pub async fn auto_credit(
        &self,
        team: &str,
        amount: f64,
        reason: &str,
    ) -> Result<WalletSnapshot, WalletError> {
        if amount <= 0.0 {
            return Err(WalletError::NonPositiveAmount(amount));
        }
        self.apply_delta(team, amount, LedgerKind::AutoRecharge, SYSTEM_OPERATOR, reason)
            .await
    }

    /**
     * Débito por consumo. Cruza cero sin tocar el sello de morosidad;
     * esa transición la gobierna el motor de facturación.
     */
    #[instrument(skip(self, reason))]
    pub async fn deduct(
        &self,
        team: &str,
        amount: f64,
        reason: &str,
    ) -> Result<WalletSnapshot, WalletError> {
        if amount <= 0.0 {
            return Err(WalletError::NonPositiveAmount(amount));
        }
        let snapshot = self
            .apply_delta(team, -amount, LedgerKind::Deduction, SYSTEM_OPERATOR, reason)
            .await?;
        info!("💰 [WALLET_DEBIT]: [{}] debited {:.2}; balance {:.2}.", team, amount, snapshot.amount);
        Ok(snapshot)
    }

    /// Sella o limpia el instante del primer cruce bajo cero.
    pub async fn set_overdue_at(
        &self,
        team: &str,
        overdue_at: Option<DateTime<Utc>>,
    ) -> Result<(), WalletError> {
        let team_key = team.to_string();
        self.vault
            .mutate(BALANCES_BLOB, move |data| {
                let now = Utc::now();
                let mut snapshot = data
                    .get(&team_key)
                    .and_then(|raw| serde_json::from_str::<WalletSnapshot>(raw).ok())
                    .unwrap_or_else(|| WalletSnapshot::empty(&team_key, now));
                snapshot.overdue_at = overdue_at;
                snapshot.last_updated = now;
                data.insert(team_key.clone(), serde_json::to_string(&snapshot)?);
                Ok(())
            })
            .await?;
        Ok(())
    }

    // --- PROYECCIÓN DE CONSUMO ---

    /**
     * Promedio diario de consumo sobre los últimos 7 días.
     *
     * # Logic:
     * Solo cuentan los asientos negativos. Con menos de 7 días de
     * historia, el promedio usa el span real desde el asiento más
     * antiguo hasta ahora, con piso de una hora.
     */
    pub async fn daily_consumption(&self, team: &str) -> Result<f64, WalletError> {
        let ledger = self.read_ledger(team).await?;
        Ok(Self::consumption_rate(&ledger, Utc::now()))
    }

    /// Núcleo puro de la tasa de consumo, auditable en pruebas.
    pub fn consumption_rate(ledger: &[LedgerEntry], now: DateTime<Utc>) -> f64 {
        let Some(oldest_entry) = ledger.first() else {
            return 0.0;
        };

        let window_start = now - Duration::days(CONSUMPTION_WINDOW_DAYS as i64);
        let spent_in_window: f64 = ledger
            .iter()
            .filter(|entry| entry.amount < 0.0 && entry.timestamp >= window_start)
            .map(|entry| -entry.amount)
            .sum();

        if spent_in_window <= 0.0 {
            return 0.0;
        }

        let observed_span_days = (now - oldest_entry.timestamp).num_seconds() as f64 / 86_400.0;
        let effective_span = observed_span_days.clamp(CONSUMPTION_SPAN_FLOOR, CONSUMPTION_WINDOW_DAYS);
        spent_in_window / effective_span
    }

    /// Completa la proyección de agotamiento sobre una instantánea viva.
    async fn enrich_projection(
        &self,
        snapshot: &mut WalletSnapshot,
        now: DateTime<Utc>,
    ) -> Result<(), WalletError> {
        let ledger = self.read_ledger(&snapshot.team).await?;
        let daily_rate = Self::consumption_rate(&ledger, now);

        snapshot.daily_consumption = (daily_rate > 0.0).then_some(daily_rate);
        snapshot.estimated_overdue_at = if snapshot.amount > 0.0 && daily_rate > 0.0 {
            let days_until_exhaustion = snapshot.amount / daily_rate;
            Some(now + Duration::seconds((days_until_exhaustion * 86_400.0) as i64))
        } else {
            None
        };
        Ok(())
    }

    // --- NÚCLEO DE PERSISTENCIA ---

    async fn read_ledger(&self, team: &str) -> Result<Vec<LedgerEntry>, WalletError> {
        let Some(history_blob) = self.vault.get(HISTORY_BLOB).await? else {
            return Ok(Vec::new());
        };
        let Some(raw_ledger) = history_blob.data.get(team) else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<LedgerEntry>>(raw_ledger) {
            Ok(ledger) => Ok(ledger),
            Err(decoding_fault) => {
                warn!(
                    "💰 [WALLET_CORRUPTION]: Unreadable ledger for [{}]: {}",
                    team, decoding_fault
                );
                Ok(Vec::new())
            }
        }
    }

    /// Aplica el delta al balance y sella el asiento correspondiente.
    async fn apply_delta(
        &self,
        team: &str,
        delta: f64,
        kind: LedgerKind,
        operator: &str,
        reason: &str,
    ) -> Result<WalletSnapshot, WalletError> {
        let team_key = team.to_string();

        // 1. SELLADO DEL BALANCE (blob 'balances')
        let updated_snapshot = self
            .vault
            .mutate(BALANCES_BLOB, move |data| {
                let now = Utc::now();
                let mut snapshot = data
                    .get(&team_key)
                    .and_then(|raw| serde_json::from_str::<WalletSnapshot>(raw).ok())
                    .unwrap_or_else(|| WalletSnapshot::empty(&team_key, now));
                snapshot.amount += delta;
                snapshot.last_updated = now;
                data.insert(team_key.clone(), serde_json::to_string(&snapshot)?);
                Ok(snapshot)
            })
            .await?;

        // 2. APPEND DEL ASIENTO (blob 'recharge-history', retención FIFO)
        let ledger_entry = LedgerEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: updated_snapshot.last_updated,
            kind,
            amount: delta,
            operator: operator.to_string(),
            reason: reason.to_string(),
            balance: updated_snapshot.amount,
        };

        let team_key = team.to_string();
        self.vault
            .mutate(HISTORY_BLOB, move |data| {
                let mut ledger = data
                    .get(&team_key)
                    .and_then(|raw| serde_json::from_str::<Vec<LedgerEntry>>(raw).ok())
                    .unwrap_or_default();
                ledger.push(ledger_entry.clone());
                if ledger.len() > LEDGER_RETENTION {
                    let overflow = ledger.len() - LEDGER_RETENTION;
                    ledger.drain(0..overflow);
                }
                data.insert(team_key.clone(), serde_json::to_string(&ledger)?);
                Ok(())
            })
            .await?;

        Ok(updated_snapshot)
    }
}
