// [libs/domain/models/src/billing_config.rs]
/*!
 * =================================================================
 * APARATO: BILLING CONFIGURATION CONTRACTS (V2.1 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: GRAMÁTICA DE LA POLÍTICA DE FACTURACIÓN Y GRACIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STRICT INGRESS: La validación rechaza unidades de gracia fuera de
 *    {hours, days} en el momento de escritura; los registros antiguos
 *    con unidades desconocidas degradan a días en la evaluación.
 * 2. INTERVAL WINDOW DUALITY: El intervalo del ciclo es también la
 *    ventana de consulta pasada al oráculo de costos.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use typeshare::typeshare;

/// Unidad del periodo de gracia antes de la suspensión automática.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GracePeriodUnit {
    Hours,
    Days,
}

/// Precio declarado manualmente para un recurso sin definición habilitada.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub price: f64,
    #[serde(default)]
    pub unit: String,
}

/// Política persistida del motor de facturación.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Periodo del ciclo en horas (1..=24); también la ventana del oráculo.
    pub interval: u32,
    pub currency: String,
    #[serde(default)]
    pub currency_symbol: String,
    /// Tabla de respaldo recurso -> precio para claves sin definición.
    #[serde(default)]
    pub pricing: BTreeMap<String, PriceEntry>,
    /// Magnitud del periodo de gracia. Estrictamente positiva.
    pub grace_period_value: u32,
    pub grace_period_unit: GracePeriodUnit,
}

impl Default for BillingConfig {
    /// Política por defecto: ciclo horario, gracia de 3 días, apagado.
    fn default() -> Self {
        Self {
            enabled: false,
            interval: 1,
            currency: "USD".to_string(),
            currency_symbol: "$".to_string(),
            pricing: BTreeMap::new(),
            grace_period_value: 3,
            grace_period_unit: GracePeriodUnit::Days,
        }
    }
}

/// Violaciones de la política de facturación detectadas en la escritura.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingConfigViolation {
    #[error("[L2_BILLING_POLICY]: INTERVAL_OUT_OF_RANGE -> {0} (expected 1..=24)")]
    IntervalOutOfRange(u32),
    #[error("[L2_BILLING_POLICY]: CURRENCY_EMPTY")]
    CurrencyEmpty,
    #[error("[L2_BILLING_POLICY]: GRACE_PERIOD_NOT_POSITIVE")]
    GracePeriodNotPositive,
}

impl BillingConfig {
    /**
     * Valida la coherencia de la política antes de sellarla en el blob.
     *
     * # Errors:
     * Retorna la primera violación encontrada; el llamador la traduce
     * a una respuesta 400 sin reintento.
     */
    pub fn validate(&self) -> Result<(), BillingConfigViolation> {
        if !(1..=24).contains(&self.interval) {
            return Err(BillingConfigViolation::IntervalOutOfRange(self.interval));
        }
        if self.currency.trim().is_empty() {
            return Err(BillingConfigViolation::CurrencyEmpty);
        }
        if self.grace_period_value == 0 {
            return Err(BillingConfigViolation::GracePeriodNotPositive);
        }
        Ok(())
    }
}
