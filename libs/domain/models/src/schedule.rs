// [libs/domain/models/src/schedule.rs]
/*!
 * =================================================================
 * APARATO: AUTO-RECHARGE SCHEDULE CONTRACTS (V1.3 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: GRAMÁTICA DEL PLAN DE RECARGA RECURRENTE
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Cadencia del plan de recarga automática.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RechargeCadence {
    /// Dispara según día de la semana (0 = domingo .. 6 = sábado).
    Weekly,
    /// Dispara según día del mes (1..=31, recortado al fin de mes corto).
    Monthly,
}

/// Plan de recarga recurrente de un equipo.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRechargePlan {
    #[serde(default)]
    pub enabled: bool,
    /// Monto abonado en cada disparo. Estrictamente positivo si enabled.
    pub amount: f64,
    pub cadence: RechargeCadence,
    /// 0..=6 para weekly, 1..=31 para monthly.
    pub day: u32,
    /// Próximo instante de disparo, recalculado en cada edición y disparo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_fire: Option<DateTime<Utc>>,
    /// Último disparo ejecutado.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fire: Option<DateTime<Utc>>,
}

impl AutoRechargePlan {
    /// Evalúa la coherencia del día contra la cadencia declarada.
    pub fn day_in_range(&self) -> bool {
        match self.cadence {
            RechargeCadence::Weekly => self.day <= 6,
            RechargeCadence::Monthly => (1..=31).contains(&self.day),
        }
    }
}
