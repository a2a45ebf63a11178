// [libs/domain/wallet/src/grace.rs]
/*!
 * =================================================================
 * APARATO: GRACE WINDOW CALCULUS (V1.3 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: ARITMÉTICA DE LA VENTANA DE GRACIA
 *
 * # Invariante:
 * Las unidades desconocidas en registros heredados degradan a días;
 * la validación de ingreso impide sembrar nuevas unidades inválidas.
 * =================================================================
 */

use bison_domain_models::GracePeriodUnit;
use chrono::{DateTime, Duration, Utc};

/// Marcador devuelto cuando la ventana de gracia ya venció.
pub const GRACE_EXPIRED: &str = "expired";

/// Traduce una unidad cruda heredada; lo desconocido degrada a días.
pub fn unit_from_raw(raw_unit: &str) -> GracePeriodUnit {
    match raw_unit {
        "hours" => GracePeriodUnit::Hours,
        _ => GracePeriodUnit::Days,
    }
}

/// Duración total de la ventana de gracia configurada.
pub fn grace_duration(value: u32, unit: GracePeriodUnit) -> Duration {
    match unit {
        GracePeriodUnit::Hours => Duration::hours(i64::from(value)),
        GracePeriodUnit::Days => Duration::days(i64::from(value)),
    }
}

/// Evalúa si la gracia expiró para un sello de morosidad dado.
pub fn is_grace_expired(
    overdue_at: DateTime<Utc>,
    now: DateTime<Utc>,
    value: u32,
    unit: GracePeriodUnit,
) -> bool {
    now - overdue_at >= grace_duration(value, unit)
}

/**
 * Representación humana del remanente de gracia.
 *
 * # Logic:
 * Remanente >= 1 día se presenta como "Nd Mh"; bajo un día, "Nh Mm";
 * agotado o vencido, el marcador 'expired'.
 */
pub fn grace_remaining(
    overdue_at: DateTime<Utc>,
    now: DateTime<Utc>,
    value: u32,
    unit: GracePeriodUnit,
) -> String {
    let deadline = overdue_at + grace_duration(value, unit);
    let remaining = deadline - now;

    if remaining <= Duration::zero() {
        return GRACE_EXPIRED.to_string();
    }

    let remaining_minutes = remaining.num_minutes();
    if remaining_minutes >= 24 * 60 {
        let days = remaining_minutes / (24 * 60);
        let hours = (remaining_minutes % (24 * 60)) / 60;
        format!("{}d {}h", days, hours)
    } else {
        let hours = remaining_minutes / 60;
        let minutes = remaining_minutes % 60;
        format!("{}h {}m", hours, minutes)
    }
}
