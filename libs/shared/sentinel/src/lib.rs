// [libs/shared/sentinel/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SENTINEL NEURAL OBSERVER (V2.1 - GOLD MASTER)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4/L6)
 * RESPONSABILIDAD: GESTIÓN DE TELEMETRÍA, TRAZADO Y CAPTURA DE PÁNICOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL MODE: Logs interactivos con color en desarrollo; tramas JSON
 *    planas en producción para la ingesta estructurada.
 * 2. PHOENIX SHIELD: Hook de pánico con volcado de ubicación para que
 *    una terminación abrupta preserve el rastro forense.
 *
 * # Mathematical Proof (Observability Integrity):
 * El filtro dinámico prioriza los estratos del dominio y silencia el
 * ruido de infraestructura (tower, hyper), manteniendo el costo de
 * registro sublineal respecto del tráfico HTTP.
 * =================================================================
 */

use std::panic;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

/// Inicializa el sistema de trazas con blindaje de pánicos soberano.
///
/// # Comportamiento:
/// - Desarrollo: logs interactivos con resaltado de color.
/// - Producción: estructura JSON plana para la ingesta estructurada.
///
/// # Panics:
/// Si otro suscriptor global ya fue inicializado en el runtime.
pub fn init_tracing(service_nominal_identifier: &str) {
    let environmental_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},tower_http=warn,hyper=warn",
            service_nominal_identifier,
            level = if cfg!(debug_assertions) { "debug" } else { "info" }
        )
        .into()
    });

    let is_production_strata = !cfg!(debug_assertions);

    if is_production_strata {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(environmental_filter)
            .with(formatting_layer::layer().with_target(true))
            .init();
    }

    install_panic_shield();
}

/// Hook de pánico con volcado de estrato y ubicación.
fn install_panic_shield() {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let panic_location = panic_info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()))
            .unwrap_or_else(|| "unknown".to_string());

        error!(
            "🛡️ [PANIC_SHIELD]: Stratum collapse at [{}] -> {}",
            panic_location, panic_info
        );
        previous_hook(panic_info);
    }));
}
