// [libs/domain/alerting/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HERALD ALERTING ENGINE (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: EVALUACIÓN DE UMBRALES Y ABANICO DE ENTREGA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RE-EMISSION DOCTRINE: Cada pasada re-emite las señales vigentes;
 *    el enfriamiento por (equipo, clase) queda como extensión.
 * 2. ANY-ACK SEALING: Un solo canal con acuse basta para sellar 'sent';
 *    los fallos por canal se registran sin abortar el abanico.
 * =================================================================
 */

pub mod channels;
pub mod errors;
pub mod evaluator;

pub use channels::{AlertTransport, HttpAlertTransport};
pub use errors::AlertError;
pub use evaluator::AlertEvaluator;
