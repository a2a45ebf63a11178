// [libs/domain/transfer/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CONFIG TRANSFER ENGINE (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: EXPORT / PREVIEW / APPLY DE LA CONFIGURACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SECTION SCOPE: Cinco secciones transferibles (billing, alerts,
 *    resources, controlPlane, initScripts); lo desconocido advierte y
 *    se ignora, jamás aborta.
 * 2. SENSITIVE DISCIPLINE: La exportación censura secretos salvo
 *    petición explícita; la aplicación puede preservar los valores
 *    vivos detrás de los centinelas.
 * =================================================================
 */

pub mod errors;
pub mod redaction;
pub mod service;

pub use errors::TransferError;
pub use service::ConfigTransfer;
