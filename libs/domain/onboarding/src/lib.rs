// [libs/domain/onboarding/src/lib.rs]
/*!
 * =================================================================
 * APARATO: NODE ONBOARDING ENGINE (V4.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: INCORPORACIÓN REMOTA DE NODOS Y CATÁLOGO DE SCRIPTS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NINE-STEP LADDER: Conexión, plataforma, entorno, pre-join, token,
 *    join, post-join, espera de Ready y habilitación en el pool.
 * 2. PER-IP EXCLUSION: Una IP con trabajo pendiente o en curso rechaza
 *    nuevos trabajos; un trabajo fallido libera la IP para reintentos.
 * 3. COOPERATIVE CANCEL: Cada worker porta su canal de cancelación;
 *    los efectos remotos parciales son riesgo del operador.
 * =================================================================
 */

pub mod catalog;
pub mod errors;
pub mod orchestrator;
pub mod platform;

pub use catalog::ScriptCatalog;
pub use errors::OnboardError;
pub use orchestrator::{OnboardRequest, OnboardingOrchestrator};
