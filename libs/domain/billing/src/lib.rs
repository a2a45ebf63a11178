// [libs/domain/billing/src/lib.rs]
/*!
 * =================================================================
 * APARATO: BILLING CORE ENGINE (V4.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: GOBERNANZA FINANCIERA DEL PLANO DE CONTROL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE DEBTOR: El motor de facturación es el único emisor de
 *    débitos del sistema; la billetera ejecuta, el motor gobierna.
 * 2. GRACE STATE MACHINE: morosidad -> gracia -> cuarentena, con
 *    reanudación manual condicionada a balance no negativo.
 * 3. PARTIAL PROGRESS DOCTRINE: Un equipo fallido dentro de una pasada
 *    se registra y se salta; la pasada continúa con el resto.
 * =================================================================
 */

pub mod engine;
pub mod errors;
pub mod pricing;
pub mod recharge;
pub mod suspension;

pub use engine::{BillingEngine, CycleOutcome};
pub use errors::BillingError;
pub use recharge::AutoRechargeScheduler;
pub use suspension::SuspensionControl;
