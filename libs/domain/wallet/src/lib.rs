// [libs/domain/wallet/src/lib.rs]
/*!
 * =================================================================
 * APARATO: WALLET DOMAIN ENGINE (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: GOBERNANZA FINANCIERA POR EQUIPO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE WRITER DISCIPLINE: La billetera es la única escritora de los
 *    blobs 'balances' y 'recharge-history'; el resto del sistema la
 *    consume como servicio.
 * 2. OVERDUE NEUTRALITY: El débito cruza cero sin tocar el sello de
 *    morosidad; esa transición pertenece al motor de facturación.
 * =================================================================
 */

pub mod errors;
pub mod grace;
pub mod service;

pub use errors::WalletError;
pub use service::{WalletService, SYSTEM_OPERATOR};
