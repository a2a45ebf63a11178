// [apps/control-plane/src/services/mod.rs]
/*!
 * =================================================================
 * APARATO: BACKGROUND SERVICES INDEX (V1.0 - SOBERANO)
 * CLASIFICACIÓN: BACKGROUND INFRASTRUCTURE (ESTRATO L4)
 * RESPONSABILIDAD: REGISTRO NOMINAL DE LOS DAEMONS DEL PLANO
 * =================================================================
 */

pub mod task_runner;

pub use task_runner::TaskRunner;
