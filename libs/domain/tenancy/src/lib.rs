// [libs/domain/tenancy/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TENANCY DOMAIN ENGINE (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PROYECCIÓN EQUIPO/PROYECTO Y GOBERNANZA DEL POOL
 * =================================================================
 */

pub mod errors;
pub mod node_pools;
pub mod projection;
pub mod projects;
pub mod quantity;
pub mod teams;

pub use errors::TenancyError;
pub use node_pools::{NodePoolController, NodePoolState};
pub use projects::ProjectService;
pub use teams::TeamService;
