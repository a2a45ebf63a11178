// [libs/infra/cluster/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CLUSTER CONTROL UPLINK (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: ENLACE SOBERANO CON EL API DE CONTROL DEL CLUSTER
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CAPABILITY SEAM: Todo el plano de control consume el cluster a
 *    través del trait 'ClusterControlApi'; el binding concreto (gateway
 *    REST o motor en memoria) se decide en la ignición.
 * 2. ETCD-ONLY PERSISTENCE: El 'BlobVault' es la única ruta hacia el
 *    estado durable; no existe almacén relacional en el sistema.
 * =================================================================
 */

pub mod api;
pub mod blobs;
pub mod errors;
pub mod memory;
pub mod names;
pub mod rest;

pub use api::{
    BlobRecord, ClusterControlApi, NamespaceObject, NodeObject, PodObject, RoleBindingSpec,
    Taint, TenantObject, WorkloadKind, WorkloadObject, ADMIN_PARTITION,
};
pub use blobs::BlobVault;
pub use errors::ClusterError;
pub use memory::MemoryCluster;
pub use rest::RestCluster;
