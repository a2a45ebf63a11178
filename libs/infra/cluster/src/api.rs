// [libs/infra/cluster/src/api.rs]
/*!
 * =================================================================
 * APARATO: CLUSTER CAPABILITY CONTRACT (V3.2 - GOLD MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE CONTRACT (ESTRATO L3)
 * RESPONSABILIDAD: TRAIT SOBERANO Y OBJETOS DEL API DE CONTROL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. OBJECT GRAMMAR: Define la forma exacta de los objetos del cluster
 *    que el plano de control consume (tenants, namespaces, nodos, pods,
 *    workloads, bindings, blobs) sin arrastrar un cliente kube completo.
 * 2. LABEL VOCABULARY: Las llaves de etiquetas/anotaciones del dominio
 *    'bison.io' viven aquí como contrato compartido entre bindings.
 *
 * # Mathematical Proof (Optimistic Revisions):
 * Cada blob porta una revisión monótona. Un update con revisión
 * obsoleta produce 'Conflict', forzando el ciclo releer-reintentar del
 * BlobVault y serializando así a los escritores concurrentes.
 * =================================================================
 */

use crate::errors::ClusterError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Particionado administrativo donde viven todos los blobs del sistema.
pub const ADMIN_PARTITION: &str = "bison-system";

// --- VOCABULARIO DE ETIQUETAS DEL DOMINIO ---

pub const LABEL_MANAGED: &str = "bison.io/managed";
pub const LABEL_TENANT: &str = "bison.io/tenant";
pub const LABEL_PROJECT: &str = "bison.io/project";
pub const LABEL_POOL: &str = "bison.io/pool";

/// Llave del taint que congela el scheduling sobre un nodo deshabilitado.
pub const TAINT_DISABLED: &str = "bison.io/disabled";
pub const TAINT_EFFECT_NO_SCHEDULE: &str = "NoSchedule";

// --- VOCABULARIO DE ANOTACIONES DEL DOMINIO ---

pub const ANNOTATION_DISPLAY_NAME: &str = "bison.io/display-name";
pub const ANNOTATION_DESCRIPTION: &str = "bison.io/description";
pub const ANNOTATION_MODE: &str = "bison.io/mode";
pub const ANNOTATION_SUSPENDED: &str = "bison.io/suspended";
pub const ANNOTATION_EXCLUSIVE_NODES: &str = "bison.io/exclusive-nodes";
pub const ANNOTATION_OWNERS: &str = "bison.io/owners";
pub const ANNOTATION_MEMBERS: &str = "bison.io/members";
pub const ANNOTATION_ORIGINAL_REPLICAS: &str = "bison.io/original-replicas";

/// Proyección de un equipo como objeto tenant del cluster.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TenantObject {
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    /// Selector de pool resuelto: {pool: shared} o {pool: team-<name>}.
    #[serde(default)]
    pub node_selector: BTreeMap<String, String>,
    /// Cuota en claves expandidas ('requests.cpu'); vacía en modo exclusivo.
    #[serde(default)]
    pub resource_quota: BTreeMap<String, String>,
}

/// Namespace gestionado dentro del cluster.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceObject {
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// Mancha de scheduling sobre un nodo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Taint {
    pub key: String,
    pub effect: String,
}

/// Nodo físico del cluster con su capacidad alocable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeObject {
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub taints: Vec<Taint>,
    /// Capacidad alocable: recurso -> cantidad ('16', '64Gi').
    #[serde(default)]
    pub allocatable: BTreeMap<String, String>,
    #[serde(default)]
    pub internal_ip: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub ready: bool,
}

/// Pod observado, con sus requests agregados por contenedor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PodObject {
    pub name: String,
    pub namespace: String,
    /// Fase reportada por el cluster ('Running', 'Pending'...).
    #[serde(default)]
    pub phase: String,
    /// Nombres de los dueños; vacío identifica un pod huérfano.
    #[serde(default)]
    pub owner_references: Vec<String>,
    /// Suma de requests de los contenedores: recurso -> cantidad.
    #[serde(default)]
    pub requests: BTreeMap<String, String>,
}

/// Clase de workload escalable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
}

/// Workload escalable (deployment o stateful set) de un namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadObject {
    pub kind: WorkloadKind,
    pub name: String,
    pub namespace: String,
    pub replicas: i32,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// Binding de un miembro de proyecto hacia un cluster role predefinido.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBindingSpec {
    pub name: String,
    pub namespace: String,
    pub subject_kind: String,
    pub subject_name: String,
    pub role_name: String,
}

/// Registro nominal del almacén de blobs administrativo.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlobRecord {
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Mapa llave -> documento JSON serializado.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    /// Revisión monótona para la concurrencia optimista.
    #[serde(default)]
    pub revision: u64,
}

/**
 * Contrato de capacidad del API de control del cluster.
 *
 * # Logic:
 * El plano de control jamás habla con el cluster fuera de este trait.
 * Los bindings disponibles son el gateway REST (despliegues) y el motor
 * en memoria (pruebas y modo local).
 */
#[async_trait]
pub trait ClusterControlApi: Send + Sync {
    /// Sonda de alcanzabilidad del uplink.
    async fn ping(&self) -> Result<(), ClusterError>;

    // --- TENANTS ---
    async fn list_tenants(&self) -> Result<Vec<TenantObject>, ClusterError>;
    async fn get_tenant(&self, name: &str) -> Result<Option<TenantObject>, ClusterError>;
    async fn create_tenant(&self, tenant: TenantObject) -> Result<(), ClusterError>;
    async fn update_tenant(&self, tenant: TenantObject) -> Result<(), ClusterError>;
    async fn delete_tenant(&self, name: &str) -> Result<(), ClusterError>;

    // --- NAMESPACES ---
    async fn list_namespaces(
        &self,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<NamespaceObject>, ClusterError>;
    async fn get_namespace(&self, name: &str) -> Result<Option<NamespaceObject>, ClusterError>;
    async fn create_namespace(&self, namespace: NamespaceObject) -> Result<(), ClusterError>;
    async fn update_namespace(&self, namespace: NamespaceObject) -> Result<(), ClusterError>;
    async fn delete_namespace(&self, name: &str) -> Result<(), ClusterError>;

    // --- NODOS ---
    async fn list_nodes(&self) -> Result<Vec<NodeObject>, ClusterError>;
    async fn get_node(&self, name: &str) -> Result<Option<NodeObject>, ClusterError>;
    async fn update_node(&self, node: NodeObject) -> Result<(), ClusterError>;

    // --- PODS ---
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodObject>, ClusterError>;
    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), ClusterError>;

    // --- WORKLOADS ---
    async fn list_workloads(&self, namespace: &str) -> Result<Vec<WorkloadObject>, ClusterError>;
    async fn scale_workload(
        &self,
        namespace: &str,
        kind: WorkloadKind,
        name: &str,
        replicas: i32,
    ) -> Result<(), ClusterError>;
    async fn annotate_workload(
        &self,
        namespace: &str,
        kind: WorkloadKind,
        name: &str,
        key: &str,
        value: Option<String>,
    ) -> Result<(), ClusterError>;

    // --- ROLE BINDINGS ---
    async fn upsert_role_binding(&self, binding: RoleBindingSpec) -> Result<(), ClusterError>;
    async fn delete_role_binding(&self, namespace: &str, name: &str) -> Result<(), ClusterError>;

    // --- BLOBS ADMINISTRATIVOS ---
    async fn get_blob(&self, partition: &str, name: &str)
        -> Result<Option<BlobRecord>, ClusterError>;
    async fn create_blob(
        &self,
        partition: &str,
        blob: BlobRecord,
    ) -> Result<BlobRecord, ClusterError>;
    async fn update_blob(
        &self,
        partition: &str,
        blob: BlobRecord,
    ) -> Result<BlobRecord, ClusterError>;
}
