// [libs/infra/cluster/src/memory.rs]
/*!
 * =================================================================
 * APARATO: MEMORY CLUSTER ENGINE (V2.4 - PROVING GROUNDS READY)
 * CLASIFICACIÓN: INFRASTRUCTURE BINDING (ESTRATO L3)
 * RESPONSABILIDAD: BINDING EN MEMORIA DEL API DE CONTROL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FULL CONTRACT PARITY: Implementa el contrato completo, incluida la
 *    semántica de revisión optimista de los blobs, para que las pruebas
 *    ejerciten exactamente el mismo camino que producción.
 * 2. CONTROLLER EMULATION: El borrado de tenants y namespaces cascada
 *    sobre los objetos hijos, emulando al garbage collector del cluster.
 * =================================================================
 */

use crate::api::{
    BlobRecord, ClusterControlApi, NamespaceObject, NodeObject, PodObject, RoleBindingSpec,
    TenantObject, WorkloadKind, WorkloadObject, LABEL_TENANT,
};
use crate::errors::ClusterError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct MemoryState {
    tenants: BTreeMap<String, TenantObject>,
    namespaces: BTreeMap<String, NamespaceObject>,
    nodes: BTreeMap<String, NodeObject>,
    /// Pods por namespace.
    pods: BTreeMap<String, Vec<PodObject>>,
    /// Workloads por namespace.
    workloads: BTreeMap<String, Vec<WorkloadObject>>,
    /// Bindings por (namespace, nombre).
    role_bindings: BTreeMap<(String, String), RoleBindingSpec>,
    /// Blobs por (partición, nombre).
    blobs: BTreeMap<(String, String), BlobRecord>,
}

/// Motor en memoria para pruebas y modo local.
#[derive(Default)]
pub struct MemoryCluster {
    state: RwLock<MemoryState>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    // --- SEMBRADO DIRECTO (PROVING GROUNDS) ---

    pub fn seed_node(&self, node: NodeObject) {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        guard.nodes.insert(node.name.clone(), node);
    }

    pub fn seed_pod(&self, pod: PodObject) {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        guard.pods.entry(pod.namespace.clone()).or_default().push(pod);
    }

    pub fn seed_workload(&self, workload: WorkloadObject) {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        guard
            .workloads
            .entry(workload.namespace.clone())
            .or_default()
            .push(workload);
    }

    /// Purga en cascada de los hijos de un namespace.
    fn evict_namespace_children(state: &mut MemoryState, namespace: &str) {
        state.pods.remove(namespace);
        state.workloads.remove(namespace);
        state
            .role_bindings
            .retain(|(binding_namespace, _), _| binding_namespace != namespace);
    }
}

#[async_trait]
impl ClusterControlApi for MemoryCluster {
    async fn ping(&self) -> Result<(), ClusterError> {
        Ok(())
    }

    // --- TENANTS ---

    async fn list_tenants(&self) -> Result<Vec<TenantObject>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard.tenants.values().cloned().collect())
    }

    async fn get_tenant(&self, name: &str) -> Result<Option<TenantObject>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard.tenants.get(name).cloned())
    }

    async fn create_tenant(&self, tenant: TenantObject) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        if guard.tenants.contains_key(&tenant.name) {
            return Err(ClusterError::Conflict);
        }
        guard.tenants.insert(tenant.name.clone(), tenant);
        Ok(())
    }

    async fn update_tenant(&self, tenant: TenantObject) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        if !guard.tenants.contains_key(&tenant.name) {
            return Err(ClusterError::NotFound);
        }
        guard.tenants.insert(tenant.name.clone(), tenant);
        Ok(())
    }

    async fn delete_tenant(&self, name: &str) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        if guard.tenants.remove(name).is_none() {
            return Err(ClusterError::NotFound);
        }

        // Emulación del controlador: cascada sobre los namespaces del tenant.
        let owned_namespaces: Vec<String> = guard
            .namespaces
            .values()
            .filter(|namespace| {
                namespace.labels.get(LABEL_TENANT).map(String::as_str) == Some(name)
            })
            .map(|namespace| namespace.name.clone())
            .collect();

        for namespace_name in owned_namespaces {
            guard.namespaces.remove(&namespace_name);
            Self::evict_namespace_children(&mut guard, &namespace_name);
        }
        Ok(())
    }

    // --- NAMESPACES ---

    async fn list_namespaces(
        &self,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<NamespaceObject>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard
            .namespaces
            .values()
            .filter(|namespace| {
                selector
                    .iter()
                    .all(|(key, value)| namespace.labels.get(key) == Some(value))
            })
            .cloned()
            .collect())
    }

    async fn get_namespace(&self, name: &str) -> Result<Option<NamespaceObject>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard.namespaces.get(name).cloned())
    }

    async fn create_namespace(&self, namespace: NamespaceObject) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        if guard.namespaces.contains_key(&namespace.name) {
            return Err(ClusterError::Conflict);
        }
        guard.namespaces.insert(namespace.name.clone(), namespace);
        Ok(())
    }

    async fn update_namespace(&self, namespace: NamespaceObject) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        if !guard.namespaces.contains_key(&namespace.name) {
            return Err(ClusterError::NotFound);
        }
        guard.namespaces.insert(namespace.name.clone(), namespace);
        Ok(())
    }

    async fn delete_namespace(&self, name: &str) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        if guard.namespaces.remove(name).is_none() {
            return Err(ClusterError::NotFound);
        }
        Self::evict_namespace_children(&mut guard, name);
        Ok(())
    }

    // --- NODOS ---

    async fn list_nodes(&self) -> Result<Vec<NodeObject>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard.nodes.values().cloned().collect())
    }

    async fn get_node(&self, name: &str) -> Result<Option<NodeObject>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard.nodes.get(name).cloned())
    }

    async fn update_node(&self, node: NodeObject) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        if !guard.nodes.contains_key(&node.name) {
            return Err(ClusterError::NotFound);
        }
        guard.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    // --- PODS ---

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodObject>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard.pods.get(namespace).cloned().unwrap_or_default())
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        let namespace_pods = guard.pods.get_mut(namespace).ok_or(ClusterError::NotFound)?;
        let population_before = namespace_pods.len();
        namespace_pods.retain(|pod| pod.name != name);
        if namespace_pods.len() == population_before {
            return Err(ClusterError::NotFound);
        }
        Ok(())
    }

    // --- WORKLOADS ---

    async fn list_workloads(&self, namespace: &str) -> Result<Vec<WorkloadObject>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard.workloads.get(namespace).cloned().unwrap_or_default())
    }

    async fn scale_workload(
        &self,
        namespace: &str,
        kind: WorkloadKind,
        name: &str,
        replicas: i32,
    ) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        let namespace_workloads =
            guard.workloads.get_mut(namespace).ok_or(ClusterError::NotFound)?;
        let target = namespace_workloads
            .iter_mut()
            .find(|workload| workload.kind == kind && workload.name == name)
            .ok_or(ClusterError::NotFound)?;
        target.replicas = replicas;
        Ok(())
    }

    async fn annotate_workload(
        &self,
        namespace: &str,
        kind: WorkloadKind,
        name: &str,
        key: &str,
        value: Option<String>,
    ) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        let namespace_workloads =
            guard.workloads.get_mut(namespace).ok_or(ClusterError::NotFound)?;
        let target = namespace_workloads
            .iter_mut()
            .find(|workload| workload.kind == kind && workload.name == name)
            .ok_or(ClusterError::NotFound)?;
        match value {
            Some(annotation_value) => {
                target.annotations.insert(key.to_string(), annotation_value);
            }
            None => {
                target.annotations.remove(key);
            }
        }
        Ok(())
    }

    // --- ROLE BINDINGS ---

    async fn upsert_role_binding(&self, binding: RoleBindingSpec) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        guard
            .role_bindings
            .insert((binding.namespace.clone(), binding.name.clone()), binding);
        Ok(())
    }

    async fn delete_role_binding(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        guard
            .role_bindings
            .remove(&(namespace.to_string(), name.to_string()))
            .ok_or(ClusterError::NotFound)?;
        Ok(())
    }

    // --- BLOBS ---

    async fn get_blob(
        &self,
        partition: &str,
        name: &str,
    ) -> Result<Option<BlobRecord>, ClusterError> {
        let guard = self.state.read().expect("memory cluster lock poisoned");
        Ok(guard
            .blobs
            .get(&(partition.to_string(), name.to_string()))
            .cloned())
    }

    async fn create_blob(
        &self,
        partition: &str,
        mut blob: BlobRecord,
    ) -> Result<BlobRecord, ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        let storage_key = (partition.to_string(), blob.name.clone());
        if guard.blobs.contains_key(&storage_key) {
            return Err(ClusterError::Conflict);
        }
        blob.revision = 1;
        guard.blobs.insert(storage_key, blob.clone());
        Ok(blob)
    }

    async fn update_blob(
        &self,
        partition: &str,
        mut blob: BlobRecord,
    ) -> Result<BlobRecord, ClusterError> {
        let mut guard = self.state.write().expect("memory cluster lock poisoned");
        let storage_key = (partition.to_string(), blob.name.clone());
        let stored = guard.blobs.get(&storage_key).ok_or(ClusterError::NotFound)?;

        // Semántica de revisión optimista: una revisión obsoleta colisiona.
        if stored.revision != blob.revision {
            return Err(ClusterError::Conflict);
        }

        blob.revision += 1;
        guard.blobs.insert(storage_key, blob.clone());
        Ok(blob)
    }
}
