// [libs/infra/cluster/src/rest.rs]
/*!
 * =================================================================
 * APARATO: CLUSTER GATEWAY UPLINK (V2.1 - GOLD MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE BINDING (ESTRATO L3)
 * RESPONSABILIDAD: BINDING REST CONTRA EL GATEWAY DEL API DE CONTROL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STATUS SEMANTICS: 404 degrada a None/NotFound y 409 a Conflict,
 *    preservando la gramática de errores del contrato en todo binding.
 * 2. BEARER DISCIPLINE: El token de servicio viaja en cabeceras por
 *    defecto, sellado una única vez en la construcción del cliente.
 * =================================================================
 */

use crate::api::{
    BlobRecord, ClusterControlApi, NamespaceObject, NodeObject, PodObject, RoleBindingSpec,
    TenantObject, WorkloadKind, WorkloadObject,
};
use crate::errors::ClusterError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::instrument;

pub struct RestCluster {
    network_session_client: Client,
    gateway_base_endpoint: String,
}

impl RestCluster {
    /**
     * Inicializa el uplink REST con el token de servicio sellado.
     *
     * @param base_url Endpoint raíz del gateway del API de control.
     * @param service_token Token maestro del plano de control.
     */
    pub fn new(base_url: String, service_token: String) -> Self {
        let mut header_map = reqwest::header::HeaderMap::new();
        let auth_value =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", service_token))
                .expect("CRITICAL: Invalid cluster gateway token format.");
        header_map.insert(reqwest::header::AUTHORIZATION, auth_value);

        Self {
            network_session_client: Client::builder()
                .default_headers(header_map)
                .user_agent("Bison-Control-Plane/V4")
                .timeout(Duration::from_secs(30))
                .build()
                .expect("FATAL: Cluster gateway client initialization failed."),
            gateway_base_endpoint: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.gateway_base_endpoint, path)
    }

    fn classify(status: StatusCode) -> ClusterError {
        match status {
            StatusCode::NOT_FOUND => ClusterError::NotFound,
            StatusCode::CONFLICT => ClusterError::Conflict,
            rejected => ClusterError::Transport(format!("HTTP_{}", rejected)),
        }
    }

    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ClusterError> {
        let response = self.network_session_client.get(self.endpoint(path)).send().await?;
        match response.status() {
            StatusCode::OK => Ok(Some(response.json::<T>().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            rejected => Err(Self::classify(rejected)),
        }
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClusterError> {
        let response = self.network_session_client.get(self.endpoint(path)).send().await?;
        if response.status() == StatusCode::OK {
            Ok(response.json::<Vec<T>>().await?)
        } else {
            Err(Self::classify(response.status()))
        }
    }

    async fn write<B: serde::Serialize + Sync>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ClusterError> {
        let mut request = self
            .network_session_client
            .request(method, self.endpoint(path));
        if let Some(payload) = body {
            request = request.json(payload);
        }
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::classify(response.status()))
        }
    }
}

#[async_trait]
impl ClusterControlApi for RestCluster {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), ClusterError> {
        self.write::<()>(reqwest::Method::GET, "/v1/ping", None).await?;
        Ok(())
    }

    async fn list_tenants(&self) -> Result<Vec<TenantObject>, ClusterError> {
        self.fetch_list("/v1/tenants").await
    }

    async fn get_tenant(&self, name: &str) -> Result<Option<TenantObject>, ClusterError> {
        self.fetch_optional(&format!("/v1/tenants/{}", name)).await
    }

    async fn create_tenant(&self, tenant: TenantObject) -> Result<(), ClusterError> {
        self.write(reqwest::Method::POST, "/v1/tenants", Some(&tenant)).await?;
        Ok(())
    }

    async fn update_tenant(&self, tenant: TenantObject) -> Result<(), ClusterError> {
        let path = format!("/v1/tenants/{}", tenant.name);
        self.write(reqwest::Method::PUT, &path, Some(&tenant)).await?;
        Ok(())
    }

    async fn delete_tenant(&self, name: &str) -> Result<(), ClusterError> {
        self.write::<()>(reqwest::Method::DELETE, &format!("/v1/tenants/{}", name), None)
            .await?;
        Ok(())
    }

    async fn list_namespaces(
        &self,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<NamespaceObject>, ClusterError> {
        let selector_expression = selector
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(",");
        self.fetch_list(&format!("/v1/namespaces?selector={}", selector_expression))
            .await
    }

    async fn get_namespace(&self, name: &str) -> Result<Option<NamespaceObject>, ClusterError> {
        self.fetch_optional(&format!("/v1/namespaces/{}", name)).await
    }

    async fn create_namespace(&self, namespace: NamespaceObject) -> Result<(), ClusterError> {
        self.write(reqwest::Method::POST, "/v1/namespaces", Some(&namespace)).await?;
        Ok(())
    }

    async fn update_namespace(&self, namespace: NamespaceObject) -> Result<(), ClusterError> {
        let path = format!("/v1/namespaces/{}", namespace.name);
        self.write(reqwest::Method::PUT, &path, Some(&namespace)).await?;
        Ok(())
    }

    async fn delete_namespace(&self, name: &str) -> Result<(), ClusterError> {
        self.write::<()>(reqwest::Method::DELETE, &format!("/v1/namespaces/{}", name), None)
            .await?;
        Ok(())
    }

    async fn list_nodes(&self) -> Result<Vec<NodeObject>, ClusterError> {
        self.fetch_list("/v1/nodes").await
    }

    async fn get_node(&self, name: &str) -> Result<Option<NodeObject>, ClusterError> {
        self.fetch_optional(&format!("/v1/nodes/{}", name)).await
    }

    async fn update_node(&self, node: NodeObject) -> Result<(), ClusterError> {
        let path = format!("/v1/nodes/{}", node.name);
        self.write(reqwest::Method::PUT, &path, Some(&node)).await?;
        Ok(())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodObject>, ClusterError> {
        self.fetch_list(&format!("/v1/namespaces/{}/pods", namespace)).await
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let path = format!("/v1/namespaces/{}/pods/{}", namespace, name);
        self.write::<()>(reqwest::Method::DELETE, &path, None).await?;
        Ok(())
    }

    async fn list_workloads(&self, namespace: &str) -> Result<Vec<WorkloadObject>, ClusterError> {
        self.fetch_list(&format!("/v1/namespaces/{}/workloads", namespace)).await
    }

    async fn scale_workload(
        &self,
        namespace: &str,
        kind: WorkloadKind,
        name: &str,
        replicas: i32,
    ) -> Result<(), ClusterError> {
        let path = format!(
            "/v1/namespaces/{}/workloads/{}/{}/scale",
            namespace,
            serde_json::to_string(&kind)?.trim_matches('"'),
            name
        );
        self.write(reqwest::Method::PUT, &path, Some(&json!({ "replicas": replicas })))
            .await?;
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
        let path = format!(
            "/v1/namespaces/{}/workloads/{}/{}/annotations",
            namespace,
            serde_json::to_string(&kind)?.trim_matches('"'),
            name
        );
        self.write(reqwest::Method::PUT, &path, Some(&json!({ "key": key, "value": value })))
            .await?;
        Ok(())
    }

    async fn upsert_role_binding(&self, binding: RoleBindingSpec) -> Result<(), ClusterError> {
        let path = format!("/v1/namespaces/{}/rolebindings/{}", binding.namespace, binding.name);
        self.write(reqwest::Method::PUT, &path, Some(&binding)).await?;
        Ok(())
    }

    async fn delete_role_binding(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let path = format!("/v1/namespaces/{}/rolebindings/{}", namespace, name);
        self.write::<()>(reqwest::Method::DELETE, &path, None).await?;
        Ok(())
    }

    async fn get_blob(
        &self,
        partition: &str,
        name: &str,
    ) -> Result<Option<BlobRecord>, ClusterError> {
        self.fetch_optional(&format!("/v1/partitions/{}/blobs/{}", partition, name))
            .await
    }

    async fn create_blob(
        &self,
        partition: &str,
        blob: BlobRecord,
    ) -> Result<BlobRecord, ClusterError> {
        let path = format!("/v1/partitions/{}/blobs", partition);
        let response = self.write(reqwest::Method::POST, &path, Some(&blob)).await?;
        Ok(response.json::<BlobRecord>().await?)
    }

    async fn update_blob(
        &self,
        partition: &str,
        blob: BlobRecord,
    ) -> Result<BlobRecord, ClusterError> {
        let path = format!("/v1/partitions/{}/blobs/{}", partition, blob.name);
        let response = self.write(reqwest::Method::PUT, &path, Some(&blob)).await?;
        Ok(response.json::<BlobRecord>().await?)
    }
}
