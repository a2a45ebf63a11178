// [libs/infra/cluster/src/blobs.rs]
/*!
 * =================================================================
 * APARATO: BLOB VAULT ADAPTER (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DURABLE ÚNICA SOBRE BLOBS ADMINISTRATIVOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE WRITE PATH: Todo servicio del plano de control escribe su
 *    estado durable exclusivamente a través de este aparato.
 * 2. OPTIMISTIC SERIALIZATION: 'mutate' encapsula el ciclo
 *    releer-aplicar-reintentar ante conflictos de revisión, serializando
 *    a los escritores concurrentes de un mismo blob.
 *
 * # Mathematical Proof (Retry Convergence):
 * Con N escritores concurrentes sobre un blob, cada ronda de conflicto
 * sella al menos una escritura; el ciclo converge en <= N rondas, muy
 * por debajo del presupuesto de reintentos.
 * =================================================================
 */

use crate::api::{BlobRecord, ClusterControlApi, ADMIN_PARTITION, LABEL_MANAGED};
use crate::errors::ClusterError;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Presupuesto de reintentos ante conflictos de revisión.
const MUTATE_RETRY_BUDGET: usize = 5;

/// Pausa base entre reintentos; crece linealmente por intento.
const MUTATE_RETRY_BACKOFF: Duration = Duration::from_millis(20);

#[derive(Clone)]
pub struct BlobVault {
    cluster_uplink: Arc<dyn ClusterControlApi>,
    partition: String,
}

impl BlobVault {
    pub fn new(cluster_uplink: Arc<dyn ClusterControlApi>) -> Self {
        Self {
            cluster_uplink,
            partition: ADMIN_PARTITION.to_string(),
        }
    }

    /// Lee un blob por nombre; None cuando aún no existe.
    pub async fn get(&self, blob_name: &str) -> Result<Option<BlobRecord>, ClusterError> {
        self.cluster_uplink.get_blob(&self.partition, blob_name).await
    }

    /**
     * Lee un blob, forjándolo vacío si todavía no existe.
     *
     * # Logic:
     * Una carrera de creación entre dos procesos resuelve en 'Conflict';
     * el perdedor relee el registro sellado por el ganador.
     */
    pub async fn get_or_create(&self, blob_name: &str) -> Result<BlobRecord, ClusterError> {
        if let Some(existing_record) = self.get(blob_name).await? {
            return Ok(existing_record);
        }

        let mut managed_labels = BTreeMap::new();
        managed_labels.insert(LABEL_MANAGED.to_string(), "true".to_string());

        let blank_record = BlobRecord {
            name: blob_name.to_string(),
            labels: managed_labels,
            data: BTreeMap::new(),
            revision: 0,
        };

        match self.cluster_uplink.create_blob(&self.partition, blank_record).await {
            Ok(created_record) => Ok(created_record),
            Err(ClusterError::Conflict) => self
                .get(blob_name)
                .await?
                .ok_or_else(|| ClusterError::Internal("blob vanished after create conflict".into())),
            Err(creation_fault) => Err(creation_fault),
        }
    }

    /// Escritura directa con la revisión portada por el registro.
    pub async fn update(&self, blob_record: BlobRecord) -> Result<BlobRecord, ClusterError> {
        self.cluster_uplink.update_blob(&self.partition, blob_record).await
    }

    /// Lee y decodifica un documento tipado dentro de un blob.
    pub async fn read_document<T: serde::de::DeserializeOwned>(
        &self,
        blob_name: &str,
        document_key: &str,
    ) -> Result<Option<T>, ClusterError> {
        let Some(blob_record) = self.get(blob_name).await? else {
            return Ok(None);
        };
        let Some(raw_document) = blob_record.data.get(document_key) else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str::<T>(raw_document)?))
    }

    /// Sella un documento tipado bajo una clave de un blob.
    pub async fn write_document<T: serde::Serialize + Sync>(
        &self,
        blob_name: &str,
        document_key: &str,
        document: &T,
    ) -> Result<(), ClusterError> {
        let serialized_document = serde_json::to_string(document)?;
        let document_key = document_key.to_string();
        self.mutate(blob_name, move |data| {
            data.insert(document_key.clone(), serialized_document.clone());
            Ok(())
        })
        .await
    }

    /**
     * Ciclo releer-aplicar-reintentar sobre el 'data' de un blob.
     *
     * # Logic:
     * La operación recibe el mapa fresco en cada intento; solo la última
     * aplicación exitosa queda sellada. Los conflictos de revisión
     * reintentan con backoff lineal hasta agotar el presupuesto.
     *
     * # Errors:
     * - 'ClusterError::Conflict' si el presupuesto de reintentos se agota.
     */
    pub async fn mutate<T, F>(&self, blob_name: &str, mut operation: F) -> Result<T, ClusterError>
    where
        F: FnMut(&mut BTreeMap<String, String>) -> Result<T, ClusterError> + Send,
        T: Send,
    {
        for attempt_index in 0..MUTATE_RETRY_BUDGET {
            let mut blob_record = self.get_or_create(blob_name).await?;
            let operation_yield = operation(&mut blob_record.data)?;

            match self.update(blob_record).await {
                Ok(_) => {
                    if attempt_index > 0 {
                        debug!(
                            "🗄️ [BLOB_VAULT]: Write sealed for [{}] after {} retries.",
                            blob_name, attempt_index
                        );
                    }
                    return Ok(operation_yield);
                }
                Err(ClusterError::Conflict) => {
                    warn!(
                        "🗄️ [BLOB_VAULT]: Revision conflict on [{}], attempt {}/{}.",
                        blob_name,
                        attempt_index + 1,
                        MUTATE_RETRY_BUDGET
                    );
                    tokio::time::sleep(MUTATE_RETRY_BACKOFF * (attempt_index as u32 + 1)).await;
                }
                Err(write_fault) => return Err(write_fault),
            }
        }

        Err(ClusterError::Conflict)
    }
}
