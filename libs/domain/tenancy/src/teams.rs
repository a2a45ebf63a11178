// [libs/domain/tenancy/src/teams.rs]
/*!
 * =================================================================
 * APARATO: TEAM LIFECYCLE SERVICE (V3.2 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CICLO DE VIDA DEL EQUIPO Y DERIVACIÓN DE CUOTAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RESERVED SHIELD: La creación rechaza nombres del vocabulario del
 *    pool y exige nodos en modo exclusivo.
 * 2. CAPACITY AS QUOTA: En modo exclusivo la cuota nominal se deriva de
 *    la capacidad alocable de los nodos sellados en el momento de la
 *    lectura; nunca se persiste.
 * 3. USED AGGREGATION: El consumo se agrega de los requests de los pods
 *    en ejecución de todos los namespaces del equipo.
 * =================================================================
 */

use crate::errors::TenancyError;
use crate::projection::{team_to_tenant, tenant_to_team};
use crate::quantity::{
    format_bytes_gi, format_cores, format_cores_used, format_count, is_byte_shaped, parse_quantity,
};
use bison_domain_models::{Team, TeamMode};
use bison_infra_cluster::api::{ANNOTATION_SUSPENDED, LABEL_MANAGED, LABEL_TENANT};
use bison_infra_cluster::{ClusterControlApi, ClusterError, NamespaceObject};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct TeamService {
    cluster_uplink: Arc<dyn ClusterControlApi>,
}

impl TeamService {
    pub fn new(cluster_uplink: Arc<dyn ClusterControlApi>) -> Self {
        Self { cluster_uplink }
    }

    // --- VALIDACIÓN DE INGRESO ---

    fn validate_shape(team: &Team) -> Result<(), TenancyError> {
        if !Team::is_valid_name(&team.name) {
            return Err(TenancyError::InvalidName(team.name.clone()));
        }
        if Team::is_reserved_name(&team.name) {
            return Err(TenancyError::ReservedName(team.name.clone()));
        }
        if team.mode == TeamMode::Exclusive && team.exclusive_nodes.is_empty() {
            return Err(TenancyError::ExclusiveNodesRequired);
        }
        Ok(())
    }

    // --- CICLO DE VIDA ---

    #[instrument(skip(self, team), fields(team_name = %team.name))]
    pub async fn create(&self, team: &Team) -> Result<(), TenancyError> {
        Self::validate_shape(team)?;

        let tenant_projection = team_to_tenant(team)?;
        match self.cluster_uplink.create_tenant(tenant_projection).await {
            Ok(()) => {
                info!("🏛️ [TEAM_CREATE]: Tenant [{}] sealed in cluster.", team.name);
                Ok(())
            }
            Err(ClusterError::Conflict) => Err(TenancyError::Conflict),
            Err(uplink_fault) => Err(uplink_fault.into()),
        }
    }

    #[instrument(skip(self, team), fields(team_name = %team.name))]
    pub async fn update(&self, team: &Team) -> Result<(), TenancyError> {
        Self::validate_shape(team)?;
        if self.cluster_uplink.get_tenant(&team.name).await?.is_none() {
            return Err(TenancyError::NotFound);
        }
        let tenant_projection = team_to_tenant(team)?;
        self.cluster_uplink.update_tenant(tenant_projection).await?;
        Ok(())
    }

    pub async fn get(&self, team_name: &str) -> Result<Team, TenancyError> {
        let tenant = self
            .cluster_uplink
            .get_tenant(team_name)
            .await?
            .ok_or(TenancyError::NotFound)?;

        let mut team = tenant_to_team(&tenant);
        self.enrich_quota(&mut team).await?;
        Ok(team)
    }

    pub async fn list(&self) -> Result<Vec<Team>, TenancyError> {
        let mut teams = Vec::new();
        for tenant in self.cluster_uplink.list_tenants().await? {
            let mut team = tenant_to_team(&tenant);
            if let Err(enrichment_fault) = self.enrich_quota(&mut team).await {
                // Un equipo ilegible no aborta el listado completo.
                warn!(
                    "🏛️ [TEAM_LIST]: Quota enrichment failed for [{}]: {}",
                    team.name, enrichment_fault
                );
            }
            teams.push(team);
        }
        Ok(teams)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, team_name: &str) -> Result<(), TenancyError> {
        match self.cluster_uplink.delete_tenant(team_name).await {
            Ok(()) => {
                info!("🏛️ [TEAM_DELETE]: Tenant [{}] evicted; namespaces cascade.", team_name);
                Ok(())
            }
            Err(ClusterError::NotFound) => Err(TenancyError::NotFound),
            Err(uplink_fault) => Err(uplink_fault.into()),
        }
    }

    /// Sella o limpia la anotación de cuarentena sin tocar el resto.
    pub async fn set_suspended(&self, team_name: &str, suspended: bool) -> Result<(), TenancyError> {
        let mut tenant = self
            .cluster_uplink
            .get_tenant(team_name)
            .await?
            .ok_or(TenancyError::NotFound)?;
        tenant
            .annotations
            .insert(ANNOTATION_SUSPENDED.to_string(), suspended.to_string());
        self.cluster_uplink.update_tenant(tenant).await?;
        Ok(())
    }

    // --- CONSULTAS DE APOYO ---

    /// Namespaces gestionados pertenecientes al equipo.
    pub async fn namespaces_of(
        &self,
        team_name: &str,
    ) -> Result<Vec<NamespaceObject>, TenancyError> {
        let mut selector = BTreeMap::new();
        selector.insert(LABEL_MANAGED.to_string(), "true".to_string());
        selector.insert(LABEL_TENANT.to_string(), team_name.to_string());
        Ok(self.cluster_uplink.list_namespaces(&selector).await?)
    }

    // --- DERIVACIÓN DE CUOTAS ---

    /**
     * Completa la cuota nominal (modo exclusivo) y la consumida.
     *
     * # Logic:
     * Exclusivo: la cuota nominal es la suma de la capacidad alocable de
     * los nodos sellados, formateada por familia (bytes como NGi, CPU en
     * cores enteros, el resto como enteros).
     */
    async fn enrich_quota(&self, team: &mut Team) -> Result<(), TenancyError> {
        if team.mode == TeamMode::Exclusive {
            team.quota = self.exclusive_capacity(&team.exclusive_nodes).await?;
        }
        team.used_quota = self.used_quota(&team.name).await?;
        Ok(())
    }

    async fn exclusive_capacity(
        &self,
        exclusive_nodes: &[String],
    ) -> Result<BTreeMap<String, String>, TenancyError> {
        let mut capacity_accumulator: BTreeMap<String, f64> = BTreeMap::new();

        for node_name in exclusive_nodes {
            let Some(node) = self.cluster_uplink.get_node(node_name).await? else {
                warn!("🏛️ [TEAM_QUOTA]: Exclusive node [{}] not present in cluster.", node_name);
                continue;
            };
            for (resource_name, raw_quantity) in &node.allocatable {
                *capacity_accumulator.entry(resource_name.clone()).or_insert(0.0) +=
                    parse_quantity(raw_quantity);
            }
        }

        Ok(capacity_accumulator
            .into_iter()
            .map(|(resource_name, magnitude)| {
                let formatted = if is_byte_shaped(&resource_name) {
                    format_bytes_gi(magnitude)
                } else if resource_name == "cpu" {
                    format_cores(magnitude)
                } else {
                    format_count(magnitude)
                };
                (resource_name, formatted)
            })
            .collect())
    }

    /// Suma de requests de los pods en ejecución del equipo.
    pub async fn used_quota(
        &self,
        team_name: &str,
    ) -> Result<BTreeMap<String, String>, TenancyError> {
        let mut usage_accumulator: BTreeMap<String, f64> = BTreeMap::new();

        for namespace in self.namespaces_of(team_name).await? {
            for pod in self.cluster_uplink.list_pods(&namespace.name).await? {
                if pod.phase != "Running" {
                    continue;
                }
                for (resource_name, raw_quantity) in &pod.requests {
                    *usage_accumulator.entry(resource_name.clone()).or_insert(0.0) +=
                        parse_quantity(raw_quantity);
                }
            }
        }

        Ok(usage_accumulator
            .into_iter()
            .map(|(resource_name, magnitude)| {
                let formatted = if is_byte_shaped(&resource_name) {
                    format_bytes_gi(magnitude)
                } else if resource_name == "cpu" {
                    format_cores_used(magnitude)
                } else {
                    format_count(magnitude)
                };
                (resource_name, formatted)
            })
            .collect())
    }
}
