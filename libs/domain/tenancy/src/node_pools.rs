// [libs/domain/tenancy/src/node_pools.rs]
/*!
 * =================================================================
 * APARATO: NODE POOL STATE CONTROLLER (V2.2 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: MÁQUINA DE ESTADOS DE ETIQUETAS Y TAINTS DEL POOL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STATE AS LABELS: El estado de un nodo es función pura de su
 *    etiqueta de pool y del taint de deshabilitación; el controlador
 *    solo materializa transiciones legales.
 * 2. EXCLUSIVITY SHIELD: Deshabilitar un nodo sellado por un equipo o
 *    reasignarlo a otro equipo son precondiciones rechazadas.
 * =================================================================
 */

use crate::errors::TenancyError;
use crate::projection::{parse_exclusive, pool_value_for_team, POOL_SHARED};
use bison_infra_cluster::api::{LABEL_POOL, TAINT_DISABLED, TAINT_EFFECT_NO_SCHEDULE};
use bison_infra_cluster::{ClusterControlApi, NodeObject, Taint};
use std::sync::Arc;
use tracing::{info, instrument};

/// Estado observable de un nodo respecto del pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePoolState {
    /// Sin etiqueta de pool: fuera de la gestión del plano de control.
    Unmanaged,
    /// Porta el taint de deshabilitación.
    Disabled,
    /// Miembro del pool compartido.
    Shared,
    /// Sellado en exclusiva por el equipo nombrado.
    Exclusive(String),
}

/// Función pura etiqueta/taint -> estado.
pub fn classify(node: &NodeObject) -> NodePoolState {
    if node.taints.iter().any(|taint| taint.key == TAINT_DISABLED) {
        return NodePoolState::Disabled;
    }
    match node.labels.get(LABEL_POOL).map(String::as_str) {
        Some(POOL_SHARED) => NodePoolState::Shared,
        Some(pool_value) => match parse_exclusive(pool_value) {
            Some(team_name) => NodePoolState::Exclusive(team_name.to_string()),
            None => NodePoolState::Unmanaged,
        },
        None => NodePoolState::Unmanaged,
    }
}

#[derive(Clone)]
pub struct NodePoolController {
    cluster_uplink: Arc<dyn ClusterControlApi>,
}

impl NodePoolController {
    pub fn new(cluster_uplink: Arc<dyn ClusterControlApi>) -> Self {
        Self { cluster_uplink }
    }

    async fn load(&self, node_name: &str) -> Result<NodeObject, TenancyError> {
        self.cluster_uplink
            .get_node(node_name)
            .await?
            .ok_or(TenancyError::NotFound)
    }

    /// Incorpora el nodo al pool compartido, limpiando el taint.
    #[instrument(skip(self))]
    pub async fn enable(&self, node_name: &str) -> Result<(), TenancyError> {
        let mut node = self.load(node_name).await?;
        node.taints.retain(|taint| taint.key != TAINT_DISABLED);
        node.labels.insert(LABEL_POOL.to_string(), POOL_SHARED.to_string());
        self.cluster_uplink.update_node(node).await?;
        info!("🖥️ [NODE_POOL]: Node [{}] enabled into shared pool.", node_name);
        Ok(())
    }

    /// Congela el scheduling del nodo; rechaza nodos sellados.
    #[instrument(skip(self))]
    pub async fn disable(&self, node_name: &str) -> Result<(), TenancyError> {
        let mut node = self.load(node_name).await?;

        if let Some(pool_value) = node.labels.get(LABEL_POOL) {
            if parse_exclusive(pool_value).is_some() {
                return Err(TenancyError::Precondition(format!(
                    "node {} is exclusively bound ({})",
                    node_name, pool_value
                )));
            }
        }

        node.labels.remove(LABEL_POOL);
        if !node.taints.iter().any(|taint| taint.key == TAINT_DISABLED) {
            node.taints.push(Taint {
                key: TAINT_DISABLED.to_string(),
                effect: TAINT_EFFECT_NO_SCHEDULE.to_string(),
            });
        }
        self.cluster_uplink.update_node(node).await?;
        info!("🖥️ [NODE_POOL]: Node [{}] disabled (NoSchedule).", node_name);
        Ok(())
    }

    /// Sella el nodo en exclusiva para un equipo.
    #[instrument(skip(self))]
    pub async fn assign(&self, node_name: &str, team_name: &str) -> Result<(), TenancyError> {
        let mut node = self.load(node_name).await?;

        if node.taints.iter().any(|taint| taint.key == TAINT_DISABLED) {
            return Err(TenancyError::Precondition(format!(
                "node {} is disabled",
                node_name
            )));
        }
        if let Some(current_owner) =
            node.labels.get(LABEL_POOL).and_then(|pool| parse_exclusive(pool))
        {
            if current_owner != team_name {
                return Err(TenancyError::Precondition(format!(
                    "node {} already bound to team {}",
                    node_name, current_owner
                )));
            }
        }

        node.labels.insert(LABEL_POOL.to_string(), pool_value_for_team(team_name));
        self.cluster_uplink.update_node(node).await?;
        info!("🖥️ [NODE_POOL]: Node [{}] sealed for team [{}].", node_name, team_name);
        Ok(())
    }

    /// Devuelve un nodo exclusivo al pool compartido.
    #[instrument(skip(self))]
    pub async fn release(&self, node_name: &str) -> Result<(), TenancyError> {
        let mut node = self.load(node_name).await?;

        match classify(&node) {
            NodePoolState::Exclusive(_) => {}
            observed_state => {
                return Err(TenancyError::Precondition(format!(
                    "node {} is not exclusive (state {:?})",
                    node_name, observed_state
                )));
            }
        }

        node.labels.insert(LABEL_POOL.to_string(), POOL_SHARED.to_string());
        self.cluster_uplink.update_node(node).await?;
        info!("🖥️ [NODE_POOL]: Node [{}] released to shared pool.", node_name);
        Ok(())
    }
}
