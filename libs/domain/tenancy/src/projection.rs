// [libs/domain/tenancy/src/projection.rs]
/*!
 * =================================================================
 * APARATO: TENANT PROJECTION MATRIX (V3.1 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: MAPEO BIDIRECCIONAL EQUIPO <-> TENANT DEL CLUSTER
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ROUND-TRIP FIDELITY: tenant(team(tenant)) preserva nombre, modo,
 *    propietarios, anotaciones y semántica de cuota.
 * 2. KEY TRANSLATION LAW: simplify(expand(k)) = k para toda clave de
 *    recurso habilitada.
 * =================================================================
 */

use crate::errors::TenancyError;
use bison_domain_models::{OwnerReference, Team, TeamMode};
use bison_infra_cluster::api::{
    ANNOTATION_DESCRIPTION, ANNOTATION_DISPLAY_NAME, ANNOTATION_EXCLUSIVE_NODES, ANNOTATION_MODE,
    ANNOTATION_OWNERS, ANNOTATION_SUSPENDED, LABEL_MANAGED, LABEL_POOL,
};
use bison_infra_cluster::TenantObject;
use std::collections::BTreeMap;

/// Valor del pool compartido.
pub const POOL_SHARED: &str = "shared";

/// Prefijo de los pools exclusivos por equipo.
pub const POOL_TEAM_PREFIX: &str = "team-";

/// Valor de pool para el modo exclusivo de un equipo.
pub fn pool_value_for_team(team_name: &str) -> String {
    format!("{}{}", POOL_TEAM_PREFIX, team_name)
}

/// Extrae el equipo de un valor de pool exclusivo; None si no lo es.
pub fn parse_exclusive(pool_value: &str) -> Option<&str> {
    pool_value.strip_prefix(POOL_TEAM_PREFIX)
}

/**
 * Expande una clave de recurso del dominio a su forma de cuota del cluster.
 *
 * # Logic:
 * 'pods' permanece desnuda; cualquier otra clave (cpu, memory, recursos
 * extendidos) toma el prefijo 'requests.'.
 */
pub fn expand_quota_key(domain_key: &str) -> String {
    if domain_key == "pods" {
        domain_key.to_string()
    } else {
        format!("requests.{}", domain_key)
    }
}

/// Reduce una clave de cuota del cluster a su forma de dominio.
pub fn simplify_quota_key(cluster_key: &str) -> &str {
    cluster_key
        .strip_prefix("requests.")
        .or_else(|| cluster_key.strip_prefix("limits."))
        .unwrap_or(cluster_key)
}

/// Serializa el modo para la anotación del tenant.
fn mode_annotation(mode: TeamMode) -> &'static str {
    match mode {
        TeamMode::Shared => "shared",
        TeamMode::Exclusive => "exclusive",
    }
}

/**
 * Proyecta un equipo del dominio como objeto tenant del cluster.
 *
 * # Logic:
 * El selector de pool resuelve a {pool: shared} o {pool: team-<name>}.
 * En modo compartido la cuota viaja con claves expandidas; en modo
 * exclusivo la capacidad física de los nodos es el límite y no se
 * escribe ítem de cuota alguno.
 */
pub fn team_to_tenant(team: &Team) -> Result<TenantObject, TenancyError> {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_MANAGED.to_string(), "true".to_string());

    let mut annotations = BTreeMap::new();
    annotations.insert(ANNOTATION_DISPLAY_NAME.to_string(), team.display_name.clone());
    annotations.insert(ANNOTATION_DESCRIPTION.to_string(), team.description.clone());
    annotations.insert(ANNOTATION_MODE.to_string(), mode_annotation(team.mode).to_string());
    annotations.insert(ANNOTATION_SUSPENDED.to_string(), team.suspended.to_string());
    annotations.insert(
        ANNOTATION_EXCLUSIVE_NODES.to_string(),
        team.exclusive_nodes.join(","),
    );
    annotations.insert(ANNOTATION_OWNERS.to_string(), serde_json::to_string(&team.owners)?);

    let mut node_selector = BTreeMap::new();
    let pool_value = match team.mode {
        TeamMode::Shared => POOL_SHARED.to_string(),
        TeamMode::Exclusive => pool_value_for_team(&team.name),
    };
    node_selector.insert(LABEL_POOL.to_string(), pool_value);

    let resource_quota = match team.mode {
        TeamMode::Shared => team
            .quota
            .iter()
            .map(|(domain_key, quantity)| (expand_quota_key(domain_key), quantity.clone()))
            .collect(),
        TeamMode::Exclusive => BTreeMap::new(),
    };

    Ok(TenantObject {
        name: team.name.clone(),
        labels,
        annotations,
        node_selector,
        resource_quota,
    })
}

/// Reconstruye el equipo del dominio desde su proyección tenant.
pub fn tenant_to_team(tenant: &TenantObject) -> Team {
    let annotation = |key: &str| tenant.annotations.get(key).cloned().unwrap_or_default();

    let mode = match annotation(ANNOTATION_MODE).as_str() {
        "exclusive" => TeamMode::Exclusive,
        _ => TeamMode::Shared,
    };

    let exclusive_nodes: Vec<String> = annotation(ANNOTATION_EXCLUSIVE_NODES)
        .split(',')
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect();

    let owners: Vec<OwnerReference> =
        serde_json::from_str(&annotation(ANNOTATION_OWNERS)).unwrap_or_default();

    let quota: BTreeMap<String, String> = tenant
        .resource_quota
        .iter()
        .map(|(cluster_key, quantity)| {
            (simplify_quota_key(cluster_key).to_string(), quantity.clone())
        })
        .collect();

    Team {
        name: tenant.name.clone(),
        display_name: annotation(ANNOTATION_DISPLAY_NAME),
        description: annotation(ANNOTATION_DESCRIPTION),
        owners,
        mode,
        exclusive_nodes,
        quota,
        used_quota: BTreeMap::new(),
        suspended: annotation(ANNOTATION_SUSPENDED) == "true",
    }
}
