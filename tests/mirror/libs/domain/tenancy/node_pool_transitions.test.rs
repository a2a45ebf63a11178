/**
 * =================================================================
 * APARATO: NODE POOL TRANSITIONS TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la máquina de estados de etiquetas y taints.
 * =================================================================
 */

use bison_domain_tenancy::node_pools::{classify, NodePoolController, NodePoolState};
use bison_domain_tenancy::TenancyError;
use bison_infra_cluster::api::{LABEL_POOL, TAINT_DISABLED};
use bison_infra_cluster::{ClusterControlApi, MemoryCluster, NodeObject};
use std::sync::Arc;

fn forge_pool() -> (Arc<MemoryCluster>, NodePoolController) {
    let engine = Arc::new(MemoryCluster::new());
    engine.seed_node(NodeObject {
        name: "worker-01".to_string(),
        ready: true,
        ..NodeObject::default()
    });
    let uplink: Arc<dyn ClusterControlApi> = engine.clone();
    (engine, NodePoolController::new(uplink))
}

async fn state_of(engine: &MemoryCluster, node_name: &str) -> NodePoolState {
    classify(&engine.get_node(node_name).await.unwrap().unwrap())
}

#[tokio::test]
async fn certify_enable_disable_cycle() {
    let (engine, controller) = forge_pool();

    // Un nodo recién sembrado no porta etiqueta de pool: unmanaged.
    assert_eq!(state_of(&engine, "worker-01").await, NodePoolState::Unmanaged);

    controller.enable("worker-01").await.unwrap();
    assert_eq!(state_of(&engine, "worker-01").await, NodePoolState::Shared);

    controller.disable("worker-01").await.unwrap();
    assert_eq!(state_of(&engine, "worker-01").await, NodePoolState::Disabled);
    let node = engine.get_node("worker-01").await.unwrap().unwrap();
    assert!(node.taints.iter().any(|taint| taint.key == TAINT_DISABLED));
    assert!(!node.labels.contains_key(LABEL_POOL), "Disable retira la etiqueta de pool.");

    // Enable limpia el taint y restaura el pool compartido.
    controller.enable("worker-01").await.unwrap();
    assert_eq!(state_of(&engine, "worker-01").await, NodePoolState::Shared);
    println!("✅ NODE_POOL: Enable/disable cycle certified.");
}

#[tokio::test]
async fn certify_exclusive_binding_rules() {
    let (engine, controller) = forge_pool();
    controller.enable("worker-01").await.unwrap();

    controller.assign("worker-01", "research").await.unwrap();
    assert_eq!(
        state_of(&engine, "worker-01").await,
        NodePoolState::Exclusive("research".to_string())
    );

    // Re-asignación al mismo equipo: idempotente.
    controller.assign("worker-01", "research").await.unwrap();

    // Re-asignación a otro equipo: precondición rechazada.
    match controller.assign("worker-01", "edge").await {
        Err(TenancyError::Precondition(_)) => {}
        other => panic!("Asignar a otro equipo debe rechazarse, llegó {:?}", other.is_ok()),
    }

    // Deshabilitar un nodo sellado: precondición rechazada.
    match controller.disable("worker-01").await {
        Err(TenancyError::Precondition(_)) => {}
        other => panic!("Disable de nodo sellado debe rechazarse, llegó {:?}", other.is_ok()),
    }

    controller.release("worker-01").await.unwrap();
    assert_eq!(state_of(&engine, "worker-01").await, NodePoolState::Shared);

    // Liberar un nodo no exclusivo: precondición rechazada.
    match controller.release("worker-01").await {
        Err(TenancyError::Precondition(_)) => {}
        other => panic!("Release de nodo compartido debe rechazarse, llegó {:?}", other.is_ok()),
    }
    println!("✅ NODE_POOL: Exclusive binding rules certified.");
}

#[tokio::test]
async fn certify_assign_rejects_disabled_nodes() {
    let (_engine, controller) = forge_pool();
    controller.disable("worker-01").await.unwrap();

    match controller.assign("worker-01", "research").await {
        Err(TenancyError::Precondition(_)) => {}
        other => panic!("Asignar un nodo deshabilitado debe rechazarse, llegó {:?}", other.is_ok()),
    }
    println!("✅ NODE_POOL: Disabled-node assignment shield certified.");
}

#[tokio::test]
async fn certify_unknown_node_not_found() {
    let (_engine, controller) = forge_pool();
    match controller.enable("ghost-node").await {
        Err(TenancyError::NotFound) => {}
        other => panic!("Un nodo inexistente debe ser NotFound, llegó {:?}", other.is_ok()),
    }
    println!("✅ NODE_POOL: Unknown node verdict certified.");
}
