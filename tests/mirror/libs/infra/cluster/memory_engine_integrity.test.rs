/**
 * =================================================================
 * APARATO: MEMORY ENGINE INTEGRITY TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la paridad de contrato del binding en memoria.
 * =================================================================
 */

use bison_infra_cluster::api::LABEL_TENANT;
use bison_infra_cluster::{
    ClusterControlApi, ClusterError, MemoryCluster, NamespaceObject, TenantObject,
};
use std::collections::BTreeMap;

fn tenant(name: &str) -> TenantObject {
    TenantObject {
        name: name.to_string(),
        ..TenantObject::default()
    }
}

fn namespace_of(team: &str, name: &str) -> NamespaceObject {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_TENANT.to_string(), team.to_string());
    NamespaceObject {
        name: name.to_string(),
        labels,
        annotations: BTreeMap::new(),
    }
}

#[tokio::test]
async fn certify_tenant_uniqueness() {
    let engine = MemoryCluster::new();
    engine.create_tenant(tenant("t1")).await.unwrap();

    match engine.create_tenant(tenant("t1")).await {
        Err(ClusterError::Conflict) => {}
        other => panic!("La creación duplicada debe colisionar, llegó {:?}", other),
    }
    println!("✅ MEMORY_ENGINE: Tenant uniqueness certified.");
}

#[tokio::test]
async fn certify_namespace_selector_filtering() {
    let engine = MemoryCluster::new();
    engine.create_namespace(namespace_of("t1", "ns-a")).await.unwrap();
    engine.create_namespace(namespace_of("t2", "ns-b")).await.unwrap();

    let mut selector = BTreeMap::new();
    selector.insert(LABEL_TENANT.to_string(), "t1".to_string());
    let matched = engine.list_namespaces(&selector).await.unwrap();

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "ns-a");
    println!("✅ MEMORY_ENGINE: Namespace selector filtering certified.");
}

#[tokio::test]
async fn certify_tenant_deletion_cascades_namespaces() {
    let engine = MemoryCluster::new();
    engine.create_tenant(tenant("t1")).await.unwrap();
    engine.create_namespace(namespace_of("t1", "ns-a")).await.unwrap();
    engine.create_namespace(namespace_of("t2", "ns-b")).await.unwrap();

    engine.delete_tenant("t1").await.unwrap();

    // Emulación del garbage collector: los hijos del tenant caen con él.
    assert!(engine.get_namespace("ns-a").await.unwrap().is_none());
    assert!(engine.get_namespace("ns-b").await.unwrap().is_some());
    println!("✅ MEMORY_ENGINE: Tenant cascade certified.");
}

#[tokio::test]
async fn certify_blob_revision_discipline() {
    let engine = MemoryCluster::new();
    let created = engine
        .create_blob(
            "bison-system",
            bison_infra_cluster::BlobRecord {
                name: "balances".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.revision, 1);

    // Escritura con revisión vigente: la revisión avanza.
    let sealed = engine.update_blob("bison-system", created.clone()).await.unwrap();
    assert_eq!(sealed.revision, 2);

    // Escritura con revisión obsoleta: colisión.
    match engine.update_blob("bison-system", created).await {
        Err(ClusterError::Conflict) => {}
        other => panic!("Se esperaba Conflict, llegó {:?}", other.map(|record| record.revision)),
    }
    println!("✅ MEMORY_ENGINE: Blob revision discipline certified.");
}
