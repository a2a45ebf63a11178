/**
 * =================================================================
 * APARATO: BLOB VAULT CONCURRENCY TEST (V1.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el ciclo releer-aplicar-reintentar del vault.
 * =================================================================
 */

use bison_infra_cluster::{BlobVault, ClusterControlApi, ClusterError, MemoryCluster};
use std::sync::Arc;

fn forge_vault() -> (Arc<MemoryCluster>, BlobVault) {
    let engine = Arc::new(MemoryCluster::new());
    let uplink: Arc<dyn ClusterControlApi> = engine.clone();
    (engine, BlobVault::new(uplink))
}

#[tokio::test]
async fn certify_get_or_create_seals_blank_record() {
    let (_engine, vault) = forge_vault();

    assert!(vault.get("balances").await.unwrap().is_none(), "El blob aún no existe.");

    let created = vault.get_or_create("balances").await.unwrap();
    assert_eq!(created.name, "balances");
    assert_eq!(created.revision, 1, "La creación sella la revisión inicial.");

    let reread = vault.get_or_create("balances").await.unwrap();
    assert_eq!(reread.revision, 1, "La segunda lectura no re-crea el registro.");
    println!("✅ BLOB_VAULT: Blank record sealing certified.");
}

#[tokio::test]
async fn certify_stale_revision_collides() {
    let (_engine, vault) = forge_vault();

    let fresh = vault.get_or_create("alert-config").await.unwrap();
    let mut stale = fresh.clone();

    // El primer escritor avanza la revisión.
    let sealed = vault.update(fresh).await.unwrap();
    assert_eq!(sealed.revision, 2);

    // El segundo escritor porta la revisión obsoleta y colisiona.
    stale.data.insert("config".to_string(), "{}".to_string());
    match vault.update(stale).await {
        Err(ClusterError::Conflict) => {}
        other => panic!("Se esperaba Conflict, llegó {:?}", other.map(|record| record.revision)),
    }
    println!("✅ BLOB_VAULT: Stale revision collision certified.");
}

#[tokio::test]
async fn certify_concurrent_mutations_serialize() {
    let (_engine, vault) = forge_vault();
    vault.get_or_create("counters").await.unwrap();

    // Tres escritores concurrentes, veinte incrementos cada uno.
    let mut workers = Vec::new();
    for _ in 0..3 {
        let worker_vault = vault.clone();
        workers.push(tokio::spawn(async move {
            for _ in 0..20 {
                worker_vault
                    .mutate("counters", |data| {
                        let current: u64 = data
                            .get("total")
                            .and_then(|raw| raw.parse().ok())
                            .unwrap_or(0);
                        data.insert("total".to_string(), (current + 1).to_string());
                        Ok(())
                    })
                    .await
                    .expect("La mutación debe converger dentro del presupuesto.");
            }
        }));
    }
    for worker in workers {
        worker.await.unwrap();
    }

    let sealed = vault.get("counters").await.unwrap().unwrap();
    assert_eq!(
        sealed.data.get("total").map(String::as_str),
        Some("60"),
        "Ningún incremento puede perderse bajo concurrencia optimista."
    );
    println!("✅ BLOB_VAULT: Concurrent mutation serialization certified.");
}
