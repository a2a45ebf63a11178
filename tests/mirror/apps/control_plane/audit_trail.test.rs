/**
 * =================================================================
 * APARATO: AUDIT TRAIL TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el sellado y el orden del rastro forense.
 * =================================================================
 */

use bison_control_plane::audit::AuditTrail;
use bison_infra_cluster::{BlobVault, ClusterControlApi, MemoryCluster};
use std::collections::BTreeMap;
use std::sync::Arc;

fn forge_trail() -> AuditTrail {
    let uplink: Arc<dyn ClusterControlApi> = Arc::new(MemoryCluster::new());
    AuditTrail::new(BlobVault::new(uplink))
}

#[tokio::test]
async fn certify_entries_seal_most_recent_first() {
    let trail = forge_trail();

    let mut detail = BTreeMap::new();
    detail.insert("amount".to_string(), "100.00".to_string());
    trail.record("admin", "recharge", "wallet", "t1", detail).await;
    trail.record("admin", "suspend", "team", "t1", BTreeMap::new()).await;
    trail.record("admin", "delete", "team", "t2", BTreeMap::new()).await;

    let recent = trail.recent(10).await;
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].action, "delete", "La acción más nueva llega primero.");
    assert_eq!(recent[2].action, "recharge");
    assert_eq!(recent[2].detail.get("amount").map(String::as_str), Some("100.00"));

    // Todos los asientos portan identidad y operador.
    for entry in &recent {
        assert!(!entry.id.is_empty());
        assert_eq!(entry.operator, "admin");
    }
    println!("✅ AUDIT: Recent-first sealing certified.");
}

#[tokio::test]
async fn certify_limit_bounds_listing() {
    let trail = forge_trail();
    for round in 0..10 {
        trail
            .record("admin", "update", "settings", &format!("round-{}", round), BTreeMap::new())
            .await;
    }

    assert_eq!(trail.recent(4).await.len(), 4);
    assert_eq!(trail.recent(100).await.len(), 10);
    println!("✅ AUDIT: Limit bound certified.");
}
