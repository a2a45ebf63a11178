/**
 * =================================================================
 * APARATO: TRANSFER ROUND-TRIP FIDELITY TEST (V1.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar export -> apply con reproducción byte a byte.
 * =================================================================
 */

use bison_domain_models::{BillingConfig, ResourceDefinition, ResourceCategory};
use bison_domain_transfer::ConfigTransfer;
use bison_infra_cluster::{names, BlobVault, ClusterControlApi, MemoryCluster};
use std::sync::Arc;

fn forge_environment() -> (BlobVault, ConfigTransfer) {
    let uplink: Arc<dyn ClusterControlApi> = Arc::new(MemoryCluster::new());
    let vault = BlobVault::new(uplink);
    (vault.clone(), ConfigTransfer::new(vault))
}

async fn seed_source(vault: &BlobVault) {
    let config = BillingConfig {
        enabled: true,
        interval: 2,
        currency: "EUR".to_string(),
        currency_symbol: "€".to_string(),
        ..BillingConfig::default()
    };
    vault.write_document(names::BILLING_CONFIG, names::SINGLETON_KEY, &config).await.unwrap();

    let catalog = vec![ResourceDefinition {
        name: "cpu".to_string(),
        display_name: "CPU".to_string(),
        unit: "cores".to_string(),
        divisor: 1.0,
        category: ResourceCategory::Compute,
        enabled: true,
        sort_order: 0,
        show_in_quota: true,
        price: 0.25,
    }];
    vault.write_document(names::RESOURCE_CONFIG, "resources", &catalog).await.unwrap();
}

#[tokio::test]
async fn certify_same_environment_preview_is_silent() {
    let (vault, transfer) = forge_environment();
    seed_source(&vault).await;

    let envelope = transfer
        .export(&["billing".to_string(), "resources".to_string()], false, "operator-a")
        .await
        .unwrap();

    // Contra el mismo entorno: válido y sin cambios reportados.
    let preview = transfer.preview(&envelope).await.unwrap();
    assert!(preview.valid);
    for section in &preview.sections {
        assert!(section.valid);
        assert!(section.changes.is_empty(), "Sección {} reporta cambios fantasma.", section.section);
        assert!(section.list_changes.is_empty());
        assert!(section.warnings.is_empty());
    }

    // La aplicación sobre el mismo entorno no degrada nada.
    let outcome = transfer
        .apply(&envelope, &["billing".to_string(), "resources".to_string()], true)
        .await
        .unwrap();
    assert_eq!(outcome.applied.len(), 2);
    assert!(outcome.skipped.is_empty());
    assert!(outcome.warnings.is_empty());
    println!("✅ TRANSFER: Silent same-environment round certified.");
}

#[tokio::test]
async fn certify_bitwise_reproduction_into_blank_environment() {
    let (source_vault, source_transfer) = forge_environment();
    seed_source(&source_vault).await;

    let envelope = source_transfer
        .export(&["billing".to_string(), "resources".to_string()], true, "operator-a")
        .await
        .unwrap();

    // Entorno destino virgen.
    let (target_vault, target_transfer) = forge_environment();
    let outcome = target_transfer
        .apply(&envelope, &["billing".to_string(), "resources".to_string()], false)
        .await
        .unwrap();
    assert_eq!(outcome.applied.len(), 2);

    // Reproducción byte a byte de los documentos fuente.
    for (blob_name, document_key) in
        [(names::BILLING_CONFIG, names::SINGLETON_KEY), (names::RESOURCE_CONFIG, "resources")]
    {
        let source_raw = source_vault.get(blob_name).await.unwrap().unwrap();
        let target_raw = target_vault.get(blob_name).await.unwrap().unwrap();
        assert_eq!(
            source_raw.data.get(document_key),
            target_raw.data.get(document_key),
            "El documento {}/{} debe reproducirse bit a bit.",
            blob_name,
            document_key
        );
    }
    println!("✅ TRANSFER: Bitwise reproduction certified.");
}
