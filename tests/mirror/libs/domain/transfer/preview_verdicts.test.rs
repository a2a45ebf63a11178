/**
 * =================================================================
 * APARATO: TRANSFER PREVIEW VERDICTS TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el portón de versión, secciones desconocidas,
 *           marcadores sensibles y el diff de listas.
 * =================================================================
 */

use bison_domain_models::transfer::ListChangeKind;
use bison_domain_models::{
    AlertConfig, ChannelType, ExportEnvelope, NotifyChannel, REDACTED_SENTINEL,
};
use bison_domain_transfer::ConfigTransfer;
use bison_infra_cluster::{BlobVault, ClusterControlApi, MemoryCluster};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

fn forge_transfer() -> ConfigTransfer {
    let uplink: Arc<dyn ClusterControlApi> = Arc::new(MemoryCluster::new());
    ConfigTransfer::new(BlobVault::new(uplink))
}

fn envelope_with(sections: BTreeMap<String, serde_json::Value>) -> ExportEnvelope {
    ExportEnvelope {
        version: "1.0".to_string(),
        exported_at: Utc::now(),
        exported_by: "operator-a".to_string(),
        sections,
    }
}

#[tokio::test]
async fn certify_version_gate() {
    let transfer = forge_transfer();
    let mut envelope = envelope_with(BTreeMap::new());
    envelope.version = "0.9".to_string();

    let preview = transfer.preview(&envelope).await.unwrap();
    assert!(!preview.valid, "Una versión ajena invalida el sobre completo.");
    assert!(preview.warnings.iter().any(|warning| warning.contains("0.9")));

    // El apply también rechaza el sobre en bloque.
    let outcome = transfer.apply(&envelope, &["billing".to_string()], false).await.unwrap();
    assert!(outcome.applied.is_empty());
    assert_eq!(outcome.skipped, vec!["billing".to_string()]);
    println!("✅ PREVIEW: Version gate certified.");
}

#[tokio::test]
async fn certify_unknown_sections_warn_and_skip() {
    let transfer = forge_transfer();
    let mut sections = BTreeMap::new();
    sections.insert("mystery".to_string(), serde_json::json!({ "payload": 1 }));

    let preview = transfer.preview(&envelope_with(sections.clone())).await.unwrap();
    assert!(preview.valid, "Lo desconocido advierte pero no invalida.");
    assert!(preview.warnings.iter().any(|warning| warning.contains("mystery")));
    assert!(preview.sections.is_empty());

    let outcome = transfer
        .apply(&envelope_with(sections), &["mystery".to_string()], false)
        .await
        .unwrap();
    assert!(outcome.applied.is_empty());
    assert_eq!(outcome.skipped, vec!["mystery".to_string()]);
    println!("✅ PREVIEW: Unknown section doctrine certified.");
}

#[tokio::test]
async fn certify_masked_secrets_warn_but_stay_valid() {
    let transfer = forge_transfer();

    let mut channel_config = BTreeMap::new();
    channel_config.insert("url".to_string(), REDACTED_SENTINEL.to_string());
    let alerts = AlertConfig {
        balance_threshold: 25.0,
        channels: vec![NotifyChannel {
            id: "ops".to_string(),
            channel_type: ChannelType::Webhook,
            name: "ops".to_string(),
            config: channel_config,
            enabled: true,
        }],
    };

    let mut sections = BTreeMap::new();
    sections.insert("alerts".to_string(), serde_json::to_value(&alerts).unwrap());

    let preview = transfer.preview(&envelope_with(sections)).await.unwrap();
    let section = &preview.sections[0];
    assert!(section.valid, "Los marcadores sensibles no invalidan la sección.");
    assert!(section
        .warnings
        .iter()
        .any(|warning| warning.contains("preserveSensitive")));

    // El umbral difiere del vivo (0.0): cambio campo a campo.
    assert!(section
        .changes
        .iter()
        .any(|change| change.field == "balanceThreshold"));
    println!("✅ PREVIEW: Masked secret warning certified.");
}

#[tokio::test]
async fn certify_list_diff_summary() {
    let transfer = forge_transfer();

    // El entorno vivo arranca con el catálogo de fábrica (cpu/memory/gpu).
    let imported = serde_json::json!([
        {
            "name": "cpu", "displayName": "CPU", "unit": "cores", "divisor": 1.0,
            "category": "compute", "enabled": true, "sortOrder": 0,
            "showInQuota": true, "price": 9.99
        },
        {
            "name": "xilinx.com/fpga", "displayName": "FPGA", "unit": "cards", "divisor": 1.0,
            "category": "accelerator", "enabled": true, "sortOrder": 9,
            "showInQuota": false, "price": 2.0
        }
    ]);

    let mut sections = BTreeMap::new();
    sections.insert("resources".to_string(), imported);

    let preview = transfer.preview(&envelope_with(sections)).await.unwrap();
    let section = &preview.sections[0];
    assert!(section.valid);

    let change_of = |key: &str| {
        section
            .list_changes
            .iter()
            .find(|change| change.key == key)
            .map(|change| change.kind)
    };
    assert_eq!(change_of("xilinx.com/fpga"), Some(ListChangeKind::Added));
    assert_eq!(change_of("cpu"), Some(ListChangeKind::Modified));
    assert_eq!(change_of("memory"), Some(ListChangeKind::Removed));
    assert_eq!(change_of("nvidia.com/gpu"), Some(ListChangeKind::Removed));
    println!("✅ PREVIEW: List diff summary certified.");
}
