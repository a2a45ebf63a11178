/**
 * =================================================================
 * APARATO: ALERT HISTORY RETENTION TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la retención FIFO de 1000 señales.
 * =================================================================
 */

use async_trait::async_trait;
use bison_domain_alerting::{AlertError, AlertEvaluator, AlertTransport};
use bison_domain_models::{AlertConfig, AlertRecord, ChannelType, NotifyChannel};
use bison_domain_wallet::WalletService;
use bison_infra_cluster::{BlobVault, ClusterControlApi, MemoryCluster};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Transporte mudo: acepta todo sin tocar la red.
struct SilentTransport;

#[async_trait]
impl AlertTransport for SilentTransport {
    async fn deliver(
        &self,
        _channel: &NotifyChannel,
        _alert: &AlertRecord,
    ) -> Result<(), AlertError> {
        Ok(())
    }
}

#[tokio::test]
async fn certify_history_retention_bound() {
    let uplink: Arc<dyn ClusterControlApi> = Arc::new(MemoryCluster::new());
    let vault = BlobVault::new(uplink);
    let wallet = WalletService::new(vault.clone());
    let evaluator = AlertEvaluator::new(vault, wallet, Arc::new(SilentTransport));

    evaluator
        .save_config(&AlertConfig {
            balance_threshold: 0.0,
            channels: vec![NotifyChannel {
                id: "probe".to_string(),
                channel_type: ChannelType::Webhook,
                name: "probe".to_string(),
                config: BTreeMap::new(),
                enabled: true,
            }],
        })
        .await
        .unwrap();

    // 1010 señales de prueba desbordan la retención por diez.
    for _ in 0..1010 {
        evaluator.emit_test("probe").await.unwrap();
    }

    let history = evaluator.history(5000).await.unwrap();
    assert_eq!(history.len(), 1000, "El historial retiene 1000 señales.");
    println!("✅ HERALD: History retention bound certified.");
}
