/**
 * =================================================================
 * APARATO: ALERT THRESHOLD EVALUATION TEST (V1.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la escalera de severidad y el abanico de entrega.
 * =================================================================
 */

use async_trait::async_trait;
use bison_domain_alerting::{AlertError, AlertEvaluator, AlertTransport};
use bison_domain_models::{AlertConfig, AlertKind, AlertRecord, ChannelType, NotifyChannel};
use bison_domain_wallet::WalletService;
use bison_infra_cluster::{BlobVault, ClusterControlApi, MemoryCluster};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Transporte espía: registra entregas y puede rechazarlas todas.
struct RecordingTransport {
    deliveries: Mutex<Vec<(String, AlertKind)>>,
    reject_all: bool,
}

#[async_trait]
impl AlertTransport for RecordingTransport {
    async fn deliver(
        &self,
        channel: &NotifyChannel,
        alert: &AlertRecord,
    ) -> Result<(), AlertError> {
        if self.reject_all {
            return Err(AlertError::Delivery("endpoint rejected signal with HTTP_500".into()));
        }
        self.deliveries
            .lock()
            .unwrap()
            .push((channel.id.clone(), alert.kind));
        Ok(())
    }
}

fn channel(id: &str, enabled: bool) -> NotifyChannel {
    let mut config = BTreeMap::new();
    config.insert("url".to_string(), "https://hooks.example/bison".to_string());
    NotifyChannel {
        id: id.to_string(),
        channel_type: ChannelType::Webhook,
        name: format!("channel-{}", id),
        config,
        enabled,
    }
}

struct Rig {
    wallet: WalletService,
    evaluator: AlertEvaluator,
    transport: Arc<RecordingTransport>,
}

async fn forge_rig(reject_all: bool) -> Rig {
    let uplink: Arc<dyn ClusterControlApi> = Arc::new(MemoryCluster::new());
    let vault = BlobVault::new(uplink);
    let wallet = WalletService::new(vault.clone());
    let transport = Arc::new(RecordingTransport {
        deliveries: Mutex::new(Vec::new()),
        reject_all,
    });
    let evaluator = AlertEvaluator::new(vault, wallet.clone(), transport.clone());

    evaluator
        .save_config(&AlertConfig {
            balance_threshold: 10.0,
            channels: vec![channel("primary", true), channel("dormant", false)],
        })
        .await
        .unwrap();

    Rig { wallet, evaluator, transport }
}

#[tokio::test]
async fn certify_severity_ladder() {
    let rig = forge_rig(false).await;
    rig.wallet.recharge("low", 5.0, "op", "").await.unwrap();
    rig.wallet.recharge("sunk", 10.0, "op", "").await.unwrap();
    rig.wallet.deduct("sunk", 13.0, "usage").await.unwrap();
    rig.wallet.recharge("healthy", 100.0, "op", "").await.unwrap();

    let emitted = rig.evaluator.run_cycle().await.unwrap();
    assert_eq!(emitted, 2, "Solo las billeteras bajo umbral emiten.");

    let history = rig.evaluator.history(10).await.unwrap();
    let low = history.iter().find(|record| record.target == "low").unwrap();
    let sunk = history.iter().find(|record| record.target == "sunk").unwrap();

    // 0 <= balance < umbral: warning; balance < 0: critical.
    assert_eq!(low.kind, AlertKind::LowBalance);
    assert_eq!(sunk.kind, AlertKind::NegativeBalance);
    assert!(low.sent && sunk.sent);
    assert_eq!(low.delivered_channels, vec!["channel-primary".to_string()]);

    // El canal apagado jamás recibe señal.
    let deliveries = rig.transport.deliveries.lock().unwrap();
    assert!(deliveries.iter().all(|(channel_id, _)| channel_id == "primary"));
    println!("✅ HERALD: Severity ladder certified.");
}

#[tokio::test]
async fn certify_rejection_still_seals_history() {
    let rig = forge_rig(true).await;
    rig.wallet.recharge("low", 5.0, "op", "").await.unwrap();

    let emitted = rig.evaluator.run_cycle().await.unwrap();
    assert_eq!(emitted, 1);

    // Todos los canales rechazaron: sent=false pero la señal queda sellada.
    let history = rig.evaluator.history(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(!history[0].sent);
    assert!(history[0].delivered_channels.is_empty());
    println!("✅ HERALD: Rejection sealing certified.");
}

#[tokio::test]
async fn certify_reemission_every_cycle() {
    let rig = forge_rig(false).await;
    rig.wallet.recharge("low", 5.0, "op", "").await.unwrap();

    // Sin supresión: cada pasada re-emite la señal vigente.
    rig.evaluator.run_cycle().await.unwrap();
    rig.evaluator.run_cycle().await.unwrap();
    assert_eq!(rig.evaluator.history(10).await.unwrap().len(), 2);
    println!("✅ HERALD: Re-emission doctrine certified.");
}

#[tokio::test]
async fn certify_test_signal_routing() {
    let rig = forge_rig(false).await;

    let record = rig.evaluator.emit_test("primary").await.unwrap();
    assert_eq!(record.kind, AlertKind::Test);
    assert!(record.sent);

    match rig.evaluator.emit_test("ghost-channel").await {
        Err(AlertError::ChannelNotFound(_)) => {}
        other => panic!("Canal inexistente debe rechazarse, llegó {:?}", other.is_ok()),
    }
    println!("✅ HERALD: Test signal routing certified.");
}
