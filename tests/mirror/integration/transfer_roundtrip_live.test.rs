/**
 * =================================================================
 * APARATO: LIVE TRANSFER ROUND-TRIP TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar censura en exportación y preservación de
 *           secretos vivos en la aplicación selectiva.
 * =================================================================
 */

use async_trait::async_trait;
use bison_control_plane::state::AppState;
use bison_domain_models::{
    AlertConfig, ChannelType, ControlPlaneSshConfig, NotifyChannel, REDACTED_SENTINEL,
};
use bison_infra_cluster::{names, ClusterControlApi, MemoryCluster};
use bison_infra_cost_oracle::DisabledCostOracle;
use bison_infra_ssh::{SshConnector, SshEndpoint, SshError, SshExecutor};
use std::collections::BTreeMap;
use std::sync::Arc;

struct InertSsh;

#[async_trait]
impl SshConnector for InertSsh {
    async fn connect(&self, _endpoint: &SshEndpoint) -> Result<Box<dyn SshExecutor>, SshError> {
        Err(SshError::Dial("inert connector".to_string()))
    }
}

const LONG_WEBHOOK: &str = "https://hooks.example.com/services/T000/B000/very-long-secret";

async fn forge_state() -> AppState {
    std::env::set_var("BISON_ADMIN_PASSWORD", "integration-secret");
    let cluster: Arc<dyn ClusterControlApi> = Arc::new(MemoryCluster::new());
    let state = AppState::new(cluster, Arc::new(DisabledCostOracle), Arc::new(InertSsh));
    state.seed_defaults().await.unwrap();

    // Secretos vivos: credenciales SSH y un canal con webhook largo.
    state
        .vault
        .write_document(
            names::CONTROL_PLANE_CONFIG,
            names::SINGLETON_KEY,
            &ControlPlaneSshConfig {
                host: "10.0.0.1".to_string(),
                password: "live-ssh-password".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut channel_config = BTreeMap::new();
    channel_config.insert("url".to_string(), LONG_WEBHOOK.to_string());
    state
        .alert_evaluator
        .save_config(&AlertConfig {
            balance_threshold: 10.0,
            channels: vec![NotifyChannel {
                id: "ops".to_string(),
                channel_type: ChannelType::Webhook,
                name: "ops".to_string(),
                config: channel_config,
                enabled: true,
            }],
        })
        .await
        .unwrap();
    state
}

fn all_sections() -> Vec<String> {
    ["billing", "alerts", "resources", "controlPlane", "initScripts"]
        .iter()
        .map(|section| section.to_string())
        .collect()
}

#[tokio::test]
async fn certify_redacted_export_and_sensitive_preservation() {
    let state = forge_state().await;

    // Exportación censurada: el password colapsa al centinela y el
    // webhook largo conserva extremos reconocibles.
    let envelope = state
        .config_transfer
        .export(&all_sections(), false, "admin")
        .await
        .unwrap();
    assert_eq!(envelope.sections.len(), 5);

    let control_plane = &envelope.sections["controlPlane"];
    assert_eq!(
        control_plane.get("password").and_then(|value| value.as_str()),
        Some(REDACTED_SENTINEL)
    );

    let alerts = &envelope.sections["alerts"];
    let exported_url = alerts["channels"][0]["config"]["url"].as_str().unwrap();
    assert_ne!(exported_url, LONG_WEBHOOK);
    assert!(exported_url.contains("***"));

    // Preview del sobre censurado: válido, con advertencias sensibles.
    let preview = state.config_transfer.preview(&envelope).await.unwrap();
    assert!(preview.valid);

    // Aplicación con preservación: los secretos vivos sobreviven.
    let outcome = state
        .config_transfer
        .apply(&envelope, &all_sections(), true)
        .await
        .unwrap();
    assert_eq!(outcome.applied.len(), 5, "warnings: {:?}", outcome.warnings);
    assert!(outcome.skipped.is_empty());

    let live_ssh = state
        .vault
        .read_document::<ControlPlaneSshConfig>(names::CONTROL_PLANE_CONFIG, names::SINGLETON_KEY)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live_ssh.password, "live-ssh-password", "El secreto vivo se preserva.");

    let live_alerts = state.alert_evaluator.load_config().await.unwrap();
    assert_eq!(
        live_alerts.channels[0].config.get("url").map(String::as_str),
        Some(LONG_WEBHOOK),
        "El webhook vivo se rehidrata por (canal, clave)."
    );
    println!("✅ INTEGRATION: Redacted export and preservation certified.");
}
