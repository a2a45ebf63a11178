// [apps/control-plane/src/kernel.rs]
/*!
 * =================================================================
 * APARATO: CONTROL PLANE SOVEREIGN KERNEL (V4.0 - GOLD MASTER)
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L1-APP)
 * RESPONSABILIDAD: BOOTSTRAP DE BINDINGS E IGNICIÓN SEGURA
 *
 * VISION HIPER-HOLÍSTICA:
 * Actúa como la placa base donde se conectan los bindings del
 * despliegue: el uplink del cluster (gateway REST o motor en memoria),
 * el oráculo de costos (o su degradación nula) y el conector SSH.
 * =================================================================
 */

use crate::routes::create_sovereign_router;
use crate::state::AppState;
use bison_infra_cluster::{ClusterControlApi, MemoryCluster, RestCluster};
use bison_infra_cost_oracle::resolve_oracle;
use bison_infra_ssh::BlockingSshConnector;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ControlPlaneKernel {
    pub server_network_port: u16,
    pub application_state: AppState,
}

impl ControlPlaneKernel {
    /**
     * Realiza la ignición de los bindings y el estado neural.
     *
     * # Logic:
     * BISON_CLUSTER_GATEWAY_URL presente -> binding REST contra el
     * gateway del API de control; ausente -> motor en memoria (modo
     * local de desarrollo). El oráculo degrada a nulo sin endpoint.
     */
    pub async fn ignite(listening_port: u16) -> Self {
        let cluster_uplink: Arc<dyn ClusterControlApi> =
            match env::var("BISON_CLUSTER_GATEWAY_URL").ok().filter(|url| !url.is_empty()) {
                Some(gateway_url) => {
                    let service_token = env::var("BISON_CLUSTER_TOKEN").unwrap_or_default();
                    info!("🔌 [KERNEL]: Cluster uplink -> REST gateway [{}].", gateway_url);
                    Arc::new(RestCluster::new(gateway_url, service_token))
                }
                None => {
                    warn!("🔌 [KERNEL]: BISON_CLUSTER_GATEWAY_URL undefined; memory engine active (local mode).");
                    Arc::new(MemoryCluster::new())
                }
            };

        let cost_oracle = resolve_oracle(env::var("BISON_COST_ORACLE_URL").ok());
        if cost_oracle.is_enabled() {
            info!("💰 [KERNEL]: Cost oracle uplink armed.");
        } else {
            warn!("💰 [KERNEL]: Cost oracle absent; usage reports degrade to zero.");
        }

        let application_state =
            AppState::new(cluster_uplink, cost_oracle, Arc::new(BlockingSshConnector));

        Self {
            server_network_port: listening_port,
            application_state,
        }
    }

    /**
     * Lanza la siembra, los daemons periódicos y el servidor HTTP.
     */
    pub async fn launch_sovereign_operations(self) -> anyhow::Result<()> {
        // 1. SIEMBRA DE BLOBS POR DEFECTO
        self.application_state.seed_defaults().await?;

        // 2. IGNICIÓN DE LOS BUCLES PERIÓDICOS (billing / recargas / alertas)
        self.application_state.launch_background_loops();

        // 3. APERTURA DEL SOCKET TCP
        let bind_address = SocketAddr::new(
            "0.0.0.0".parse::<IpAddr>().expect("static bind address"),
            self.server_network_port,
        );
        let listener = tokio::net::TcpListener::bind(bind_address).await?;
        info!("🛰️ [KERNEL]: Control plane listening on [{}].", bind_address);

        // 4. SERVICIO HTTP CON APAGADO COOPERATIVO
        let task_runner = Arc::clone(&self.application_state.task_runner);
        let router = create_sovereign_router(self.application_state);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                info!("🛰️ [KERNEL]: Shutdown signal received; draining daemons.");
                task_runner.shutdown();
            })
            .await?;

        Ok(())
    }
}
