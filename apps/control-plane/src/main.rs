// [apps/control-plane/src/main.rs]
/*!
 * =================================================================
 * APARATO: CONTROL PLANE MAIN ENTRY POINT (V4.0 - GOLD MASTER)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * # Mathematical Proof (Deterministic Ignition):
 * La siembra de blobs por defecto ocurre antes de la apertura del
 * socket TCP, previniendo estados de carrera donde un handler lea un
 * catálogo aún no cristalizado.
 * =================================================================
 */

use bison_control_plane::prelude::*;
use bison_shared_sentinel::init_tracing;
use dotenvy::dotenv;
use tracing::{error, info};

/**
 * Punto de ignición supremo del binario del plano de control.
 */
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. CARGA DE ENTORNO SOBERANO
    dotenv().ok();

    // 2. INICIALIZACIÓN DE OBSERVABILIDAD NEURAL (SENTINEL)
    init_tracing("bison_control_plane");

    // 3. CONFIGURACIÓN DEL RUNTIME SOBERANO
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        info!("🛰️ [CONTROL_PLANE]: Global ignition sequence starting...");

        let listening_network_port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("CRITICAL_FAULT: PORT must be a valid u16.");

        let kernel = ControlPlaneKernel::ignite(listening_network_port).await;

        if let Err(launch_fault) = kernel.launch_sovereign_operations().await {
            error!("❌ [CONTROL_PLANE]: Sovereign operations collapsed: {}", launch_fault);
            std::process::exit(1);
        }
    });

    Ok(())
}
