/**
 * =================================================================
 * APARATO: TASK RING INTEGRITY TEST (V1.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el registro de pasadas, la contención de pánicos
 *           y el apagado cooperativo.
 * =================================================================
 */

use bison_control_plane::services::TaskRunner;
use bison_domain_models::TaskStatus;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn certify_rows_seal_most_recent_first() {
    let runner = TaskRunner::new();
    let tick_counter = Arc::new(AtomicU32::new(0));

    let counter = tick_counter.clone();
    runner.spawn_loop("probe", Duration::from_millis(10), move || {
        let counter = counter.clone();
        async move {
            let round = counter.fetch_add(1, Ordering::SeqCst);
            if round % 2 == 0 {
                Ok((TaskStatus::Success, None))
            } else {
                Ok((TaskStatus::Skipped, Some("odd round".to_string())))
            }
        }
    });

    tokio::time::sleep(Duration::from_millis(120)).await;
    runner.shutdown();
    tokio::time::sleep(Duration::from_millis(30)).await;

    let rows = runner.recent(100);
    assert!(rows.len() >= 3, "Varias pasadas deben quedar selladas.");
    assert!(rows.iter().any(|row| row.status == TaskStatus::Success));
    assert!(rows.iter().any(|row| row.status == TaskStatus::Skipped));

    // La más nueva primero: los cierres no crecen hacia el pasado.
    for window in rows.windows(2) {
        assert!(window[0].ended_at >= window[1].ended_at, "El anillo expone lo reciente primero.");
    }

    // Tras el apagado, el bucle se detiene.
    let sealed_count = runner.recent(100).len();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(runner.recent(100).len(), sealed_count, "El apagado detiene el bucle.");
    println!("✅ TASK_RING: Row sealing and shutdown certified.");
}

#[tokio::test]
async fn certify_panic_containment() {
    let runner = TaskRunner::new();
    let tick_counter = Arc::new(AtomicU32::new(0));

    let counter = tick_counter.clone();
    runner.spawn_loop("volatile", Duration::from_millis(10), move || {
        let counter = counter.clone();
        async move {
            let round = counter.fetch_add(1, Ordering::SeqCst);
            if round == 0 {
                panic!("stratum collapse inside tick");
            }
            Ok((TaskStatus::Success, None))
        }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    runner.shutdown();

    let rows = runner.recent(100);
    let panicked_row = rows
        .iter()
        .find(|row| row.status == TaskStatus::Failed)
        .expect("El pánico debe quedar sellado como fila fallida.");
    assert!(panicked_row.error.as_deref().unwrap_or_default().contains("panic"));

    // El bucle sobrevivió al pánico y siguió sellando pasadas exitosas.
    assert!(
        rows.iter().any(|row| row.status == TaskStatus::Success),
        "El daemon continúa tras recuperar el pánico."
    );
    println!("✅ TASK_RING: Panic containment certified.");
}
