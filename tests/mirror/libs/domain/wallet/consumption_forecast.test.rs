/**
 * =================================================================
 * APARATO: CONSUMPTION FORECAST TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el promedio diario y su degradación por span.
 * =================================================================
 */

use bison_domain_models::{LedgerEntry, LedgerKind};
use bison_domain_wallet::WalletService;
use chrono::{DateTime, Duration, Utc};

fn debit(now: DateTime<Utc>, days_ago: i64, amount: f64) -> LedgerEntry {
    LedgerEntry {
        id: format!("entry-{}-{}", days_ago, amount),
        timestamp: now - Duration::days(days_ago),
        kind: LedgerKind::Deduction,
        amount: -amount,
        operator: "system".to_string(),
        reason: "usage".to_string(),
        balance: 0.0,
    }
}

#[test]
fn certify_seven_day_window_average() {
    let now = Utc::now();
    // 70 unidades gastadas dentro de la ventana; historia de más de 7 días.
    let ledger = vec![
        debit(now, 10, 999.0), // fuera de ventana, solo ancla el span
        debit(now, 6, 30.0),
        debit(now, 3, 25.0),
        debit(now, 1, 15.0),
    ];

    let rate = WalletService::consumption_rate(&ledger, now);
    assert!(
        (rate - 10.0).abs() < 1e-9,
        "70 gastadas / 7 días = 10, llegó {}",
        rate
    );
    println!("✅ WALLET_FORECAST: Seven-day window average certified.");
}

#[test]
fn certify_short_history_uses_actual_span() {
    let now = Utc::now();
    // Historia de 2 días exactos con 20 unidades gastadas.
    let ledger = vec![debit(now, 2, 12.0), debit(now, 1, 8.0)];

    let rate = WalletService::consumption_rate(&ledger, now);
    assert!(
        (rate - 10.0).abs() < 1e-6,
        "20 gastadas / 2 días de span real = 10, llegó {}",
        rate
    );
    println!("✅ WALLET_FORECAST: Actual span degradation certified.");
}

#[test]
fn certify_positive_only_ledger_yields_zero() {
    let now = Utc::now();
    let ledger = vec![LedgerEntry {
        id: "credit".to_string(),
        timestamp: now - Duration::days(1),
        kind: LedgerKind::Recharge,
        amount: 100.0,
        operator: "op".to_string(),
        reason: String::new(),
        balance: 100.0,
    }];

    assert_eq!(WalletService::consumption_rate(&ledger, now), 0.0);
    assert_eq!(WalletService::consumption_rate(&[], now), 0.0);
    println!("✅ WALLET_FORECAST: Zero-rate degradation certified.");
}
