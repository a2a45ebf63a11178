/**
 * =================================================================
 * APARATO: GRACE WINDOW TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la aritmética y la presentación de la gracia.
 * =================================================================
 */

use bison_domain_models::GracePeriodUnit;
use bison_domain_wallet::grace;
use chrono::{Duration, Utc};

#[test]
fn certify_expiry_boundary() {
    let overdue_at = Utc::now() - Duration::days(3);

    assert!(grace::is_grace_expired(overdue_at, Utc::now(), 3, GracePeriodUnit::Days));
    assert!(!grace::is_grace_expired(overdue_at, Utc::now(), 4, GracePeriodUnit::Days));
    assert!(grace::is_grace_expired(overdue_at, Utc::now(), 72, GracePeriodUnit::Hours));
    println!("✅ GRACE: Expiry boundary certified.");
}

#[test]
fn certify_remaining_presentation() {
    let now = Utc::now();

    // Remanente de 2 días y 4 horas.
    let overdue_at = now - Duration::hours(20);
    let presentation = grace::grace_remaining(overdue_at, now, 3, GracePeriodUnit::Days);
    assert_eq!(presentation, "2d 4h");

    // Bajo un día, presentación en horas y minutos.
    let overdue_at = now - Duration::hours(70);
    let presentation = grace::grace_remaining(overdue_at, now, 3, GracePeriodUnit::Days);
    assert_eq!(presentation, "2h 0m");

    // Agotada: marcador terminal.
    let overdue_at = now - Duration::days(5);
    let presentation = grace::grace_remaining(overdue_at, now, 3, GracePeriodUnit::Days);
    assert_eq!(presentation, grace::GRACE_EXPIRED);
    println!("✅ GRACE: Remaining presentation certified.");
}

#[test]
fn certify_unknown_unit_degrades_to_days() {
    assert_eq!(grace::unit_from_raw("hours"), GracePeriodUnit::Hours);
    assert_eq!(grace::unit_from_raw("days"), GracePeriodUnit::Days);
    // Registros heredados con unidades exóticas degradan a días.
    assert_eq!(grace::unit_from_raw("weeks"), GracePeriodUnit::Days);
    assert_eq!(grace::unit_from_raw(""), GracePeriodUnit::Days);
    println!("✅ GRACE: Legacy unit degradation certified.");
}
