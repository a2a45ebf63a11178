/**
 * =================================================================
 * APARATO: BILLING POLICY VALIDATION TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el rechazo de políticas incoherentes en ingreso.
 * =================================================================
 */

use bison_domain_models::billing_config::BillingConfigViolation;
use bison_domain_models::schedule::{AutoRechargePlan, RechargeCadence};
use bison_domain_models::BillingConfig;

#[test]
fn certify_default_policy_is_coherent() {
    let policy = BillingConfig::default();
    assert!(policy.validate().is_ok(), "La política por defecto debe validar.");
    assert!(!policy.enabled, "El motor nace apagado.");
    assert_eq!(policy.grace_period_value, 3);
    println!("✅ BILLING_POLICY: Default coherence certified.");
}

#[test]
fn certify_interval_bounds() {
    let mut policy = BillingConfig::default();
    policy.interval = 0;
    assert_eq!(policy.validate(), Err(BillingConfigViolation::IntervalOutOfRange(0)));

    policy.interval = 25;
    assert_eq!(policy.validate(), Err(BillingConfigViolation::IntervalOutOfRange(25)));

    policy.interval = 24;
    assert!(policy.validate().is_ok());
    println!("✅ BILLING_POLICY: Interval bounds certified.");
}

#[test]
fn certify_currency_and_grace_rejections() {
    let mut policy = BillingConfig::default();
    policy.currency = "   ".to_string();
    assert_eq!(policy.validate(), Err(BillingConfigViolation::CurrencyEmpty));

    let mut policy = BillingConfig::default();
    policy.grace_period_value = 0;
    assert_eq!(policy.validate(), Err(BillingConfigViolation::GracePeriodNotPositive));
    println!("✅ BILLING_POLICY: Currency and grace rejections certified.");
}

#[test]
fn certify_recharge_plan_day_ranges() {
    let weekly = AutoRechargePlan {
        enabled: true,
        amount: 10.0,
        cadence: RechargeCadence::Weekly,
        day: 6,
        next_fire: None,
        last_fire: None,
    };
    assert!(weekly.day_in_range());

    let weekly_out = AutoRechargePlan { day: 7, ..weekly.clone() };
    assert!(!weekly_out.day_in_range(), "Weekly acepta 0..=6.");

    let monthly = AutoRechargePlan {
        cadence: RechargeCadence::Monthly,
        day: 31,
        ..weekly.clone()
    };
    assert!(monthly.day_in_range());

    let monthly_out = AutoRechargePlan {
        cadence: RechargeCadence::Monthly,
        day: 0,
        ..weekly
    };
    assert!(!monthly_out.day_in_range(), "Monthly acepta 1..=31.");
    println!("✅ BILLING_POLICY: Recharge plan day ranges certified.");
}
