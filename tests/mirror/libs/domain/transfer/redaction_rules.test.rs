/**
 * =================================================================
 * APARATO: REDACTION RULES TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la censura de secretos y su heurística inversa.
 * =================================================================
 */

use bison_domain_models::REDACTED_SENTINEL;
use bison_domain_transfer::redaction::{is_redacted, is_sensitive_channel_key, mask_value};

#[test]
fn certify_long_values_keep_recognizable_edges() {
    let secret = "https://hooks.example.com/services/T000/B000/XXXX";
    let masked = mask_value(secret);

    assert!(masked.starts_with("https://ho"), "Conserva los 10 primeros caracteres.");
    assert!(masked.ends_with("/XXXX"), "Conserva los 5 últimos caracteres.");
    assert!(masked.contains("***"));
    assert_ne!(masked, secret);
    println!("✅ REDACTION: Recognizable edge masking certified.");
}

#[test]
fn certify_short_values_collapse_to_sentinel() {
    assert_eq!(mask_value("short-secret"), REDACTED_SENTINEL);
    assert_eq!(mask_value(""), REDACTED_SENTINEL);

    // Frontera: exactamente 20 caracteres degrada al centinela.
    assert_eq!(mask_value("12345678901234567890"), REDACTED_SENTINEL);
    // 21 caracteres ya conserva extremos.
    assert!(mask_value("123456789012345678901").contains("***"));
    println!("✅ REDACTION: Sentinel collapse certified.");
}

#[test]
fn certify_inverse_heuristic() {
    assert!(is_redacted(REDACTED_SENTINEL));
    assert!(is_redacted("https://ho***/XXXX"));
    assert!(!is_redacted("https://hooks.example.com/real"));
    assert!(!is_redacted(""));
    println!("✅ REDACTION: Inverse heuristic certified.");
}

#[test]
fn certify_sensitive_key_vocabulary() {
    assert!(is_sensitive_channel_key("url"));
    assert!(is_sensitive_channel_key("webhook"));
    assert!(is_sensitive_channel_key("smtp_password"));
    assert!(is_sensitive_channel_key("smtpHost"));
    assert!(!is_sensitive_channel_key("displayName"));
    println!("✅ REDACTION: Sensitive key vocabulary certified.");
}
