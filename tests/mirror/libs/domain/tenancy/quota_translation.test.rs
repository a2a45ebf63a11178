/**
 * =================================================================
 * APARATO: QUOTA TRANSLATION TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar simplify(expand(k)) = k y el parseo de cantidades.
 * =================================================================
 */

use bison_domain_tenancy::projection::{
    expand_quota_key, parse_exclusive, pool_value_for_team, simplify_quota_key,
};
use bison_domain_tenancy::quantity::{
    format_bytes_gi, format_cores, format_cores_used, is_byte_shaped, parse_quantity,
};

#[test]
fn certify_key_translation_law() {
    // simplify(expand(k)) = k para toda clave habilitada.
    for domain_key in ["cpu", "memory", "nvidia.com/gpu", "ephemeral-storage", "pods"] {
        let expanded = expand_quota_key(domain_key);
        assert_eq!(simplify_quota_key(&expanded), domain_key);
    }

    assert_eq!(expand_quota_key("cpu"), "requests.cpu");
    assert_eq!(expand_quota_key("pods"), "pods", "pods permanece desnuda.");
    assert_eq!(simplify_quota_key("limits.memory"), "memory");
    println!("✅ QUOTA: Key translation law certified.");
}

#[test]
fn certify_pool_value_grammar() {
    assert_eq!(pool_value_for_team("research"), "team-research");
    assert_eq!(parse_exclusive("team-research"), Some("research"));
    assert_eq!(parse_exclusive("shared"), None);
    assert_eq!(parse_exclusive("edge"), None);
    println!("✅ QUOTA: Pool value grammar certified.");
}

#[test]
fn certify_quantity_parsing() {
    assert_eq!(parse_quantity("4"), 4.0);
    assert!((parse_quantity("100m") - 0.1).abs() < 1e-12);
    assert_eq!(parse_quantity("16Gi"), 16.0 * 1024.0 * 1024.0 * 1024.0);
    assert_eq!(parse_quantity("2Ki"), 2048.0);
    assert_eq!(parse_quantity("3k"), 3000.0);
    assert_eq!(parse_quantity(""), 0.0);
    assert_eq!(parse_quantity("garbage"), 0.0, "Lo ilegible degrada a cero.");
    println!("✅ QUOTA: Quantity parsing certified.");
}

#[test]
fn certify_quantity_formatting() {
    assert_eq!(format_bytes_gi(32.0 * 1024.0 * 1024.0 * 1024.0), "32Gi");
    assert_eq!(format_cores(15.6), "16");
    assert_eq!(format_cores_used(3.45), "3.5");
    assert!(is_byte_shaped("memory"));
    assert!(is_byte_shaped("ephemeral-storage"));
    assert!(!is_byte_shaped("cpu"));
    println!("✅ QUOTA: Quantity formatting certified.");
}
