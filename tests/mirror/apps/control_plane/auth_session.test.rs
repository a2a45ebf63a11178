/**
 * =================================================================
 * APARATO: AUTH SESSION TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el intercambio de credenciales fijas por bearer.
 * =================================================================
 */

use bison_control_plane::auth::TokenVault;

fn forge_vault() -> TokenVault {
    std::env::set_var("BISON_ADMIN_USER", "admin");
    std::env::set_var("BISON_ADMIN_PASSWORD", "sovereign-secret");
    TokenVault::from_environment()
}

#[test]
fn certify_credential_exchange() {
    let vault = forge_vault();

    let (bearer_token, ttl_seconds) = vault
        .login("admin", "sovereign-secret")
        .expect("Las credenciales correctas emiten token.");
    assert!(!bearer_token.is_empty());
    assert_eq!(ttl_seconds, 24 * 3600);

    // El token emitido verifica y resuelve al operador.
    assert_eq!(vault.verify(&bearer_token), Some("admin".to_string()));
    println!("✅ AUTH: Credential exchange certified.");
}

#[test]
fn certify_rejections() {
    let vault = forge_vault();

    assert!(vault.login("admin", "wrong-password").is_none());
    assert!(vault.login("intruder", "sovereign-secret").is_none());
    assert!(vault.verify("forged-token").is_none());
    println!("✅ AUTH: Rejection shield certified.");
}

#[test]
fn certify_sessions_are_independent() {
    let vault = forge_vault();

    let (first_token, _) = vault.login("admin", "sovereign-secret").unwrap();
    let (second_token, _) = vault.login("admin", "sovereign-secret").unwrap();

    assert_ne!(first_token, second_token, "Cada login emite un token unívoco.");
    assert!(vault.verify(&first_token).is_some());
    assert!(vault.verify(&second_token).is_some());
    println!("✅ AUTH: Independent session certified.");
}
