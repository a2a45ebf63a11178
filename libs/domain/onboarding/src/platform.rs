// [libs/domain/onboarding/src/platform.rs]
/*!
 * =================================================================
 * APARATO: PLATFORM DETECTION CALCULUS (V1.3 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PARSEO DE os-release Y NORMALIZACIÓN DE ARQUITECTURA
 * =================================================================
 */

use bison_domain_models::NodePlatform;

/// Normaliza la salida de 'uname -m' al vocabulario del catálogo.
pub fn normalize_architecture(raw_machine: &str) -> String {
    match raw_machine.trim() {
        "x86_64" => "amd64".to_string(),
        "aarch64" => "arm64".to_string(),
        other => other.to_string(),
    }
}

/**
 * Extrae ID y VERSION_ID de un documento /etc/os-release.
 *
 * # Logic:
 * Las comillas envolventes se descartan; las claves ausentes degradan
 * a cadena vacía (la selección de scripts resolverá por comodín).
 */
pub fn parse_os_release(raw_document: &str) -> (String, String) {
    let mut os_identifier = String::new();
    let mut os_version = String::new();

    for line in raw_document.lines() {
        if let Some(raw_value) = line.strip_prefix("ID=") {
            os_identifier = raw_value.trim().trim_matches('"').to_string();
        } else if let Some(raw_value) = line.strip_prefix("VERSION_ID=") {
            os_version = raw_value.trim().trim_matches('"').to_string();
        }
    }
    (os_identifier, os_version)
}

/// Forja la plataforma detectada desde las tres sondas remotas.
pub fn detect_platform(os_release_document: &str, raw_machine: &str) -> NodePlatform {
    let (os_identifier, os_version) = parse_os_release(os_release_document);
    NodePlatform {
        os: os_identifier,
        version: os_version,
        arch: normalize_architecture(raw_machine),
    }
}
