// [libs/domain/transfer/src/redaction.rs]
/*!
 * =================================================================
 * APARATO: SENSITIVE VALUE REDACTION (V1.2 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CENSURA Y DETECCIÓN DE SECRETOS EN SECCIONES
 *
 * # Invariante:
 * Valores largos (> 20) conservan 10 + 5 caracteres alrededor de '***';
 * los cortos degradan al centinela completo. La detección inversa es
 * una heurística: centinela exacto o presencia del marcador '***'.
 * =================================================================
 */

use bison_domain_models::REDACTED_SENTINEL;

/// Claves de configuración de canal consideradas sensibles.
pub fn is_sensitive_channel_key(config_key: &str) -> bool {
    config_key == "url" || config_key == "webhook" || config_key.starts_with("smtp")
}

/**
 * Censura un valor sensible preservando extremos reconocibles.
 */
pub fn mask_value(raw_value: &str) -> String {
    if raw_value.len() > 20 {
        let prefix: String = raw_value.chars().take(10).collect();
        let suffix: String = raw_value
            .chars()
            .rev()
            .take(5)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}***{}", prefix, suffix)
    } else {
        REDACTED_SENTINEL.to_string()
    }
}

/// Heurística inversa: el valor proviene de una censura previa.
pub fn is_redacted(candidate_value: &str) -> bool {
    candidate_value == REDACTED_SENTINEL || candidate_value.contains("***")
}
