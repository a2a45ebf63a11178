// [libs/domain/tenancy/src/quantity.rs]
/*!
 * =================================================================
 * APARATO: QUANTITY CALCULUS (V1.4 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PARSEO Y FORMATEO DE CANTIDADES DEL CLUSTER
 *
 * # Mathematical Proof (Suffix Scaling):
 * Los sufijos binarios escalan por 2^(10k) y los decimales por 10^(3k);
 * el sufijo 'm' divide por 1000 (mili-cores). El parseo de un valor
 * ilegible degrada a 0 para que una cantidad exótica jamás aborte una
 * agregación completa.
 * =================================================================
 */

const GIBI: f64 = 1024.0 * 1024.0 * 1024.0;

/// Interpreta una cantidad del cluster ('4', '100m', '16Gi') como f64.
pub fn parse_quantity(raw_quantity: &str) -> f64 {
    let trimmed = raw_quantity.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let binary_suffixes: [(&str, f64); 5] = [
        ("Ki", 1024.0),
        ("Mi", 1024.0 * 1024.0),
        ("Gi", GIBI),
        ("Ti", GIBI * 1024.0),
        ("Pi", GIBI * 1024.0 * 1024.0),
    ];
    for (suffix, scale) in binary_suffixes {
        if let Some(numeric_part) = trimmed.strip_suffix(suffix) {
            return numeric_part.parse::<f64>().unwrap_or(0.0) * scale;
        }
    }

    if let Some(numeric_part) = trimmed.strip_suffix('m') {
        return numeric_part.parse::<f64>().unwrap_or(0.0) / 1000.0;
    }

    let decimal_suffixes: [(&str, f64); 4] = [
        ("k", 1e3),
        ("M", 1e6),
        ("G", 1e9),
        ("T", 1e12),
    ];
    for (suffix, scale) in decimal_suffixes {
        if let Some(numeric_part) = trimmed.strip_suffix(suffix) {
            return numeric_part.parse::<f64>().unwrap_or(0.0) * scale;
        }
    }

    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// Bytes crudos -> 'NGi' redondeado al entero.
pub fn format_bytes_gi(raw_bytes: f64) -> String {
    format!("{}Gi", (raw_bytes / GIBI).round() as i64)
}

/// Cores -> entero ('16').
pub fn format_cores(cores: f64) -> String {
    format!("{}", cores.round() as i64)
}

/// Cores consumidos -> un decimal ('3.5').
pub fn format_cores_used(cores: f64) -> String {
    format!("{:.1}", cores)
}

/// Conteos genéricos (GPUs, pods) -> entero.
pub fn format_count(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Evalúa si el recurso se presenta en bytes (memoria o almacenamiento).
pub fn is_byte_shaped(resource_name: &str) -> bool {
    resource_name == "memory" || resource_name.contains("storage")
}
