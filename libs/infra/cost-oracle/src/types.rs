// [libs/infra/cost-oracle/src/types.rs]
/*!
 * =================================================================
 * APARATO: ALLOCATION RESPONSE GRAMMAR (V2.0 - STRICT ALIGNMENT)
 * CLASIFICACIÓN: INFRASTRUCTURE CONTRACT (ESTRATO L3)
 * RESPONSABILIDAD: FORMA DE LAS RESPUESTAS DEL ORÁCULO Y SU CONVERSIÓN
 *
 * # Mathematical Proof (Unit Normalization):
 * El oráculo reporta memoria en byte-horas; la conversión a GB-horas
 * divide por 2^30 exactamente una vez, en la frontera del adaptador.
 * =================================================================
 */

use crate::errors::OracleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filas sintéticas del oráculo que se filtran de todos los reportes.
const SYNTHETIC_ROWS: [&str; 2] = ["__idle__", "__unmounted__"];

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Fila de uso y costo agregada por namespace (o por usuario).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceUsage {
    pub name: String,
    pub cpu_core_hours: f64,
    pub ram_gb_hours: f64,
    pub gpu_hours: f64,
    pub cpu_cost: f64,
    pub ram_cost: f64,
    pub gpu_cost: f64,
    pub total_cost: f64,
    pub minutes: f64,
}

/// Punto de la serie diaria de costo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostTrendPoint {
    /// Fecha del bucket en formato YYYY-MM-DD.
    pub date: String,
    pub total_cost: f64,
}

/// Ventana temporal reportada por el oráculo en cada asignación.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AllocationWindow {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// Asignación cruda tal como la emite el oráculo.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawAllocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cpu_core_hours: f64,
    #[serde(default)]
    pub ram_byte_hours: f64,
    #[serde(default)]
    pub gpu_hours: f64,
    #[serde(default)]
    pub cpu_cost: f64,
    #[serde(default)]
    pub ram_cost: f64,
    #[serde(default)]
    pub gpu_cost: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub window: AllocationWindow,
}

/// Sobre de respuesta del endpoint de asignación.
#[derive(Debug, Deserialize)]
pub struct AllocationEnvelope {
    #[serde(default)]
    pub code: u16,
    /// Un mapa nombre -> asignación por cada bucket temporal.
    #[serde(default)]
    pub data: Vec<BTreeMap<String, RawAllocation>>,
}

impl RawAllocation {
    /// Normaliza la asignación cruda a la fila de reporte del dominio.
    pub fn into_usage(self, reported_name: String) -> NamespaceUsage {
        NamespaceUsage {
            name: if self.name.is_empty() { reported_name } else { self.name },
            cpu_core_hours: self.cpu_core_hours,
            ram_gb_hours: self.ram_byte_hours / BYTES_PER_GB,
            gpu_hours: self.gpu_hours,
            cpu_cost: self.cpu_cost,
            ram_cost: self.ram_cost,
            gpu_cost: self.gpu_cost,
            total_cost: self.total_cost,
            minutes: self.minutes,
        }
    }
}

/// Evalúa si la fila es ruido sintético del oráculo.
pub fn is_synthetic_row(name: &str) -> bool {
    SYNTHETIC_ROWS.contains(&name)
}

/**
 * Aplana los buckets del sobre a filas de reporte, filtrando el ruido.
 */
pub fn flatten_buckets(envelope: AllocationEnvelope) -> Result<Vec<NamespaceUsage>, OracleError> {
    if envelope.code != 0 && envelope.code != 200 {
        return Err(OracleError::Rejected(envelope.code));
    }
    let mut report_rows = Vec::new();
    for bucket in envelope.data {
        for (reported_name, raw_allocation) in bucket {
            if is_synthetic_row(&reported_name) {
                continue;
            }
            report_rows.push(raw_allocation.into_usage(reported_name));
        }
    }
    Ok(report_rows)
}

/**
 * Proyecta los buckets del sobre a la serie diaria de costo total.
 *
 * # Logic:
 * Cada bucket aporta un punto; la fecha se toma del inicio de la
 * ventana de cualquiera de sus filas (los diez primeros caracteres
 * del instante RFC 3339).
 */
pub fn buckets_to_trend(envelope: AllocationEnvelope) -> Result<Vec<CostTrendPoint>, OracleError> {
    if envelope.code != 0 && envelope.code != 200 {
        return Err(OracleError::Rejected(envelope.code));
    }
    let mut trend_points = Vec::new();
    for bucket in envelope.data {
        let mut bucket_date = String::new();
        let mut bucket_total = 0.0;
        for (reported_name, raw_allocation) in bucket {
            if bucket_date.is_empty() && raw_allocation.window.start.len() >= 10 {
                bucket_date = raw_allocation.window.start[..10].to_string();
            }
            if is_synthetic_row(&reported_name) {
                continue;
            }
            bucket_total += raw_allocation.total_cost;
        }
        if !bucket_date.is_empty() {
            trend_points.push(CostTrendPoint {
                date: bucket_date,
                total_cost: bucket_total,
            });
        }
    }
    Ok(trend_points)
}
