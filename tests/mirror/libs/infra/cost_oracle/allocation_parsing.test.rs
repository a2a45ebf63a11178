/**
 * =================================================================
 * APARATO: ALLOCATION PARSING TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el filtrado de ruido y la normalización de unidades.
 * =================================================================
 */

use bison_infra_cost_oracle::types::{buckets_to_trend, flatten_buckets, AllocationEnvelope};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

fn sample_envelope() -> AllocationEnvelope {
    serde_json::from_str(
        r#"{
            "code": 200,
            "data": [{
                "ns-a": {
                    "name": "ns-a",
                    "cpuCoreHours": 10.0,
                    "ramByteHours": 21474836480.0,
                    "gpuHours": 2.0,
                    "cpuCost": 1.0,
                    "ramCost": 0.5,
                    "gpuCost": 10.0,
                    "totalCost": 11.5,
                    "minutes": 60.0,
                    "window": { "start": "2026-07-01T00:00:00Z", "end": "2026-07-02T00:00:00Z" }
                },
                "__idle__": { "name": "__idle__", "totalCost": 99.0 },
                "__unmounted__": { "name": "__unmounted__", "totalCost": 7.0 }
            }]
        }"#,
    )
    .expect("El sobre de muestra debe parsear.")
}

#[test]
fn certify_synthetic_rows_are_filtered() {
    let report = flatten_buckets(sample_envelope()).unwrap();
    assert_eq!(report.len(), 1, "__idle__ y __unmounted__ deben filtrarse.");
    assert_eq!(report[0].name, "ns-a");
    println!("✅ COST_ORACLE: Synthetic row filtering certified.");
}

#[test]
fn certify_byte_hours_normalize_to_gb() {
    let report = flatten_buckets(sample_envelope()).unwrap();
    let gb_hours = report[0].ram_gb_hours;
    assert!(
        (gb_hours - 21474836480.0 / GIB).abs() < 1e-9,
        "ramByteHours debe dividirse por 2^30 exactamente una vez."
    );
    assert_eq!(report[0].cpu_core_hours, 10.0);
    assert_eq!(report[0].gpu_hours, 2.0);
    println!("✅ COST_ORACLE: Byte-hour normalization certified.");
}

#[test]
fn certify_trend_buckets_project_dates() {
    let trend = buckets_to_trend(sample_envelope()).unwrap();
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].date, "2026-07-01");
    // El ruido sintético tampoco suma en la serie diaria.
    assert!((trend[0].total_cost - 11.5).abs() < 1e-9);
    println!("✅ COST_ORACLE: Trend bucket projection certified.");
}

#[test]
fn certify_rejected_code_surfaces() {
    let envelope: AllocationEnvelope =
        serde_json::from_str(r#"{ "code": 500, "data": [] }"#).unwrap();
    assert!(flatten_buckets(envelope).is_err(), "Un código de rechazo debe aflorar.");
    println!("✅ COST_ORACLE: Rejection surfacing certified.");
}
