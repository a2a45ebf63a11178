/**
 * =================================================================
 * APARATO: DOMAIN CONTRACT SERIALIZATION TEST (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la gramática de cables de los contratos L2.
 * =================================================================
 */

use bison_domain_models::{
    AlertSeverity, ChannelType, JobStatus, LedgerKind, NotifyChannel, ScriptPhase, Team,
    WalletSnapshot,
};
use chrono::Utc;
use std::collections::BTreeMap;

#[test]
fn certify_ledger_kind_wire_grammar() {
    // Los asientos viajan en snake_case hacia el Dashboard y los blobs.
    assert_eq!(serde_json::to_string(&LedgerKind::Recharge).unwrap(), "\"recharge\"");
    assert_eq!(serde_json::to_string(&LedgerKind::Deduction).unwrap(), "\"deduction\"");
    assert_eq!(
        serde_json::to_string(&LedgerKind::AutoRecharge).unwrap(),
        "\"auto_recharge\""
    );
    println!("✅ CONTRACTS: Ledger kind wire grammar certified.");
}

#[test]
fn certify_script_phase_and_channel_wire_grammar() {
    assert_eq!(serde_json::to_string(&ScriptPhase::PreJoin).unwrap(), "\"pre-join\"");
    assert_eq!(serde_json::to_string(&ScriptPhase::PostJoin).unwrap(), "\"post-join\"");
    assert_eq!(serde_json::to_string(&ChannelType::Dingtalk).unwrap(), "\"dingtalk\"");
    assert_eq!(serde_json::to_string(&AlertSeverity::Critical).unwrap(), "\"critical\"");

    // El campo 'type' del canal conserva su nombre de cable histórico.
    let channel = NotifyChannel {
        id: "ch-1".to_string(),
        channel_type: ChannelType::Webhook,
        name: "ops".to_string(),
        config: BTreeMap::new(),
        enabled: true,
    };
    let serialized = serde_json::to_string(&channel).unwrap();
    assert!(serialized.contains("\"type\":\"webhook\""), "El canal debe serializar 'type'.");
    println!("✅ CONTRACTS: Script phase and channel wire grammar certified.");
}

#[test]
fn certify_wallet_empty_defaults() {
    let snapshot = WalletSnapshot::empty("t1", Utc::now());
    assert_eq!(snapshot.amount, 0.0);
    assert!(snapshot.overdue_at.is_none());
    assert!(snapshot.estimated_overdue_at.is_none());

    // Los opcionales ausentes no deben viajar por el cable.
    let serialized = serde_json::to_string(&snapshot).unwrap();
    assert!(!serialized.contains("overdueAt"), "overdue_at nulo no debe serializarse.");
    println!("✅ CONTRACTS: Empty wallet defaults certified.");
}

#[test]
fn certify_job_status_terminality() {
    assert!(JobStatus::Success.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
    assert!(JobStatus::Cancelled.is_terminal());
    assert!(!JobStatus::Running.is_terminal());

    assert!(JobStatus::Pending.occupies_target());
    assert!(JobStatus::Running.occupies_target());
    assert!(!JobStatus::Failed.occupies_target());
    println!("✅ CONTRACTS: Job status terminality certified.");
}

#[test]
fn certify_team_name_grammar() {
    // Vocabulario vetado del pool.
    for reserved in ["shared", "disabled", "unmanaged", "system", "default", "admin"] {
        assert!(Team::is_reserved_name(reserved), "{} debe estar vetado.", reserved);
    }
    assert!(!Team::is_reserved_name("research"));

    // Gramática DNS-label.
    assert!(Team::is_valid_name("ml-platform-01"));
    assert!(!Team::is_valid_name("Research"));
    assert!(!Team::is_valid_name("-edge"));
    assert!(!Team::is_valid_name("edge-"));
    assert!(!Team::is_valid_name(""));
    println!("✅ CONTRACTS: Team name grammar certified.");
}
