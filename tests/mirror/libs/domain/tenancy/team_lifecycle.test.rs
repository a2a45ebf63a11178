/**
 * =================================================================
 * APARATO: TEAM LIFECYCLE TEST (V1.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar creación, unicidad, cuotas derivadas y cascada.
 * =================================================================
 */

use bison_domain_models::{MemberRole, Project, ProjectMember, Team, TeamMode};
use bison_domain_tenancy::{ProjectService, TeamService, TenancyError};
use bison_infra_cluster::{ClusterControlApi, MemoryCluster, NodeObject, PodObject};
use std::collections::BTreeMap;
use std::sync::Arc;

fn forge_services() -> (Arc<MemoryCluster>, TeamService, ProjectService) {
    let engine = Arc::new(MemoryCluster::new());
    let uplink: Arc<dyn ClusterControlApi> = engine.clone();
    (
        engine.clone(),
        TeamService::new(uplink.clone()),
        ProjectService::new(uplink),
    )
}

fn shared_team(name: &str) -> Team {
    Team {
        name: name.to_string(),
        display_name: name.to_uppercase(),
        mode: TeamMode::Shared,
        ..Team::default()
    }
}

#[tokio::test]
async fn certify_creation_shields() {
    let (_engine, teams, _projects) = forge_services();

    // Vocabulario vetado.
    match teams.create(&shared_team("shared")).await {
        Err(TenancyError::ReservedName(_)) => {}
        other => panic!("Nombre reservado debe rechazarse, llegó {:?}", other.is_ok()),
    }

    // Gramática DNS.
    match teams.create(&shared_team("Bad_Name")).await {
        Err(TenancyError::InvalidName(_)) => {}
        other => panic!("Nombre inválido debe rechazarse, llegó {:?}", other.is_ok()),
    }

    // Exclusivo sin nodos sellados.
    let mut exclusive = shared_team("gpu-lab");
    exclusive.mode = TeamMode::Exclusive;
    match teams.create(&exclusive).await {
        Err(TenancyError::ExclusiveNodesRequired) => {}
        other => panic!("Exclusivo sin nodos debe rechazarse, llegó {:?}", other.is_ok()),
    }

    // Unicidad.
    teams.create(&shared_team("research")).await.unwrap();
    match teams.create(&shared_team("research")).await {
        Err(TenancyError::Conflict) => {}
        other => panic!("Duplicado debe colisionar, llegó {:?}", other.is_ok()),
    }
    println!("✅ TEAM_LIFECYCLE: Creation shields certified.");
}

#[tokio::test]
async fn certify_exclusive_capacity_derivation() {
    let (engine, teams, _projects) = forge_services();

    let mut allocatable = BTreeMap::new();
    allocatable.insert("cpu".to_string(), "8".to_string());
    allocatable.insert("memory".to_string(), "34359738368".to_string()); // 32Gi crudo
    allocatable.insert("nvidia.com/gpu".to_string(), "4".to_string());
    engine.seed_node(NodeObject {
        name: "gpu-01".to_string(),
        allocatable: allocatable.clone(),
        ready: true,
        ..NodeObject::default()
    });
    engine.seed_node(NodeObject {
        name: "gpu-02".to_string(),
        allocatable,
        ready: true,
        ..NodeObject::default()
    });

    let mut team = shared_team("gpu-lab");
    team.mode = TeamMode::Exclusive;
    team.exclusive_nodes = vec!["gpu-01".to_string(), "gpu-02".to_string()];
    teams.create(&team).await.unwrap();

    // La cuota nominal es la capacidad física agregada de los nodos.
    let fetched = teams.get("gpu-lab").await.unwrap();
    assert_eq!(fetched.quota.get("cpu").map(String::as_str), Some("16"));
    assert_eq!(fetched.quota.get("memory").map(String::as_str), Some("64Gi"));
    assert_eq!(fetched.quota.get("nvidia.com/gpu").map(String::as_str), Some("8"));
    println!("✅ TEAM_LIFECYCLE: Exclusive capacity derivation certified.");
}

#[tokio::test]
async fn certify_used_quota_aggregation() {
    let (engine, teams, projects) = forge_services();
    teams.create(&shared_team("research")).await.unwrap();
    projects
        .create(&Project {
            name: "ns-a".to_string(),
            team: "research".to_string(),
            members: vec![ProjectMember { user: "alice".to_string(), role: MemberRole::Admin }],
            ..Project::default()
        })
        .await
        .unwrap();

    let mut running_requests = BTreeMap::new();
    running_requests.insert("cpu".to_string(), "1500m".to_string());
    running_requests.insert("memory".to_string(), "2147483648".to_string()); // 2Gi crudo
    engine.seed_pod(PodObject {
        name: "trainer-0".to_string(),
        namespace: "ns-a".to_string(),
        phase: "Running".to_string(),
        owner_references: vec!["trainer".to_string()],
        requests: running_requests,
    });

    // Un pod pendiente no suma al consumo.
    let mut pending_requests = BTreeMap::new();
    pending_requests.insert("cpu".to_string(), "8".to_string());
    engine.seed_pod(PodObject {
        name: "queued-0".to_string(),
        namespace: "ns-a".to_string(),
        phase: "Pending".to_string(),
        owner_references: vec!["trainer".to_string()],
        requests: pending_requests,
    });

    let fetched = teams.get("research").await.unwrap();
    assert_eq!(fetched.used_quota.get("cpu").map(String::as_str), Some("1.5"));
    assert_eq!(fetched.used_quota.get("memory").map(String::as_str), Some("2Gi"));
    println!("✅ TEAM_LIFECYCLE: Used quota aggregation certified.");
}

#[tokio::test]
async fn certify_member_governance_and_cascade() {
    let (_engine, teams, projects) = forge_services();
    teams.create(&shared_team("research")).await.unwrap();

    // Miembro duplicado en la creación: conflicto de ingreso.
    let duplicated = Project {
        name: "ns-dup".to_string(),
        team: "research".to_string(),
        members: vec![
            ProjectMember { user: "alice".to_string(), role: MemberRole::Admin },
            ProjectMember { user: "alice".to_string(), role: MemberRole::View },
        ],
        ..Project::default()
    };
    match projects.create(&duplicated).await {
        Err(TenancyError::DuplicateMember(_)) => {}
        other => panic!("Miembro duplicado debe rechazarse, llegó {:?}", other.is_ok()),
    }

    // Proyecto sano bajo el equipo; el borrado del equipo cascada.
    projects
        .create(&Project {
            name: "ns-a".to_string(),
            team: "research".to_string(),
            ..Project::default()
        })
        .await
        .unwrap();
    assert_eq!(projects.list(Some("research")).await.unwrap().len(), 1);

    teams.delete("research").await.unwrap();
    assert!(projects.list(Some("research")).await.unwrap().is_empty());
    println!("✅ TEAM_LIFECYCLE: Member governance and cascade certified.");
}
