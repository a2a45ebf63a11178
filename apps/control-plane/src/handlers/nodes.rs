// [apps/control-plane/src/handlers/nodes.rs]
/*!
 * =================================================================
 * APARATO: NODE POOL & ONBOARDING HANDLER (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: TRANSICIONES DEL POOL E INCORPORACIÓN REMOTA
 * =================================================================
 */

use crate::errors::ApiError;
use crate::middleware::OperatorIdentity;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bison_domain_onboarding::OnboardRequest;
use bison_domain_tenancy::node_pools::{classify, NodePoolState};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AssignPayload {
    pub team: String,
}

/// Vista plana de un nodo para el Dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub name: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub ready: bool,
    pub internal_ip: String,
    pub allocatable: BTreeMap<String, String>,
}

pub struct NodePoolHandler;

impl NodePoolHandler {
    /// Endpoint: GET /api/v1/nodes
    pub async fn handle_list_nodes(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        let views: Vec<NodeView> = application_state
            .cluster_uplink
            .list_nodes()
            .await?
            .into_iter()
            .map(|node| {
                let (state_label, owning_team) = match classify(&node) {
                    NodePoolState::Unmanaged => ("unmanaged", None),
                    NodePoolState::Disabled => ("disabled", None),
                    NodePoolState::Shared => ("shared", None),
                    NodePoolState::Exclusive(team) => ("exclusive", Some(team)),
                };
                NodeView {
                    name: node.name,
                    state: state_label.to_string(),
                    team: owning_team,
                    ready: node.ready,
                    internal_ip: node.internal_ip,
                    allocatable: node.allocatable,
                }
            })
            .collect();
        Ok(Json(views))
    }

    /// Endpoint: POST /api/v1/nodes/:name/enable
    pub async fn handle_enable(
        State(application_state): State<AppState>,
        Path(node_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.node_pools.enable(&node_name).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "enable", "node", &node_name, BTreeMap::new())
            .await;
        Ok(Json(json!({ "state": "shared" })))
    }

    /// Endpoint: POST /api/v1/nodes/:name/disable
    pub async fn handle_disable(
        State(application_state): State<AppState>,
        Path(node_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.node_pools.disable(&node_name).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "disable", "node", &node_name, BTreeMap::new())
            .await;
        Ok(Json(json!({ "state": "disabled" })))
    }

    /// Endpoint: POST /api/v1/nodes/:name/assign
    pub async fn handle_assign(
        State(application_state): State<AppState>,
        Path(node_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(payload): Json<AssignPayload>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state
            .node_pools
            .assign(&node_name, &payload.team)
            .await?;

        let mut detail = BTreeMap::new();
        detail.insert("team".to_string(), payload.team.clone());
        application_state
            .audit_trail
            .record(&identity.operator, "assign", "node", &node_name, detail)
            .await;
        Ok(Json(json!({ "state": "exclusive", "team": payload.team })))
    }

    /// Endpoint: POST /api/v1/nodes/:name/release
    pub async fn handle_release(
        State(application_state): State<AppState>,
        Path(node_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.node_pools.release(&node_name).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "release", "node", &node_name, BTreeMap::new())
            .await;
        Ok(Json(json!({ "state": "shared" })))
    }
}

pub struct OnboardingHandler;

impl OnboardingHandler {
    /// Endpoint: POST /api/v1/nodes/onboard (aceptación asíncrona)
    pub async fn handle_start(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(request): Json<OnboardRequest>,
    ) -> Result<impl IntoResponse, ApiError> {
        let target_ip = request.ip.clone();
        let job = Arc::clone(&application_state.onboarding).start(request).await?;

        let mut detail = BTreeMap::new();
        detail.insert("jobId".to_string(), job.id.clone());
        application_state
            .audit_trail
            .record(&identity.operator, "onboard", "node", &target_ip, detail)
            .await;
        Ok((StatusCode::ACCEPTED, Json(job)))
    }

    /// Endpoint: GET /api/v1/nodes/onboard
    pub async fn handle_list_jobs(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.onboarding.list_jobs().await?))
    }

    /// Endpoint: GET /api/v1/nodes/onboard/:id
    pub async fn handle_get_job(
        State(application_state): State<AppState>,
        Path(job_id): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.onboarding.get_job(&job_id).await?))
    }

    /// Endpoint: DELETE /api/v1/nodes/onboard/:id (cancelación)
    pub async fn handle_cancel_job(
        State(application_state): State<AppState>,
        Path(job_id): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        let cancelled = application_state.onboarding.cancel(&job_id).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "cancel", "onboarding-job", &job_id, BTreeMap::new())
            .await;
        Ok(Json(cancelled))
    }
}
