// [apps/control-plane/src/handlers/teams.rs]
/*!
 * =================================================================
 * APARATO: TEAM ADMINISTRATION HANDLER (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: CICLO DE VIDA DE EQUIPOS, BILLETERA Y RECARGAS
 * =================================================================
 */

use crate::errors::ApiError;
use crate::middleware::OperatorIdentity;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bison_domain_models::{AutoRechargePlan, RechargeCadence, Team};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct RechargePayload {
    pub amount: f64,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    100
}

pub struct TeamAdministrationHandler;

impl TeamAdministrationHandler {
    /// Endpoint: GET /api/v1/teams
    pub async fn handle_list_teams(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.team_service.list().await?))
    }

    /// Endpoint: GET /api/v1/teams/:name
    pub async fn handle_get_team(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.team_service.get(&team_name).await?))
    }

    /// Endpoint: POST /api/v1/teams
    pub async fn handle_create_team(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(team): Json<Team>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.team_service.create(&team).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "create", "team", &team.name, BTreeMap::new())
            .await;
        Ok((StatusCode::CREATED, Json(team)))
    }

    /// Endpoint: PUT /api/v1/teams/:name
    pub async fn handle_update_team(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(mut team): Json<Team>,
    ) -> Result<impl IntoResponse, ApiError> {
        // El nombre de la ruta manda sobre el del payload.
        team.name = team_name.clone();
        application_state.team_service.update(&team).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "update", "team", &team_name, BTreeMap::new())
            .await;
        Ok(Json(team))
    }

    /// Endpoint: DELETE /api/v1/teams/:name
    pub async fn handle_delete_team(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.team_service.delete(&team_name).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "delete", "team", &team_name, BTreeMap::new())
            .await;
        Ok(StatusCode::NO_CONTENT)
    }

    // --- BILLETERA ---

    /// Endpoint: GET /api/v1/teams/:name/balance
    pub async fn handle_get_balance(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.wallet_service.get(&team_name).await?))
    }

    /// Endpoint: POST /api/v1/teams/:name/recharge
    pub async fn handle_recharge(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(payload): Json<RechargePayload>,
    ) -> Result<impl IntoResponse, ApiError> {
        let snapshot = application_state
            .wallet_service
            .recharge(&team_name, payload.amount, &identity.operator, &payload.reason)
            .await?;

        let mut detail = BTreeMap::new();
        detail.insert("amount".to_string(), format!("{:.2}", payload.amount));
        application_state
            .audit_trail
            .record(&identity.operator, "recharge", "wallet", &team_name, detail)
            .await;
        Ok(Json(snapshot))
    }

    /// Endpoint: GET /api/v1/teams/:name/history
    pub async fn handle_history(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
        Query(query): Query<HistoryQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(
            application_state
                .wallet_service
                .history(&team_name, query.limit)
                .await?,
        ))
    }

    // --- RECARGA PROGRAMADA ---

    /// Endpoint: GET /api/v1/teams/:name/auto-recharge
    pub async fn handle_get_auto_recharge(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        let plan = application_state
            .recharge_scheduler
            .get_plan(&team_name)
            .await?
            .unwrap_or(AutoRechargePlan {
                enabled: false,
                amount: 0.0,
                cadence: RechargeCadence::Monthly,
                day: 1,
                next_fire: None,
                last_fire: None,
            });
        Ok(Json(plan))
    }

    /// Endpoint: PUT /api/v1/teams/:name/auto-recharge
    pub async fn handle_put_auto_recharge(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(plan): Json<AutoRechargePlan>,
    ) -> Result<impl IntoResponse, ApiError> {
        let sealed_plan = application_state
            .recharge_scheduler
            .set_plan(&team_name, plan)
            .await?;
        application_state
            .audit_trail
            .record(&identity.operator, "update", "auto-recharge", &team_name, BTreeMap::new())
            .await;
        Ok(Json(sealed_plan))
    }

    // --- TRANSICIONES FORZADAS ---

    /// Endpoint: POST /api/v1/teams/:name/suspend
    pub async fn handle_suspend(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.team_service.get(&team_name).await?;
        application_state.suspension_control.suspend(&team_name).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "suspend", "team", &team_name, BTreeMap::new())
            .await;
        Ok(Json(json!({ "suspended": true })))
    }

    /// Endpoint: POST /api/v1/teams/:name/resume
    pub async fn handle_resume(
        State(application_state): State<AppState>,
        Path(team_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.team_service.get(&team_name).await?;
        application_state.suspension_control.resume(&team_name).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "resume", "team", &team_name, BTreeMap::new())
            .await;
        Ok(Json(json!({ "suspended": false })))
    }
}
