// [apps/control-plane/src/handlers/status.rs]
/*!
 * =================================================================
 * APARATO: STATUS & FORENSICS HANDLER (V2.0 - SOBERANO)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: INSTANTÁNEA DE SALUD, HISTORIAL DE ALERTAS Y AUDIT
 * =================================================================
 */

use crate::errors::ApiError;
use crate::observability::assemble_snapshot;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

pub struct StatusHandler;

impl StatusHandler {
    /// Endpoint: GET /api/v1/status
    pub async fn handle_status(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(assemble_snapshot(&application_state).await))
    }

    /// Endpoint: GET /api/v1/alerts/history
    pub async fn handle_alert_history(
        State(application_state): State<AppState>,
        Query(query): Query<LimitQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(
            application_state.alert_evaluator.history(query.limit).await?,
        ))
    }

    /// Endpoint: GET /api/v1/audit
    pub async fn handle_audit_log(
        State(application_state): State<AppState>,
        Query(query): Query<LimitQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.audit_trail.recent(query.limit).await))
    }
}
