// [apps/control-plane/src/handlers/costs.rs]
/*!
 * =================================================================
 * APARATO: COST REPORTING HANDLER (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: REPORTES DE USO Y COSTO SOBRE EL ORÁCULO
 *
 * # Invariante:
 * Un oráculo ausente degrada a reportes vacíos; la superficie jamás
 * expone un Option hacia el Dashboard.
 * =================================================================
 */

use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    #[serde(default = "default_window")]
    pub window: String,
}

fn default_window() -> String {
    "24h".to_string()
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    #[serde(default = "default_trend_window")]
    pub window: String,
}

fn default_trend_window() -> String {
    "7d".to_string()
}

pub struct CostReportingHandler;

impl CostReportingHandler {
    /// Endpoint: GET /api/v1/costs/namespaces
    pub async fn handle_usage_by_namespace(
        State(application_state): State<AppState>,
        Query(query): Query<WindowQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(
            application_state
                .cost_oracle
                .usage_by_namespace(&query.window)
                .await?,
        ))
    }

    /// Endpoint: GET /api/v1/costs/users
    pub async fn handle_usage_by_user(
        State(application_state): State<AppState>,
        Query(query): Query<WindowQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(
            application_state.cost_oracle.usage_by_user(&query.window).await?,
        ))
    }

    /// Endpoint: GET /api/v1/costs/namespaces/:name
    pub async fn handle_namespace_allocation(
        State(application_state): State<AppState>,
        Path(namespace): Path<String>,
        Query(query): Query<WindowQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(
            application_state
                .cost_oracle
                .allocation_for_namespace(&query.window, &namespace)
                .await?,
        ))
    }

    /// Endpoint: GET /api/v1/costs/total
    pub async fn handle_total_cost(
        State(application_state): State<AppState>,
        Query(query): Query<WindowQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        let total = application_state.cost_oracle.total_cost(&query.window).await?;
        Ok(Json(json!({ "window": query.window, "totalCost": total })))
    }

    /// Endpoint: GET /api/v1/costs/trend
    pub async fn handle_cost_trend(
        State(application_state): State<AppState>,
        Query(query): Query<TrendQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(
            application_state.cost_oracle.cost_trend(&query.window).await?,
        ))
    }
}
