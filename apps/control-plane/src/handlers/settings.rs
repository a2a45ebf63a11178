// [apps/control-plane/src/handlers/settings.rs]
/*!
 * =================================================================
 * APARATO: SETTINGS ADMINISTRATION HANDLER (V3.1 - GOLD MASTER)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: BLOBS DE CONFIGURACIÓN Y CATÁLOGO DE SCRIPTS
 *
 * # Invariante:
 * Las credenciales del plano de control se leen siempre censuradas;
 * un PUT con centinelas preserva los secretos vivos.
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
use bison_domain_models::{
    BillingConfig, ControlPlaneSshConfig, ResourceDefinition, ScriptGroup, AlertConfig,
};
use bison_infra_cluster::names;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Heurística de valor censurado en un PUT entrante.
fn is_masked(candidate: &str) -> bool {
    candidate == bison_domain_models::REDACTED_SENTINEL || candidate.contains("***")
}

#[derive(Debug, Deserialize)]
pub struct TogglePayload {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReorderPayload {
    pub ids: Vec<String>,
}

pub struct SettingsHandler;

impl SettingsHandler {
    // --- FACTURACIÓN ---

    /// Endpoint: GET /api/v1/settings/billing
    pub async fn handle_get_billing(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.billing_engine.load_config().await?))
    }

    /// Endpoint: PUT /api/v1/settings/billing
    pub async fn handle_put_billing(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(config): Json<BillingConfig>,
    ) -> Result<impl IntoResponse, ApiError> {
        config
            .validate()
            .map_err(|violation| ApiError::BadRequest(violation.to_string()))?;
        application_state
            .vault
            .write_document(names::BILLING_CONFIG, names::SINGLETON_KEY, &config)
            .await?;
        application_state
            .audit_trail
            .record(&identity.operator, "update", "settings", "billing", BTreeMap::new())
            .await;
        Ok(Json(config))
    }

    // --- ALERTAS ---

    /// Endpoint: GET /api/v1/settings/alerts
    pub async fn handle_get_alerts(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.alert_evaluator.load_config().await?))
    }

    /// Endpoint: PUT /api/v1/settings/alerts
    pub async fn handle_put_alerts(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(config): Json<AlertConfig>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.alert_evaluator.save_config(&config).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "update", "settings", "alerts", BTreeMap::new())
            .await;
        Ok(Json(config))
    }

    /// Endpoint: POST /api/v1/settings/alerts/channels/:id/test
    pub async fn handle_test_channel(
        State(application_state): State<AppState>,
        Path(channel_id): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(
            application_state.alert_evaluator.emit_test(&channel_id).await?,
        ))
    }

    // --- RECURSOS ---

    /// Endpoint: GET /api/v1/settings/resources
    pub async fn handle_get_resources(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        let catalog = application_state
            .vault
            .read_document::<Vec<ResourceDefinition>>(names::RESOURCE_CONFIG, "resources")
            .await?
            .unwrap_or_else(bison_domain_models::resource::default_resource_catalog);
        Ok(Json(catalog))
    }

    /// Endpoint: PUT /api/v1/settings/resources
    pub async fn handle_put_resources(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(catalog): Json<Vec<ResourceDefinition>>,
    ) -> Result<impl IntoResponse, ApiError> {
        for definition in &catalog {
            if definition.divisor <= 0.0 {
                return Err(ApiError::BadRequest(format!(
                    "resource {} divisor must be positive",
                    definition.name
                )));
            }
        }
        application_state
            .vault
            .write_document(names::RESOURCE_CONFIG, "resources", &catalog)
            .await?;
        application_state
            .audit_trail
            .record(&identity.operator, "update", "settings", "resources", BTreeMap::new())
            .await;
        Ok(Json(catalog))
    }

    // --- PLANO DE CONTROL (SSH) ---

    /// Endpoint: GET /api/v1/settings/control-plane (siempre censurado)
    pub async fn handle_get_control_plane(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        let config = application_state
            .vault
            .read_document::<ControlPlaneSshConfig>(names::CONTROL_PLANE_CONFIG, names::SINGLETON_KEY)
            .await?
            .unwrap_or_default();
        Ok(Json(config.redacted()))
    }

    /// Endpoint: PUT /api/v1/settings/control-plane
    pub async fn handle_put_control_plane(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(mut config): Json<ControlPlaneSshConfig>,
    ) -> Result<impl IntoResponse, ApiError> {
        if config.host.trim().is_empty() {
            return Err(ApiError::BadRequest("control plane host required".to_string()));
        }

        // Centinelas entrantes preservan los secretos vivos.
        let live = application_state
            .vault
            .read_document::<ControlPlaneSshConfig>(names::CONTROL_PLANE_CONFIG, names::SINGLETON_KEY)
            .await?
            .unwrap_or_default();
        if is_masked(&config.password) {
            config.password = live.password;
        }
        if is_masked(&config.private_key) {
            config.private_key = live.private_key;
        }

        application_state
            .vault
            .write_document(names::CONTROL_PLANE_CONFIG, names::SINGLETON_KEY, &config)
            .await?;
        application_state
            .audit_trail
            .record(&identity.operator, "update", "settings", "control-plane", BTreeMap::new())
            .await;
        Ok(Json(config.redacted()))
    }

    // --- CATÁLOGO DE SCRIPTS ---

    /// Endpoint: GET /api/v1/settings/init-scripts
    pub async fn handle_list_scripts(
        State(application_state): State<AppState>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.script_catalog.list().await?))
    }

    /// Endpoint: POST /api/v1/settings/init-scripts
    pub async fn handle_create_script_group(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(group): Json<ScriptGroup>,
    ) -> Result<impl IntoResponse, ApiError> {
        let created = application_state.script_catalog.create(group).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "create", "script-group", &created.name, BTreeMap::new())
            .await;
        Ok((StatusCode::CREATED, Json(created)))
    }

    /// Endpoint: PUT /api/v1/settings/init-scripts/:id
    pub async fn handle_update_script_group(
        State(application_state): State<AppState>,
        Path(group_id): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(mut group): Json<ScriptGroup>,
    ) -> Result<impl IntoResponse, ApiError> {
        group.id = group_id.clone();
        let updated = application_state.script_catalog.update(group).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "update", "script-group", &group_id, BTreeMap::new())
            .await;
        Ok(Json(updated))
    }

    /// Endpoint: DELETE /api/v1/settings/init-scripts/:id
    pub async fn handle_delete_script_group(
        State(application_state): State<AppState>,
        Path(group_id): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.script_catalog.delete(&group_id).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "delete", "script-group", &group_id, BTreeMap::new())
            .await;
        Ok(StatusCode::NO_CONTENT)
    }

    /// Endpoint: POST /api/v1/settings/init-scripts/:id/toggle
    pub async fn handle_toggle_script_group(
        State(application_state): State<AppState>,
        Path(group_id): Path<String>,
        Json(payload): Json<TogglePayload>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state
            .script_catalog
            .toggle(&group_id, payload.enabled)
            .await?;
        Ok(Json(serde_json::json!({ "enabled": payload.enabled })))
    }

    /// Endpoint: POST /api/v1/settings/init-scripts/reorder
    pub async fn handle_reorder_script_groups(
        State(application_state): State<AppState>,
        Json(payload): Json<ReorderPayload>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.script_catalog.reorder(&payload.ids).await?;
        Ok(Json(application_state.script_catalog.list().await?))
    }
}
