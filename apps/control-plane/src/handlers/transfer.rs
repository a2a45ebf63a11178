// [apps/control-plane/src/handlers/transfer.rs]
/*!
 * =================================================================
 * APARATO: CONFIG TRANSFER HANDLER (V2.0 - GOLD MASTER)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: EXPORT / PREVIEW / APPLY SOBRE HTTP
 * =================================================================
 */

use crate::errors::ApiError;
use crate::middleware::OperatorIdentity;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Extension, Json};
use bison_domain_models::ExportEnvelope;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub sections: Vec<String>,
    #[serde(default)]
    pub include_sensitive: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPayload {
    pub envelope: ExportEnvelope,
    pub sections: Vec<String>,
    #[serde(default)]
    pub preserve_sensitive: bool,
}

pub struct TransferHandler;

impl TransferHandler {
    /// Endpoint: POST /api/v1/settings/export
    pub async fn handle_export(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(payload): Json<ExportPayload>,
    ) -> Result<impl IntoResponse, ApiError> {
        let envelope = application_state
            .config_transfer
            .export(&payload.sections, payload.include_sensitive, &identity.operator)
            .await?;

        let mut detail = BTreeMap::new();
        detail.insert("sections".to_string(), payload.sections.join(","));
        application_state
            .audit_trail
            .record(&identity.operator, "export", "settings", "envelope", detail)
            .await;
        Ok(Json(envelope))
    }

    /// Endpoint: POST /api/v1/settings/import/preview
    pub async fn handle_preview(
        State(application_state): State<AppState>,
        Json(envelope): Json<ExportEnvelope>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.config_transfer.preview(&envelope).await?))
    }

    /// Endpoint: POST /api/v1/settings/import/apply
    pub async fn handle_apply(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(payload): Json<ApplyPayload>,
    ) -> Result<impl IntoResponse, ApiError> {
        let outcome = application_state
            .config_transfer
            .apply(&payload.envelope, &payload.sections, payload.preserve_sensitive)
            .await?;

        let mut detail = BTreeMap::new();
        detail.insert("applied".to_string(), outcome.applied.join(","));
        detail.insert("skipped".to_string(), outcome.skipped.join(","));
        application_state
            .audit_trail
            .record(&identity.operator, "import", "settings", "envelope", detail)
            .await;
        Ok(Json(outcome))
    }
}
