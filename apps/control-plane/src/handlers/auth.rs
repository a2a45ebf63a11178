// [apps/control-plane/src/handlers/auth.rs]
/*!
 * =================================================================
 * APARATO: AUTH EXCHANGE HANDLER (V2.0 - SOBERANO)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: INTERCAMBIO DE CREDENCIALES FIJAS POR BEARER
 * =================================================================
 */

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

pub struct AuthHandler;

impl AuthHandler {
    /// Endpoint: POST /auth/login
    pub async fn handle_login(
        State(application_state): State<AppState>,
        Json(payload): Json<LoginPayload>,
    ) -> impl IntoResponse {
        match application_state
            .token_vault
            .login(&payload.username, &payload.password)
        {
            Some((bearer_token, ttl_seconds)) => (
                StatusCode::OK,
                Json(json!({ "token": bearer_token, "expiresIn": ttl_seconds })),
            )
                .into_response(),
            None => {
                warn!("🔑 [AUTH_LOGIN]: Credential rejection for [{}].", payload.username);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "invalid credentials" })),
                )
                    .into_response()
            }
        }
    }
}
