// [apps/control-plane/src/middleware.rs]
/*!
 * =================================================================
 * APARATO: GALVANIC AUTHENTICATION GUARD (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: SECURITY STRATUM (ESTRATO L4)
 * RESPONSABILIDAD: VALIDACIÓN DE TOKENS E INYECCIÓN DE IDENTIDAD
 *
 * # Logic:
 * El guardia protege el árbol /api/v1 completo; /auth/login y /health
 * viven fuera del escudo. El operador verificado viaja como extensión
 * para el rastro de auditoría de los estratos L2/L4.
 * =================================================================
 */

use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// Identidad soberana extraída del túnel de seguridad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorIdentity {
    pub operator: String,
}

/**
 * Guardia de autenticación: todo /api/v1 exige un bearer vigente.
 */
pub async fn auth_guard(
    State(application_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer_token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    let Some(bearer_token) = bearer_token else {
        return unauthorized("missing bearer token");
    };

    match application_state.token_vault.verify(&bearer_token) {
        Some(operator) => {
            request.extensions_mut().insert(OperatorIdentity { operator });
            next.run(request).await
        }
        None => unauthorized("invalid or expired token"),
    }
}

fn unauthorized(reason: &str) -> Response {
    warn!("⛔ [AUTH_GUARD]: Access denied: {}", reason);
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "authentication required" })),
    )
        .into_response()
}
