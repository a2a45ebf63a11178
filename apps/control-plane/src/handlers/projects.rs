// [apps/control-plane/src/handlers/projects.rs]
/*!
 * =================================================================
 * APARATO: PROJECT ADMINISTRATION HANDLER (V2.1 - GOLD MASTER)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: CICLO DE VIDA DE PROYECTOS Y MEMBRESÍAS
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
use bison_domain_models::{Project, ProjectMember};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    #[serde(default)]
    pub team: Option<String>,
}

pub struct ProjectAdministrationHandler;

impl ProjectAdministrationHandler {
    /// Endpoint: GET /api/v1/projects[?team=]
    pub async fn handle_list_projects(
        State(application_state): State<AppState>,
        Query(query): Query<ProjectListQuery>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(
            application_state
                .project_service
                .list(query.team.as_deref())
                .await?,
        ))
    }

    /// Endpoint: GET /api/v1/projects/:name
    pub async fn handle_get_project(
        State(application_state): State<AppState>,
        Path(project_name): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        Ok(Json(application_state.project_service.get(&project_name).await?))
    }

    /// Endpoint: POST /api/v1/projects
    pub async fn handle_create_project(
        State(application_state): State<AppState>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(project): Json<Project>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.project_service.create(&project).await?;

        let mut detail = BTreeMap::new();
        detail.insert("team".to_string(), project.team.clone());
        application_state
            .audit_trail
            .record(&identity.operator, "create", "project", &project.name, detail)
            .await;
        Ok((StatusCode::CREATED, Json(project)))
    }

    /// Endpoint: PUT /api/v1/projects/:name/members
    pub async fn handle_update_members(
        State(application_state): State<AppState>,
        Path(project_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
        Json(members): Json<Vec<ProjectMember>>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state
            .project_service
            .update_members(&project_name, &members)
            .await?;
        application_state
            .audit_trail
            .record(&identity.operator, "update-members", "project", &project_name, BTreeMap::new())
            .await;
        Ok(Json(members))
    }

    /// Endpoint: DELETE /api/v1/projects/:name
    pub async fn handle_delete_project(
        State(application_state): State<AppState>,
        Path(project_name): Path<String>,
        Extension(identity): Extension<OperatorIdentity>,
    ) -> Result<impl IntoResponse, ApiError> {
        application_state.project_service.delete(&project_name).await?;
        application_state
            .audit_trail
            .record(&identity.operator, "delete", "project", &project_name, BTreeMap::new())
            .await;
        Ok(StatusCode::NO_CONTENT)
    }
}
