// [apps/control-plane/src/routes.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN ROUTING MATRIX (V4.0 - GOLD MASTER)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: TOPOLOGÍA HTTP COMPLETA DEL PLANO DE CONTROL
 *
 * VISION HIPER-HOLÍSTICA:
 * La topología expone tres anillos: el anillo público (/auth/login,
 * /health), el anillo administrativo protegido (/api/v1) y el escudo
 * CORS perimetral para el Dashboard.
 * =================================================================
 */

use crate::handlers::{
    auth::AuthHandler, costs::CostReportingHandler, nodes::NodePoolHandler,
    nodes::OnboardingHandler, projects::ProjectAdministrationHandler, settings::SettingsHandler,
    status::StatusHandler, teams::TeamAdministrationHandler, transfer::TransferHandler,
};
use crate::middleware::auth_guard;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub fn create_sovereign_router(application_shared_state: AppState) -> Router {
    // Escudo de Red: CORS para el Dashboard y herramientas de Ops.
    let network_security_shield = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    // ESTRATO DE TENENCIA: equipos, billetera y recargas.
    let team_stratum = Router::new()
        .route(
            "/teams",
            get(TeamAdministrationHandler::handle_list_teams)
                .post(TeamAdministrationHandler::handle_create_team),
        )
        .route(
            "/teams/:name",
            get(TeamAdministrationHandler::handle_get_team)
                .put(TeamAdministrationHandler::handle_update_team)
                .delete(TeamAdministrationHandler::handle_delete_team),
        )
        .route("/teams/:name/balance", get(TeamAdministrationHandler::handle_get_balance))
        .route("/teams/:name/recharge", post(TeamAdministrationHandler::handle_recharge))
        .route("/teams/:name/history", get(TeamAdministrationHandler::handle_history))
        .route(
            "/teams/:name/auto-recharge",
            get(TeamAdministrationHandler::handle_get_auto_recharge)
                .put(TeamAdministrationHandler::handle_put_auto_recharge),
        )
        .route("/teams/:name/suspend", post(TeamAdministrationHandler::handle_suspend))
        .route("/teams/:name/resume", post(TeamAdministrationHandler::handle_resume));

    // ESTRATO DE PROYECTOS.
    let project_stratum = Router::new()
        .route(
            "/projects",
            get(ProjectAdministrationHandler::handle_list_projects)
                .post(ProjectAdministrationHandler::handle_create_project),
        )
        .route(
            "/projects/:name",
            get(ProjectAdministrationHandler::handle_get_project)
                .delete(ProjectAdministrationHandler::handle_delete_project),
        )
        .route(
            "/projects/:name/members",
            put(ProjectAdministrationHandler::handle_update_members),
        );

    // ESTRATO DE NODOS: pool e incorporación remota.
    let node_stratum = Router::new()
        .route("/nodes", get(NodePoolHandler::handle_list_nodes))
        .route(
            "/nodes/onboard",
            post(OnboardingHandler::handle_start).get(OnboardingHandler::handle_list_jobs),
        )
        .route(
            "/nodes/onboard/:id",
            get(OnboardingHandler::handle_get_job).delete(OnboardingHandler::handle_cancel_job),
        )
        .route("/nodes/:name/enable", post(NodePoolHandler::handle_enable))
        .route("/nodes/:name/disable", post(NodePoolHandler::handle_disable))
        .route("/nodes/:name/assign", post(NodePoolHandler::handle_assign))
        .route("/nodes/:name/release", post(NodePoolHandler::handle_release));

    // ESTRATO DE CONFIGURACIÓN Y TRANSFERENCIA.
    let settings_stratum = Router::new()
        .route(
            "/settings/billing",
            get(SettingsHandler::handle_get_billing).put(SettingsHandler::handle_put_billing),
        )
        .route(
            "/settings/alerts",
            get(SettingsHandler::handle_get_alerts).put(SettingsHandler::handle_put_alerts),
        )
        .route(
            "/settings/alerts/channels/:id/test",
            post(SettingsHandler::handle_test_channel),
        )
        .route(
            "/settings/resources",
            get(SettingsHandler::handle_get_resources).put(SettingsHandler::handle_put_resources),
        )
        .route(
            "/settings/control-plane",
            get(SettingsHandler::handle_get_control_plane)
                .put(SettingsHandler::handle_put_control_plane),
        )
        .route(
            "/settings/init-scripts",
            get(SettingsHandler::handle_list_scripts)
                .post(SettingsHandler::handle_create_script_group),
        )
        .route(
            "/settings/init-scripts/reorder",
            post(SettingsHandler::handle_reorder_script_groups),
        )
        .route(
            "/settings/init-scripts/:id",
            put(SettingsHandler::handle_update_script_group)
                .delete(SettingsHandler::handle_delete_script_group),
        )
        .route(
            "/settings/init-scripts/:id/toggle",
            post(SettingsHandler::handle_toggle_script_group),
        )
        .route("/settings/export", post(TransferHandler::handle_export))
        .route("/settings/import/preview", post(TransferHandler::handle_preview))
        .route("/settings/import/apply", post(TransferHandler::handle_apply));

    // ESTRATO DE REPORTES Y OBSERVABILIDAD.
    let reporting_stratum = Router::new()
        .route("/costs/namespaces", get(CostReportingHandler::handle_usage_by_namespace))
        .route("/costs/namespaces/:name", get(CostReportingHandler::handle_namespace_allocation))
        .route("/costs/users", get(CostReportingHandler::handle_usage_by_user))
        .route("/costs/total", get(CostReportingHandler::handle_total_cost))
        .route("/costs/trend", get(CostReportingHandler::handle_cost_trend))
        .route("/alerts/history", get(StatusHandler::handle_alert_history))
        .route("/audit", get(StatusHandler::handle_audit_log))
        .route("/status", get(StatusHandler::handle_status));

    // COMPOSICIÓN GLOBAL (Root Topology).
    Router::new()
        .route("/health", get(|| async { "STATUS_OK" }))
        .route("/auth/login", post(AuthHandler::handle_login))
        .nest(
            "/api/v1",
            Router::new()
                .merge(team_stratum)
                .merge(project_stratum)
                .merge(node_stratum)
                .merge(settings_stratum)
                .merge(reporting_stratum)
                .layer(middleware::from_fn_with_state(
                    application_shared_state.clone(),
                    auth_guard,
                )),
        )
        .layer(network_security_shield)
        .with_state(application_shared_state)
}
