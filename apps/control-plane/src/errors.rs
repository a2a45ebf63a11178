// [apps/control-plane/src/errors.rs]
/*!
 * =================================================================
 * APARATO: API ERROR SURFACE (V2.2 - GOLD MASTER)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: TRADUCCIÓN SEMÁNTICA DOMINIO -> HTTP
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STABLE MAPPING: input-invalid/precondition -> 400, auth -> 401,
 *    not-found -> 404, conflict -> 409, upstream -> 502, resto -> 500.
 * 2. NO LEAKAGE: El detalle interno viaja al log; el cliente recibe el
 *    mensaje semántico del catálogo.
 * =================================================================
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bison_domain_alerting::AlertError;
use bison_domain_billing::BillingError;
use bison_domain_onboarding::OnboardError;
use bison_domain_tenancy::TenancyError;
use bison_domain_transfer::TransferError;
use bison_domain_wallet::WalletError;
use bison_infra_cluster::ClusterError;
use bison_infra_cost_oracle::OracleError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    NotFound,
    Conflict(String),
    Upstream(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "authentication required".into()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "resource not found".into()),
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, detail),
            ApiError::Upstream(detail) => (StatusCode::BAD_GATEWAY, detail),
            ApiError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ClusterError> for ApiError {
    fn from(fault: ClusterError) -> Self {
        match fault {
            ClusterError::NotFound => ApiError::NotFound,
            ClusterError::Conflict => ApiError::Conflict("write conflict".to_string()),
            ClusterError::Precondition(detail) => ApiError::BadRequest(detail),
            ClusterError::Transport(detail) => ApiError::Upstream(detail),
            ClusterError::Serialization(detail) => ApiError::Internal(detail.to_string()),
            ClusterError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<TenancyError> for ApiError {
    fn from(fault: TenancyError) -> Self {
        match fault {
            TenancyError::ReservedName(_)
            | TenancyError::InvalidName(_)
            | TenancyError::ExclusiveNodesRequired
            | TenancyError::DuplicateMember(_)
            | TenancyError::Precondition(_) => ApiError::BadRequest(fault.to_string()),
            TenancyError::NotFound => ApiError::NotFound,
            TenancyError::Conflict => ApiError::Conflict("already exists".to_string()),
            TenancyError::Store(store_fault) => store_fault.into(),
            TenancyError::Serialization(detail) => ApiError::Internal(detail.to_string()),
        }
    }
}

impl From<WalletError> for ApiError {
    fn from(fault: WalletError) -> Self {
        match fault {
            WalletError::NonPositiveAmount(_) => ApiError::BadRequest(fault.to_string()),
            WalletError::Store(store_fault) => store_fault.into(),
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(fault: BillingError) -> Self {
        match fault {
            BillingError::Precondition(_) | BillingError::InvalidPlan(_) => {
                ApiError::BadRequest(fault.to_string())
            }
            BillingError::Store(store_fault) => store_fault.into(),
            BillingError::Wallet(wallet_fault) => wallet_fault.into(),
            BillingError::Tenancy(tenancy_fault) => tenancy_fault.into(),
            BillingError::Oracle(oracle_fault) => oracle_fault.into(),
        }
    }
}

impl From<AlertError> for ApiError {
    fn from(fault: AlertError) -> Self {
        match fault {
            AlertError::InvalidThreshold(_) => ApiError::BadRequest(fault.to_string()),
            AlertError::ChannelNotFound(_) => ApiError::NotFound,
            AlertError::Delivery(detail) => ApiError::Upstream(detail),
            AlertError::Store(store_fault) => store_fault.into(),
            AlertError::Wallet(wallet_fault) => wallet_fault.into(),
        }
    }
}

impl From<OnboardError> for ApiError {
    fn from(fault: OnboardError) -> Self {
        match fault {
            OnboardError::InvalidRequest(_)
            | OnboardError::AlreadyRunning(_)
            | OnboardError::BuiltInProtected
            | OnboardError::Precondition(_) => ApiError::BadRequest(fault.to_string()),
            OnboardError::NotFound => ApiError::NotFound,
            OnboardError::Ssh(ssh_fault) => ApiError::Upstream(ssh_fault.to_string()),
            OnboardError::Store(store_fault) => store_fault.into(),
            OnboardError::Tenancy(tenancy_fault) => tenancy_fault.into(),
            OnboardError::StepFailed { .. } | OnboardError::Cancelled => {
                ApiError::Internal(fault.to_string())
            }
        }
    }
}

impl From<TransferError> for ApiError {
    fn from(fault: TransferError) -> Self {
        match fault {
            TransferError::InvalidEnvelope(detail) => ApiError::BadRequest(detail),
            TransferError::Store(store_fault) => store_fault.into(),
        }
    }
}

impl From<OracleError> for ApiError {
    fn from(fault: OracleError) -> Self {
        ApiError::Upstream(fault.to_string())
    }
}
