use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::Code;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed identifier, query string or body.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid token, permission denied, or the backend stayed
    /// unreachable for every authorization attempt.
    #[error("{0}")]
    Unauthorized(String),

    /// Empty result set or zero affected rows.
    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("backend error: {0}")]
    Backend(#[from] tonic::Status),

    #[error("request timed out")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Standard error body: `{"code": <status>, "msg": <text>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub msg: String,
}

/// Full error text attached to failed responses for the logging layer.
/// Never serialized to the client.
#[derive(Debug, Clone)]
pub struct Failure(pub String);

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Backend(status) => match status.code() {
                Code::Unauthenticated | Code::PermissionDenied => StatusCode::UNAUTHORIZED,
                Code::InvalidArgument => StatusCode::BAD_REQUEST,
                Code::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Backend and internal text stays in the logs.
    fn public_message(&self) -> String {
        match self {
            GatewayError::Validation(msg) | GatewayError::Unauthorized(msg) => msg.clone(),
            GatewayError::NotFound => "resource not found".to_string(),
            GatewayError::MethodNotAllowed => "method not allowed".to_string(),
            GatewayError::Backend(status) => match status.code() {
                Code::Unauthenticated | Code::PermissionDenied => {
                    "unauthorized request".to_string()
                }
                Code::InvalidArgument => "invalid request".to_string(),
                Code::NotFound => "resource not found".to_string(),
                _ => "backend request failed".to_string(),
            },
            GatewayError::Timeout => "request timed out".to_string(),
            GatewayError::Internal(_) => "internal server error".to_string(),
        }
    }

    /// Full text for the failure log. Backend messages are kept verbatim.
    fn log_text(&self) -> String {
        match self {
            GatewayError::Backend(status) => {
                format!("backend error: {:?}: {}", status.code(), status.message())
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            code: status.as_u16(),
            msg: self.public_message(),
        });

        let mut response = (status, body).into_response();
        response
            .extensions_mut()
            .insert(Failure(self.log_text()));
        response
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::Validation(format!("invalid query: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for GatewayError {
    fn from(_: PathRejection) -> Self {
        GatewayError::Validation("invalid id value".to_string())
    }
}
