//! Permission stage for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::gate::{Permission, PermissionGate};

/// Header carrying the caller's API token.
pub const TOKEN_HEADER: &str = "Token";

/// A route's authorization requirement, bound to the gate that enforces it.
#[derive(Clone)]
pub struct RequirePermission {
    gate: PermissionGate,
    perm: Permission,
}

impl RequirePermission {
    pub fn new(gate: PermissionGate, perm: Permission) -> Self {
        Self { gate, perm }
    }
}

/// Middleware: rejects the request unless its `Token` header holds the
/// route's permission. Missing or unreadable tokens never reach the backend.
pub async fn require_permission(
    State(stage): State<RequirePermission>,
    req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    match stage.gate.check(token, &stage.perm).await {
        Ok(res) => {
            tracing::debug!(
                service = stage.perm.service,
                name = stage.perm.name,
                user_id = res.user.as_ref().map(|u| u.id).unwrap_or_default(),
                "request authorized"
            );
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
