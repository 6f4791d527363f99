//! Token/permission check against the backend's `Auth` RPC.

use std::sync::Arc;

use crate::backend::{is_transport_closing, AuthBackend};
use crate::errors::GatewayError;
use crate::proto::{AuthRequest, AuthResponse, PermRequest, TokenRequest};

/// Upper bound on `Auth` calls per check, counting the first.
pub const MAX_AUTH_ATTEMPTS: usize = 10;

/// A (service, name) capability pair a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission {
    pub service: &'static str,
    pub name: &'static str,
}

impl Permission {
    pub const fn new(service: &'static str, name: &'static str) -> Self {
        Self { service, name }
    }

    pub fn is_complete(&self) -> bool {
        !self.service.is_empty() && !self.name.is_empty()
    }
}

#[derive(Clone)]
pub struct PermissionGate {
    backend: Arc<dyn AuthBackend>,
}

impl PermissionGate {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self { backend }
    }

    /// Check that `token` holds `perm`.
    pub async fn check(&self, token: &str, perm: &Permission) -> Result<AuthResponse, GatewayError> {
        if token.is_empty() || !perm.is_complete() {
            return Err(GatewayError::Unauthorized("unauthorized request".to_string()));
        }

        self.authorize(AuthRequest {
            token: Some(TokenRequest {
                token: token.to_string(),
                ..Default::default()
            }),
            perm: Some(PermRequest {
                service: perm.service.to_string(),
                name: perm.name.to_string(),
                ..Default::default()
            }),
        })
        .await
    }

    /// Send `req` to the backend, retrying only while the connection reports
    /// it is closing. Any other failure is returned from the attempt that hit it.
    pub async fn authorize(&self, req: AuthRequest) -> Result<AuthResponse, GatewayError> {
        for attempt in 1..=MAX_AUTH_ATTEMPTS {
            match self.backend.auth(req.clone()).await {
                Ok(res) if res.ok => return Ok(res),
                Ok(_) => {
                    return Err(GatewayError::Unauthorized("unauthorized user".to_string()));
                }
                Err(status) if is_transport_closing(&status) => {
                    tracing::warn!(
                        attempt,
                        max = MAX_AUTH_ATTEMPTS,
                        "auth backend connection closing, retrying"
                    );
                }
                Err(status) => return Err(GatewayError::Backend(status)),
            }
        }

        tracing::error!(
            attempts = MAX_AUTH_ATTEMPTS,
            "auth backend unavailable for every attempt"
        );
        Err(GatewayError::Unauthorized("unauthorized request".to_string()))
    }
}
