//! dapi: JSON/HTTP gateway in front of the dauth authorization service.
//!
//! Re-exports modules needed by the binary and by integration tests in `tests/`.

use std::sync::Arc;

pub mod api;
pub mod backend;
pub mod cli;
pub mod client;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod proto;
pub mod proxy;

use backend::AuthBackend;
use middleware::PermissionGate;
use proxy::{ResourceKind, ResourceProxy};

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub backend: Arc<dyn AuthBackend>,
    pub gate: PermissionGate,
    pub config: config::Config,
}

impl AppState {
    pub fn new(backend: Arc<dyn AuthBackend>, config: config::Config) -> Self {
        Self {
            gate: PermissionGate::new(Arc::clone(&backend)),
            backend,
            config,
        }
    }

    pub fn proxy<K: ResourceKind>(&self) -> ResourceProxy<K> {
        ResourceProxy::new(Arc::clone(&self.backend))
    }
}
