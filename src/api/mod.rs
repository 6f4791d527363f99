use std::sync::Arc;

use axum::{
    error_handling::HandleErrorLayer,
    handler::Handler,
    middleware,
    routing::{on, MethodFilter, MethodRouter},
    BoxError, Router,
};
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::errors::GatewayError;
use crate::middleware::{
    json_content_type, log_failures, request_id, require_permission, Permission, PermissionGate,
    RequirePermission,
};
use crate::proxy::{Perms, Tokens, UserPerms, Users};
use crate::AppState;

mod body;
pub mod handlers;
pub mod session;

/// One entry of the route table. For protected routes, `service`/`name` is the
/// permission the caller's token must hold.
pub struct Route {
    pub service: &'static str,
    pub name: &'static str,
    pub method: MethodFilter,
    pub path: &'static str,
    pub auth: bool,
    endpoint: MethodRouter<Arc<AppState>>,
}

impl Route {
    fn new<H, T>(
        service: &'static str,
        name: &'static str,
        method: MethodFilter,
        path: &'static str,
        auth: bool,
        handler: H,
    ) -> Self
    where
        H: Handler<T, Arc<AppState>>,
        T: 'static,
    {
        Self {
            service,
            name,
            method,
            path,
            auth,
            endpoint: on(method, handler),
        }
    }

    pub fn permission(&self) -> Permission {
        Permission::new(self.service, self.name)
    }

    /// The handler with its stages: header outermost, permission check
    /// innermost.
    fn into_endpoint(self, gate: &PermissionGate) -> MethodRouter<Arc<AppState>> {
        let perm = self.permission();
        let mut endpoint = self.endpoint;
        if self.auth {
            let stage = RequirePermission::new(gate.clone(), perm);
            endpoint = endpoint.layer(middleware::from_fn_with_state(stage, require_permission));
        }
        endpoint.layer(middleware::from_fn(json_content_type))
    }
}

/// Every route the gateway serves.
pub fn routes() -> Vec<Route> {
    use MethodFilter as M;

    vec![
        Route::new("dapi", "index", M::GET, "/", false, handlers::index),
        Route::new("dapi", "docs", M::GET, "/docs", false, handlers::docs),
        Route::new("dapi", "icon", M::GET, "/favicon.ico", false, handlers::icon),
        // Tokens
        Route::new("dauth", "GetTokens", M::GET, "/dauth/tokens", true, handlers::list::<Tokens>),
        Route::new("dauth", "GetTokens", M::GET, "/dauth/tokens/:id", true, handlers::get_by_id::<Tokens>),
        Route::new("dauth", "SaveTokens", M::POST, "/dauth/tokens", true, handlers::save_all::<Tokens>),
        Route::new("dauth", "SaveTokens", M::PUT, "/dauth/tokens/:id", true, handlers::save_one::<Tokens>),
        Route::new("dauth", "DeleteTokens", M::DELETE, "/dauth/tokens/old", true, handlers::delete_old_tokens),
        Route::new("dauth", "DeleteTokens", M::DELETE, "/dauth/tokens/old/:age", true, handlers::delete_old_tokens),
        Route::new("dauth", "DeleteTokens", M::DELETE, "/dauth/tokens/:id", true, handlers::delete_by_id::<Tokens>),
        Route::new("dauth", "DeleteTokens", M::DELETE, "/dauth/tokens", true, handlers::delete_matching::<Tokens>),
        // Users
        Route::new("dauth", "GetUsers", M::GET, "/dauth/users", true, handlers::list::<Users>),
        Route::new("dauth", "GetUsers", M::GET, "/dauth/users/:id", true, handlers::get_by_id::<Users>),
        Route::new("dauth", "SaveUsers", M::POST, "/dauth/users", true, handlers::save_all::<Users>),
        Route::new("dauth", "SaveUsers", M::PUT, "/dauth/users/:id", true, handlers::save_one::<Users>),
        Route::new("dauth", "DeleteUsers", M::DELETE, "/dauth/users/:id", true, handlers::delete_by_id::<Users>),
        Route::new("dauth", "DeleteUsers", M::DELETE, "/dauth/users", true, handlers::delete_matching::<Users>),
        // Permissions
        Route::new("dauth", "GetPerms", M::GET, "/dauth/perms", true, handlers::list::<Perms>),
        Route::new("dauth", "GetPerms", M::GET, "/dauth/perms/:id", true, handlers::get_by_id::<Perms>),
        Route::new("dauth", "SavePerms", M::POST, "/dauth/perms", true, handlers::save_all::<Perms>),
        Route::new("dauth", "SavePerms", M::PUT, "/dauth/perms/:id", true, handlers::save_one::<Perms>),
        Route::new("dauth", "DeletePerms", M::DELETE, "/dauth/perms/:id", true, handlers::delete_by_id::<Perms>),
        Route::new("dauth", "DeletePerms", M::DELETE, "/dauth/perms", true, handlers::delete_matching::<Perms>),
        // User permissions
        Route::new("dauth", "GetUserPerms", M::GET, "/dauth/userperms", true, handlers::list::<UserPerms>),
        Route::new("dauth", "GetUserPerms", M::GET, "/dauth/userperms/:id", true, handlers::get_by_id::<UserPerms>),
        Route::new("dauth", "SaveUserPerms", M::POST, "/dauth/userperms", true, handlers::save_all::<UserPerms>),
        Route::new("dauth", "SaveUserPerms", M::PUT, "/dauth/userperms/:id", true, handlers::save_one::<UserPerms>),
        Route::new("dauth", "DeleteUserPerms", M::DELETE, "/dauth/userperms/:id", true, handlers::delete_by_id::<UserPerms>),
        Route::new("dauth", "DeleteUserPerms", M::DELETE, "/dauth/userperms", true, handlers::delete_matching::<UserPerms>),
        // Session
        Route::new("dauth", "Auth", M::GET, "/dauth/auth", true, session::authenticate),
        Route::new("dauth", "Login", M::POST, "/dauth/login", false, session::login),
        Route::new("dauth", "Logout", M::POST, "/dauth/logout", false, session::logout),
    ]
}

/// Build the gateway router from the route table.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new();
    for route in routes() {
        let path = route.path;
        router = router.route(path, route.into_endpoint(&state.gate));
    }

    let mut app: Router = router
        .fallback(fallback_404.layer(middleware::from_fn(json_content_type)))
        .with_state(Arc::clone(&state));

    // Optional deadline over the whole request, permission check included.
    if let Some(timeout) = state.config.request_timeout {
        app = app.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(timeout)),
        );
    }

    // Router-level header stage also covers responses produced outside any
    // route: 405 for a known path and the deadline's 504.
    app.layer(middleware::from_fn(json_content_type))
        .layer(middleware::from_fn(log_failures))
        .layer(middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
}

async fn handle_timeout(err: BoxError) -> GatewayError {
    if err.is::<tower::timeout::error::Elapsed>() {
        GatewayError::Timeout
    } else {
        GatewayError::Internal(anyhow::anyhow!("request middleware failed: {}", err))
    }
}

async fn fallback_404() -> GatewayError {
    GatewayError::NotFound
}
