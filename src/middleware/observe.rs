use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::Failure;

/// Middleware: injects a unique X-Request-Id into every response.
/// This allows clients to correlate errors with gateway logs.
pub async fn request_id(req: Request, next: Next) -> Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}

/// Middleware: logs every failed response once, with the full internal error
/// text the client never sees.
pub async fn log_failures(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let resp = next.run(req).await;

    if let Some(Failure(err)) = resp.extensions().get::<Failure>() {
        let status = resp.status().as_u16();
        if resp.status().is_server_error() {
            tracing::error!(%method, %uri, %remote, status, "{}", err);
        } else {
            tracing::warn!(%method, %uri, %remote, status, "{}", err);
        }
    }
    resp
}
