use axum::extract::Request;
use axum::http::header::{ALLOW, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::errors::{Failure, GatewayError};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Middleware: labels every response as UTF-8 JSON. Responses that already
/// declare a non-JSON type (docs page, icon) keep it.
///
/// The router's bare 405 for a known path is replaced by the error body.
pub async fn json_content_type(req: Request, next: Next) -> Response {
    let mut resp = next.run(req).await;

    if resp.status() == StatusCode::METHOD_NOT_ALLOWED
        && resp.extensions().get::<Failure>().is_none()
    {
        let allow = resp.headers().get(ALLOW).cloned();
        resp = GatewayError::MethodNotAllowed.into_response();
        if let Some(allow) = allow {
            resp.headers_mut().insert(ALLOW, allow);
        }
    }

    let declared_other = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| !ct.starts_with("application/json"));

    if !declared_other {
        resp.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;

    async fn content_type_of(app: Router) -> String {
        let resp = app
            .layer(from_fn(json_content_type))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        resp.headers()[CONTENT_TYPE].to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_untyped_and_json_responses_get_charset() {
        let app = Router::new().route("/", get(|| async { axum::Json(1) }));
        assert_eq!(content_type_of(app).await, JSON_CONTENT_TYPE);

        let app = Router::new().route("/", get(|| async {}));
        assert_eq!(content_type_of(app).await, JSON_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_bare_405_gets_error_body() {
        let app = Router::new()
            .route("/", axum::routing::post(|| async {}))
            .layer(from_fn(json_content_type));
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert!(resp.extensions().get::<Failure>().is_some());
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"code":405,"msg":"method not allowed"}"#);
    }

    #[tokio::test]
    async fn test_declared_type_is_kept() {
        let app = Router::new().route(
            "/",
            get(|| async { ([(CONTENT_TYPE, "image/x-icon")], vec![0u8; 4]) }),
        );
        assert_eq!(content_type_of(app).await, "image/x-icon");

        let app = Router::new().route("/", get(|| async { "plain" }));
        assert_eq!(content_type_of(app).await, "text/plain; charset=utf-8");
    }
}
