use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::errors::GatewayError;

/// JSON request body decoded whatever `Content-Type` the caller sent.
///
/// An empty or malformed body is a 400.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                GatewayError::Validation(format!("invalid request body: {}", e.body_text()))
            })?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| GatewayError::Validation(format!("invalid request body: {}", e)))
    }
}
