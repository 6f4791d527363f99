use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;

use crate::envelope::Envelope;
use super::body::JsonBody;
use crate::errors::GatewayError;
use crate::models::{ServiceInfo, Token, SERVICE_INFO};
use crate::proxy::{old_token_cutoff, ResourceKind, Tokens};
use crate::AppState;

// ── Resources ────────────────────────────────────────────────

/// GET /dauth/{kind}: every record matching the query-string filter.
pub async fn list<K: ResourceKind>(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<K::Record>, QueryRejection>,
) -> Result<Json<Vec<K::Record>>, GatewayError> {
    let Query(filter) = filter?;
    let data = state.proxy::<K>().list(&filter).await?;
    Ok(Json(data))
}

/// GET /dauth/{kind}/:id
pub async fn get_by_id<K: ResourceKind>(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<K::Record>, GatewayError> {
    let Path(id) = id?;
    let record = state.proxy::<K>().get(id).await?;
    Ok(Json(record))
}

/// POST /dauth/{kind}: body is an array of records.
pub async fn save_all<K: ResourceKind>(
    State(state): State<Arc<AppState>>,
    JsonBody(records): JsonBody<Vec<K::Record>>,
) -> Result<Json<Envelope<K::Record>>, GatewayError> {
    let envelope = state.proxy::<K>().save_all(records).await?;
    Ok(Json(envelope))
}

/// PUT /dauth/{kind}/:id: the path id wins over any id in the body.
pub async fn save_one<K: ResourceKind>(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    JsonBody(record): JsonBody<K::Record>,
) -> Result<Json<Envelope<K::Record>>, GatewayError> {
    let Path(id) = id?;
    let envelope = state.proxy::<K>().save_one(id, record).await?;
    Ok(Json(envelope))
}

/// DELETE /dauth/{kind}: body is the filter.
pub async fn delete_matching<K: ResourceKind>(
    State(state): State<Arc<AppState>>,
    JsonBody(filter): JsonBody<K::Record>,
) -> Result<Json<Envelope<K::Record>>, GatewayError> {
    let envelope = state.proxy::<K>().delete_matching(&filter).await?;
    Ok(Json(envelope))
}

/// DELETE /dauth/{kind}/:id
pub async fn delete_by_id<K: ResourceKind>(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Envelope<K::Record>>, GatewayError> {
    let Path(id) = id?;
    let envelope = state.proxy::<K>().delete_by_id(id).await?;
    Ok(Json(envelope))
}

/// DELETE /dauth/tokens/old/:age: tokens created before local midnight
/// `age` days ago. The bare `/old` form has no age and is rejected.
pub async fn delete_old_tokens(
    State(state): State<Arc<AppState>>,
    age: Option<Path<String>>,
) -> Result<Json<Envelope<Token>>, GatewayError> {
    let invalid = || GatewayError::Validation("invalid age value".to_string());

    let age = age
        .and_then(|Path(age)| age.parse::<i64>().ok())
        .filter(|age| *age >= 0)
        .ok_or_else(invalid)?;
    let cutoff = old_token_cutoff(&Local::now(), age).ok_or_else(invalid)?;

    let envelope = state.proxy::<Tokens>().delete_older_than(&cutoff).await?;
    Ok(Json(envelope))
}

// ── Service ──────────────────────────────────────────────────

/// GET /
pub async fn index() -> Json<ServiceInfo> {
    Json(SERVICE_INFO)
}

/// GET /docs
pub async fn docs(State(state): State<Arc<AppState>>) -> Result<Response, GatewayError> {
    serve_file(&state.config.docs_dir.join("docs.html"), "text/html; charset=UTF-8").await
}

/// GET /favicon.ico
pub async fn icon(State(state): State<Arc<AppState>>) -> Result<Response, GatewayError> {
    serve_file(&state.config.docs_dir.join("favicon.ico"), "image/x-icon").await
}

async fn serve_file(path: &FsPath, content_type: &'static str) -> Result<Response, GatewayError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(([(CONTENT_TYPE, content_type)], bytes).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(GatewayError::NotFound),
        Err(e) => Err(GatewayError::Internal(
            anyhow::Error::new(e).context(format!("failed to read {}", path.display())),
        )),
    }
}
