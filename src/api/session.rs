//! Token issue, revocation and verification.
//!
//! Login and logout are single backend calls with no retry; a failure goes
//! straight back to the caller. The auth check goes through the permission
//! gate and shares its retry policy.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::QueryRejection,
        Query, State,
    },
    Json,
};
use serde::Deserialize;

use super::body::JsonBody;
use crate::errors::GatewayError;
use crate::models::{Token, User};
use crate::proto::{AuthRequest, PermRequest, TokenRequest};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthQuery {
    pub token: String,
    pub service: String,
    pub name: String,
}

/// GET /dauth/auth?token=&service=&name=: the user owning `token`, if it
/// holds the named permission.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AuthQuery>, QueryRejection>,
) -> Result<Json<User>, GatewayError> {
    let Query(q) = query?;

    let res = state
        .gate
        .authorize(AuthRequest {
            token: Some(TokenRequest {
                token: q.token,
                ..Default::default()
            }),
            perm: Some(PermRequest {
                service: q.service,
                name: q.name,
                ..Default::default()
            }),
        })
        .await?;

    let mut user = res.user.map(User::from).ok_or_else(|| {
        GatewayError::Internal(anyhow::anyhow!("auth response carried no user"))
    })?;
    user.scrub();
    Ok(Json(user))
}

/// POST /dauth/login: body `{user, pass}`; returns the issued token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(user): JsonBody<User>,
) -> Result<Json<Token>, GatewayError> {
    let res = state.backend.login(user.to_request()).await?;
    let token = Token::try_from(res)?;
    tracing::info!(user = %user.user, user_id = token.user_id, "login succeeded");
    Ok(Json(token))
}

/// POST /dauth/logout: body `{token}`; returns the backend's acknowledgement
/// token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    JsonBody(token): JsonBody<Token>,
) -> Result<Json<Token>, GatewayError> {
    let res = state.backend.logout(token.to_request()).await?;
    Ok(Json(Token::try_from(res)?))
}
