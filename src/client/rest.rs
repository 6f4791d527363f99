use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ClientError;
use crate::errors::ErrorBody;
use crate::models::{Token, User};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST session client. `auth_url` is the base of the `login`/`logout`
/// endpoints, e.g. `https://dapi.io/dauth`.
#[derive(Debug, Clone)]
pub struct RestClient {
    url: String,
    auth_url: String,
    http: reqwest::Client,
    token: Option<Token>,
}

impl RestClient {
    /// With `cert`, the PEM file is trusted as an additional root.
    pub fn new(
        url: impl Into<String>,
        auth_url: impl Into<String>,
        cert: Option<&Path>,
    ) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(path) = cert {
            let pem = std::fs::read(path)?;
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
        }

        Ok(Self {
            url: url.into(),
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            http: builder.build()?,
            token: None,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Adopt a token obtained elsewhere (e.g. from the settings file).
    pub fn set_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub async fn login(&mut self, user: &User) -> Result<&Token, ClientError> {
        if user.user.is_empty() {
            return Err(ClientError::NoUser);
        }

        let token: Token = self.post("login", user).await?;
        Ok(&*self.token.insert(token))
    }

    /// Destroy the held token. Without one there is nothing to send.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        if let Some(token) = &self.token {
            let _ack: Token = self.post("logout", token).await?;
        }
        self.token = None;
        Ok(())
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.auth_url, endpoint);
        let res = self.http.post(&url).json(body).send().await?;

        let status = res.status();
        if status != StatusCode::OK {
            let text = res.text().await?;
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => ClientError::Api {
                    code: body.code,
                    msg: body.msg,
                },
                Err(_) => ClientError::Api {
                    code: status.as_u16(),
                    msg: text,
                },
            });
        }

        Ok(res.json().await?)
    }
}
