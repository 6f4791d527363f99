//! tonic-backed [`AuthBackend`].
//!
//! The channel is shared read-only across requests; tonic channels are cheap
//! to clone and multiplex concurrent calls over one connection.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::StreamExt;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tonic::Status;

use super::{AuthBackend, RecordStream, SendStream};
use crate::proto::auth_client::AuthClient;
use crate::proto::{
    AuthRequest, AuthResponse, DeleteResponse, PermRequest, PermResponse, TokenRequest,
    TokenResponse, UserPermRequest, UserPermResponse, UserRequest, UserResponse,
};

#[derive(Debug, Clone)]
pub struct GrpcBackend {
    client: AuthClient<Channel>,
}

impl GrpcBackend {
    /// Build a lazily-connected backend for `auth_url`.
    ///
    /// With a CA certificate the connection uses TLS; the first call made
    /// through the channel establishes the connection.
    pub async fn connect(auth_url: &str, cert: Option<&Path>) -> anyhow::Result<Self> {
        let channel = channel(auth_url, cert).await?;
        Ok(Self::from_channel(channel))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: AuthClient::new(channel),
        }
    }
}

/// Build a lazy channel to the dauth backend.
pub async fn channel(auth_url: &str, cert: Option<&Path>) -> anyhow::Result<Channel> {
    let uri = backend_uri(auth_url, cert.is_some());
    let mut endpoint = Endpoint::from_shared(uri.clone())
        .with_context(|| format!("invalid backend address: {}", auth_url))?;

    if let Some(path) = cert {
        let pem = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read CA certificate {}", path.display()))?;
        let tls = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(pem));
        endpoint = endpoint
            .tls_config(tls)
            .context("failed to configure backend TLS")?;
    }

    tracing::info!(uri = %uri, tls = cert.is_some(), "backend channel configured");
    Ok(endpoint.connect_lazy())
}

/// `host:port` addresses get a scheme matching the transport.
fn backend_uri(auth_url: &str, tls: bool) -> String {
    if auth_url.starts_with("http://") || auth_url.starts_with("https://") {
        auth_url.to_string()
    } else if tls {
        format!("https://{}", auth_url)
    } else {
        format!("http://{}", auth_url)
    }
}

#[async_trait]
impl AuthBackend for GrpcBackend {
    async fn auth(&self, req: AuthRequest) -> Result<AuthResponse, Status> {
        Ok(self.client.clone().auth(req).await?.into_inner())
    }

    async fn login(&self, req: UserRequest) -> Result<TokenResponse, Status> {
        Ok(self.client.clone().login(req).await?.into_inner())
    }

    async fn logout(&self, req: TokenRequest) -> Result<TokenResponse, Status> {
        Ok(self.client.clone().logout(req).await?.into_inner())
    }

    async fn get_tokens(&self, req: TokenRequest) -> Result<RecordStream<TokenResponse>, Status> {
        Ok(self.client.clone().get_tokens(req).await?.into_inner().boxed())
    }

    async fn save_tokens(
        &self,
        reqs: SendStream<TokenRequest>,
    ) -> Result<RecordStream<TokenResponse>, Status> {
        open_save_tokens(self.client.clone(), reqs).await
    }

    async fn delete_tokens(&self, req: TokenRequest) -> Result<DeleteResponse, Status> {
        Ok(self.client.clone().delete_tokens(req).await?.into_inner())
    }

    async fn get_users(&self, req: UserRequest) -> Result<RecordStream<UserResponse>, Status> {
        Ok(self.client.clone().get_users(req).await?.into_inner().boxed())
    }

    async fn save_users(
        &self,
        reqs: SendStream<UserRequest>,
    ) -> Result<RecordStream<UserResponse>, Status> {
        open_save_users(self.client.clone(), reqs).await
    }

    async fn delete_users(&self, req: UserRequest) -> Result<DeleteResponse, Status> {
        Ok(self.client.clone().delete_users(req).await?.into_inner())
    }

    async fn get_perms(&self, req: PermRequest) -> Result<RecordStream<PermResponse>, Status> {
        Ok(self.client.clone().get_perms(req).await?.into_inner().boxed())
    }

    async fn save_perms(
        &self,
        reqs: SendStream<PermRequest>,
    ) -> Result<RecordStream<PermResponse>, Status> {
        open_save_perms(self.client.clone(), reqs).await
    }

    async fn delete_perms(&self, req: PermRequest) -> Result<DeleteResponse, Status> {
        Ok(self.client.clone().delete_perms(req).await?.into_inner())
    }

    async fn get_user_perms(
        &self,
        req: UserPermRequest,
    ) -> Result<RecordStream<UserPermResponse>, Status> {
        Ok(self
            .client
            .clone()
            .get_user_perms(req)
            .await?
            .into_inner()
            .boxed())
    }

    async fn save_user_perms(
        &self,
        reqs: SendStream<UserPermRequest>,
    ) -> Result<RecordStream<UserPermResponse>, Status> {
        open_save_user_perms(self.client.clone(), reqs).await
    }

    async fn delete_user_perms(&self, req: UserPermRequest) -> Result<DeleteResponse, Status> {
        Ok(self.client.clone().delete_user_perms(req).await?.into_inner())
    }
}

// Bidirectional calls are opened from an owned client and boxed as
// `'static + Send` futures. Awaited inline in an `#[async_trait]` body they
// fail the higher-ranked `Send` check.

type SaveCall<T> = BoxFuture<'static, Result<RecordStream<T>, Status>>;

fn open_save_tokens(
    mut client: AuthClient<Channel>,
    reqs: SendStream<TokenRequest>,
) -> SaveCall<TokenResponse> {
    Box::pin(async move { Ok(client.save_tokens(reqs).await?.into_inner().boxed()) })
}

fn open_save_users(
    mut client: AuthClient<Channel>,
    reqs: SendStream<UserRequest>,
) -> SaveCall<UserResponse> {
    Box::pin(async move { Ok(client.save_users(reqs).await?.into_inner().boxed()) })
}

fn open_save_perms(
    mut client: AuthClient<Channel>,
    reqs: SendStream<PermRequest>,
) -> SaveCall<PermResponse> {
    Box::pin(async move { Ok(client.save_perms(reqs).await?.into_inner().boxed()) })
}

fn open_save_user_perms(
    mut client: AuthClient<Channel>,
    reqs: SendStream<UserPermRequest>,
) -> SaveCall<UserPermResponse> {
    Box::pin(async move { Ok(client.save_user_perms(reqs).await?.into_inner().boxed()) })
}
