use std::path::Path;

use tonic::transport::Channel;

use super::ClientError;
use crate::backend::grpc;
use crate::models::{Token, User};
use crate::proto::auth_client::AuthClient;

/// RPC session client: `Login`/`Logout` straight against dauth, one call
/// each, no retry.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: AuthClient<Channel>,
    token: Option<Token>,
}

impl RpcClient {
    pub async fn connect(auth_url: &str, cert: Option<&Path>) -> Result<Self, ClientError> {
        let channel = grpc::channel(auth_url, cert).await?;
        Ok(Self::from_channel(channel))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: AuthClient::new(channel),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn set_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub async fn login(&mut self, user: &User) -> Result<&Token, ClientError> {
        if user.user.is_empty() {
            return Err(ClientError::NoUser);
        }

        let res = self.client.login(user.to_request()).await?.into_inner();
        let token = Token::try_from(res)?;
        Ok(&*self.token.insert(token))
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        if let Some(token) = &self.token {
            self.client.logout(token.to_request()).await?;
        }
        self.token = None;
        Ok(())
    }
}
