//! The dauth backend as seen by the gateway: one async capability per RPC.
//!
//! Handlers, the permission gate and the resource proxy only ever talk to
//! [`AuthBackend`]; [`grpc::GrpcBackend`] is the production implementation and
//! tests substitute in-memory fakes.

use async_trait::async_trait;
use futures::stream::BoxStream;
use tonic::{Code, Status};

use crate::proto::{
    AuthRequest, AuthResponse, DeleteResponse, PermRequest, PermResponse, TokenRequest,
    TokenResponse, UserPermRequest, UserPermResponse, UserRequest, UserResponse,
};

pub mod grpc;

pub use grpc::GrpcBackend;

/// Messages received from the backend over a server or bidirectional stream.
pub type RecordStream<T> = BoxStream<'static, Result<T, Status>>;

/// Messages the gateway sends on the client side of a bidirectional stream.
/// The stream ending is the half-close.
pub type SendStream<T> = BoxStream<'static, T>;

/// Message grpc-go attaches to `Unavailable` when the connection is shutting down.
const TRANSPORT_CLOSING: &str = "transport is closing";

/// Whether `status` is the "backend connection closing" condition.
///
/// This is the only failure the permission gate retries.
pub fn is_transport_closing(status: &Status) -> bool {
    status.code() == Code::Unavailable && status.message().contains(TRANSPORT_CLOSING)
}

#[async_trait]
pub trait AuthBackend: Send + Sync + 'static {
    async fn auth(&self, req: AuthRequest) -> Result<AuthResponse, Status>;
    async fn login(&self, req: UserRequest) -> Result<TokenResponse, Status>;
    async fn logout(&self, req: TokenRequest) -> Result<TokenResponse, Status>;

    async fn get_tokens(&self, req: TokenRequest) -> Result<RecordStream<TokenResponse>, Status>;
    async fn save_tokens(
        &self,
        reqs: SendStream<TokenRequest>,
    ) -> Result<RecordStream<TokenResponse>, Status>;
    async fn delete_tokens(&self, req: TokenRequest) -> Result<DeleteResponse, Status>;

    async fn get_users(&self, req: UserRequest) -> Result<RecordStream<UserResponse>, Status>;
    async fn save_users(
        &self,
        reqs: SendStream<UserRequest>,
    ) -> Result<RecordStream<UserResponse>, Status>;
    async fn delete_users(&self, req: UserRequest) -> Result<DeleteResponse, Status>;

    async fn get_perms(&self, req: PermRequest) -> Result<RecordStream<PermResponse>, Status>;
    async fn save_perms(
        &self,
        reqs: SendStream<PermRequest>,
    ) -> Result<RecordStream<PermResponse>, Status>;
    async fn delete_perms(&self, req: PermRequest) -> Result<DeleteResponse, Status>;

    async fn get_user_perms(
        &self,
        req: UserPermRequest,
    ) -> Result<RecordStream<UserPermResponse>, Status>;
    async fn save_user_perms(
        &self,
        reqs: SendStream<UserPermRequest>,
    ) -> Result<RecordStream<UserPermResponse>, Status>;
    async fn delete_user_perms(&self, req: UserPermRequest) -> Result<DeleteResponse, Status>;
}
