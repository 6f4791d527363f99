//! Wire types for the dauth `ptypes.Auth` service.
//!
//! The message shapes are owned by the backend; they are declared here in the
//! same form `tonic-build` would emit so the crate builds without `protoc`.

#![allow(clippy::all)]

use prost_types::Timestamp;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub token: String,
    #[prost(int64, tag = "3")]
    pub user_id: i64,
    #[prost(message, optional, tag = "4")]
    pub created: Option<Timestamp>,
    #[prost(message, optional, tag = "5")]
    pub expires: Option<Timestamp>,
    /// Delete-by-age cutoff: matches tokens created before this instant.
    #[prost(message, optional, tag = "6")]
    pub old: Option<Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenResponse {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub token: String,
    #[prost(int64, tag = "3")]
    pub user_id: i64,
    #[prost(message, optional, tag = "4")]
    pub created: Option<Timestamp>,
    #[prost(message, optional, tag = "5")]
    pub expires: Option<Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub user: String,
    #[prost(string, tag = "3")]
    pub pass: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserResponse {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub user: String,
    #[prost(string, tag = "3")]
    pub pass: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PermRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub service: String,
    #[prost(string, tag = "3")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PermResponse {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub service: String,
    #[prost(string, tag = "3")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserPermRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub user_id: i64,
    #[prost(int64, tag = "3")]
    pub perm_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserPermResponse {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub user_id: i64,
    #[prost(int64, tag = "3")]
    pub perm_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthRequest {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenRequest>,
    #[prost(message, optional, tag = "2")]
    pub perm: Option<PermRequest>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthResponse {
    #[prost(bool, tag = "1")]
    pub ok: bool,
    #[prost(message, optional, tag = "2")]
    pub user: Option<UserResponse>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteResponse {
    #[prost(int64, tag = "1")]
    pub num: i64,
}

/// Client for the `ptypes.Auth` service.
pub mod auth_client {
    use tonic::codegen::*;

    #[derive(Debug, Clone)]
    pub struct AuthClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl AuthClient<tonic::transport::Channel> {
        pub fn new(channel: tonic::transport::Channel) -> Self {
            let inner = tonic::client::Grpc::new(channel);
            Self { inner }
        }
    }

    impl<T> AuthClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        async fn ready(&mut self) -> std::result::Result<(), tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })
        }

        pub async fn auth(
            &mut self,
            request: impl tonic::IntoRequest<super::AuthRequest>,
        ) -> std::result::Result<tonic::Response<super::AuthResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/Auth");
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn login(
            &mut self,
            request: impl tonic::IntoRequest<super::UserRequest>,
        ) -> std::result::Result<tonic::Response<super::TokenResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/Login");
            self.inner.unary(request.into_request(), path, codec).await
        }

        pub async fn logout(
            &mut self,
            request: impl tonic::IntoRequest<super::TokenRequest>,
        ) -> std::result::Result<tonic::Response<super::TokenResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/Logout");
            self.inner.unary(request.into_request(), path, codec).await
        }

        // ── Tokens ───────────────────────────────────────────────

        pub async fn get_tokens(
            &mut self,
            request: impl tonic::IntoRequest<super::TokenRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::TokenResponse>>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/GetTokens");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }

        pub async fn save_tokens(
            &mut self,
            request: futures::stream::BoxStream<'static, super::TokenRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::TokenResponse>>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/SaveTokens");
            self.inner
                .streaming(tonic::Request::new(request), path, codec)
                .await
        }

        pub async fn delete_tokens(
            &mut self,
            request: impl tonic::IntoRequest<super::TokenRequest>,
        ) -> std::result::Result<tonic::Response<super::DeleteResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/DeleteTokens");
            self.inner.unary(request.into_request(), path, codec).await
        }

        // ── Users ────────────────────────────────────────────────

        pub async fn get_users(
            &mut self,
            request: impl tonic::IntoRequest<super::UserRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::UserResponse>>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/GetUsers");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }

        pub async fn save_users(
            &mut self,
            request: futures::stream::BoxStream<'static, super::UserRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::UserResponse>>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/SaveUsers");
            self.inner
                .streaming(tonic::Request::new(request), path, codec)
                .await
        }

        pub async fn delete_users(
            &mut self,
            request: impl tonic::IntoRequest<super::UserRequest>,
        ) -> std::result::Result<tonic::Response<super::DeleteResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/DeleteUsers");
            self.inner.unary(request.into_request(), path, codec).await
        }

        // ── Perms ────────────────────────────────────────────────

        pub async fn get_perms(
            &mut self,
            request: impl tonic::IntoRequest<super::PermRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::PermResponse>>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/GetPerms");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }

        pub async fn save_perms(
            &mut self,
            request: futures::stream::BoxStream<'static, super::PermRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::PermResponse>>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/SavePerms");
            self.inner
                .streaming(tonic::Request::new(request), path, codec)
                .await
        }

        pub async fn delete_perms(
            &mut self,
            request: impl tonic::IntoRequest<super::PermRequest>,
        ) -> std::result::Result<tonic::Response<super::DeleteResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/DeletePerms");
            self.inner.unary(request.into_request(), path, codec).await
        }

        // ── User perms ───────────────────────────────────────────

        pub async fn get_user_perms(
            &mut self,
            request: impl tonic::IntoRequest<super::UserPermRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::UserPermResponse>>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/GetUserPerms");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }

        pub async fn save_user_perms(
            &mut self,
            request: futures::stream::BoxStream<'static, super::UserPermRequest>,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::UserPermResponse>>,
            tonic::Status,
        > {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/SaveUserPerms");
            self.inner
                .streaming(tonic::Request::new(request), path, codec)
                .await
        }

        pub async fn delete_user_perms(
            &mut self,
            request: impl tonic::IntoRequest<super::UserPermRequest>,
        ) -> std::result::Result<tonic::Response<super::DeleteResponse>, tonic::Status> {
            self.ready().await?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ptypes.Auth/DeleteUserPerms");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}
