//! Session clients for callers outside the gateway: the CLI talks to a
//! gateway over REST, services that speak RPC go straight to dauth.

use thiserror::Error;

pub mod rest;
pub mod rpc;
pub mod settings;

pub use rest::RestClient;
pub use rpc::RpcClient;
pub use settings::Settings;

/// Default gateway address for the CLI.
pub const DEFAULT_CLIENT_URL: &str = "https://dapi.io";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no user provided for client login")]
    NoUser,

    /// Non-200 answer, decoded from the gateway's `{code, msg}` body.
    #[error("request failed ({code}): {msg}")]
    Api { code: u16, msg: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rpc call failed: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
