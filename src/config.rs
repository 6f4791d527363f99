use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 3611;
pub const DEFAULT_AUTH_URL: &str = "localhost:3612";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Address of the dauth RPC service. A scheme is added when missing.
    pub auth_url: String,
    /// PEM CA certificate for TLS to the backend. Plaintext when unset.
    pub cert: Option<PathBuf>,
    /// Directory holding `docs.html` and `favicon.ico`.
    pub docs_dir: PathBuf,
    /// Deadline over each whole request. Set via DAPI_REQUEST_TIMEOUT_SECS;
    /// unset or 0 disables it.
    pub request_timeout: Option<Duration>,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auth_url: DEFAULT_AUTH_URL.to_string(),
            cert: None,
            docs_dir: PathBuf::from("docs"),
            request_timeout: None,
            log_json: false,
        }
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    from_vars(|key| std::env::var(key).ok())
}

/// Build a config from a variable lookup, so tests need not touch the
/// process environment.
pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
    let defaults = Config::default();

    let request_timeout = match var("DAPI_REQUEST_TIMEOUT_SECS") {
        Some(v) => {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("DAPI_REQUEST_TIMEOUT_SECS is not a number: {:?}", v))?;
            (secs > 0).then(|| Duration::from_secs(secs))
        }
        None => None,
    };

    let port = match var("DAPI_PORT") {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("DAPI_PORT is not a valid port: {:?}", v))?,
        None => defaults.port,
    };

    Ok(Config {
        port,
        auth_url: var("DAPI_AUTH_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.auth_url),
        cert: var("DAPI_CERT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from),
        docs_dir: var("DAPI_DOCS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.docs_dir),
        request_timeout,
        log_json: var("DAPI_LOG_JSON")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false),
    })
}
