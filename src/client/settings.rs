//! CLI settings persisted between invocations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ClientError;

pub const DEFAULT_SETTINGS_FILE: &str = "dapi_config.yaml";

/// Marker written in place of a destroyed token.
pub const NO_TOKEN: &str = "none";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub token: String,
    /// PEM CA certificate used for HTTPS to the gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<PathBuf>,
}

impl Settings {
    /// A missing file reads as empty settings.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        match std::fs::read_to_string(path) {
            Ok(text) if text.trim().is_empty() => Ok(Self::default()),
            Ok(text) => Ok(serde_yaml::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// The stored token, unless there is none or it was logged out.
    pub fn token(&self) -> Option<&str> {
        match self.token.as_str() {
            "" | NO_TOKEN => None,
            token => Some(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.token().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SETTINGS_FILE);
        let settings = Settings {
            token: "abc123".into(),
            cert: Some(PathBuf::from("/etc/dapi/ca.pem")),
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.token(), Some("abc123"));
    }

    #[test]
    fn test_logged_out_marker_has_no_token() {
        let settings: Settings = serde_yaml::from_str("token: none\n").unwrap();
        assert!(settings.token().is_none());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "token: [unterminated").unwrap();
        assert!(matches!(Settings::load(&path), Err(ClientError::Yaml(_))));
    }
}
