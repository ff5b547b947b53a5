use std::path::Path;

use serde::{Deserialize, Serialize};

/// Connection settings for one client session.
///
/// Every field has a default, so a TOML file only needs the values it
/// changes:
///
/// ```toml
/// host = "ipfs.internal"
/// timeout = "30s"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Advisory timeout forwarded to the daemon, e.g. `"30s"`. Empty means none.
    pub timeout: String,
    /// `"http://"` or `"https://"`.
    pub protocol: String,
    pub api_path: String,
    /// Log connection-level traffic of the HTTP transport.
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5001,
            timeout: String::new(),
            protocol: "http://".to_string(),
            api_path: "/api/v0".to_string(),
            verbose: false,
        }
    }
}

impl ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub fn url_prefix(&self) -> String {
        format!("{}{}:{}{}", self.protocol, self.host, self.port, self.api_path)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
