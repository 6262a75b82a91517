//! Configuration types for the mock LLM server.

mod listen;
mod mocks;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::provider::Provider;

pub use listen::{resolve_listen_addr, DEFAULT_LISTEN_ADDR};
pub use mocks::{MatchSpec, MockConfig};

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid listen address '{addr}': {reason}")]
    InvalidListenAddr { addr: String, reason: String },
}

/// All mock responses, grouped by provider, in registration order.
///
/// The order within each list is significant: the first matching mock wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub openai: Vec<MockConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anthropic: Vec<MockConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub google: Vec<MockConfig>,
    /// Address to listen on. Defaults to any interface on an ephemeral port.
    #[serde(default = "listen::default_listen_addr")]
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: Vec::new(),
            anthropic: Vec::new(),
            google: Vec::new(),
            listen_addr: listen::default_listen_addr(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON or YAML file (chosen by extension).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path.extension().and_then(|ext| ext.to_str());
        let is_yaml = extension.is_some_and(|ext| {
            ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
        });

        if is_yaml {
            Self::from_yaml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        resolve_listen_addr(&self.listen_addr)?;

        for provider in Provider::ALL {
            let mut seen = HashSet::new();
            for mock in self.mocks(provider) {
                if !mock.name.is_empty() && !seen.insert(mock.name.as_str()) {
                    warn!(
                        provider = %provider,
                        name = %mock.name,
                        "Duplicate mock name; only the first can be told apart in logs"
                    );
                }
            }
        }

        Ok(())
    }

    /// Mocks configured for a provider, in registration order
    pub fn mocks(&self, provider: Provider) -> &[MockConfig] {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::Anthropic => &self.anthropic,
            Provider::Google => &self.google,
        }
    }
}
