use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "chat";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid api_base {0:?}: {1}")]
    InvalidApiBase(String, String),
    #[error("Storage namespace must not be empty")]
    EmptyNamespace,
}

/// Everything a [`crate::ChatSession`] needs to talk to the chat API and to
/// find its local state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct ChatConfig {
    pub api_base: String,
    pub database_path: String,
    #[serde(default = "default_namespace")]
    #[uniffi(default = "chat")]
    pub namespace: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl ChatConfig {
    pub fn new(api_base: impl Into<String>, database_path: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            database_path: database_path.into(),
            namespace: default_namespace(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| ConfigError::InvalidApiBase(self.api_base.clone(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiBase(
                self.api_base.clone(),
                format!("unsupported scheme {}", url.scheme()),
            ));
        }
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        Ok(())
    }
}
