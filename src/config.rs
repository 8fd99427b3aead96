use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Run-wide settings, supplied once when the validator is constructed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub env: EnvConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Default API document used when a call does not name one
    #[serde(default, rename = "swaggerFile", skip_serializing_if = "Option::is_none")]
    pub swagger_file: Option<String>,
}

impl Config {
    pub fn with_swagger_file(file: impl Into<String>) -> Self {
        Self {
            env: EnvConfig {
                swagger_file: Some(file.into()),
            },
        }
    }

    /// Build from the process environment (`SWAGGER_FILE`)
    pub fn from_env() -> Self {
        let swagger_file = std::env::var("SWAGGER_FILE")
            .ok()
            .filter(|f| !f.trim().is_empty());

        Self {
            env: EnvConfig { swagger_file },
        }
    }

    /// Read a test-runner style JSON config: `{"env": {"swaggerFile": "..."}}`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn swagger_file(&self) -> Option<&str> {
        self.env.swagger_file.as_deref()
    }
}
