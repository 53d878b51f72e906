//! Relay configuration loading and validation.
//!
//! Configuration can come from a TOML or JSON file, from environment
//! variables, or from code. Every field has a default, so an empty file is a
//! valid configuration.
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 8088
//! capacity = 100
//! snapshot_path = "ocr_results.json"
//! handoff_path = "/tmp/ocr_result.txt"
//! static_dir = "./static"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RelayError, Result};
use crate::persistence::DEFAULT_SNAPSHOT_PATH;
use crate::resolution::DEFAULT_HANDOFF_PATH;
use crate::store::DEFAULT_CAPACITY;

/// File name searched for by [`RelayConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "ocr-relay.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8088;
pub const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

pub const ENV_HOST: &str = "OCR_RELAY_HOST";
pub const ENV_PORT: &str = "OCR_RELAY_PORT";
pub const ENV_SNAPSHOT_PATH: &str = "OCR_RELAY_SNAPSHOT_PATH";
pub const ENV_HANDOFF_PATH: &str = "OCR_RELAY_HANDOFF_PATH";
pub const ENV_MAX_REQUEST_BODY_BYTES: &str = "OCR_RELAY_MAX_REQUEST_BODY_BYTES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Address the HTTP server binds to.
    pub host: String,
    pub port: u16,
    /// Maximum number of records kept in the history.
    pub capacity: usize,
    /// JSON snapshot of the history, rewritten after every change.
    pub snapshot_path: PathBuf,
    /// File the external recognizer writes its latest result to.
    pub handoff_path: PathBuf,
    /// Optional directory of front-end assets served at `/`.
    pub static_dir: Option<PathBuf>,
    pub max_request_body_bytes: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            capacity: DEFAULT_CAPACITY,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            handoff_path: PathBuf::from(DEFAULT_HANDOFF_PATH),
            static_dir: None,
            max_request_body_bytes: DEFAULT_MAX_REQUEST_BODY_BYTES,
        }
    }
}

impl RelayConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Validation` if the file cannot be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| RelayError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| RelayError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(RelayError::validation(format!(
                "Unsupported config file format: {} (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    /// Search the current directory and its parents for `ocr-relay.toml`.
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(RelayError::Io)?;
        Self::discover_from(&current)
    }

    /// Search `start` and its parents for `ocr-relay.toml`.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::info!("Using config file {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
        }
        Ok(None)
    }

    /// Override fields from `OCR_RELAY_*` environment variables.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var(ENV_HOST)
            && !host.trim().is_empty()
        {
            self.host = host.trim().to_string();
        }

        if let Ok(value) = std::env::var(ENV_PORT) {
            match value.trim().parse::<u16>() {
                Ok(port) if port > 0 => self.port = port,
                _ => tracing::warn!("Failed to parse {}='{}', must be a port in 1-65535", ENV_PORT, value),
            }
        }

        if let Ok(path) = std::env::var(ENV_SNAPSHOT_PATH)
            && !path.trim().is_empty()
        {
            self.snapshot_path = PathBuf::from(path.trim());
        }

        if let Ok(path) = std::env::var(ENV_HANDOFF_PATH)
            && !path.trim().is_empty()
        {
            self.handoff_path = PathBuf::from(path.trim());
        }

        if let Ok(value) = std::env::var(ENV_MAX_REQUEST_BODY_BYTES) {
            match value.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => self.max_request_body_bytes = bytes,
                _ => tracing::warn!(
                    "Failed to parse {}='{}', must be a positive number of bytes",
                    ENV_MAX_REQUEST_BODY_BYTES,
                    value
                ),
            }
        }
    }

    /// Check that the configuration can be served.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(RelayError::validation("capacity must be at least 1"));
        }
        if self.port == 0 {
            return Err(RelayError::validation("port must be non-zero"));
        }
        if self.host.trim().is_empty() {
            return Err(RelayError::validation("host must not be empty"));
        }
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(RelayError::validation("snapshot_path must not be empty"));
        }
        if self.handoff_path.as_os_str().is_empty() {
            return Err(RelayError::validation("handoff_path must not be empty"));
        }
        if self.max_request_body_bytes == 0 {
            return Err(RelayError::validation("max_request_body_bytes must be positive"));
        }
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| RelayError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
