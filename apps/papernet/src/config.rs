//! # Server Configuration
//!
//! Layered, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config`)
//! 3. Environment (`PORT`, `PAPERNET_CORS_ORIGINS`, `PAPERNET_RATE_LIMIT`)
//! 4. CLI flags (applied by the `serve` command)

use papernet_core::{DataSources, PapernetError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_DATA_DIR: &str = "data";
/// Requests per second across all clients.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

pub const ENV_PORT: &str = "PORT";
pub const ENV_CORS_ORIGINS: &str = "PAPERNET_CORS_ORIGINS";
pub const ENV_RATE_LIMIT: &str = "PAPERNET_RATE_LIMIT";

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory searched for `papers`, `citations` and `authorships` tables.
    pub data_dir: PathBuf,
    pub papers: Option<PathBuf>,
    pub citations: Option<PathBuf>,
    pub authorships: Option<PathBuf>,
    /// Comma-separated allowed origins, or `*`. `None` allows all origins.
    pub cors_origins: Option<String>,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            papers: None,
            citations: None,
            authorships: None,
            cors_origins: None,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, PapernetError> {
        toml::from_str(text).map_err(|e| PapernetError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PapernetError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PapernetError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults, then the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, PapernetError> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        Ok(base.apply_env())
    }

    /// Overlay the process environment.
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`. Unparseable values are ignored with a warning.
    #[must_use]
    pub fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_PORT) {
            match raw.trim().parse() {
                Ok(port) => self.port = port,
                Err(e) => tracing::warn!("Ignoring {}='{}': {}", ENV_PORT, raw, e),
            }
        }
        if let Some(origins) = lookup(ENV_CORS_ORIGINS) {
            self.cors_origins = Some(origins);
        }
        if let Some(raw) = lookup(ENV_RATE_LIMIT) {
            match raw.trim().parse() {
                Ok(rps) => self.rate_limit = rps,
                Err(e) => tracing::warn!("Ignoring {}='{}': {}", ENV_RATE_LIMIT, raw, e),
            }
        }
        self
    }

    /// `host:port` for binding.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn data_sources(&self) -> DataSources {
        DataSources {
            data_dir: self.data_dir.clone(),
            papers: self.papers.clone(),
            citations: self.citations.clone(),
            authorships: self.authorships.clone(),
        }
    }
}
