//! Server configuration

use crate::cli::Cli;
use bpserve_models::default_model_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model artifact path; resolved next to the executable when unset
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from file, then apply CLI and environment overrides
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = Self::from_file(&cli.config)?;

        if let Some(host) = &cli.host {
            config.host = host.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        if let Some(path) = &cli.model_path {
            config.model_path = Some(path.clone());
        }

        Ok(config)
    }

    /// Read a YAML config file, or use defaults when it does not exist
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config file {}: {}", path.display(), e))
    }

    /// Artifact path to load at startup
    pub fn resolve_model_path(&self) -> anyhow::Result<PathBuf> {
        match &self.model_path {
            Some(path) => Ok(path.clone()),
            None => Ok(default_model_path()?),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model_path: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}
