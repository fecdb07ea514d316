//! Runtime configuration.
//!
//! Values resolve in three layers: compiled defaults, then an optional TOML
//! file (path taken from `MVA_CONFIG`), then environment variable overrides
//! (`HOST`, `PORT`, `PORTS_PATH`, `KNOWLEDGE_DIR`, `UPLOAD_DIR`).

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Server bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path to the JSON port coordinate table.
    #[serde(default = "default_ports_path")]
    pub ports_path: PathBuf,
    /// Directory of seed documents indexed at startup.
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: PathBuf,
    /// Directory where uploaded documents are stored.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ports_path() -> PathBuf {
    PathBuf::from("data/ports.json")
}

fn default_knowledge_dir() -> PathBuf {
    PathBuf::from("data/knowledge")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("storage/uploads")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ports_path: default_ports_path(),
            knowledge_dir: default_knowledge_dir(),
            upload_dir: default_upload_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Resolve configuration: `MVA_CONFIG` file if set, then env overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match env::var("MVA_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        if let Ok(path) = env::var("PORTS_PATH") {
            self.ports_path = PathBuf::from(path);
        }
        if let Ok(dir) = env::var("KNOWLEDGE_DIR") {
            self.knowledge_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(dir);
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
