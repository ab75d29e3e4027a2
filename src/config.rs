//! Server configuration.
//!
//! Loaded from an optional YAML file, then overridden by environment
//! variables (`LISTEN`, `DOCUMENT_ROOT`, `LOG_LEVEL`).

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Environment variable naming the config file when no path is given.
pub const CONFIG_ENV: &str = "VIDSTREAM_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub stream: StreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub document_root: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Bytes pulled from the transport per read event.
    pub read_chunk: usize,
    /// Bytes the TCP transport accepts per write event.
    pub write_window: usize,
    /// Refuse request paths containing `..` segments.
    pub contain_paths: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            document_root: "./video".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            read_chunk: crate::session::state::DEFAULT_READ_CHUNK,
            write_window: 16 * 1024,
            contain_paths: true,
        }
    }
}

impl Config {
    /// Loads the config named by `path` (or `VIDSTREAM_CONFIG`), then applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV).ok();
        let path = path.or(from_env.as_deref().map(Path::new));

        let mut cfg = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Self::default(),
        };

        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Applies overrides from `lookup`, normally the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Some(root) = lookup("DOCUMENT_ROOT") {
            self.server.document_root = root;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.server.log_level = level;
        }
    }

    /// Checks what the server cannot start without.
    pub fn validate(&self) -> Result<()> {
        let root = Path::new(&self.server.document_root);
        let meta = std::fs::metadata(root)
            .with_context(|| format!("document root {}", root.display()))?;
        if !meta.is_dir() {
            bail!("'{}' is not a directory", root.display());
        }

        if self.stream.read_chunk == 0 {
            bail!("stream.read_chunk must be greater than zero");
        }
        if self.stream.write_window == 0 {
            bail!("stream.write_window must be greater than zero");
        }

        Ok(())
    }
}
