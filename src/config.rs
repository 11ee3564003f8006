//! Configuration for envstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::envfile::Settings;
use crate::error::{Result, StoreError};
use crate::policy;

/// Main configuration for an envstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Path of the persisted settings file
    pub env_path: PathBuf,

    /// Mapping written by a reset
    pub defaults: Settings,

    // -------------------------------------------------------------------------
    // Static Files
    // -------------------------------------------------------------------------
    /// Root directory for static files
    pub static_dir: PathBuf,

    /// File served for `GET /`, relative to `static_dir`
    pub index_file: String,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Number of runtime worker threads
    pub worker_threads: usize,

    /// Time a client has to send a request head (milliseconds)
    pub read_timeout_ms: u64,

    /// Largest accepted request body (bytes)
    pub max_body_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_path: PathBuf::from("./.env"),
            defaults: policy::default_settings(),
            static_dir: PathBuf::from("."),
            index_file: "septorch.html".to_string(),
            listen_addr: "127.0.0.1:3000".to_string(),
            worker_threads: 8,
            read_timeout_ms: 5000,
            max_body_size: 1024 * 1024, // 1 MB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check settings that the builder cannot enforce on its own
    pub fn validate(&self) -> Result<()> {
        if self.index_file.is_empty() || self.index_file.contains(['/', '\\']) {
            return Err(StoreError::Config(format!(
                "index file must be a bare file name, got {:?}",
                self.index_file
            )));
        }
        if self.max_body_size == 0 {
            return Err(StoreError::Config("max body size must be non-zero".to_string()));
        }
        if self.read_timeout_ms == 0 {
            return Err(StoreError::Config("read timeout must be non-zero".to_string()));
        }
        if self.worker_threads == 0 {
            return Err(StoreError::Config("at least one worker thread is required".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the settings file path
    pub fn env_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.env_path = path.into();
        self
    }

    /// Replace the mapping written on reset
    pub fn defaults(mut self, defaults: Settings) -> Self {
        self.config.defaults = defaults;
        self
    }

    /// Set the static file root
    pub fn static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.static_dir = path.into();
        self
    }

    /// Set the file served for `GET /`
    pub fn index_file(mut self, name: impl Into<String>) -> Self {
        self.config.index_file = name.into();
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the number of worker threads (at least one)
    pub fn worker_threads(mut self, count: usize) -> Self {
        self.config.worker_threads = count.max(1);
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the maximum request body size (in bytes)
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.config.max_body_size = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
