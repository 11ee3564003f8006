//! Settings Store
//!
//! The configuration store that coordinates codec, policy and backend.
//!
//! ## Responsibilities
//! - Decode the backend contents on every read
//! - Apply the merge policy to partial updates
//! - Replace everything with the defaults on reset
//! - Encode and persist the result in one write

use parking_lot::Mutex;

use crate::config::Config;
use crate::envfile::{self, Settings};
use crate::error::Result;
use crate::policy;

use super::{Backend, FileBackend};

/// The configuration store
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader
///
/// - **Updates** (apply_update/reset_to_defaults): Serialized by `write_lock`
///   - Only ONE read-modify-write cycle at a time within this process
///   - Other processes writing the same file can still race
///
/// - **Reads** (read_all): No lock
///   - The file is replaced by rename, so a reader sees either the old
///     or the new contents, never a mix
pub struct SettingsStore<B: Backend> {
    /// Where the encoded settings live
    backend: B,

    /// Mapping written on reset
    defaults: Settings,

    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl SettingsStore<FileBackend> {
    /// Open a file-backed store from config
    ///
    /// The file does not need to exist yet; it is created on first write.
    pub fn open(config: &Config) -> Self {
        Self::new(FileBackend::new(&config.env_path), config.defaults.clone())
    }
}

impl<B: Backend> SettingsStore<B> {
    /// Create a store over any backend
    pub fn new(backend: B, defaults: Settings) -> Self {
        Self {
            backend,
            defaults,
            write_lock: Mutex::new(()),
        }
    }

    /// Read the current settings
    ///
    /// Never fails: an unreadable or missing file reads as empty.
    pub fn read_all(&self) -> Settings {
        match self.backend.read() {
            Ok(contents) => envfile::decode(&contents),
            Err(e) => {
                tracing::warn!(
                    "Error reading settings from {}: {}",
                    self.backend.describe(),
                    e
                );
                Settings::new()
            }
        }
    }

    /// Merge a partial update and persist the result
    ///
    /// Steps:
    /// 1. Acquire write lock
    /// 2. Read current settings
    /// 3. Merge update
    /// 4. Persist (all or nothing)
    ///
    /// Returns the full mapping after the update.
    pub fn apply_update(&self, update: &Settings) -> Result<Settings> {
        let _write_guard = self.write_lock.lock();

        let mut settings = self.read_all();
        policy::merge(&mut settings, update);

        self.persist(&settings)?;

        tracing::info!(
            "Applied update of {} key(s) to {}",
            update.len(),
            self.backend.describe()
        );
        Ok(settings)
    }

    /// Replace the stored settings with the defaults
    pub fn reset_to_defaults(&self) -> Result<Settings> {
        let _write_guard = self.write_lock.lock();

        let settings = self.defaults.clone();
        self.persist(&settings)?;

        tracing::info!("Reset settings in {} to defaults", self.backend.describe());
        Ok(settings)
    }

    fn persist(&self, settings: &Settings) -> Result<()> {
        let contents = envfile::encode(settings);
        if let Err(e) = self.backend.write(&contents) {
            tracing::error!("Error saving settings: {}", e);
            return Err(e);
        }
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the mapping written on reset
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }
}
