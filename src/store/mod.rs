//! Store Module
//!
//! The configuration store: reads, merges and persists settings.
//!
//! ## Responsibilities
//! - Rebuild the mapping from the backend on every read (no cache)
//! - Serialize read-modify-write cycles behind a write lock
//! - Persist all-or-nothing; a failed write leaves the old contents
//!
//! ## Backends
//! The store talks to storage through the [`Backend`] trait:
//! - [`FileBackend`]: a real file, replaced atomically (temp file + rename)
//! - [`MemoryBackend`]: in-memory contents with injectable failures, for tests

mod backend;
mod settings_store;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use settings_store::SettingsStore;
