//! # envstore
//!
//! A small HTTP service around a flat `.env` settings file:
//! - Line-oriented `KEY="VALUE"` encoding with comments and quoting
//! - Partial updates merged key by key
//! - A `SESSION_ID` key that accumulates tokens instead of being overwritten
//! - Reset to a fixed default set
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     HTTP Server                              │
//! │          (hyper connections on a tokio runtime)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Router                                  │
//! │        (/api/settings, /api/reset-settings, static)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  SettingsStore                               │
//! │      read_all / apply_update / reset_to_defaults             │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐               ┌─────────────────┐
//!   │     Policy      │               │     EnvFile     │
//!   │ (merge, reset)  │               │ (decode/encode) │
//!   └─────────────────┘               └────────┬────────┘
//!                                              │
//!                                              ▼
//!                                     ┌─────────────────┐
//!                                     │     Backend     │
//!                                     │ (file / memory) │
//!                                     └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod envfile;
pub mod policy;
pub mod store;
pub mod http;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::Config;
pub use envfile::Settings;
pub use store::SettingsStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of envstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
