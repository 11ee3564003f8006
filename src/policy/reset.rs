//! Reset policy
//!
//! The fixed mapping written when settings are reset.

use crate::envfile::Settings;

use super::session::{join_tokens, SESSION_KEY};

/// Flag key: running on a VPS
pub const VPS_KEY: &str = "VPS";

/// Flag key: automatically view statuses
pub const AUTO_STATUS_VIEW_KEY: &str = "AUTO_STATUS_VIEW";

/// Session tokens present after a reset, oldest first
pub const DEFAULT_SESSION_TOKENS: [&str; 4] = [
    "levanter_septorch",
    "levanter_Antarimedia",
    "levanter_VICTORCEEI",
    "levanter_1795deb488d3574777b6483764bdaa6db8",
];

/// Build the default settings
///
/// Exactly three keys. A reset replaces the stored mapping with this,
/// nothing from the previous state survives.
pub fn default_settings() -> Settings {
    let mut settings = Settings::new();
    settings.insert(SESSION_KEY.to_string(), join_tokens(&DEFAULT_SESSION_TOKENS));
    settings.insert(VPS_KEY.to_string(), "true".to_string());
    settings.insert(AUTO_STATUS_VIEW_KEY.to_string(), "false".to_string());
    settings
}
