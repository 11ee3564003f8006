//! Policy Module
//!
//! Rules for turning the current settings plus a request into new settings.
//!
//! ## Responsibilities
//! - Merge a partial update into the current mapping, key by key
//! - Accumulate session identifiers instead of overwriting them
//! - Produce the fixed default mapping used by a reset

mod merge;
mod reset;
mod session;

pub use merge::merge;
pub use reset::{default_settings, AUTO_STATUS_VIEW_KEY, DEFAULT_SESSION_TOKENS, VPS_KEY};
pub use session::{accumulate, join_tokens, tokens, SESSION_KEY, SESSION_SEPARATOR};
