//! Merge policy
//!
//! Applies a partial update to the current settings.

use crate::envfile::Settings;

use super::session::{accumulate, SESSION_KEY};

/// Merge `update` into `current` in place
///
/// `SESSION_ID` accumulates (see [`accumulate`]); every other key is
/// overwritten. Keys missing from `update` are left alone.
pub fn merge(current: &mut Settings, update: &Settings) {
    for (key, value) in update {
        if key == SESSION_KEY {
            let merged = accumulate(current.get(key).map(String::as_str), value);
            current.insert(key.clone(), merged);
        } else {
            current.insert(key.clone(), value.clone());
        }
    }
}
