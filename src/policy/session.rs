//! Session identifier accumulation
//!
//! `SESSION_ID` holds every session token seen so far, oldest first,
//! joined by `;_;`.

/// Reserved key whose value accumulates instead of being overwritten
pub const SESSION_KEY: &str = "SESSION_ID";

/// Literal separator between accumulated session tokens
pub const SESSION_SEPARATOR: &str = ";_;";

/// Combine the stored session value with an incoming one
///
/// - Nothing stored (absent or empty): the incoming value as-is
/// - Incoming already a substring of the stored value: unchanged
/// - Otherwise: appended after a separator
///
/// The containment check is on the whole string, not per token, so an
/// incoming `"ab"` is dropped when a stored token `"abc"` exists.
pub fn accumulate(current: Option<&str>, incoming: &str) -> String {
    match current {
        Some(stored) if !stored.is_empty() => {
            if stored.contains(incoming) {
                stored.to_string()
            } else {
                let mut joined =
                    String::with_capacity(stored.len() + SESSION_SEPARATOR.len() + incoming.len());
                joined.push_str(stored);
                joined.push_str(SESSION_SEPARATOR);
                joined.push_str(incoming);
                joined
            }
        }
        _ => incoming.to_string(),
    }
}

/// Split a stored session value into its tokens
pub fn tokens(value: &str) -> Vec<&str> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(SESSION_SEPARATOR).collect()
}

/// Join tokens into a stored session value
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SESSION_SEPARATOR)
}
