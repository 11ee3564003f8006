//! Env file codec
//!
//! Decoding and encoding between file text and [`Settings`].

use super::Settings;

/// Byte order mark some editors put at the start of a file
const BOM: char = '\u{feff}';

// =============================================================================
// Decoding
// =============================================================================

/// Decode file contents into a settings mapping
///
/// Blank lines, `#` comments and lines without `=` are skipped.
/// Later duplicates win.
pub fn decode(contents: &str) -> Settings {
    let mut settings = Settings::new();

    for line in contents.split('\n') {
        let line = trim(line);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        settings.insert(trim(key).to_string(), strip_quotes(trim(value)).to_string());
    }

    settings
}

/// Trim whitespace and byte order marks from both ends
fn trim(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// Strip one layer of matching `"` or `'` quotes
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a settings mapping as file contents
///
/// One `KEY="VALUE"` line per entry, in key order.
pub fn encode(settings: &Settings) -> String {
    settings
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"\n", key, value))
        .collect()
}
