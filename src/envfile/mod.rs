//! Env File Module
//!
//! Line-oriented textual encoding of the settings mapping.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ # comment lines start with '#'          │
//! │                                         │
//! │ KEY="VALUE"                             │
//! │ OTHER='single quotes decode too'        │
//! │ BARE=unquoted values are fine           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Writes always use `KEY="VALUE"`. Values are not escaped, so an embedded
//! double quote or newline does not survive a round trip.

mod codec;

use std::collections::BTreeMap;

pub use codec::{decode, encode, strip_quotes};

/// The full settings mapping
///
/// BTreeMap keeps encoding order sorted and deterministic.
pub type Settings = BTreeMap<String, String>;
