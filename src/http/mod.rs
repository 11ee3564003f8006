//! HTTP Module
//!
//! Helpers shared by the router and the connection handler. Framing,
//! chunked bodies and keep-alive are left to hyper; this module only turns
//! bodies into bytes and builds the responses the API sends.
//!
//! ### Status Codes Used
//! - 200: OK
//! - 400: BAD_REQUEST
//! - 404: NOT_FOUND
//! - 405: METHOD_NOT_ALLOWED
//! - 413: PAYLOAD_TOO_LARGE
//! - 415: UNSUPPORTED_MEDIA_TYPE
//! - 500: INTERNAL_SERVER_ERROR

mod body;
pub mod response;

pub use body::{declared_length, media_type, read_body};
