//! Request bodies
//!
//! Collecting a body under a size limit and reading its headers.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};

use crate::error::{Result, StoreError};

/// Collect a whole body, failing once it grows past `max` bytes
///
/// Works for both `Content-Length` and chunked bodies.
pub async fn read_body<B>(body: B, max: usize) -> Result<Bytes>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, max).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(StoreError::PayloadTooLarge { max })
        }
        Err(e) => Err(StoreError::Protocol(e.to_string())),
    }
}

/// Value of the `Content-Length` header, if present and numeric
pub fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Media type of the body without parameters, lowercased
pub fn media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let media_type = value.split(';').next().unwrap_or_default().trim();
    Some(media_type.to_ascii_lowercase())
}
