//! Response builders
//!
//! Every response carries a fully buffered body, so hyper can always send a
//! `Content-Length`.

use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const JSON: &str = "application/json; charset=utf-8";
pub const HTML: &str = "text/html; charset=utf-8";
pub const TEXT: &str = "text/plain; charset=utf-8";

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Create a response with an arbitrary body
pub fn bytes(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response<Bytes> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// Create a JSON response from any serializable value
pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response<Bytes> {
    match serde_json::to_vec(value) {
        Ok(body) => bytes(status, JSON, body),
        Err(e) => {
            tracing::error!("Failed to serialize response body: {}", e);
            bytes(StatusCode::INTERNAL_SERVER_ERROR, TEXT, "Internal Server Error")
        }
    }
}

/// Create an OK response carrying `{"message": ...}`
pub fn message(message: &str) -> Response<Bytes> {
    json(StatusCode::OK, &MessageBody { message })
}

/// Create an error response carrying `{"error": ...}`
pub fn error(status: StatusCode, error: &str) -> Response<Bytes> {
    json(status, &ErrorBody { error })
}

pub fn not_found() -> Response<Bytes> {
    bytes(StatusCode::NOT_FOUND, TEXT, "Not Found")
}

pub fn method_not_allowed() -> Response<Bytes> {
    bytes(StatusCode::METHOD_NOT_ALLOWED, TEXT, "Method Not Allowed")
}
