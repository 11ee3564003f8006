//! Request Router
//!
//! Maps HTTP requests onto store operations and static files.
//!
//! ## Routes
//! - `GET  /api/settings`       current settings as a JSON object
//! - `POST /api/settings`       merge a JSON or form body into the settings
//! - `POST /api/reset-settings` replace the settings with the defaults
//! - `GET  /...`                static files, `/` serves the index file
//!
//! `HEAD` is answered like `GET`; hyper drops the body.

use std::sync::Arc;

use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use serde_json::Value;

use crate::envfile::Settings;
use crate::error::{Result, StoreError};
use crate::http::{media_type, response};
use crate::store::{Backend, SettingsStore};

use super::StaticFiles;

const SETTINGS_PATH: &str = "/api/settings";
const RESET_PATH: &str = "/api/reset-settings";

const JSON_MEDIA_TYPE: &str = "application/json";
const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Routes requests to handlers
///
/// Handlers block on file I/O, so the connection layer calls
/// [`Router::handle`] from a blocking task.
pub struct Router<B: Backend> {
    store: Arc<SettingsStore<B>>,
    static_files: StaticFiles,
}

impl<B: Backend> Router<B> {
    pub fn new(store: Arc<SettingsStore<B>>, static_files: StaticFiles) -> Self {
        Self {
            store,
            static_files,
        }
    }

    /// Produce the response for a request with a fully read body
    pub fn handle(&self, request: &Request<Bytes>) -> Response<Bytes> {
        let method = request.method();
        let path = request.uri().path();

        match path {
            SETTINGS_PATH if is_read(method) => self.get_settings(),
            SETTINGS_PATH if method == Method::POST => self.update_settings(request),
            RESET_PATH if method == Method::POST => self.reset_settings(),
            SETTINGS_PATH | RESET_PATH => response::method_not_allowed(),
            _ if is_read(method) => self.static_files.serve(path),
            _ => response::not_found(),
        }
    }

    fn get_settings(&self) -> Response<Bytes> {
        response::json(StatusCode::OK, &self.store.read_all())
    }

    fn update_settings(&self, request: &Request<Bytes>) -> Response<Bytes> {
        let update = match media_type(request.headers()).as_deref() {
            None | Some(JSON_MEDIA_TYPE) => parse_update(request.body()),
            Some(FORM_MEDIA_TYPE) => Ok(parse_form_update(request.body())),
            Some(other) => {
                tracing::warn!("Rejected settings update with content type {}", other);
                return response::error(
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "Expected a JSON or form-encoded body.",
                );
            }
        };

        let update = match update {
            Ok(update) => update,
            Err(e) => {
                tracing::warn!("Rejected settings update: {}", e);
                return response::error(StatusCode::BAD_REQUEST, &e.to_string());
            }
        };

        match self.store.apply_update(&update) {
            Ok(_) => response::message("Settings updated and applied!"),
            Err(_) => response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save settings."),
        }
    }

    fn reset_settings(&self) -> Response<Bytes> {
        match self.store.reset_to_defaults() {
            Ok(_) => response::message("Settings reset to defaults successfully!"),
            Err(_) => response::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to reset settings."),
        }
    }
}

fn is_read(method: &Method) -> bool {
    method == Method::GET || method == Method::HEAD
}

/// Parse a JSON request body into a partial update
///
/// The body must be a JSON object. An empty body is an empty update.
/// String values are taken as-is; any other value is stored as its JSON
/// text (`true`, `42`, `null`).
pub fn parse_update(body: &[u8]) -> Result<Settings> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Settings::new());
    }

    let value: Value = serde_json::from_slice(body)?;
    let Value::Object(object) = value else {
        return Err(StoreError::BadRequest(
            "settings update must be a JSON object".to_string(),
        ));
    };

    Ok(object
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

/// Parse an `application/x-www-form-urlencoded` body into a partial update
///
/// `+` and percent escapes are decoded. A repeated key keeps its last value.
pub fn parse_form_update(body: &[u8]) -> Settings {
    form_urlencoded::parse(body).into_owned().collect()
}
