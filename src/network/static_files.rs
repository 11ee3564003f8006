//! Static file serving
//!
//! Serves the web UI from a root directory.

use std::fs;
use std::path::{Path, PathBuf};

use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use percent_encoding::percent_decode_str;

use crate::http::response;

/// Files served from a root directory
///
/// Dot-files (including the settings file) are never served.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    index_file: String,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, index_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            index_file: index_file.into(),
        }
    }

    /// Map a request path to a file under the root
    ///
    /// Segments are percent-decoded before they are checked. Returns `None`
    /// for traversal attempts, hidden segments and invalid UTF-8.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let mut resolved = self.root.clone();
        let mut has_segment = false;

        for segment in request_path.split('/').filter(|s| !s.is_empty()) {
            let segment = percent_decode_str(segment).decode_utf8().ok()?;
            if segment.starts_with('.') || segment.contains(['/', '\\', ':', '\0']) {
                return None;
            }
            resolved.push(&*segment);
            has_segment = true;
        }

        if !has_segment {
            resolved.push(&self.index_file);
        }
        Some(resolved)
    }

    /// Serve a request path
    pub fn serve(&self, request_path: &str) -> Response<Bytes> {
        let Some(path) = self.resolve(request_path) else {
            tracing::debug!("Refusing static path {:?}", request_path);
            return response::not_found();
        };

        if !path.is_file() {
            return response::not_found();
        }

        match fs::read(&path) {
            Ok(body) => response::bytes(StatusCode::OK, content_type_for(&path), body),
            Err(e) => {
                tracing::warn!("Error reading static file {}: {}", path.display(), e);
                response::not_found()
            }
        }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Content-Type for a file, by extension
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") | Some("htm") => response::HTML,
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript; charset=utf-8",
        Some("json") => response::JSON,
        Some("txt") => response::TEXT,
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
