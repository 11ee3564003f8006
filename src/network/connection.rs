//! Connection Handler
//!
//! Serves HTTP/1.1 on one accepted socket.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpStream;

use crate::error::StoreError;
use crate::http::{declared_length, read_body, response};
use crate::store::Backend;

use super::Router;

/// Handles a single client connection
pub struct Connection<B: Backend> {
    /// Shared request router
    router: Arc<Router<B>>,

    /// Largest accepted request body
    max_body_size: usize,

    /// Time allowed for each request head
    read_timeout: Duration,

    /// Peer address for logging
    peer_addr: SocketAddr,
}

impl<B: Backend + 'static> Connection<B> {
    /// Create a new connection handler
    pub fn new(
        router: Arc<Router<B>>,
        max_body_size: usize,
        read_timeout_ms: u64,
        peer_addr: SocketAddr,
    ) -> Self {
        Self {
            router,
            max_body_size,
            read_timeout: Duration::from_millis(read_timeout_ms),
            peer_addr,
        }
    }

    /// Serve requests until the client closes or goes idle
    pub async fn serve(self, stream: TcpStream) {
        tracing::debug!("Connection established from {}", self.peer_addr);

        if let Err(e) = stream.set_nodelay(true) {
            tracing::warn!("Failed to set TCP_NODELAY for {}: {}", self.peer_addr, e);
        }

        let router = self.router;
        let max_body_size = self.max_body_size;
        let service = service_fn(move |request| {
            let router = Arc::clone(&router);
            async move { Ok::<_, Infallible>(handle_request(router, request, max_body_size).await) }
        });

        let result = http1::Builder::new()
            .timer(TokioTimer::new())
            .header_read_timeout(self.read_timeout)
            .keep_alive(true)
            .serve_connection(TokioIo::new(stream), service)
            .await;

        match result {
            Ok(()) => tracing::debug!("Client {} disconnected", self.peer_addr),
            Err(e) if e.is_incomplete_message() || e.is_timeout() => {
                tracing::debug!("Client {} went away: {}", self.peer_addr, e)
            }
            Err(e) => tracing::warn!("Connection {} ended with error: {}", self.peer_addr, e),
        }
    }
}

/// Read the body, then run the router on a blocking thread
async fn handle_request<B: Backend + 'static>(
    router: Arc<Router<B>>,
    request: Request<Incoming>,
    max_body_size: usize,
) -> Response<Full<Bytes>> {
    let (parts, body) = request.into_parts();
    tracing::trace!("{} {}", parts.method, parts.uri);

    // Refuse from the headers alone when the client announces the size
    if let Some(length) = declared_length(&parts.headers) {
        if length > max_body_size {
            let e = StoreError::PayloadTooLarge { max: max_body_size };
            tracing::warn!("{} {}: {}", parts.method, parts.uri, e);
            return response::error(StatusCode::PAYLOAD_TOO_LARGE, &e.to_string()).map(Full::new);
        }
    }

    let body = match read_body(body, max_body_size).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("{} {}: {}", parts.method, parts.uri, e);
            let status = match e {
                StoreError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            return response::error(status, &e.to_string()).map(Full::new);
        }
    };

    let request = Request::from_parts(parts, body);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = match tokio::task::spawn_blocking(move || router.handle(&request)).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Handler for {} {} failed: {}", method, path, e);
            response::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    };

    tracing::debug!("{} {} -> {}", method, path, response.status().as_u16());
    response.map(Full::new)
}
