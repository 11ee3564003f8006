//! HTTP Server
//!
//! Accepts connections and serves each one as a task on a tokio runtime.

use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::Result;
use crate::store::{Backend, SettingsStore};

use super::{Connection, Router, StaticFiles};

/// HTTP server for envstore
pub struct Server<B: Backend + 'static> {
    config: Config,
    router: Arc<Router<B>>,
    listener: Option<TcpListener>,
    shutdown: ShutdownHandle,
}

/// Cloneable handle that stops a running server
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    /// Ask the server to stop accepting and close its connections
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
        // Stores a permit when the acceptor is not waiting yet
        self.notify.notify_one();
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl<B: Backend + 'static> Server<B> {
    /// Create a new server with the given config and store
    pub fn new(config: Config, store: Arc<SettingsStore<B>>) -> Self {
        let static_files = StaticFiles::new(&config.static_dir, config.index_file.clone());
        Self {
            router: Arc::new(Router::new(store, static_files)),
            config,
            listener: None,
            shutdown: ShutdownHandle::default(),
        }
    }

    /// Bind the listen address without serving yet
    ///
    /// Returns the bound address, which resolves port 0.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        self.config.validate()?;

        let listener = TcpListener::bind(&self.config.listen_addr)?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        tracing::info!("Listening on http://{}", addr);
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Start the server (blocking until shutdown)
    ///
    /// Builds a multi-threaded runtime with `worker_threads` workers.
    pub fn run(&mut self) -> Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let Some(listener) = self.listener.take() else {
            return Ok(());
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads.max(1))
            .thread_name("envstore-worker")
            .enable_all()
            .build()?;

        runtime.block_on(self.accept_loop(listener))
    }

    async fn accept_loop(&self, listener: TcpListener) -> Result<()> {
        let listener = tokio::net::TcpListener::from_std(listener)?;
        let mut connections = JoinSet::new();

        while !self.shutdown.is_shutdown() {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        tracing::trace!("Accepted connection from {}", addr);
                        let connection = Connection::new(
                            Arc::clone(&self.router),
                            self.config.max_body_size,
                            self.config.read_timeout_ms,
                            addr,
                        );
                        connections.spawn(connection.serve(stream));
                    }
                    Err(e) => tracing::warn!("Accept failed: {}", e),
                },
                _ = self.shutdown.notify.notified() => {}
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!("Connection task failed: {}", e);
                    }
                }
            }
        }

        tracing::info!("Shutting down, closing {} connection(s)", connections.len());
        connections.shutdown().await;
        Ok(())
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Handle for stopping the server from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Bound address, once `bind` has been called and before `run` takes it
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }
}
