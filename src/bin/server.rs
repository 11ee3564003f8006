//! envstore Server Binary
//!
//! Starts the HTTP server for the settings file.

use std::sync::Arc;

use clap::Parser;
use envstore::network::Server;
use envstore::{Config, SettingsStore};
use tracing_subscriber::{fmt, EnvFilter};

/// envstore Server
#[derive(Parser, Debug)]
#[command(name = "envstore-server")]
#[command(about = "Serve and edit a .env settings file over HTTP")]
#[command(version)]
struct Args {
    /// Settings file
    #[arg(short, long, env = "ENVSTORE_FILE", default_value = "./.env")]
    env_file: String,

    /// Directory served as static files
    #[arg(short, long, env = "ENVSTORE_STATIC_DIR", default_value = ".")]
    static_dir: String,

    /// File served for `/`
    #[arg(short, long, default_value = "septorch.html")]
    index_file: String,

    /// Listen address (host:port)
    #[arg(short, long, env = "ENVSTORE_LISTEN", default_value = "127.0.0.1:3000")]
    listen: String,

    /// Connection worker threads
    #[arg(short, long, default_value = "8")]
    workers: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,envstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("envstore Server v{}", envstore::VERSION);
    tracing::info!("Settings file: {}", args.env_file);
    tracing::info!("Static directory: {}", args.static_dir);

    // Build config from args
    let config = Config::builder()
        .env_path(&args.env_file)
        .static_dir(&args.static_dir)
        .index_file(&args.index_file)
        .listen_addr(&args.listen)
        .worker_threads(args.workers)
        .build();

    let store = Arc::new(SettingsStore::open(&config));
    tracing::info!("Loaded {} setting(s)", store.read_all().len());

    let mut server = Server::new(config, store);
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
