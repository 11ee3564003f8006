//! Network Module
//!
//! HTTP server and request routing.
//!
//! ## Architecture
//! - Single accept loop on a multi-threaded tokio runtime
//! - One task per connection, HTTP/1.1 handled by hyper
//! - Requests routed through Router to the SettingsStore on blocking threads

mod server;
mod connection;
mod router;
mod static_files;

pub use server::{Server, ShutdownHandle};
pub use connection::Connection;
pub use router::{parse_form_update, parse_update, Router};
pub use static_files::{content_type_for, StaticFiles};
