//! Viewer-facing server
//!
//! Configuration and the WebSocket listener that hands viewer connections to
//! the session.

pub mod config;
pub mod listener;

pub use config::{ServerConfig, DEFAULT_SOCKET_PORT};
pub use listener::ViewerListener;
