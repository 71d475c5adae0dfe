//! Crate-level error type
//!
//! Covers the faults that can actually abort something: binding the viewer
//! listener, reading input, the WebSocket handshake. Protocol-level problems
//! live in `protocol::error` and are never fatal.

use tokio_tungstenite::tungstenite;

/// Result alias for fallible server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fault from the transport or input layers
#[derive(Debug)]
pub enum Error {
    /// I/O failure (listener bind, input read)
    Io(std::io::Error),
    /// WebSocket handshake or protocol failure
    WebSocket(tungstenite::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::WebSocket(e) => write!(f, "websocket error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::WebSocket(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Self {
        Error::WebSocket(e)
    }
}
