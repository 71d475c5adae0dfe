//! scrawl — a validated drawing-command relay
//!
//! Ingests a line-oriented command stream describing configuration and
//! per-frame drawing instructions, validates every command against a
//! declared schema, groups lines into typed chunks, and republishes the
//! stream verbatim to at most one connected viewer, optionally rate-limited.
//!
//! # Architecture
//!
//! ```text
//!   stdin / any AsyncRead
//!          │
//!     LineReader ──► SessionEvent::Line ─┐
//!                                        ▼
//!   viewer WebSocket ──► connect/close  Session (single consumer)
//!                                        │
//!                     [DeliveryQueue, if rate-limited]
//!                                        │
//!                          Engine (chunk state machine)
//!                                        │
//!                          validator ── ChunkStore
//!                                        │
//!                          Broadcaster ──► viewer (CONFIG replay on join)
//! ```
//!
//! Malformed input is reported and forwarded anyway: the pump never stops.

pub mod error;
pub mod protocol;
pub mod relay;
pub mod schema;
pub mod server;
pub mod session;

pub use error::{Error, Result};
pub use protocol::{Chunk, ChunkStore, ChunkType, Engine, LineReader, ProtocolError};
pub use relay::{Broadcaster, DeliveryQueue, ViewerHandle};
pub use schema::{CommandSpec, ParamType, SchemaRegistry};
pub use server::{ServerConfig, ViewerListener};
pub use session::{Session, SessionEvent};
