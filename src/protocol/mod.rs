//! Wire protocol
//!
//! Line-oriented, newline-terminated text. Chunk declarations (`$CONFIG`,
//! `$FRAME`) and terminators (`$END_CONFIG`, `$END_FRAME`) bracket runs of
//! whitespace-separated command lines. The engine validates everything and
//! halts for nothing.

pub mod chunk;
pub mod engine;
pub mod error;
pub mod line;
pub mod validate;

pub use chunk::{Chunk, ChunkStore, ChunkType, LineKind};
pub use engine::{Engine, ProtocolState};
pub use error::ProtocolError;
pub use line::LineReader;
pub use validate::validate_command;
