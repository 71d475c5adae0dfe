//! Protocol error taxonomy
//!
//! Everything here is reported to the operator log and is explicitly
//! non-fatal: malformed input never stops the pump.

use crate::schema::ParamError;

use super::chunk::ChunkType;

/// Error raised while classifying, nesting, or validating protocol lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A declaration arrived before the previous chunk was terminated
    ChunkAlreadyOpen {
        /// Type of the chunk that is still open
        open: ChunkType,
        /// Type the new declaration tried to open
        declared: ChunkType,
    },
    /// A CONFIG chunk was declared twice, or after a FRAME chunk
    MisplacedConfig,
    /// A terminator for one chunk type arrived inside another
    TerminatorMismatch {
        /// Type of the open chunk
        open: ChunkType,
        /// Type named by the terminator
        terminated: ChunkType,
    },
    /// A content or terminator line arrived while no chunk was open
    OrphanContent {
        /// The offending line
        line: String,
    },
    /// The command name is not in the schema for the active chunk type
    UnknownCommand {
        /// Active chunk type
        chunk_type: ChunkType,
        /// The unrecognized name
        name: String,
    },
    /// A parameter failed its validator
    Parameter {
        /// Command the parameter belongs to
        command: String,
        /// Name of the failing parameter
        param: &'static str,
        /// What went wrong
        source: ParamError,
    },
    /// Tokens were left over after all parameters were consumed
    ExtraneousArguments {
        /// The full offending line
        line: String,
    },
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::ChunkAlreadyOpen { open, declared } => write!(
                f,
                "found {} declaration before the open {} chunk was terminated",
                declared, open
            ),
            ProtocolError::MisplacedConfig => write!(
                f,
                "unexpected CONFIG chunk: at most one CONFIG chunk is allowed \
                 and it must be the first chunk"
            ),
            ProtocolError::TerminatorMismatch { open, terminated } => {
                write!(f, "found {} terminator in {} chunk", terminated, open)
            }
            ProtocolError::OrphanContent { line } => {
                write!(f, "line outside any chunk: {}", line)
            }
            ProtocolError::UnknownCommand { chunk_type, name } => {
                write!(f, "unknown {} command \"{}\"", chunk_type, name)
            }
            ProtocolError::Parameter {
                command,
                param,
                source,
            } => write!(
                f,
                "error processing param \"{}\" in command \"{}\": {}",
                param, command, source
            ),
            ProtocolError::ExtraneousArguments { line } => {
                write!(f, "extraneous parameters: {}", line)
            }
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Parameter { source, .. } => Some(source),
            _ => None,
        }
    }
}
