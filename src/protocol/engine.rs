//! Protocol engine
//!
//! The chunk state machine. Classifies each line as declaration, terminator,
//! or content, enforces chunk nesting and CONFIG ordering, accumulates lines
//! into the open chunk, and hands content lines to the command validator.
//!
//! Every error is reported and degraded around, never fatal: the pump keeps
//! running on malformed input, and the caller forwards every line to the
//! broadcaster regardless of what happened here.

use crate::schema::SchemaRegistry;

use super::chunk::{Chunk, ChunkStore, ChunkType, LineKind};
use super::error::ProtocolError;
use super::validate::validate_command;

/// Mutable protocol position: which chunk is open, what has opened before
#[derive(Debug, Default)]
pub struct ProtocolState {
    /// The chunk currently being accumulated, if any
    open_chunk: Option<Chunk>,
    /// Whether a CONFIG chunk has ever been opened this session
    config_opened: bool,
    /// Whether a FRAME chunk has ever been opened this session
    frame_opened: bool,
}

impl ProtocolState {
    /// Type of the currently open chunk, if any
    pub fn open_chunk_type(&self) -> Option<ChunkType> {
        self.open_chunk.as_ref().map(|c| c.chunk_type)
    }

    fn mark_opened(&mut self, chunk_type: ChunkType) {
        match chunk_type {
            ChunkType::Config => self.config_opened = true,
            ChunkType::Frame => self.frame_opened = true,
        }
    }
}

/// Chunk state machine plus validator driver
pub struct Engine {
    registry: SchemaRegistry,
    state: ProtocolState,
    store: ChunkStore,
}

impl Engine {
    /// Create an engine with the given command schema
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            state: ProtocolState::default(),
            store: ChunkStore::new(),
        }
    }

    /// Closed-chunk storage, the source for CONFIG replay
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// Current protocol position
    pub fn state(&self) -> &ProtocolState {
        &self.state
    }

    /// Run one line through the state machine
    ///
    /// Returns every error reported for the line. Callers forward the line
    /// to the broadcaster afterwards irrespective of the outcome.
    pub fn handle_line(&mut self, line: &str) -> Vec<ProtocolError> {
        let errors = match LineKind::classify(line) {
            LineKind::Declaration(chunk_type) => self.on_declaration(chunk_type, line),
            LineKind::Termination(chunk_type) => self.on_termination(chunk_type, line),
            LineKind::Content => self.on_content(line),
        };

        for error in &errors {
            tracing::error!(error = %error, "protocol error");
        }

        errors
    }

    fn on_declaration(&mut self, chunk_type: ChunkType, line: &str) -> Vec<ProtocolError> {
        if let Some(open) = self.state.open_chunk_type() {
            // Not honored as an opening event, only reported
            return vec![ProtocolError::ChunkAlreadyOpen {
                open,
                declared: chunk_type,
            }];
        }

        let mut errors = Vec::new();

        // At most one CONFIG chunk per session, and it must come first
        if chunk_type == ChunkType::Config
            && (self.state.config_opened || self.state.frame_opened)
        {
            errors.push(ProtocolError::MisplacedConfig);
        }

        // Degrade, don't halt: the chunk opens even when misplaced
        self.state.mark_opened(chunk_type);
        self.state.open_chunk = Some(Chunk::open(chunk_type, line));

        errors
    }

    fn on_termination(&mut self, chunk_type: ChunkType, line: &str) -> Vec<ProtocolError> {
        let Some(mut chunk) = self.state.open_chunk.take() else {
            return vec![ProtocolError::OrphanContent {
                line: line.to_string(),
            }];
        };

        let mut errors = Vec::new();

        if chunk.chunk_type != chunk_type {
            // Mismatch is reported, not blocking: the open chunk still closes
            errors.push(ProtocolError::TerminatorMismatch {
                open: chunk.chunk_type,
                terminated: chunk_type,
            });
        }

        chunk.close(line);
        self.store.push_closed(chunk);

        errors
    }

    fn on_content(&mut self, line: &str) -> Vec<ProtocolError> {
        let Some(chunk) = self.state.open_chunk.as_mut() else {
            // Orphan policy: report and skip chunk bookkeeping; the line is
            // still forwarded by the caller
            return vec![ProtocolError::OrphanContent {
                line: line.to_string(),
            }];
        };

        // Stored regardless of validation outcome
        chunk.push(line);
        validate_command(&self.registry, chunk.chunk_type, line)
    }
}
