//! Chunk types and storage
//!
//! The wire protocol groups content lines into typed chunks bracketed by a
//! declaration line (`$CONFIG`) and a matching terminator (`$END_CONFIG`).
//! Closed chunks land in the `ChunkStore`; only the most recent per type is
//! retained, which is all the CONFIG replay path needs.

/// Marker sigil that opens every declaration and terminator line
pub const MARKER_SIGIL: &str = "$";

/// Prefix that distinguishes a terminator from a declaration
pub const END_PREFIX: &str = "END_";

/// The two chunk types the protocol knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    /// Singleton, session-leading chunk carrying one-time viewer configuration
    Config,
    /// Repeatable chunk carrying one set of rendering instructions
    Frame,
}

impl ChunkType {
    /// All chunk types, in declaration-scan order
    pub const ALL: [ChunkType; 2] = [ChunkType::Config, ChunkType::Frame];

    /// Wire name of this chunk type
    pub fn name(&self) -> &'static str {
        match self {
            ChunkType::Config => "CONFIG",
            ChunkType::Frame => "FRAME",
        }
    }

    /// The declaration line that opens a chunk of this type
    pub fn declaration(&self) -> String {
        format!("{}{}", MARKER_SIGIL, self.name())
    }

    /// The terminator line that closes a chunk of this type
    pub fn terminator(&self) -> String {
        format!("{}{}{}", MARKER_SIGIL, END_PREFIX, self.name())
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a single protocol line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a chunk of the given type
    Declaration(ChunkType),
    /// Closes a chunk of the given type
    Termination(ChunkType),
    /// A command line belonging to the open chunk
    Content,
}

impl LineKind {
    /// Classify a raw line
    ///
    /// Markers match on the whole line, so a command that merely starts with
    /// a `$` cannot be mistaken for a declaration.
    pub fn classify(line: &str) -> LineKind {
        for chunk_type in ChunkType::ALL {
            if line == chunk_type.declaration() {
                return LineKind::Declaration(chunk_type);
            }
            if line == chunk_type.terminator() {
                return LineKind::Termination(chunk_type);
            }
        }
        LineKind::Content
    }
}

/// A bounded, typed run of protocol lines
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Type of this chunk
    pub chunk_type: ChunkType,
    /// Declaration, content lines, and terminator, in arrival order
    pub lines: Vec<String>,
    /// Whether the matching terminator has been seen
    pub terminated: bool,
}

impl Chunk {
    /// Open a new chunk from its declaration line
    pub fn open(chunk_type: ChunkType, declaration: &str) -> Self {
        Self {
            chunk_type,
            lines: vec![declaration.to_string()],
            terminated: false,
        }
    }

    /// Append a raw line to this chunk
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Append the terminator line and mark the chunk closed
    pub fn close(&mut self, terminator: &str) {
        self.lines.push(terminator.to_string());
        self.terminated = true;
    }

    /// Lines in chronological order, the order replay must use
    pub fn replay_lines(&self) -> &[String] {
        &self.lines
    }
}

/// Holds the most recently closed chunk of each type
///
/// FRAME chunks are only used transiently, but keeping the latest one is
/// cheap and keeps the accessors symmetric. Counters back the CONFIG
/// ordering checks in the state machine.
#[derive(Debug, Default)]
pub struct ChunkStore {
    latest_config: Option<Chunk>,
    latest_frame: Option<Chunk>,
    config_closed: u64,
    frame_closed: u64,
}

impl ChunkStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a closed chunk, replacing any previous chunk of the same type
    pub fn push_closed(&mut self, chunk: Chunk) {
        debug_assert!(chunk.terminated);
        match chunk.chunk_type {
            ChunkType::Config => {
                self.config_closed += 1;
                self.latest_config = Some(chunk);
            }
            ChunkType::Frame => {
                self.frame_closed += 1;
                self.latest_frame = Some(chunk);
            }
        }
    }

    /// The most recently closed chunk of the given type, if any
    pub fn latest(&self, chunk_type: ChunkType) -> Option<&Chunk> {
        match chunk_type {
            ChunkType::Config => self.latest_config.as_ref(),
            ChunkType::Frame => self.latest_frame.as_ref(),
        }
    }

    /// Total chunks of the given type closed this session
    pub fn closed_count(&self, chunk_type: ChunkType) -> u64 {
        match chunk_type {
            ChunkType::Config => self.config_closed,
            ChunkType::Frame => self.frame_closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_lines() {
        assert_eq!(ChunkType::Config.declaration(), "$CONFIG");
        assert_eq!(ChunkType::Config.terminator(), "$END_CONFIG");
        assert_eq!(ChunkType::Frame.declaration(), "$FRAME");
        assert_eq!(ChunkType::Frame.terminator(), "$END_FRAME");
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            LineKind::classify("$CONFIG"),
            LineKind::Declaration(ChunkType::Config)
        );
        assert_eq!(
            LineKind::classify("$END_FRAME"),
            LineKind::Termination(ChunkType::Frame)
        );
        assert_eq!(LineKind::classify("canvas_size 640 480"), LineKind::Content);
        // Whole-line match: lookalikes are content, not markers
        assert_eq!(LineKind::classify("$CONFIGURE"), LineKind::Content);
    }

    #[test]
    fn test_chunk_lifecycle() {
        let mut chunk = Chunk::open(ChunkType::Config, "$CONFIG");
        chunk.push("canvas_size 640 480");
        chunk.close("$END_CONFIG");

        assert!(chunk.terminated);
        assert_eq!(
            chunk.replay_lines(),
            &["$CONFIG", "canvas_size 640 480", "$END_CONFIG"]
        );
    }

    #[test]
    fn test_store_keeps_latest() {
        let mut store = ChunkStore::new();

        let mut first = Chunk::open(ChunkType::Frame, "$FRAME");
        first.push("stroke");
        first.close("$END_FRAME");
        store.push_closed(first);

        let mut second = Chunk::open(ChunkType::Frame, "$FRAME");
        second.push("fill");
        second.close("$END_FRAME");
        store.push_closed(second);

        assert_eq!(store.closed_count(ChunkType::Frame), 2);
        let latest = store.latest(ChunkType::Frame).unwrap();
        assert_eq!(latest.lines[1], "fill");
        assert!(store.latest(ChunkType::Config).is_none());
    }
}
