//! Schema registry
//!
//! The registry maps each chunk type to the commands it admits. It is built
//! once at startup and read-only afterwards; a failed lookup is a validation
//! outcome for the offending line, never a fault.

use std::collections::HashMap;

use crate::protocol::chunk::ChunkType;

use super::command::CommandSpec;
use super::param::ParamType;

/// Immutable command table, keyed by chunk type then command name
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    commands: HashMap<ChunkType, HashMap<&'static str, CommandSpec>>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under the given chunk type (builder style)
    pub fn register(mut self, chunk_type: ChunkType, spec: CommandSpec) -> Self {
        self.commands
            .entry(chunk_type)
            .or_default()
            .insert(spec.name, spec);
        self
    }

    /// Look up a command by chunk type and name
    pub fn lookup(&self, chunk_type: ChunkType, name: &str) -> Option<&CommandSpec> {
        self.commands.get(&chunk_type)?.get(name)
    }

    /// Number of commands registered for a chunk type
    pub fn command_count(&self, chunk_type: ChunkType) -> usize {
        self.commands.get(&chunk_type).map_or(0, HashMap::len)
    }

    /// The standard command table understood by the viewer
    ///
    /// CONFIG commands set up the canvas once; FRAME commands mirror the
    /// 2D drawing primitives the viewer applies per frame.
    pub fn standard() -> Self {
        use ChunkType::{Config, Frame};
        use ParamType::{Float, Int};

        Self::new()
            // One-time canvas configuration
            .register(
                Config,
                CommandSpec::new("canvas_size")
                    .param("width", Int)
                    .param("height", Int),
            )
            .register(Config, CommandSpec::new("letterbox_color").color())
            // Per-frame drawing primitives
            .register(Frame, CommandSpec::new("fill_style").color())
            .register(Frame, CommandSpec::new("stroke_style").color())
            .register(Frame, CommandSpec::new("line_width").param("width", Float))
            .register(
                Frame,
                CommandSpec::new("move_to").param("x", Float).param("y", Float),
            )
            .register(
                Frame,
                CommandSpec::new("line_to").param("x", Float).param("y", Float),
            )
            .register(Frame, CommandSpec::new("begin_path"))
            .register(Frame, CommandSpec::new("close_path"))
            .register(Frame, CommandSpec::new("fill"))
            .register(Frame, CommandSpec::new("stroke"))
            .register(
                Frame,
                CommandSpec::new("fill_rect")
                    .param("x", Float)
                    .param("y", Float)
                    .param("width", Float)
                    .param("height", Float),
            )
            .register(
                Frame,
                CommandSpec::new("stroke_rect")
                    .param("x", Float)
                    .param("y", Float)
                    .param("width", Float)
                    .param("height", Float),
            )
            .register(
                Frame,
                CommandSpec::new("clear_rect")
                    .param("x", Float)
                    .param("y", Float)
                    .param("width", Float)
                    .param("height", Float),
            )
            .register(
                Frame,
                CommandSpec::new("arc")
                    .param("x", Float)
                    .param("y", Float)
                    .param("radius", Float)
                    .param("start_angle", Float)
                    .param("end_angle", Float),
            )
            .register(Frame, CommandSpec::new("rotate").param("angle", Float))
            .register(
                Frame,
                CommandSpec::new("translate").param("x", Float).param("y", Float),
            )
            .register(
                Frame,
                CommandSpec::new("scale").param("x", Float).param("y", Float),
            )
    }
}
