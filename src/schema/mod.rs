//! Command schema
//!
//! Declares, per chunk type, the set of valid commands, their ordered
//! parameters, and parameter validators. Built once at startup; the protocol
//! validator consults it for every content line.

pub mod command;
pub mod param;
pub mod registry;

pub use command::{CommandParam, CommandSpec};
pub use param::{ArgCursor, ParamError, ParamType};
pub use registry::SchemaRegistry;
