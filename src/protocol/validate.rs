//! Command validation
//!
//! Splits a content line into name and argument tokens and checks it against
//! the schema for the active chunk type. Every error is reported and
//! non-fatal; the line is stored and broadcast regardless of validity.

use crate::schema::{ArgCursor, SchemaRegistry};

use super::chunk::ChunkType;
use super::error::ProtocolError;

/// Validate a content line against the schema for `chunk_type`
///
/// Returns every error found. An unknown command stops further checks for
/// the line; a failing parameter does not stop the remaining parameters.
pub fn validate_command(
    registry: &SchemaRegistry,
    chunk_type: ChunkType,
    line: &str,
) -> Vec<ProtocolError> {
    let mut tokens = line.split_whitespace();

    let Some(name) = tokens.next() else {
        return Vec::new();
    };

    let Some(spec) = registry.lookup(chunk_type, name) else {
        return vec![ProtocolError::UnknownCommand {
            chunk_type,
            name: name.to_string(),
        }];
    };

    let mut errors = Vec::new();
    let mut args = ArgCursor::new(tokens.collect());

    for param in &spec.params {
        if let Err(source) = param.ty.validate(&mut args) {
            errors.push(ProtocolError::Parameter {
                command: name.to_string(),
                param: param.name,
                source,
            });
        }
    }

    if !args.is_empty() {
        errors.push(ProtocolError::ExtraneousArguments {
            line: line.to_string(),
        });
    }

    errors
}
