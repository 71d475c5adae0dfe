//! Command descriptors
//!
//! A `CommandSpec` describes one protocol command: its name and the ordered
//! parameters it takes. Specs are built once at startup and looked up by the
//! validator on every content line.

use super::param::ParamType;

/// A single named parameter of a command
#[derive(Debug, Clone)]
pub struct CommandParam {
    /// Parameter name, used in error messages
    pub name: &'static str,
    /// Validator for this parameter
    pub ty: ParamType,
}

impl CommandParam {
    /// Create a new parameter descriptor
    pub fn new(name: &'static str, ty: ParamType) -> Self {
        Self { name, ty }
    }
}

/// Descriptor for one command: name plus ordered parameters
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Command name (first token of a content line)
    pub name: &'static str,
    /// Parameters in declared order
    pub params: Vec<CommandParam>,
}

impl CommandSpec {
    /// Create a command with no parameters
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }

    /// Append a parameter (builder style)
    pub fn param(mut self, name: &'static str, ty: ParamType) -> Self {
        self.params.push(CommandParam::new(name, ty));
        self
    }

    /// Append three byte parameters forming an RGB color
    pub fn color(self) -> Self {
        self.param("red", ParamType::Byte)
            .param("green", ParamType::Byte)
            .param("blue", ParamType::Byte)
    }
}
