//! Parameter validators
//!
//! Each command parameter carries a `ParamType` that consumes leading tokens
//! from the argument cursor and checks them. Validation failures are ordinary
//! outcomes, never faults.

/// Cursor over the whitespace-split argument tokens of a command line.
///
/// Validators consume tokens from the front; whatever is left after the
/// parameter walk is extraneous.
#[derive(Debug)]
pub struct ArgCursor<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> ArgCursor<'a> {
    /// Create a cursor over the given tokens
    pub fn new(tokens: Vec<&'a str>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Take the next token, if any
    pub fn take(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Number of tokens not yet consumed
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    /// Whether all tokens have been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// Validator for a single command parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// Color channel, 0..=255
    Byte,
}

impl ParamType {
    /// Human-readable name used in error messages
    pub fn expected(&self) -> &'static str {
        match self {
            ParamType::Int => "integer",
            ParamType::Float => "number",
            ParamType::Byte => "byte (0-255)",
        }
    }

    /// Consume and check the leading token(s) for this parameter
    pub fn validate(&self, args: &mut ArgCursor<'_>) -> Result<(), ParamError> {
        let token = args.take().ok_or(ParamError::Missing)?;

        let ok = match self {
            ParamType::Int => token.parse::<i64>().is_ok(),
            ParamType::Float => token.parse::<f64>().is_ok(),
            ParamType::Byte => token.parse::<u8>().is_ok(),
        };

        if ok {
            Ok(())
        } else {
            Err(ParamError::Invalid {
                expected: self.expected(),
                found: token.to_string(),
            })
        }
    }
}

/// Outcome of a failed parameter check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The argument list ran out before this parameter
    Missing,
    /// A token was present but did not parse
    Invalid {
        /// What the validator wanted
        expected: &'static str,
        /// The offending token
        found: String,
    },
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::Missing => write!(f, "missing argument"),
            ParamError::Invalid { expected, found } => {
                write!(f, "expected {}, found \"{}\"", expected, found)
            }
        }
    }
}

impl std::error::Error for ParamError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(line: &str) -> ArgCursor<'_> {
        ArgCursor::new(line.split_whitespace().collect())
    }

    #[test]
    fn test_int_accepts_integers() {
        let mut args = cursor("640 -12");
        assert_eq!(ParamType::Int.validate(&mut args), Ok(()));
        assert_eq!(ParamType::Int.validate(&mut args), Ok(()));
        assert!(args.is_empty());
    }

    #[test]
    fn test_int_rejects_garbage() {
        let mut args = cursor("wide");
        let err = ParamType::Int.validate(&mut args).unwrap_err();
        assert_eq!(
            err,
            ParamError::Invalid {
                expected: "integer",
                found: "wide".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_argument() {
        let mut args = cursor("");
        assert_eq!(ParamType::Float.validate(&mut args), Err(ParamError::Missing));
    }

    #[test]
    fn test_byte_range() {
        let mut args = cursor("255 256");
        assert_eq!(ParamType::Byte.validate(&mut args), Ok(()));
        assert!(ParamType::Byte.validate(&mut args).is_err());
    }

    #[test]
    fn test_float_accepts_decimals() {
        let mut args = cursor("3.14");
        assert_eq!(ParamType::Float.validate(&mut args), Ok(()));
    }

    #[test]
    fn test_cursor_remaining() {
        let mut args = cursor("a b c");
        assert_eq!(args.remaining(), 3);
        args.take();
        assert_eq!(args.remaining(), 2);
    }
}
