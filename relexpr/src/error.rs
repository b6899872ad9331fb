use strum::EnumIs;
use thiserror::Error;

use crate::pos::Pos;

/// Errors raised while tokenizing, building, or rewriting expressions.
///
/// Every error is fatal to the current compilation unit; nothing in this crate retries or
/// recovers from one.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum Error {
    /// Malformed source text, including I/O failures of the underlying reader.
    #[error("Syntax error at {pos}: {message}")]
    Syntax { pos: Pos, message: String },

    /// A user-written expression is ill-typed.
    ///
    /// Raised by the type checker; the typed builders in this crate never produce it.
    #[error("Type error at {pos}: {message}")]
    Type { pos: Pos, message: String },

    /// A caller violated a precondition of this crate (untyped operand, bad arity,
    /// out-of-range multiplicity tag, ...). It signals a bug in the front end, not a
    /// mistake in the model.
    #[error("Fatal error at {pos}: {message}")]
    Internal { pos: Pos, message: String },
}

impl Error {
    pub fn syntax(pos: Pos, message: impl Into<String>) -> Self {
        Error::Syntax {
            pos,
            message: message.into(),
        }
    }

    pub fn type_error(pos: Pos, message: impl Into<String>) -> Self {
        Error::Type {
            pos,
            message: message.into(),
        }
    }

    pub fn internal(pos: Pos, message: impl Into<String>) -> Self {
        Error::Internal {
            pos,
            message: message.into(),
        }
    }

    /// Where the error was detected.
    pub fn pos(&self) -> &Pos {
        match self {
            Error::Syntax { pos, .. } | Error::Type { pos, .. } | Error::Internal { pos, .. } => {
                pos
            }
        }
    }

    /// The message without the position prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Syntax { message, .. }
            | Error::Type { message, .. }
            | Error::Internal { message, .. } => message,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
