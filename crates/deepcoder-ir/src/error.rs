//! Parse errors.

use thiserror::Error;

use crate::schema::LambdaClass;

/// Errors raised when tokens or text do not follow the DSL grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid variable token: {0:?}")]
    InvalidVariable(String),

    #[error("invalid integer token: {0:?}")]
    InvalidInteger(String),

    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    #[error("unknown lambda for {operation}: {token:?}")]
    UnknownLambda { operation: String, token: String },

    #[error("{operation} needs a {expected} lambda, got {lambda} ({got})")]
    LambdaMismatch {
        operation: String,
        lambda: String,
        expected: LambdaClass,
        got: LambdaClass,
    },

    #[error("expected {expected:?}, got {got:?}")]
    UnexpectedToken { expected: String, got: String },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("invalid token count for {operation}: expected {expected}, got {got}")]
    TokenCount {
        operation: String,
        expected: usize,
        got: usize,
    },

    #[error("variable x{got} defined out of order, expected x{expected}")]
    VariableOrder { expected: usize, got: usize },

    #[error("INPUT declared by statement {position} after a computation statement")]
    InputAfterStatement { position: usize },

    #[error("value out of bounds: {0}")]
    OutOfBounds(String),

    #[error("token not in vocabulary: {0:?}")]
    UnknownToken(String),

    #[error("token id not in vocabulary: {0}")]
    UnknownTokenId(u32),
}

impl ParseError {
    pub(crate) fn unexpected(expected: impl Into<String>, got: impl Into<String>) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            got: got.into(),
        }
    }

    pub(crate) fn end(expected: impl Into<String>) -> Self {
        ParseError::UnexpectedEnd {
            expected: expected.into(),
        }
    }
}
