//! Values, catalog schema, and token grammar for the DeepCoder list DSL.
//!
//! This crate holds everything that can be decided without running a
//! program: the value model and its bound, the closed operation and lambda
//! catalog, and the bidirectional mapping between tokens and statements or
//! programs. Execution lives in `deepcoder-runtime`.

mod error;
mod program;
pub mod schema;
pub mod tokens;
mod validation;
mod value;
pub mod vocab;

pub use error::ParseError;
pub use program::{Program, Statement};
pub use schema::{ArgType, Catalog, Lambda, LambdaClass, Operation, ScalarType};
pub use tokens::{
    detokenize_value, join_token_lists, tokenize_value, variable_index_from_token, variable_token,
};
pub use validation::{V_MAX, in_bounds, validate};
pub use value::{Value, ValueKind};
pub use vocab::Vocabulary;

#[cfg(test)]
mod tests;
