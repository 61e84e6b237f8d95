//! Interpreter for the DeepCoder list DSL.
//!
//! Programs parsed with `deepcoder-ir` are executed here against concrete
//! inputs. Three outcomes are kept apart:
//!
//! - `Err(RunError)`: the program or the call is malformed (wrong input
//!   count, a statement assigning the wrong variable, a reference to an
//!   undefined variable, an operation given the wrong arguments).
//! - `Ok(None)`: the program is fine but undefined for these inputs, e.g.
//!   `Head` of an empty list or a result outside the value bound.
//! - `Ok(Some(state))`: every statement produced a value.

pub mod config;
pub mod interpreter;
pub mod lambdas;
pub mod operations;
pub mod state;

pub use config::{ConfigError, RunConfig};
pub use interpreter::Interpreter;
pub use operations::Argument;
pub use state::ProgramState;

use deepcoder_ir::{ArgType, Lambda, LambdaClass, Operation, ParseError};

/// Errors raised while running a syntactically valid program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error("statement assigns x{got} but the next variable is x{expected}")]
    LhsIndex { expected: usize, got: usize },

    #[error("variable x{index} is not defined (state holds {len} variables)")]
    UndefinedVariable { index: usize, len: usize },

    #[error("program declares {expected} inputs, got {got}")]
    InputCount { expected: usize, got: usize },

    #[error("invalid argument count for {operation}: expected {expected}, got {got}")]
    ArgumentCount {
        operation: Operation,
        expected: usize,
        got: usize,
    },

    #[error("invalid argument type for {operation} at position {position}: expected {expected}, got {got}")]
    ArgumentType {
        operation: Operation,
        position: usize,
        expected: ArgType,
        got: String,
    },

    #[error("lambda {lambda} is {got}, expected {expected}")]
    LambdaClass {
        lambda: Lambda,
        expected: LambdaClass,
        got: LambdaClass,
    },
}

/// Any error surfaced by the runtime.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("run error: {0}")]
    Run(#[from] RunError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
