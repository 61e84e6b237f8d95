//! DSL values.
//!
//! A value is either a bounded integer or a list of bounded integers. The
//! bound itself lives in [`crate::validation`]; constructing a `Value` never
//! checks it, so out-of-range results can be represented and then rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tokens::tokenize_value;
use crate::validation::in_bounds;

/// The two value kinds of the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A single integer.
    Int,
    /// A list of integers.
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "int"),
            ValueKind::List => write!(f, "list"),
        }
    }
}

/// A runtime value: an integer or a list of integers.
///
/// Serializes untagged, so `7` and `[1, 2]` are the JSON forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    List(Vec<i64>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::List(_) => ValueKind::List,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[i64]> {
        match self {
            Value::Int(_) => None,
            Value::List(items) => Some(items),
        }
    }

    /// Whether every integer in this value lies within the value bound.
    pub fn is_valid(&self) -> bool {
        match self {
            Value::Int(n) => in_bounds(*n),
            Value::List(items) => items.iter().copied().all(in_bounds),
        }
    }

    /// Token form of this value (`7`, `[ 1 , 2 ]`).
    pub fn tokenize(&self) -> Vec<String> {
        tokenize_value(self)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Vec<i64>> for Value {
    fn from(items: Vec<i64>) -> Self {
        Value::List(items)
    }
}

impl From<&[i64]> for Value {
    fn from(items: &[i64]) -> Self {
        Value::List(items.to_vec())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokenize().join(" "))
    }
}
