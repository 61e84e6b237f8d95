//! Program state: the values of `x0, x1, ...` so far.

use std::fmt;
use std::str::FromStr;

use deepcoder_ir::tokens::{ASSIGN, STATEMENT_SEPARATOR, split_token_groups, split_tokens};
use deepcoder_ir::{
    ParseError, Value, detokenize_value, join_token_lists, variable_index_from_token,
    variable_token,
};

use crate::RunError;

/// Append-only record of variable values; position `i` holds `xi`.
///
/// `Clone` is the copy operation: the clone owns its values, so appending
/// to it leaves the original untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProgramState {
    values: Vec<Value>,
}

impl ProgramState {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of variable `x<index>`.
    pub fn get(&self, index: usize) -> Result<&Value, RunError> {
        self.values.get(index).ok_or(RunError::UndefinedVariable {
            index,
            len: self.values.len(),
        })
    }

    /// Append a value as the next variable.
    pub fn add_result(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Value of the most recently defined variable.
    pub fn get_output(&self) -> Option<&Value> {
        self.values.last()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn tokenize(&self) -> Vec<String> {
        let groups = self.values.iter().enumerate().map(|(i, value)| {
            let mut tokens = vec![variable_token(i), ASSIGN.to_string()];
            tokens.extend(value.tokenize());
            tokens
        });
        join_token_lists(groups, STATEMENT_SEPARATOR)
    }

    /// Parse `x0 = <value> | x1 = <value> | ...`.
    ///
    /// Variables must appear in order starting from `x0`, and every value
    /// must be within bounds.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ParseError> {
        let values = split_token_groups(tokens, STATEMENT_SEPARATOR)
            .into_iter()
            .enumerate()
            .map(|(position, group)| parse_binding(position, group))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }
}

fn parse_binding<S: AsRef<str>>(position: usize, tokens: &[S]) -> Result<Value, ParseError> {
    let [lhs, assign, value_tokens @ ..] = tokens else {
        return Err(ParseError::UnexpectedEnd {
            expected: format!("a binding for {}", variable_token(position)),
        });
    };

    let index = variable_index_from_token(lhs.as_ref())?;
    if index != position {
        return Err(ParseError::VariableOrder {
            expected: position,
            got: index,
        });
    }
    if assign.as_ref() != ASSIGN {
        return Err(ParseError::UnexpectedToken {
            expected: ASSIGN.to_string(),
            got: assign.as_ref().to_string(),
        });
    }

    let value = detokenize_value(value_tokens)?;
    if !value.is_valid() {
        return Err(ParseError::OutOfBounds(value.to_string()));
    }
    Ok(value)
}

impl FromStr for ProgramState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tokens(&split_tokens(s))
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokenize().join(" "))
    }
}

impl From<Vec<Value>> for ProgramState {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProgramState {
        ProgramState::new(vec![Value::Int(2), Value::List(vec![6, 7])])
    }

    #[test]
    fn test_program_state() {
        let state = sample();
        assert_eq!(state.len(), 2);
        assert_eq!(state.get(0), Ok(&Value::Int(2)));
        assert_eq!(
            state.get(2),
            Err(RunError::UndefinedVariable { index: 2, len: 2 })
        );
        assert_eq!(state.get_output(), Some(&Value::List(vec![6, 7])));
    }

    #[test]
    fn test_copy_is_independent() {
        let state = sample();
        let mut copy = state.clone();
        assert_eq!(state, copy);

        copy.add_result(Value::Int(0));
        assert_eq!(copy.len(), 3);
        assert_eq!(state.len(), 2);
        assert_ne!(state, copy);
    }

    #[test]
    fn test_tokenize() {
        let state = sample();
        let expected: Vec<String> = ["x0", "=", "2", "|", "x1", "=", "[", "6", ",", "7", "]"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(state.tokenize(), expected);
        assert_eq!(state.to_string(), "x0 = 2 | x1 = [ 6 , 7 ]");
    }

    #[test]
    fn test_from_str() {
        let state: ProgramState = "x0 = 2 | x1 = [6, 7]".parse().unwrap();
        assert_eq!(state, sample());
        assert_eq!(state.to_string(), "x0 = 2 | x1 = [ 6 , 7 ]");
    }

    #[test]
    fn test_from_tokens() {
        let state = ProgramState::from_tokens(&["x0", "=", "[", "3", "]"]).unwrap();
        assert_eq!(state.get_output(), Some(&Value::List(vec![3])));
    }

    #[test]
    fn test_roundtrip() {
        for state in [
            sample(),
            ProgramState::default(),
            ProgramState::new(vec![Value::List(vec![]), Value::Int(-256)]),
        ] {
            assert_eq!(ProgramState::from_tokens(&state.tokenize()).unwrap(), state);
        }
    }

    #[test]
    fn test_from_str_raises() {
        let cases = [
            ("bad_lhs_name", "y0 = 3"),
            ("lhs_wrong_index", "x0 = 3 | x2 = 4"),
            ("bad_equal_sign", "x0 : 3"),
            ("invalid_result", "x0 = None"),
            ("out_of_bounds", "x0 = [1, 4000]"),
            ("missing_value", "x0 ="),
            ("trailing_separator", "x0 = 1 |"),
        ];
        for (name, source) in cases {
            assert!(
                source.parse::<ProgramState>().is_err(),
                "{name}: {source:?} should not parse"
            );
        }
    }

    #[test]
    fn test_from_str_wrong_index() {
        assert_eq!(
            "x0 = 3 | x2 = 4".parse::<ProgramState>(),
            Err(ParseError::VariableOrder { expected: 1, got: 2 })
        );
    }
}
