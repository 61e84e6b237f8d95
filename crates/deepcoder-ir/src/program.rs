//! Statements and programs.
//!
//! Parsing here is purely lexical. A statement is checked for a known
//! operation, a lambda of the right class when the operation is
//! higher-order, and well-formed variable tokens. Whether those variables
//! exist, and whether the left-hand side is the next free index, depends on
//! the program state and is checked by the interpreter.

use std::fmt;
use std::str::FromStr;

use crate::schema::{Lambda, Operation};
use crate::tokens::{
    ASSIGN, INPUT, STATEMENT_SEPARATOR, join_token_lists, split_token_groups, split_tokens,
    variable_index_from_token, variable_token,
};
use crate::ParseError;

/// `x<lhs> = <operation> [<lambda>] x<arg>...`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    lhs: usize,
    operation: Operation,
    lambda: Option<Lambda>,
    args: Vec<usize>,
}

impl Statement {
    /// Build a statement, checking the lambda slot and argument count
    /// against the operation signature.
    pub fn new(
        lhs: usize,
        operation: Operation,
        lambda: Option<Lambda>,
        args: Vec<usize>,
    ) -> Result<Self, ParseError> {
        match (operation.required_lambda(), lambda) {
            (None, None) => {}
            (Some(expected), Some(lambda)) if lambda.class() != expected => {
                return Err(ParseError::LambdaMismatch {
                    operation: operation.to_string(),
                    lambda: lambda.to_string(),
                    expected,
                    got: lambda.class(),
                });
            }
            (Some(_), Some(_)) => {}
            (Some(expected), None) => {
                return Err(ParseError::end(format!("a {expected} lambda for {operation}")));
            }
            (None, Some(lambda)) => {
                return Err(ParseError::unexpected("a variable", lambda.token()));
            }
        }

        if args.len() != operation.variable_arity() {
            return Err(ParseError::TokenCount {
                operation: operation.to_string(),
                expected: 3 + operation.arity(),
                got: 3 + usize::from(lambda.is_some()) + args.len(),
            });
        }

        Ok(Self {
            lhs,
            operation,
            lambda,
            args,
        })
    }

    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ParseError> {
        let (lhs, rest) = parse_assignment(tokens)?;

        let [op_token, operands @ ..] = rest else {
            return Err(ParseError::end("an operation"));
        };
        let op_token = op_token.as_ref();
        let operation = Operation::from_token(op_token)
            .ok_or_else(|| ParseError::UnknownOperation(op_token.to_string()))?;

        if operands.len() != operation.arity() {
            return Err(ParseError::TokenCount {
                operation: operation.to_string(),
                expected: 3 + operation.arity(),
                got: tokens.len(),
            });
        }

        let (lambda, arg_tokens) = match (operation.required_lambda(), operands) {
            (Some(expected), [lambda_token, arg_tokens @ ..]) => {
                let token = lambda_token.as_ref();
                let lambda =
                    Lambda::from_token(token).ok_or_else(|| ParseError::UnknownLambda {
                        operation: operation.to_string(),
                        token: token.to_string(),
                    })?;
                if lambda.class() != expected {
                    return Err(ParseError::LambdaMismatch {
                        operation: operation.to_string(),
                        lambda: lambda.to_string(),
                        expected,
                        got: lambda.class(),
                    });
                }
                (Some(lambda), arg_tokens)
            }
            (Some(expected), []) => {
                return Err(ParseError::end(format!("a {expected} lambda for {operation}")));
            }
            (None, arg_tokens) => (None, arg_tokens),
        };

        let args = arg_tokens
            .iter()
            .map(|token| variable_index_from_token(token.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lhs,
            operation,
            lambda,
            args,
        })
    }

    pub fn tokenize(&self) -> Vec<String> {
        let mut tokens = vec![
            variable_token(self.lhs),
            ASSIGN.to_string(),
            self.operation.token().to_string(),
        ];
        if let Some(lambda) = self.lambda {
            tokens.push(lambda.token().to_string());
        }
        tokens.extend(self.args.iter().map(|&arg| variable_token(arg)));
        tokens
    }

    /// Index of the variable this statement defines.
    pub fn lhs(&self) -> usize {
        self.lhs
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn lambda(&self) -> Option<Lambda> {
        self.lambda
    }

    /// Indices of the variables passed as arguments, in order.
    pub fn args(&self) -> &[usize] {
        &self.args
    }
}

impl FromStr for Statement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tokens(&split_tokens(s))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokenize().join(" "))
    }
}

/// A program: `num_inputs` INPUT declarations followed by statements.
///
/// INPUT declarations occupy `x0..x(num_inputs-1)`; they are stored only as
/// a count since their positions are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Program {
    num_inputs: usize,
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(num_inputs: usize, statements: Vec<Statement>) -> Self {
        Self {
            num_inputs,
            statements,
        }
    }

    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ParseError> {
        let groups = split_token_groups(tokens, STATEMENT_SEPARATOR);
        if groups.is_empty() {
            return Err(ParseError::end("a statement"));
        }

        let mut num_inputs = 0;
        let mut statements = Vec::new();

        for (position, group) in groups.into_iter().enumerate() {
            if is_input_line(group) {
                if !statements.is_empty() {
                    return Err(ParseError::InputAfterStatement { position });
                }
                let (lhs, _) = parse_assignment(group)?;
                if lhs != position {
                    return Err(ParseError::VariableOrder {
                        expected: position,
                        got: lhs,
                    });
                }
                num_inputs += 1;
            } else {
                statements.push(Statement::from_tokens(group)?);
            }
        }

        Ok(Self {
            num_inputs,
            statements,
        })
    }

    pub fn tokenize(&self) -> Vec<String> {
        let inputs = (0..self.num_inputs)
            .map(|i| vec![variable_token(i), ASSIGN.to_string(), INPUT.to_string()]);
        let statements = self.statements.iter().map(Statement::tokenize);
        join_token_lists(inputs.chain(statements), STATEMENT_SEPARATOR)
    }

    /// Number of INPUT declarations.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Computation statements, excluding INPUT declarations.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Total number of lines, INPUT declarations included.
    pub fn len(&self) -> usize {
        self.num_inputs + self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tokens(&split_tokens(s))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokenize().join(" "))
    }
}

/// Parse `x<i> =` and return the index with the remaining tokens.
pub(crate) fn parse_assignment<S: AsRef<str>>(tokens: &[S]) -> Result<(usize, &[S]), ParseError> {
    let [lhs, assign, rest @ ..] = tokens else {
        return Err(ParseError::end("an assignment"));
    };
    let lhs = variable_index_from_token(lhs.as_ref())?;
    if assign.as_ref() != ASSIGN {
        return Err(ParseError::unexpected(ASSIGN, assign.as_ref()));
    }
    Ok((lhs, rest))
}

fn is_input_line<S: AsRef<str>>(tokens: &[S]) -> bool {
    matches!(tokens, [_, _, last] if last.as_ref() == INPUT)
}
