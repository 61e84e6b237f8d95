//! Operation implementations.
//!
//! [`apply`] checks the arguments against the operation's signature, runs
//! it, and validates the result. Calling an operation with the wrong
//! arguments is a [`RunError`]; an operation that is undefined for its
//! arguments (head of an empty list, a result out of bounds) returns
//! `Ok(None)`.

use deepcoder_ir::{ArgType, Lambda, Operation, Value, ValueKind};
use tracing::debug;

use crate::lambdas;
use crate::{RunConfig, RunError};

/// An argument passed to an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Lambda(Lambda),
    Value(Value),
}

impl Argument {
    fn describe(&self) -> String {
        match self {
            Argument::Lambda(lambda) => format!("lambda({})", lambda.class()),
            Argument::Value(value) => value.kind().to_string(),
        }
    }

    fn matches(&self, expected: ArgType) -> bool {
        match (self, expected) {
            (Argument::Lambda(lambda), ArgType::Lambda(class)) => lambda.class() == class,
            (Argument::Value(value), ArgType::Value(kind)) => value.kind() == kind,
            _ => false,
        }
    }
}

impl From<Lambda> for Argument {
    fn from(lambda: Lambda) -> Self {
        Argument::Lambda(lambda)
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

impl From<i64> for Argument {
    fn from(n: i64) -> Self {
        Argument::Value(Value::Int(n))
    }
}

impl From<Vec<i64>> for Argument {
    fn from(items: Vec<i64>) -> Self {
        Argument::Value(Value::List(items))
    }
}

/// Apply an operation to its arguments.
pub fn apply(
    operation: Operation,
    args: &[Argument],
    config: RunConfig,
) -> Result<Option<Value>, RunError> {
    check_signature(operation, args)?;

    let result = run(operation, args, config)?;
    match result {
        Some(value) if !value.is_valid() => {
            debug!(%operation, %value, "result out of bounds");
            Ok(None)
        }
        result => Ok(result),
    }
}

fn check_signature(operation: Operation, args: &[Argument]) -> Result<(), RunError> {
    let inputs = operation.inputs();
    if args.len() != inputs.len() {
        return Err(RunError::ArgumentCount {
            operation,
            expected: inputs.len(),
            got: args.len(),
        });
    }
    for (position, (arg, &expected)) in args.iter().zip(inputs).enumerate() {
        if !arg.matches(expected) {
            return Err(RunError::ArgumentType {
                operation,
                position,
                expected,
                got: arg.describe(),
            });
        }
    }
    Ok(())
}

fn run(operation: Operation, args: &[Argument], config: RunConfig) -> Result<Option<Value>, RunError> {
    let value = match operation {
        Operation::Head => list_arg(operation, args, 0)?.first().copied().map(Value::Int),
        Operation::Last => list_arg(operation, args, 0)?.last().copied().map(Value::Int),
        Operation::Take => {
            let n = int_arg(operation, args, 0)?;
            let xs = list_arg(operation, args, 1)?;
            Some(Value::List(xs[..slice_index(n, xs.len())].to_vec()))
        }
        Operation::Drop => {
            let n = int_arg(operation, args, 0)?;
            let xs = list_arg(operation, args, 1)?;
            Some(Value::List(xs[slice_index(n, xs.len())..].to_vec()))
        }
        Operation::Access => {
            let i = int_arg(operation, args, 0)?;
            let xs = list_arg(operation, args, 1)?;
            usize::try_from(i)
                .ok()
                .and_then(|i| xs.get(i))
                .copied()
                .map(Value::Int)
        }
        Operation::Maximum => list_arg(operation, args, 0)?.iter().max().copied().map(Value::Int),
        Operation::Minimum => list_arg(operation, args, 0)?.iter().min().copied().map(Value::Int),
        Operation::Reverse => {
            let xs = list_arg(operation, args, 0)?;
            Some(Value::List(xs.iter().rev().copied().collect()))
        }
        Operation::Sort => {
            let mut xs = list_arg(operation, args, 0)?.to_vec();
            xs.sort_unstable();
            Some(Value::List(xs))
        }
        Operation::Sum => list_arg(operation, args, 0)?
            .iter()
            .try_fold(0i64, |acc, &x| acc.checked_add(x))
            .map(Value::Int),
        Operation::Map => {
            let f = lambdas::unary(lambda_arg(operation, args)?, config)?;
            let xs = list_arg(operation, args, 1)?;
            xs.iter()
                .map(|&x| f(x))
                .collect::<Option<Vec<_>>>()
                .map(Value::List)
        }
        Operation::Filter => {
            let p = lambdas::predicate(lambda_arg(operation, args)?)?;
            let xs = list_arg(operation, args, 1)?;
            Some(Value::List(xs.iter().copied().filter(|&x| p(x)).collect()))
        }
        Operation::Count => {
            let p = lambdas::predicate(lambda_arg(operation, args)?)?;
            let xs = list_arg(operation, args, 1)?;
            let count = xs.iter().filter(|&&x| p(x)).count();
            i64::try_from(count).ok().map(Value::Int)
        }
        Operation::ZipWith => {
            let f = lambdas::binary(lambda_arg(operation, args)?, config)?;
            let xs = list_arg(operation, args, 1)?;
            let ys = list_arg(operation, args, 2)?;
            xs.iter()
                .zip(ys)
                .map(|(&x, &y)| f(x, y))
                .collect::<Option<Vec<_>>>()
                .map(Value::List)
        }
        Operation::Scanl1 => {
            let f = lambdas::binary(lambda_arg(operation, args)?, config)?;
            let xs = list_arg(operation, args, 1)?;
            let mut scanned = Vec::with_capacity(xs.len());
            for &x in xs {
                let next = match scanned.last() {
                    Some(&acc) => f(acc, x),
                    None => Some(x),
                };
                let Some(next) = next else {
                    return Ok(None);
                };
                scanned.push(next);
            }
            Some(Value::List(scanned))
        }
    };
    Ok(value)
}

/// Resolve a slice bound the way `xs[:n]` / `xs[n:]` would: negative
/// values count from the end and everything saturates to `0..=len`.
fn slice_index(n: i64, len: usize) -> usize {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let index = if n < 0 { len.saturating_add(n).max(0) } else { n.min(len) };
    // `index` is within `0..=len`, which came from a usize.
    usize::try_from(index).unwrap_or(0)
}

fn lambda_arg(operation: Operation, args: &[Argument]) -> Result<Lambda, RunError> {
    match args.first() {
        Some(Argument::Lambda(lambda)) => Ok(*lambda),
        other => Err(type_error(operation, 0, operation.inputs()[0], other)),
    }
}

fn int_arg(operation: Operation, args: &[Argument], position: usize) -> Result<i64, RunError> {
    match args.get(position) {
        Some(Argument::Value(Value::Int(n))) => Ok(*n),
        other => Err(type_error(operation, position, ArgType::Value(ValueKind::Int), other)),
    }
}

fn list_arg<'a>(
    operation: Operation,
    args: &'a [Argument],
    position: usize,
) -> Result<&'a [i64], RunError> {
    match args.get(position) {
        Some(Argument::Value(Value::List(items))) => Ok(items.as_slice()),
        other => Err(type_error(operation, position, ArgType::Value(ValueKind::List), other)),
    }
}

fn type_error(
    operation: Operation,
    position: usize,
    expected: ArgType,
    got: Option<&Argument>,
) -> RunError {
    RunError::ArgumentType {
        operation,
        position,
        expected,
        got: got.map_or_else(|| "nothing".to_string(), Argument::describe),
    }
}
