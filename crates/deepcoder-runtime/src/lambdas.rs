//! Lambda implementations.
//!
//! Each [`Lambda`] maps to one pure function. Arithmetic lambdas compute in
//! `i128`, which holds every result of an `i64` operand exactly, then pass
//! through [`RunConfig::reduce`]. A result that still does not fit `i64` is
//! returned as `None`. Predicates are returned untouched.

use deepcoder_ir::{Lambda, LambdaClass};

use crate::{RunConfig, RunError};

/// The function behind a lambda, typed by its class.
#[derive(Debug, Clone, Copy)]
pub enum LambdaFn {
    Unary(fn(i128) -> i128),
    Predicate(fn(i64) -> bool),
    Binary(fn(i128, i128) -> i128),
}

impl LambdaFn {
    pub fn of(lambda: Lambda) -> Self {
        match lambda {
            Lambda::PlusOne => LambdaFn::Unary(|x| x + 1),
            Lambda::MinusOne => LambdaFn::Unary(|x| x - 1),
            Lambda::TimesTwo => LambdaFn::Unary(|x| x * 2),
            Lambda::DivTwo => LambdaFn::Unary(|x| x.div_euclid(2)),
            Lambda::Negate => LambdaFn::Unary(|x| -x),
            Lambda::Square => LambdaFn::Unary(|x| x * x),
            Lambda::TimesThree => LambdaFn::Unary(|x| x * 3),
            Lambda::DivThree => LambdaFn::Unary(|x| x.div_euclid(3)),
            Lambda::TimesFour => LambdaFn::Unary(|x| x * 4),
            Lambda::DivFour => LambdaFn::Unary(|x| x.div_euclid(4)),
            Lambda::IsPositive => LambdaFn::Predicate(|x| x > 0),
            Lambda::IsNegative => LambdaFn::Predicate(|x| x < 0),
            Lambda::IsEven => LambdaFn::Predicate(|x| x % 2 == 0),
            Lambda::IsOdd => LambdaFn::Predicate(|x| x % 2 != 0),
            Lambda::Add => LambdaFn::Binary(|x, y| x + y),
            Lambda::Subtract => LambdaFn::Binary(|x, y| x - y),
            Lambda::Multiply => LambdaFn::Binary(|x, y| x * y),
            Lambda::Min => LambdaFn::Binary(i128::min),
            Lambda::Max => LambdaFn::Binary(i128::max),
        }
    }
}

/// An `int -> int` lambda with the run's modulus applied.
///
/// Returns `None` when the result does not fit `i64`.
pub fn unary(lambda: Lambda, config: RunConfig) -> Result<impl Fn(i64) -> Option<i64>, RunError> {
    match LambdaFn::of(lambda) {
        LambdaFn::Unary(f) => Ok(move |x| narrow(config.reduce(f(i128::from(x))))),
        _ => Err(class_error(lambda, LambdaClass::IntToInt)),
    }
}

/// An `int -> bool` lambda.
pub fn predicate(lambda: Lambda) -> Result<fn(i64) -> bool, RunError> {
    match LambdaFn::of(lambda) {
        LambdaFn::Predicate(p) => Ok(p),
        _ => Err(class_error(lambda, LambdaClass::IntToBool)),
    }
}

/// An `(int, int) -> int` lambda with the run's modulus applied.
///
/// Returns `None` when the result does not fit `i64`.
pub fn binary(
    lambda: Lambda,
    config: RunConfig,
) -> Result<impl Fn(i64, i64) -> Option<i64>, RunError> {
    match LambdaFn::of(lambda) {
        LambdaFn::Binary(f) => {
            Ok(move |x, y| narrow(config.reduce(f(i128::from(x), i128::from(y)))))
        }
        _ => Err(class_error(lambda, LambdaClass::IntIntToInt)),
    }
}

fn narrow(n: i128) -> Option<i64> {
    i64::try_from(n).ok()
}

fn class_error(lambda: Lambda, expected: LambdaClass) -> RunError {
    RunError::LambdaClass {
        lambda,
        expected,
        got: lambda.class(),
    }
}
