//! Tests for deepcoder-ir statement and program parsing.

use crate::{Lambda, LambdaClass, Operation, ParseError, Program, Statement};

fn strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_statement_from_tokens() {
    let statement = Statement::from_tokens(&["x1", "=", "Head", "x0"]).unwrap();
    assert_eq!(statement.lhs(), 1);
    assert_eq!(statement.operation(), Operation::Head);
    assert_eq!(statement.lambda(), None);
    assert_eq!(statement.args(), &[0]);
    assert_eq!(statement.to_string(), "x1 = Head x0");
}

#[test]
fn test_statement_from_str() {
    let statement: Statement = "x3 = Map +1 x1".parse().unwrap();
    assert_eq!(statement.lambda(), Some(Lambda::PlusOne));
    assert_eq!(statement.tokenize(), strings(&["x3", "=", "Map", "+1", "x1"]));

    let statement: Statement = "x4=ZipWith min x2 x0".parse().unwrap();
    assert_eq!(statement.operation(), Operation::ZipWith);
    assert_eq!(statement.args(), &[2, 0]);
    assert_eq!(statement.to_string(), "x4 = ZipWith min x2 x0");
}

#[test]
fn test_statement_does_not_check_indices() {
    // Forward references and skipped indices are run-time errors.
    let statement: Statement = "x1 = Head x1".parse().unwrap();
    assert_eq!(statement.args(), &[1]);
    let statement: Statement = "x7 = Head x0".parse().unwrap();
    assert_eq!(statement.lhs(), 7);
}

#[test]
fn test_statement_from_str_raises() {
    let cases = [
        ("too_few_tokens", "x1 = INPUT"),
        ("bad_equals", "x1 == Head x0"),
        ("wrong_arity", "x2 = Head x0 x1"),
        ("unexpected_lambda_head", "x1 = Head +1"),
        ("unexpected_lambda_map", "x1 = Map +1 +1"),
        ("needs_lambda_got_variable", "x2 = Map x1 x0"),
        ("needs_lambda_got_operation", "x1 = Map Map x0"),
        ("bad_variable", "x1 = Map +1 y0"),
        ("unknown_operation", "x1 = NotAnOp x0"),
        ("missing_operation", "x1 ="),
        ("empty", ""),
        ("missing_lambda", "x1 = Map"),
        ("bad_lhs", "y1 = Head x0"),
    ];
    for (name, source) in cases {
        assert!(
            source.parse::<Statement>().is_err(),
            "{name}: {source:?} should not parse"
        );
    }
}

#[test]
fn test_statement_specific_errors() {
    assert_eq!(
        "x1 = NotAnOp x0".parse::<Statement>(),
        Err(ParseError::UnknownOperation("NotAnOp".to_string()))
    );
    assert_eq!(
        "x2 = Head x0 x1".parse::<Statement>(),
        Err(ParseError::TokenCount {
            operation: "Head".to_string(),
            expected: 4,
            got: 5,
        })
    );
    assert_eq!(
        "x1 = Filter +1 x0".parse::<Statement>(),
        Err(ParseError::LambdaMismatch {
            operation: "Filter".to_string(),
            lambda: "+1".to_string(),
            expected: LambdaClass::IntToBool,
            got: LambdaClass::IntToInt,
        })
    );
    assert_eq!(
        "x1 : Head x0".parse::<Statement>(),
        Err(ParseError::UnexpectedToken {
            expected: "=".to_string(),
            got: ":".to_string(),
        })
    );
}

#[test]
fn test_statement_new() {
    let statement = Statement::new(2, Operation::Scanl1, Some(Lambda::Max), vec![0]).unwrap();
    assert_eq!(statement.to_string(), "x2 = Scanl1 max x0");

    assert!(Statement::new(2, Operation::Scanl1, None, vec![0]).is_err());
    assert!(Statement::new(2, Operation::Scanl1, Some(Lambda::IsOdd), vec![0]).is_err());
    assert!(Statement::new(2, Operation::Head, Some(Lambda::Max), vec![0]).is_err());
    assert!(Statement::new(2, Operation::Take, None, vec![0]).is_err());
}

#[test]
fn test_program_from_tokens() {
    let program = Program::from_tokens(&["x0", "=", "INPUT", "|", "x1", "=", "Head", "x0"]).unwrap();
    assert_eq!(program.num_inputs(), 1);
    assert_eq!(program.statements().len(), 1);
    assert_eq!(program.len(), 2);
    assert_eq!(program.to_string(), "x0 = INPUT | x1 = Head x0");
}

#[test]
fn test_program_roundtrip() {
    let sources = [
        "x0 = INPUT | x1 = Head x0",
        "x0 = INPUT | x1 = INPUT | x2 = Reverse x1 | x3 = ZipWith + x0 x2",
        "x0 = INPUT | x1 = Filter even x0 | x2 = Map *(-1) x1 | x3 = Scanl1 * x2",
        "x0 = INPUT | x1 = INPUT | x2 = Take x0 x1 | x3 = Count <0 x2 | x4 = Access x3 x1",
    ];
    for source in sources {
        let program: Program = source.parse().unwrap();
        assert_eq!(program.to_string(), source);
        assert_eq!(Program::from_tokens(&program.tokenize()).unwrap(), program);
    }
}

#[test]
fn test_program_whitespace_insensitive() {
    let compact: Program = "x0=INPUT|x1=Sort x0".parse().unwrap();
    let spaced: Program = "  x0 =  INPUT |\n x1 = Sort   x0 ".parse().unwrap();
    assert_eq!(compact, spaced);
}

#[test]
fn test_program_from_str_raises() {
    let cases = [
        ("inputs_not_at_beginning", "x0 = INPUT | x1 = Head x0 | x2 = INPUT"),
        ("bad_input_line", "x0 = Head INPUT | x1 = Head x0"),
        ("bad_statement", "x0 = INPUT | x1 = Head +1 x0"),
        ("input_out_of_order", "x1 = INPUT | x0 = INPUT"),
        ("input_bad_assign", "x0 : INPUT"),
        ("empty", ""),
        ("trailing_separator", "x0 = INPUT |"),
    ];
    for (name, source) in cases {
        assert!(
            source.parse::<Program>().is_err(),
            "{name}: {source:?} should not parse"
        );
    }
}

#[test]
fn test_program_input_after_statement() {
    assert_eq!(
        "x0 = INPUT | x1 = Head x0 | x2 = INPUT".parse::<Program>(),
        Err(ParseError::InputAfterStatement { position: 2 })
    );
}

#[test]
fn test_program_new() {
    let head = Statement::new(1, Operation::Head, None, vec![0]).unwrap();
    let program = Program::new(1, vec![head]);
    assert_eq!(program, "x0 = INPUT | x1 = Head x0".parse::<Program>().unwrap());
    assert!(!program.is_empty());
    assert!(Program::new(0, vec![]).is_empty());
}
