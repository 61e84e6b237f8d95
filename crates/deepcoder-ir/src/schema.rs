//! Operation and lambda catalog.
//!
//! The catalog is closed: every operation and lambda the DSL knows is a
//! variant of [`Operation`] or [`Lambda`], and their signatures are fixed
//! here. The runtime supplies the functions behind them.
//!
//! [`Catalog`] is a serializable view of the same information, used to
//! publish the vocabulary to tooling (TOML or JSON).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ValueKind;

/// Scalar types a lambda can consume or produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int,
    Bool,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Int => write!(f, "int"),
            ScalarType::Bool => write!(f, "bool"),
        }
    }
}

/// Signature family of a lambda.
///
/// Higher-order operations name the class they accept; any lambda of that
/// class may be passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LambdaClass {
    /// `int -> int`
    IntToInt,
    /// `int -> bool`
    IntToBool,
    /// `(int, int) -> int`
    IntIntToInt,
}

impl LambdaClass {
    pub fn inputs(self) -> &'static [ScalarType] {
        match self {
            LambdaClass::IntToInt | LambdaClass::IntToBool => &[ScalarType::Int],
            LambdaClass::IntIntToInt => &[ScalarType::Int, ScalarType::Int],
        }
    }

    pub fn output(self) -> ScalarType {
        match self {
            LambdaClass::IntToInt | LambdaClass::IntIntToInt => ScalarType::Int,
            LambdaClass::IntToBool => ScalarType::Bool,
        }
    }

    pub fn arity(self) -> usize {
        self.inputs().len()
    }
}

impl fmt::Display for LambdaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LambdaClass::IntToInt => write!(f, "int -> int"),
            LambdaClass::IntToBool => write!(f, "int -> bool"),
            LambdaClass::IntIntToInt => write!(f, "(int, int) -> int"),
        }
    }
}

/// A lambda usable as the first argument of a higher-order operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lambda {
    PlusOne,
    MinusOne,
    TimesTwo,
    DivTwo,
    Negate,
    Square,
    TimesThree,
    DivThree,
    TimesFour,
    DivFour,
    IsPositive,
    IsNegative,
    IsEven,
    IsOdd,
    Add,
    Subtract,
    Multiply,
    Min,
    Max,
}

impl Lambda {
    pub const ALL: [Lambda; 19] = [
        Lambda::PlusOne,
        Lambda::MinusOne,
        Lambda::TimesTwo,
        Lambda::DivTwo,
        Lambda::Negate,
        Lambda::Square,
        Lambda::TimesThree,
        Lambda::DivThree,
        Lambda::TimesFour,
        Lambda::DivFour,
        Lambda::IsPositive,
        Lambda::IsNegative,
        Lambda::IsEven,
        Lambda::IsOdd,
        Lambda::Add,
        Lambda::Subtract,
        Lambda::Multiply,
        Lambda::Min,
        Lambda::Max,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Lambda::PlusOne => "+1",
            Lambda::MinusOne => "-1",
            Lambda::TimesTwo => "*2",
            Lambda::DivTwo => "/2",
            Lambda::Negate => "*(-1)",
            Lambda::Square => "**2",
            Lambda::TimesThree => "*3",
            Lambda::DivThree => "/3",
            Lambda::TimesFour => "*4",
            Lambda::DivFour => "/4",
            Lambda::IsPositive => ">0",
            Lambda::IsNegative => "<0",
            Lambda::IsEven => "even",
            Lambda::IsOdd => "odd",
            Lambda::Add => "+",
            Lambda::Subtract => "-",
            Lambda::Multiply => "*",
            Lambda::Min => "min",
            Lambda::Max => "max",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lambda| lambda.token() == token)
    }

    pub fn class(self) -> LambdaClass {
        match self {
            Lambda::PlusOne
            | Lambda::MinusOne
            | Lambda::TimesTwo
            | Lambda::DivTwo
            | Lambda::Negate
            | Lambda::Square
            | Lambda::TimesThree
            | Lambda::DivThree
            | Lambda::TimesFour
            | Lambda::DivFour => LambdaClass::IntToInt,
            Lambda::IsPositive | Lambda::IsNegative | Lambda::IsEven | Lambda::IsOdd => {
                LambdaClass::IntToBool
            }
            Lambda::Add | Lambda::Subtract | Lambda::Multiply | Lambda::Min | Lambda::Max => {
                LambdaClass::IntIntToInt
            }
        }
    }

    pub fn arity(self) -> usize {
        self.class().arity()
    }

    /// Arithmetic lambdas produce integers and are subject to modular
    /// reduction; predicates are not.
    pub fn is_arithmetic(self) -> bool {
        self.class().output() == ScalarType::Int
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One input slot of an operation signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    Lambda(LambdaClass),
    Value(ValueKind),
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Lambda(class) => write!(f, "lambda({class})"),
            ArgType::Value(kind) => write!(f, "{kind}"),
        }
    }
}

const INT: ArgType = ArgType::Value(ValueKind::Int);
const LIST: ArgType = ArgType::Value(ValueKind::List);

/// A DSL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Head,
    Last,
    Take,
    Drop,
    Access,
    Maximum,
    Minimum,
    Reverse,
    Sort,
    Sum,
    Map,
    Filter,
    Count,
    ZipWith,
    Scanl1,
}

impl Operation {
    pub const FIRST_ORDER: [Operation; 10] = [
        Operation::Head,
        Operation::Last,
        Operation::Take,
        Operation::Drop,
        Operation::Access,
        Operation::Maximum,
        Operation::Minimum,
        Operation::Reverse,
        Operation::Sort,
        Operation::Sum,
    ];

    pub const HIGHER_ORDER: [Operation; 5] = [
        Operation::Map,
        Operation::Filter,
        Operation::Count,
        Operation::ZipWith,
        Operation::Scanl1,
    ];

    pub const ALL: [Operation; 15] = [
        Operation::Head,
        Operation::Last,
        Operation::Take,
        Operation::Drop,
        Operation::Access,
        Operation::Maximum,
        Operation::Minimum,
        Operation::Reverse,
        Operation::Sort,
        Operation::Sum,
        Operation::Map,
        Operation::Filter,
        Operation::Count,
        Operation::ZipWith,
        Operation::Scanl1,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Operation::Head => "Head",
            Operation::Last => "Last",
            Operation::Take => "Take",
            Operation::Drop => "Drop",
            Operation::Access => "Access",
            Operation::Maximum => "Maximum",
            Operation::Minimum => "Minimum",
            Operation::Reverse => "Reverse",
            Operation::Sort => "Sort",
            Operation::Sum => "Sum",
            Operation::Map => "Map",
            Operation::Filter => "Filter",
            Operation::Count => "Count",
            Operation::ZipWith => "ZipWith",
            Operation::Scanl1 => "Scanl1",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Input signature, lambda slot first for higher-order operations.
    pub fn inputs(self) -> &'static [ArgType] {
        match self {
            Operation::Head
            | Operation::Last
            | Operation::Maximum
            | Operation::Minimum
            | Operation::Reverse
            | Operation::Sort
            | Operation::Sum => &[LIST],
            Operation::Take | Operation::Drop | Operation::Access => &[INT, LIST],
            Operation::Map => &[ArgType::Lambda(LambdaClass::IntToInt), LIST],
            Operation::Filter | Operation::Count => {
                &[ArgType::Lambda(LambdaClass::IntToBool), LIST]
            }
            Operation::ZipWith => &[ArgType::Lambda(LambdaClass::IntIntToInt), LIST, LIST],
            Operation::Scanl1 => &[ArgType::Lambda(LambdaClass::IntIntToInt), LIST],
        }
    }

    pub fn output(self) -> ValueKind {
        match self {
            Operation::Head
            | Operation::Last
            | Operation::Access
            | Operation::Maximum
            | Operation::Minimum
            | Operation::Sum
            | Operation::Count => ValueKind::Int,
            Operation::Take
            | Operation::Drop
            | Operation::Reverse
            | Operation::Sort
            | Operation::Map
            | Operation::Filter
            | Operation::ZipWith
            | Operation::Scanl1 => ValueKind::List,
        }
    }

    /// Number of arguments, counting the lambda of a higher-order operation.
    pub fn arity(self) -> usize {
        self.inputs().len()
    }

    pub fn required_lambda(self) -> Option<LambdaClass> {
        match self.inputs().first() {
            Some(ArgType::Lambda(class)) => Some(*class),
            _ => None,
        }
    }

    pub fn is_higher_order(self) -> bool {
        self.required_lambda().is_some()
    }

    /// Number of variable arguments a statement using this operation takes.
    pub fn variable_arity(self) -> usize {
        self.inputs()
            .iter()
            .filter(|input| matches!(input, ArgType::Value(_)))
            .count()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Serializable description of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSchema {
    /// Operation token (e.g. "Map")
    pub token: String,
    /// Whether the first parameter is a lambda
    pub higher_order: bool,
    /// Parameter types, lambda first
    pub params: Vec<String>,
    /// Output value kind
    pub output: ValueKind,
}

impl From<Operation> for OperationSchema {
    fn from(op: Operation) -> Self {
        Self {
            token: op.token().to_string(),
            higher_order: op.is_higher_order(),
            params: op.inputs().iter().map(ToString::to_string).collect(),
            output: op.output(),
        }
    }
}

/// Serializable description of one lambda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaSchema {
    /// Lambda token (e.g. "+1")
    pub token: String,
    /// Input scalar types
    pub inputs: Vec<ScalarType>,
    /// Output scalar type
    pub output: ScalarType,
}

impl From<Lambda> for LambdaSchema {
    fn from(lambda: Lambda) -> Self {
        let class = lambda.class();
        Self {
            token: lambda.token().to_string(),
            inputs: class.inputs().to_vec(),
            output: class.output(),
        }
    }
}

/// The full catalog in serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub operation: Vec<OperationSchema>,
    pub lambda: Vec<LambdaSchema>,
}

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            operation: Operation::ALL.into_iter().map(Into::into).collect(),
            lambda: Lambda::ALL.into_iter().map(Into::into).collect(),
        }
    }

    /// Find an operation schema by token.
    pub fn find_operation(&self, token: &str) -> Option<&OperationSchema> {
        self.operation.iter().find(|op| op.token == token)
    }

    /// Find a lambda schema by token.
    pub fn find_lambda(&self, token: &str) -> Option<&LambdaSchema> {
        self.lambda.iter().find(|lambda| lambda.token == token)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_tokens_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_token(op.token()), Some(op));
        }
        assert_eq!(Operation::from_token("NotAnOp"), None);
        assert_eq!(Operation::from_token("INPUT"), None);
    }

    #[test]
    fn test_lambda_tokens_roundtrip() {
        for lambda in Lambda::ALL {
            assert_eq!(Lambda::from_token(lambda.token()), Some(lambda));
        }
        assert_eq!(Lambda::from_token("x0"), None);
        assert_eq!(Lambda::from_token("Map"), None);
    }

    #[test]
    fn test_operation_partition() {
        for op in Operation::FIRST_ORDER {
            assert!(!op.is_higher_order(), "{op} should be first-order");
            assert_eq!(op.variable_arity(), op.arity());
        }
        for op in Operation::HIGHER_ORDER {
            assert!(op.is_higher_order(), "{op} should be higher-order");
            assert_eq!(op.variable_arity(), op.arity() - 1);
        }
        assert_eq!(
            Operation::FIRST_ORDER.len() + Operation::HIGHER_ORDER.len(),
            Operation::ALL.len()
        );
    }

    #[test]
    fn test_required_lambda() {
        assert_eq!(Operation::Head.required_lambda(), None);
        assert_eq!(Operation::Map.required_lambda(), Some(LambdaClass::IntToInt));
        assert_eq!(Operation::Count.required_lambda(), Some(LambdaClass::IntToBool));
        assert_eq!(Operation::ZipWith.required_lambda(), Some(LambdaClass::IntIntToInt));
        assert_eq!(Operation::ZipWith.arity(), 3);
    }

    #[test]
    fn test_lambda_classes() {
        assert_eq!(Lambda::Square.class(), LambdaClass::IntToInt);
        assert_eq!(Lambda::IsEven.class(), LambdaClass::IntToBool);
        assert_eq!(Lambda::Min.class(), LambdaClass::IntIntToInt);
        assert_eq!(Lambda::Min.arity(), 2);
        assert!(Lambda::Negate.is_arithmetic());
        assert!(Lambda::Max.is_arithmetic());
        assert!(!Lambda::IsOdd.is_arithmetic());
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::builtin();
        let map = catalog.find_operation("Map").expect("Map not found");
        assert!(map.higher_order);
        assert_eq!(map.params, vec!["lambda(int -> int)", "list"]);
        assert_eq!(map.output, ValueKind::List);

        let take = catalog.find_operation("Take").expect("Take not found");
        assert_eq!(take.params, vec!["int", "list"]);

        let even = catalog.find_lambda("even").expect("even not found");
        assert_eq!(even.inputs, vec![ScalarType::Int]);
        assert_eq!(even.output, ScalarType::Bool);
    }

    #[test]
    fn test_catalog_toml_roundtrip() {
        let catalog = Catalog::builtin();
        let toml = catalog.to_toml_string().unwrap();
        assert!(toml.contains("[[operation]]"));
        assert!(toml.contains("token = \"ZipWith\""));
        assert_eq!(Catalog::from_toml_str(&toml).unwrap(), catalog);
    }

    #[test]
    fn test_catalog_json() {
        let json = Catalog::builtin().to_json_string().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["operation"].as_array().unwrap().len(), 15);
        assert_eq!(parsed["lambda"].as_array().unwrap().len(), 19);
    }
}
