//! Token-level grammar helpers.
//!
//! Everything that crosses the crate boundary as text goes through tokens:
//! values (`[ 1 , 2 ]`), variables (`x3`), statements and programs. Text is
//! split with [`split_tokens`], which makes the grammar whitespace-insensitive.

use crate::{ParseError, Value};

pub const LIST_START: &str = "[";
pub const LIST_END: &str = "]";
pub const LIST_SEPARATOR: &str = ",";
pub const STATEMENT_SEPARATOR: &str = "|";
pub const ASSIGN: &str = "=";
pub const INPUT: &str = "INPUT";

/// Characters that always form a token on their own.
const PUNCTUATION: [char; 5] = ['[', ']', ',', '|', '='];

/// Split text into tokens at whitespace and around punctuation.
pub fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_whitespace() || PUNCTUATION.contains(&c) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if !c.is_whitespace() {
                tokens.push(c.to_string());
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Join token groups, placing `separator` between consecutive groups.
pub fn join_token_lists<I>(groups: I, separator: &str) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut joined = Vec::new();
    for (i, group) in groups.into_iter().enumerate() {
        if i > 0 {
            joined.push(separator.to_string());
        }
        joined.extend(group);
    }
    joined
}

/// Split tokens into the groups between `separator` tokens.
///
/// The inverse of [`join_token_lists`]; an empty token list yields no groups.
pub fn split_token_groups<'a, S: AsRef<str>>(tokens: &'a [S], separator: &str) -> Vec<&'a [S]> {
    if tokens.is_empty() {
        return Vec::new();
    }
    tokens
        .split(|token| token.as_ref() == separator)
        .collect()
}

/// Token for the variable at `index` (`x3`).
pub fn variable_token(index: usize) -> String {
    format!("x{index}")
}

/// Position of a variable token.
///
/// The token must be `x` followed by a decimal number with no sign, no
/// leading zeros and nothing else. `x01` is rejected, so each index has
/// exactly one spelling and tokenizing a parsed variable gives back the
/// same token.
pub fn variable_index_from_token(token: &str) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidVariable(token.to_string());

    let digits = token.strip_prefix('x').ok_or_else(invalid)?;
    if digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return Err(invalid());
    }
    digits.parse().map_err(|_| invalid())
}

/// Parse an integer literal token: optional `-` followed by digits.
pub fn parse_int_token(token: &str) -> Result<i64, ParseError> {
    let invalid = || ParseError::InvalidInteger(token.to_string());

    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}

/// Token form of a value.
pub fn tokenize_value(value: &Value) -> Vec<String> {
    match value {
        Value::Int(n) => vec![n.to_string()],
        Value::List(items) => {
            let elements = items.iter().map(|n| vec![n.to_string()]);
            let mut tokens = vec![LIST_START.to_string()];
            tokens.extend(join_token_lists(elements, LIST_SEPARATOR));
            tokens.push(LIST_END.to_string());
            tokens
        }
    }
}

/// Parse a value from its tokens. The whole slice must be consumed.
pub fn detokenize_value<S: AsRef<str>>(tokens: &[S]) -> Result<Value, ParseError> {
    match tokens {
        [] => Err(ParseError::end("a value")),
        [single] => parse_int_token(single.as_ref()).map(Value::Int),
        [first, inner @ .., last] => {
            if first.as_ref() != LIST_START {
                return Err(ParseError::unexpected(LIST_START, first.as_ref()));
            }
            if last.as_ref() != LIST_END {
                return Err(ParseError::unexpected(LIST_END, last.as_ref()));
            }
            let items = split_token_groups(inner, LIST_SEPARATOR)
                .into_iter()
                .map(|element| match element {
                    [token] => parse_int_token(token.as_ref()),
                    [] => Err(ParseError::end("a list element")),
                    [_, extra, ..] => Err(ParseError::unexpected(LIST_SEPARATOR, extra.as_ref())),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(items))
        }
    }
}

/// Parse a value from text (`[6, 7]`, `-3`).
pub fn parse_value(text: &str) -> Result<Value, ParseError> {
    detokenize_value(&split_tokens(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_split_tokens() {
        assert_eq!(
            split_tokens("x0 = 2 | x1 = [6, 7]"),
            strings(&["x0", "=", "2", "|", "x1", "=", "[", "6", ",", "7", "]"])
        );
        assert_eq!(
            split_tokens("x1=Map *(-1) x0"),
            strings(&["x1", "=", "Map", "*(-1)", "x0"])
        );
        assert_eq!(split_tokens("  \t\n"), Vec::<String>::new());
    }

    #[test]
    fn test_join_token_lists() {
        assert_eq!(
            join_token_lists(vec![strings(&["a", "b"])], ","),
            strings(&["a", "b"])
        );
        assert_eq!(
            join_token_lists(vec![strings(&["a", "b"]), strings(&["c"])], ","),
            strings(&["a", "b", ",", "c"])
        );
        assert!(join_token_lists(Vec::new(), ",").is_empty());
    }

    #[test]
    fn test_split_token_groups() {
        let tokens = strings(&["a", "b", "|", "c"]);
        let groups = split_token_groups(&tokens, "|");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], &tokens[..2]);
        assert_eq!(groups[1], &tokens[3..]);
        assert!(split_token_groups::<String>(&[], "|").is_empty());
    }

    #[test]
    fn test_variable_token() {
        assert_eq!(variable_token(3), "x3");
        assert_eq!(variable_index_from_token("x3"), Ok(3));
        assert_eq!(variable_index_from_token("x0"), Ok(0));
        assert_eq!(variable_index_from_token("x12"), Ok(12));
    }

    #[test]
    fn test_variable_index_rejects_malformed() {
        for token in ["y1", "xx1", "x", "x-1", "x1a", "X1", " x1", "x01", "+1"] {
            assert_eq!(
                variable_index_from_token(token),
                Err(ParseError::InvalidVariable(token.to_string())),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_int_token() {
        assert_eq!(parse_int_token("7"), Ok(7));
        assert_eq!(parse_int_token("-256"), Ok(-256));
        assert!(parse_int_token("+1").is_err());
        assert!(parse_int_token("-").is_err());
        assert!(parse_int_token("None").is_err());
        assert!(parse_int_token("99999999999999999999").is_err());
    }

    #[test]
    fn test_tokenize_value() {
        assert_eq!(tokenize_value(&Value::Int(7)), strings(&["7"]));
        assert_eq!(tokenize_value(&Value::List(vec![4])), strings(&["[", "4", "]"]));
        assert_eq!(
            tokenize_value(&Value::List(vec![4, 2, 5])),
            strings(&["[", "4", ",", "2", ",", "5", "]"])
        );
        assert_eq!(tokenize_value(&Value::List(vec![])), strings(&["[", "]"]));
    }

    #[test]
    fn test_detokenize_value() {
        assert_eq!(detokenize_value(&["7"]), Ok(Value::Int(7)));
        assert_eq!(detokenize_value(&["[", "]"]), Ok(Value::List(vec![])));
        assert_eq!(
            detokenize_value(&["[", "4", ",", "-2", "]"]),
            Ok(Value::List(vec![4, -2]))
        );
        assert_eq!(parse_value("[6, 7]"), Ok(Value::List(vec![6, 7])));
    }

    #[test]
    fn test_detokenize_value_rejects_malformed() {
        assert!(detokenize_value::<&str>(&[]).is_err());
        assert!(detokenize_value(&["None"]).is_err());
        assert!(detokenize_value(&["[", "4"]).is_err());
        assert!(detokenize_value(&["4", "]"]).is_err());
        assert!(detokenize_value(&["[", "4", "5", "]"]).is_err());
        assert!(detokenize_value(&["[", "4", ",", "]"]).is_err());
        assert!(detokenize_value(&["[", ",", "]"]).is_err());
        assert!(detokenize_value(&["3", "4"]).is_err());
    }
}
