//! Token vocabulary for model-facing callers.
//!
//! Assigns a dense id to every token the grammar can produce for programs
//! with at most `max_variables` variables. Ids are stable for a given
//! `max_variables`: specials first, then punctuation, `INPUT`, operations,
//! lambdas, variables and finally integers in ascending order.

use std::collections::HashMap;

use crate::schema::{Lambda, Operation};
use crate::tokens::{
    ASSIGN, INPUT, LIST_END, LIST_SEPARATOR, LIST_START, STATEMENT_SEPARATOR, variable_token,
};
use crate::validation::V_MAX;
use crate::ParseError;

pub const PAD: &str = "<pad>";
pub const BOS: &str = "<bos>";
pub const EOS: &str = "<eos>";

pub const PAD_ID: u32 = 0;
pub const BOS_ID: u32 = 1;
pub const EOS_ID: u32 = 2;

pub const DEFAULT_MAX_VARIABLES: usize = 20;

#[derive(Debug, Clone)]
pub struct Vocabulary {
    max_variables: usize,
    tokens: Vec<String>,
    ids: HashMap<String, u32>,
}

impl Vocabulary {
    pub fn new(max_variables: usize) -> Self {
        let mut tokens: Vec<String> = [PAD, BOS, EOS]
            .into_iter()
            .chain([LIST_START, LIST_END, LIST_SEPARATOR, STATEMENT_SEPARATOR, ASSIGN, INPUT])
            .map(String::from)
            .collect();
        tokens.extend(Operation::ALL.iter().map(|op| op.token().to_string()));
        tokens.extend(Lambda::ALL.iter().map(|lambda| lambda.token().to_string()));
        tokens.extend((0..max_variables).map(variable_token));
        // "-1" is both a lambda and an integer; it keeps its lambda id.
        for n in -V_MAX..=V_MAX {
            let token = n.to_string();
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        let ids = tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id as u32))
            .collect();

        Self {
            max_variables,
            tokens,
            ids,
        }
    }

    pub fn max_variables(&self) -> usize {
        self.max_variables
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// Tokens in id order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<u32>, ParseError> {
        tokens
            .iter()
            .map(|token| {
                let token = token.as_ref();
                self.id(token)
                    .ok_or_else(|| ParseError::UnknownToken(token.to_string()))
            })
            .collect()
    }

    pub fn decode(&self, ids: &[u32]) -> Result<Vec<String>, ParseError> {
        ids.iter()
            .map(|&id| {
                self.token(id)
                    .map(str::to_string)
                    .ok_or(ParseError::UnknownTokenId(id))
            })
            .collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VARIABLES)
    }
}
