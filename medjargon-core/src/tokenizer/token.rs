use nom::branch::alt;
use tracing::warn;

use super::word::{parse_clitic, parse_decimal, parse_punctuation, parse_whitespace, parse_word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    Word,
    Number,
    /// Contraction suffix split off a word (`'s`, `n't`, ...)
    Clitic,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A token plus its byte range `[start, end)` in the tokenized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn text(&self) -> &str {
        &self.token.text
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes `input`. Never fails; empty input yields no tokens.
    #[tracing::instrument(level = "debug", skip(self, input), fields(len = input.len()))]
    pub fn tokenize(&self, input: &str) -> Vec<TokenSpan> {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            if let Ok((rest, _)) = parse_whitespace(remaining) {
                remaining = rest;
                continue;
            }

            let start = input.len() - remaining.len();
            match alt((parse_decimal, parse_clitic, parse_word, parse_punctuation))(remaining) {
                Ok((rest, token)) => {
                    tokens.push(TokenSpan {
                        token,
                        start,
                        end: input.len() - rest.len(),
                    });
                    remaining = rest;
                }
                Err(e) => {
                    // every non-whitespace char is at least punctuation, so
                    // this only guards against a parser regression
                    warn!("Skipping untokenizable input at byte {}: {:?}", start, e);
                    let skip = remaining.chars().next().map_or(1, char::len_utf8);
                    remaining = &remaining[skip..];
                }
            }
        }

        tokens
    }
}

pub fn tokenize(input: &str) -> Vec<TokenSpan> {
    Tokenizer::new().tokenize(input)
}
