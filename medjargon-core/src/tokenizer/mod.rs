//! # Tokenizer Component
//!
//! Splits free text into word tokens for the span matcher. Each token keeps
//! the byte span it was cut from, so later stages can always get back to the
//! original text.
//!
//! ## Segmentation Rules
//!
//! * Whitespace separates tokens and is dropped.
//! * Punctuation becomes its own token; a run of the same character
//!   (`...`, `--`) stays together.
//! * Contractions are split the Treebank way: `embolism's` → `embolism` `'s`,
//!   `don't` → `do` `n't`. Both `'` and `’` are recognized.
//! * Hyphen and underscore joined words (`x-ray`, `covid-19`) and decimal
//!   numbers (`3.5`, `1,000`) are single tokens.
//! * Case is preserved. Lower-casing happens when candidate phrases are built.
//!
//! ## Components
//!
//! * [`token`]: token types and the [`Tokenizer`](token::Tokenizer) driver
//! * [`word`]: nom parsers for words, numbers, clitics and punctuation
//!
//! ## Usage Example
//!
//! ```rust
//! use medjargon_core::tokenizer::token::Tokenizer;
//!
//! let tokens = Tokenizer::new().tokenize("Pulmonary embolism's a tough condition.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
//! assert_eq!(
//!     texts,
//!     vec!["Pulmonary", "embolism", "'s", "a", "tough", "condition", "."]
//! );
//! ```

pub mod token;
pub mod word;

pub use token::{Token, TokenKind, TokenSpan, Tokenizer, tokenize};
