//! # medjargon: Medical Jargon Identification
//!
//! medjargon finds medical jargon in free text and explains it. Jargon is
//! anything listed in a term lexicon (term to UMLS concept id); explanations
//! come from a concept-to-definition table, optionally rewritten in plain
//! language by an LLM.
//!
//! ## Pipeline
//!
//! ```text
//! Text → Tokenizer → Candidate windows → Lexicon lookup → Re-search → Matches
//! ```
//!
//! 1. [`tokenizer`] splits the text into treebank-style tokens with nom.
//! 2. [`matcher`] slides windows of 1 up to the longest lexicon term over the
//!    tokens and keeps the phrases found in the [`lexicon`].
//! 3. Every matched phrase is searched again in the original text, case
//!    insensitively, and each occurrence becomes a [`Match`] with a character
//!    offset and length.
//!
//! ## Identification sources
//!
//! The [`identifier`] module puts the lexicon scan and an LLM extractor behind
//! the same [`identifier::TermIdentifier`] trait. Both feed the same
//! re-search step, so their results have the same shape.
//!
//! ## Service
//!
//! [`JargonService`] ties the data, the identifiers and the
//! [`simplifier`] together and is what the HTTP layer calls.

pub mod config;
pub mod definitions;
pub mod error;
pub mod identifier;
pub mod lexicon;
pub mod matcher;
pub mod provider;
pub mod service;
pub mod simplifier;
pub mod tokenizer;

// Re-exports
pub use error::*;
pub use lexicon::Lexicon;
pub use matcher::{Match, find_jargon_spans, locate_terms_in_text};
pub use service::JargonService;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
