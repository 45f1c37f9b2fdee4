//! # Jargon Identification
//!
//! Two interchangeable sources of candidate jargon terms sit behind
//! [`TermIdentifier`]:
//!
//! * [`lexicon_scan::LexiconScanIdentifier`]: deterministic, offline scan
//!   against the loaded [`Lexicon`](crate::lexicon::Lexicon).
//! * [`llm_extract::LlmTermIdentifier`]: asks an LLM which terms in the text
//!   are medical jargon. Non-deterministic and network bound.
//!
//! Either way the returned strings carry no positions. [`identify_jargon`]
//! turns them into [`Match`]es through
//! [`locate_terms_in_text`](crate::matcher::locate_terms_in_text).

pub mod lexicon_scan;
pub mod llm_extract;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    InternalResult,
    matcher::{Match, locate_terms_in_text},
};

#[mockall::automock]
#[async_trait]
pub trait TermIdentifier: Send + Sync {
    /// Terms believed to occur in `text`, as plain strings.
    async fn identify_candidate_terms(&self, text: &str) -> InternalResult<Vec<String>>;

    fn name(&self) -> &str;
}

/// Runs `identifier` over `text` and positions its terms in the text.
pub async fn identify_jargon(
    identifier: &dyn TermIdentifier,
    text: &str,
) -> InternalResult<Vec<Match>> {
    let terms = identifier.identify_candidate_terms(text).await?;
    debug!(
        "{} identified {} candidate terms",
        identifier.name(),
        terms.len()
    );
    Ok(locate_terms_in_text(&terms, text))
}
