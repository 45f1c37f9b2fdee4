use async_trait::async_trait;
use std::sync::Arc;

use super::TermIdentifier;
use crate::{Error, InternalResult, lexicon::Lexicon, matcher::matched_phrases};

/// Offline identifier backed by the jargon lexicon. The scan is CPU bound and
/// runs on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct LexiconScanIdentifier {
    lexicon: Arc<Lexicon>,
}

impl LexiconScanIdentifier {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

#[async_trait]
impl TermIdentifier for LexiconScanIdentifier {
    async fn identify_candidate_terms(&self, text: &str) -> InternalResult<Vec<String>> {
        let lexicon = self.lexicon.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || matched_phrases(&text, &lexicon))
            .await
            .map_err(|e| Error::internal(format!("Lexicon scan failed: {}", e)))
    }

    fn name(&self) -> &str {
        "lexicon_scan"
    }
}
