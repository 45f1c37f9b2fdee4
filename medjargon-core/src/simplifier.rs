//! Plain-language rewriting of definitions.
//!
//! Definitions in the bundled data come from clinical vocabularies and are
//! often as opaque as the terms they define. A [`DefinitionSimplifier`]
//! rewrites them for a lay reader before they are served by `explain`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::{
    InternalResult,
    config::LlmConfig,
    provider::{
        llm::{Prompt, ProviderLLM},
        types::ProviderError,
    },
};

#[mockall::automock]
#[async_trait]
pub trait DefinitionSimplifier: Send + Sync {
    async fn simplify(&self, definition: &str) -> InternalResult<String>;

    fn name(&self) -> &str;
}

/// Returns definitions unchanged. Used when no model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSimplifier;

#[async_trait]
impl DefinitionSimplifier for PassthroughSimplifier {
    async fn simplify(&self, definition: &str) -> InternalResult<String> {
        Ok(definition.to_string())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

pub struct LlmSimplifier {
    provider: Arc<dyn ProviderLLM>,
    config: LlmConfig,
}

impl LlmSimplifier {
    pub fn new(provider: Arc<dyn ProviderLLM>, config: LlmConfig) -> Self {
        Self { provider, config }
    }

    fn prompt(definition: &str) -> Prompt {
        Prompt::new(format!(
            "Rewrite this medical definition in one or two short sentences \
             that a patient with no medical training can understand. \
             Keep it accurate. Reply with the rewritten definition only.\n\n{}",
            definition
        ))
        .with_system("You explain medical terms to patients in plain language.")
    }
}

#[async_trait]
impl DefinitionSimplifier for LlmSimplifier {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn simplify(&self, definition: &str) -> InternalResult<String> {
        let response = self
            .provider
            .send_message(&Self::prompt(definition), &self.config)
            .await?;
        let simplified = response.content.trim();
        if simplified.is_empty() {
            return Err(ProviderError::InvalidResponse("Empty simplification".into()).into());
        }
        debug!("simplified {} -> {} chars", definition.len(), simplified.len());
        Ok(simplified.to_string())
    }

    fn name(&self) -> &str {
        "llm"
    }
}
