//! # Jargon Service
//!
//! [`JargonService`] is the entry point used by the HTTP layer. It owns the
//! lexicon and definition store (loaded eagerly, read-only afterwards) and
//! the identification and simplification strategies, and is shared across
//! request handlers behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::{future::Future, sync::Arc, time::Duration};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    Error, InternalResult,
    config::ServiceConfig,
    definitions::DefinitionStore,
    identifier::{
        TermIdentifier, identify_jargon, lexicon_scan::LexiconScanIdentifier,
        llm_extract::LlmTermIdentifier,
    },
    lexicon::Lexicon,
    matcher::Match,
    provider::{
        llm::ProviderLLM, llms::openai_chat::OpenAIChatProviderLLM,
        provider_secret::ProviderSecret,
    },
    simplifier::{DefinitionSimplifier, LlmSimplifier, PassthroughSimplifier},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Definition {
    /// The term as stored in the lexicon
    pub term: String,
    /// Opaque concept identifier (UMLS CUI)
    pub concept_id: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Explanation {
    pub term: String,
    pub concept_id: String,
    pub definition: String,
    /// Plain-language version of the definition
    pub simplified_definition: String,
    /// Simplifier that produced `simplified_definition`
    pub simplified_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub version: String,
    pub lexicon_terms: usize,
    pub max_term_length: usize,
    pub definitions: usize,
    /// Name of the LLM identifier, if one is configured
    pub llm_identifier: Option<String>,
    pub simplifier: String,
}

pub struct JargonService {
    config: ServiceConfig,
    lexicon: Arc<Lexicon>,
    definitions: DefinitionStore,
    lexicon_identifier: LexiconScanIdentifier,
    llm_identifier: Option<Arc<dyn TermIdentifier>>,
    simplifier: Arc<dyn DefinitionSimplifier>,
}

impl JargonService {
    /// Service with lexicon identification only and pass-through
    /// simplification.
    pub fn new(config: ServiceConfig, lexicon: Lexicon, definitions: DefinitionStore) -> Self {
        let lexicon = Arc::new(lexicon);
        Self {
            config,
            lexicon_identifier: LexiconScanIdentifier::new(lexicon.clone()),
            lexicon,
            definitions,
            llm_identifier: None,
            simplifier: Arc::new(PassthroughSimplifier),
        }
    }

    pub fn with_llm_identifier(mut self, identifier: Arc<dyn TermIdentifier>) -> Self {
        self.llm_identifier = Some(identifier);
        self
    }

    pub fn with_simplifier(mut self, simplifier: Arc<dyn DefinitionSimplifier>) -> Self {
        self.simplifier = simplifier;
        self
    }

    /// Loads all data named by `config` and wires the LLM features when a
    /// non-empty secret is given and `llm.enabled` is set.
    ///
    /// Fails fast on any load error; call this before accepting traffic.
    pub fn from_config(config: ServiceConfig, secret: Option<ProviderSecret>) -> InternalResult<Self> {
        let lexicon = Lexicon::load(config.require_lexicon_path()?)?;
        let definitions = match &config.definitions_path {
            Some(path) => DefinitionStore::load(path)?,
            None => DefinitionStore::default(),
        };
        let llm_config = config.llm.clone();
        let service = Self::new(config, lexicon, definitions);

        match secret.filter(|s| !s.is_empty()) {
            Some(secret) if llm_config.enabled => {
                let provider: Arc<dyn ProviderLLM> =
                    Arc::new(OpenAIChatProviderLLM::new("openai", &secret, &llm_config)?);
                info!("LLM features enabled (model {})", llm_config.model);
                Ok(service
                    .with_llm_identifier(Arc::new(LlmTermIdentifier::new(
                        provider.clone(),
                        llm_config.clone(),
                    )))
                    .with_simplifier(Arc::new(LlmSimplifier::new(provider, llm_config))))
            }
            _ => {
                info!("LLM features disabled");
                Ok(service)
            }
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Looks up the definition of `term` (any casing or spacing).
    pub fn define(&self, term: &str) -> InternalResult<Definition> {
        let key = Lexicon::lookup_key(term);
        let (surface, concept_id) = self
            .lexicon
            .term(&key)
            .zip(self.lexicon.concept_id(&key))
            .ok_or_else(|| Error::TermNotFound(term.trim().to_string()))?;
        let definition =
            self.definitions
                .definition(concept_id)
                .ok_or_else(|| Error::DefinitionNotFound {
                    term: surface.to_string(),
                    concept_id: concept_id.to_string(),
                })?;

        Ok(Definition {
            term: surface.to_string(),
            concept_id: concept_id.to_string(),
            definition: definition.to_string(),
        })
    }

    /// Definition plus a plain-language rewrite. If the simplifier fails the
    /// original definition is served as the simplified one.
    pub async fn explain(&self, term: &str) -> InternalResult<Explanation> {
        let Definition {
            term,
            concept_id,
            definition,
        } = self.define(term)?;

        let simplified = self
            .with_timeout(
                self.config.llm.request_timeout,
                self.simplifier.simplify(&definition),
            )
            .await;
        let (simplified_definition, simplified_by) = match simplified {
            Ok(text) => (text, self.simplifier.name().to_string()),
            Err(e) => {
                warn!("Simplification of '{}' failed: {}", term, e);
                (definition.clone(), PassthroughSimplifier.name().to_string())
            }
        };

        Ok(Explanation {
            term,
            concept_id,
            definition,
            simplified_definition,
            simplified_by,
        })
    }

    /// Jargon spans found by scanning the lexicon, bounded by
    /// `scan_timeout`.
    pub async fn identify(&self, text: &str) -> InternalResult<Vec<Match>> {
        self.validate_text(text)?;
        self.with_timeout(
            self.config.scan_timeout,
            identify_jargon(&self.lexicon_identifier, text),
        )
        .await
    }

    /// Jargon spans found by the LLM identifier.
    pub async fn identify_llm(&self, text: &str) -> InternalResult<Vec<Match>> {
        self.validate_text(text)?;
        let identifier = self.llm_identifier.as_ref().ok_or_else(|| {
            Error::IdentifierUnavailable("no LLM provider is configured".to_string())
        })?;
        self.with_timeout(
            self.config.llm.request_timeout,
            identify_jargon(identifier.as_ref(), text),
        )
        .await
    }

    pub fn info(&self) -> ServiceInfo {
        ServiceInfo {
            version: crate::VERSION.to_string(),
            lexicon_terms: self.lexicon.len(),
            max_term_length: self.lexicon.max_term_length(),
            definitions: self.definitions.len(),
            llm_identifier: self.llm_identifier.as_ref().map(|i| i.name().to_string()),
            simplifier: self.simplifier.name().to_string(),
        }
    }

    fn validate_text(&self, text: &str) -> InternalResult<()> {
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(Error::invalid_input(format!(
                "text is {} characters, the limit is {}",
                length, self.config.max_text_length
            )));
        }
        Ok(())
    }

    async fn with_timeout<T>(
        &self,
        limit: Duration,
        future: impl Future<Output = InternalResult<T>>,
    ) -> InternalResult<T> {
        tokio::time::timeout(limit, future)
            .await
            .map_err(|_| Error::Timeout(limit.as_millis() as u64))?
    }
}
