use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::TermIdentifier;
use crate::{
    InternalResult,
    config::LlmConfig,
    provider::{
        llm::{Prompt, ProviderLLM},
        types::{ProviderError, ProviderResult},
    },
};

const SYSTEM_PROMPT: &str = "You are a clinical terminology assistant. You find medical \
jargon that a patient without medical training would not understand.";

/// Keys under which an entity object may carry its term text.
const TERM_KEYS: [&str; 3] = ["E", "term", "entity"];

/// Identifier that asks an LLM for the medical terms in a text.
pub struct LlmTermIdentifier {
    provider: Arc<dyn ProviderLLM>,
    config: LlmConfig,
    name: String,
}

impl LlmTermIdentifier {
    pub fn new(provider: Arc<dyn ProviderLLM>, config: LlmConfig) -> Self {
        let name = format!("llm:{}", provider.name());
        Self {
            provider,
            config,
            name,
        }
    }

    fn prompt(text: &str) -> Prompt {
        Prompt::new(format!(
            "List every medical term or phrase that appears in the text below. \
             Copy each term exactly as it is written in the text. \
             Answer with a JSON array of strings and nothing else; \
             answer [] if there are none.\n\nText:\n\"\"\"{}\"\"\"",
            text
        ))
        .with_system(SYSTEM_PROMPT)
    }
}

#[async_trait]
impl TermIdentifier for LlmTermIdentifier {
    #[tracing::instrument(level = "debug", skip_all, fields(identifier = %self.name))]
    async fn identify_candidate_terms(&self, text: &str) -> InternalResult<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let response = self
            .provider
            .send_message(&Self::prompt(text), &self.config)
            .await?;
        debug!(
            "model {} answered ({:?} tokens)",
            response.metadata.model, response.metadata.token_usage
        );
        Ok(parse_term_list(&response.content)?)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parses an LLM answer into term strings.
///
/// Accepts a JSON array of strings, an array of entity objects carrying the
/// term under `"E"`, `"term"` or `"entity"`, or an object wrapping such an
/// array under `"terms"` or `"completion"`. Code fences and prose around the
/// JSON are tolerated.
pub fn parse_term_list(content: &str) -> ProviderResult<Vec<String>> {
    let body = strip_code_fence(content.trim());
    let value = serde_json::from_str::<Value>(body)
        .ok()
        .or_else(|| {
            let start = body.find('[')?;
            let end = body.rfind(']')?;
            (start < end)
                .then(|| serde_json::from_str::<Value>(&body[start..=end]).ok())
                .flatten()
        })
        .ok_or_else(|| ProviderError::InvalidResponse(format!("Not a JSON term list: {}", body)))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("terms").or_else(|| map.remove("completion")) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ProviderError::InvalidResponse(
                    "JSON object without a term array".into(),
                ));
            }
        },
        other => {
            return Err(ProviderError::InvalidResponse(format!(
                "Unexpected JSON value: {}",
                other
            )));
        }
    };

    let terms = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(term) => Some(term),
            Value::Object(entity) => TERM_KEYS
                .iter()
                .find_map(|key| entity.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            other => {
                warn!("Ignoring non-term item in LLM answer: {}", other);
                None
            }
        })
        .collect();
    Ok(terms)
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // drop the info string (```json)
    let info_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    rest[info_len..].trim()
}
