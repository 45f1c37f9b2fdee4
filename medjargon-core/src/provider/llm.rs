use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::ProviderResult;
use crate::config::LlmConfig;

#[mockall::automock]
#[async_trait]
pub trait ProviderLLM: Send + Sync {
    async fn send_message(&self, prompt: &Prompt, config: &LlmConfig)
    -> ProviderResult<LLMResponse>;

    fn name(&self) -> &str;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: Option<String>,
    pub user: String,
}

impl Prompt {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

#[derive(Debug, Default, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Default, Clone)]
pub struct ResponseMetadata {
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub token_usage: Option<TokenUsage>,
    pub finish_reason: Option<String>,
}

/// (prompt tokens, completion tokens)
pub type TokenUsage = (usize, usize);

impl LLMResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: ResponseMetadata {
                model: model.into(),
                created_at: Utc::now(),
                token_usage: None,
                finish_reason: None,
            },
        }
    }
}
