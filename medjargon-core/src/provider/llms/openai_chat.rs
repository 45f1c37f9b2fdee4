use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::{
    config::LlmConfig,
    provider::{
        llm::{LLMResponse, Prompt, ProviderLLM, ResponseMetadata},
        provider_secret::ProviderSecret,
        types::{ProviderError, ProviderResult},
    },
};

pub struct OpenAIChatProviderLLM {
    client: Client<OpenAIConfig>,
    name: String,
}

impl OpenAIChatProviderLLM {
    pub fn new(
        name: impl Into<String>,
        secret: &ProviderSecret,
        config: &LlmConfig,
    ) -> ProviderResult<Self> {
        if secret.is_empty() {
            return Err(ProviderError::Authentication("API key is empty".into()));
        }

        let mut openai_config = OpenAIConfig::new().with_api_key(secret.api_key.expose_secret());
        if let Some(org_id) = &secret.organization_id {
            openai_config = openai_config.with_org_id(org_id.expose_secret());
        }
        if let Some(api_base) = &config.api_base {
            openai_config = openai_config.with_api_base(api_base);
        }

        Ok(Self {
            client: Client::with_config(openai_config),
            name: name.into(),
        })
    }

    fn messages(prompt: &Prompt) -> Vec<ChatCompletionRequestMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &prompt.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }
        messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(prompt.user.clone()),
                name: None,
            },
        ));
        messages
    }

    #[tracing::instrument(skip(self, prompt, config), fields(model = %config.model))]
    async fn chat_completion(
        &self,
        prompt: &Prompt,
        config: &LlmConfig,
    ) -> ProviderResult<LLMResponse> {
        debug!("prompt: {}", prompt.user);

        let request = CreateChatCompletionRequest {
            model: config.model.clone(),
            messages: Self::messages(prompt),
            temperature: Some(config.temperature),
            max_completion_tokens: Some(config.max_tokens),
            ..Default::default()
        };

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ProviderError::ApiError(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ProviderError::InvalidResponse("No response content".into()))?;

        Ok(LLMResponse {
            content,
            metadata: ResponseMetadata {
                model: response.model.clone(),
                created_at: Utc::now(),
                token_usage: response
                    .usage
                    .map(|u| (u.prompt_tokens as usize, u.completion_tokens as usize)),
                finish_reason: response
                    .choices
                    .first()
                    .and_then(|c| c.finish_reason.as_ref())
                    .map(|reason| format!("{:?}", reason)),
            },
        })
    }
}

#[async_trait]
impl ProviderLLM for OpenAIChatProviderLLM {
    async fn send_message(
        &self,
        prompt: &Prompt,
        config: &LlmConfig,
    ) -> ProviderResult<LLMResponse> {
        self.chat_completion(prompt, config).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
