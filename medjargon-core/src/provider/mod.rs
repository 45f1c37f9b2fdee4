//! # LLM Provider Layer
//!
//! Thin abstraction over chat-completion LLMs. Both the LLM jargon
//! identifier and the LLM definition simplifier talk to a model only through
//! [`llm::ProviderLLM`], which keeps the network dependency behind one
//! mockable trait.
//!
//! * [`llm`]: the `ProviderLLM` trait and response types
//! * [`llms`]: concrete providers (OpenAI chat completions)
//! * [`provider_secret`]: API credentials held as `SecretString`
//! * [`types`]: provider errors

pub mod llm;
pub mod llms;
pub mod provider_secret;
pub mod types;
