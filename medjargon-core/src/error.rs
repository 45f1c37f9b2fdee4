use thiserror::Error;

use crate::lexicon::LexiconError;
use crate::provider::types::ProviderError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Lexicon load error: {0}")]
    LexiconLoad(#[from] LexiconError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Term not found: {0}")]
    TermNotFound(String),

    #[error("No definition for term '{term}' (concept {concept_id})")]
    DefinitionNotFound { term: String, concept_id: String },

    #[error("Identifier unavailable: {0}")]
    IdentifierUnavailable(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Timed out after {0} ms")]
    Timeout(u64),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Error::InvalidInput(message.into())
    }
}
