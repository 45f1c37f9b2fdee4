use secrecy::{ExposeSecret, SecretString};

/// Credentials for an LLM provider.
///
/// The key is kept in a `SecretString` so it never shows up in `Debug`
/// output or logs. It is injected by the caller (CLI flag or environment),
/// never read from a file next to the code.
#[derive(Clone)]
pub struct ProviderSecret {
    pub api_key: SecretString,
    pub organization_id: Option<SecretString>,
}

impl ProviderSecret {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            organization_id: None,
        }
    }

    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(SecretString::from(organization_id.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.expose_secret().trim().is_empty()
    }
}

impl Default for ProviderSecret {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl std::fmt::Debug for ProviderSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSecret")
            .field("api_key", &"[REDACTED]")
            .field("organization_id", &self.organization_id.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
