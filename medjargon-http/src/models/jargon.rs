use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use medjargon_core::{
    Match,
    service::{Definition, Explanation},
};

/// Body of the POST identify endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
pub struct IdentifyRequest {
    /// Text to scan for medical jargon
    pub text: String,
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
