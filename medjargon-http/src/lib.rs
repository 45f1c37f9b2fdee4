//! medjargon HTTP API Server
//!
//! This crate serves the medjargon service over HTTP: definition lookup,
//! plain-language explanations and jargon identification in free text.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use medjargon_core::{
    JargonService, config::ServiceConfig, provider::provider_secret::ProviderSecret,
};
use server::{ServerConfig, start_server};
use tracing::info;

/// Load the service data and start the HTTP server.
///
/// Data loading finishes before the listener binds, so a bad lexicon path
/// fails here instead of on the first request.
pub async fn start_with_config(
    config: ServerConfig,
    service_config: ServiceConfig,
    secret: Option<ProviderSecret>,
) -> anyhow::Result<()> {
    let service = JargonService::from_config(service_config, secret)?;
    let info = service.info();
    info!(
        "Loaded {} lexicon terms (longest {} tokens) and {} definitions",
        info.lexicon_terms, info.max_term_length, info.definitions
    );

    start_server(config, service).await
}
