use clap::Parser;
use medjargon_core::{config::ServiceConfig, provider::provider_secret::ProviderSecret};
use medjargon_http::{self, server::ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// medjargon HTTP API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Service configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lexicon file; required unless the configuration names one
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Definitions file, overrides the configuration
    #[arg(long)]
    definitions: Option<PathBuf>,

    /// API key for the OpenAI-compatible provider; LLM features are off without it
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Organization id sent with provider requests
    #[arg(long, env = "OPENAI_ORG_ID")]
    openai_org_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut service_config = match &cli.config {
        Some(file) => {
            tracing::info!("Loading configuration from file: {}", file.display());
            ServiceConfig::from_file(file)?
        }
        None => ServiceConfig::default(),
    };
    if let Some(lexicon) = cli.lexicon {
        service_config.lexicon_path = Some(lexicon);
    }
    if let Some(definitions) = cli.definitions {
        service_config.definitions_path = Some(definitions);
    }

    let secret = cli.openai_api_key.map(|key| {
        let secret = ProviderSecret::new(key);
        match cli.openai_org_id {
            Some(org_id) => secret.with_organization_id(org_id),
            None => secret,
        }
    });
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };

    medjargon_http::start_with_config(config, service_config, secret).await
}
