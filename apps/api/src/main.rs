mod config;
mod errors;
mod letters;
mod llm_client;
mod models;
mod recommendations;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ProviderSettings};
use crate::letters::generator::CoverLetterGenerator;
use crate::letters::reviser::Reviser;
use crate::llm_client::chain::ProviderChain;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobtrail API v{}", env!("CARGO_PKG_VERSION"));

    let primary = build_provider(&config.primary, config.llm_timeout_secs);
    let secondary = build_provider(&config.secondary, config.llm_timeout_secs);
    let chain = ProviderChain::primary_with_secondary(primary, secondary);

    let state = AppState {
        generator: CoverLetterGenerator::new(chain.clone()),
        reviser: Reviser::new(chain),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_provider(settings: &ProviderSettings, timeout_secs: u64) -> Arc<LlmClient> {
    let client = LlmClient::new(settings.clone(), timeout_secs);
    if settings.api_key.is_none() {
        warn!(
            "No API key for provider '{}'; its calls will fall through to the local fallback",
            settings.name
        );
    } else {
        info!(
            "LLM provider '{}' initialized (model: {})",
            settings.name,
            client.model()
        );
    }
    Arc::new(client)
}
