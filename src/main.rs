//! TokenSentry - composite token risk scoring service
//!
//! Serves the scoring engine over a thin REST API:
//! - POST /v1/scan/token  : typed fact-snapshot pipeline
//! - POST /v1/scan/query  : free-text heuristic pipeline
//! - GET  /v1/snapshot/token : raw facts, unscored

use std::sync::Arc;

use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use token_sentry::api::{create_router, start_cleanup_task};
use token_sentry::api::handlers::AppState;
use token_sentry::models::SentryConfig;
use token_sentry::utils::constants::{APP_NAME, APP_VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
        )
        .with_target(false)
        .compact()
        .init();

    let config = SentryConfig::default();

    info!("🛡️ {} v{} starting", APP_NAME, APP_VERSION);
    if config.explorer_api_key.is_none() {
        info!("⚠️ ETHERSCAN_API_KEY not set: on-chain facet will degrade to fallback scores");
    }

    let state = Arc::new(AppState::new(&config));
    start_cleanup_task();

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("🚀 API listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
