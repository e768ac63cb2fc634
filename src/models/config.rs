//! Configuration for the TokenSentry service
//!
//! Env-driven runtime settings plus the advisory component weight table.
//! Chain constants live in utils/constants.rs, not here.

use std::time::Duration;

use crate::utils::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_CACHE_TTL_SECS, DEFAULT_UPSTREAM_TIMEOUT_SECS,
};

/// Advisory weights for the typed-snapshot component scorers.
/// The aggregator normalizes by the actual weight sum, so these need not
/// add up to 1.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub contract: f64,
    pub market: f64,
    pub reputation: f64,
    pub advanced: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            contract: 0.4,
            market: 0.25,
            reputation: 0.15,
            advanced: 0.2,
        }
    }
}

/// Runtime configuration for the service
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Address the API server binds to
    pub bind_addr: String,
    /// Explorer (Etherscan v2) API key; scans degrade to fallback scores
    /// without it
    pub explorer_api_key: Option<String>,
    /// Timeout for upstream fact fetches
    pub upstream_timeout: Duration,
    /// TTL for cached scan results
    pub cache_ttl: Duration,
    /// Component weights for the typed pipeline
    pub weights: ScoreWeights,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            bind_addr: std::env::var("SENTRY_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            explorer_api_key: std::env::var("ETHERSCAN_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            upstream_timeout: Duration::from_secs(
                std::env::var("SENTRY_UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            ),
            cache_ttl: Duration::from_secs(
                std::env::var("SENTRY_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            ),
            weights: ScoreWeights::default(),
        }
    }
}
