//! API Request Handlers

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use alloy_primitives::Address;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
};
use tracing::info;

use super::types::*;
use crate::core::engine::RiskEngine;
use crate::core::heuristic::{evaluate_query, QueryScanResult};
use crate::models::{AppError, Chain, FactSnapshot, RiskResult, SentryConfig};
use crate::providers::snapshot::SnapshotBuilder;
use crate::utils::cache::ScanCache;

/// Shared application state
pub struct AppState {
    pub engine: RiskEngine,
    pub snapshots: SnapshotBuilder,
    pub cache: ScanCache,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: &SentryConfig) -> Self {
        let cache = ScanCache::new(config.cache_ttl);

        // Background task: drop expired cache entries every 60 seconds
        let cache_clone = cache.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
            loop {
                interval.tick().await;
                let removed = cache_clone.cleanup_expired();
                if removed > 0 {
                    tracing::info!("🧹 Cache cleanup: {} expired entries removed", removed);
                }
            }
        });

        Self {
            engine: RiskEngine::with_weights(config.weights),
            snapshots: SnapshotBuilder::new(config),
            cache,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type ApiErr = (StatusCode, Json<ApiResponse<()>>);

fn reject(err: &AppError, start: Instant) -> ApiErr {
    (
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiResponse::error(
            ApiErrorBody::from(err),
            start.elapsed().as_secs_f64() * 1000.0,
        )),
    )
}

/// Parse and validate the chain + address pair from a request.
/// Unsupported chains and malformed EVM addresses are client errors.
fn validate_target(chain: &str, contract_address: &str, start: Instant) -> Result<(Chain, String), ApiErr> {
    let chain = Chain::parse(chain).map_err(|e| reject(&e, start))?;

    let address = contract_address.trim();
    if Address::from_str(address).is_err() {
        let err = AppError::invalid_address(format!("Invalid contract address: {}", address));
        return Err(reject(&err, start));
    }

    Ok((chain, address.to_string()))
}

// ============================================
// Health & stats
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();

    let data = StatsData {
        uptime_seconds: state.uptime_seconds(),
        cache: state.cache.stats(),
    };

    Json(ApiResponse::success(
        data,
        start.elapsed().as_secs_f64() * 1000.0,
    ))
}

// ============================================
// Token scan (typed pipeline)
// ============================================

pub async fn scan_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenScanRequest>,
) -> Result<Json<ApiResponse<RiskResult>>, ApiErr> {
    let start = Instant::now();
    let (chain, address) = validate_target(&req.chain, &req.contract_address, start)?;

    if let Some(cached) = state.cache.get(chain, &address) {
        return Ok(Json(ApiResponse::success(
            cached,
            start.elapsed().as_secs_f64() * 1000.0,
        )));
    }

    let snapshot = state.snapshots.build(chain, &address).await;
    let result = state.engine.evaluate(&snapshot);
    state.cache.insert(result.clone());

    info!(
        "{} Scan complete: {} on {} -> {:.1} ({})",
        result.label.emoji(),
        address,
        chain.as_str(),
        result.global_score,
        result.label.as_str()
    );

    Ok(Json(ApiResponse::success(
        result,
        start.elapsed().as_secs_f64() * 1000.0,
    )))
}

/// Raw fact snapshot without scoring (inspection/debug surface)
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SnapshotQuery>,
) -> Result<Json<ApiResponse<FactSnapshot>>, ApiErr> {
    let start = Instant::now();
    let (chain, address) = validate_target(&params.chain, &params.contract_address, start)?;

    let snapshot = state.snapshots.build(chain, &address).await;

    Ok(Json(ApiResponse::success(
        snapshot,
        start.elapsed().as_secs_f64() * 1000.0,
    )))
}

// ============================================
// Free-text scan (heuristic pipeline)
// ============================================

pub async fn scan_query(
    Json(req): Json<QueryScanRequest>,
) -> Result<Json<ApiResponse<QueryScanResult>>, ApiErr> {
    let start = Instant::now();

    if req.query.trim().is_empty() {
        let err = AppError::bad_request("Empty query");
        return Err(reject(&err, start));
    }

    // Pure and synchronous: no snapshot, no cache
    let result = evaluate_query(&req.query);

    Ok(Json(ApiResponse::success(
        result,
        start.elapsed().as_secs_f64() * 1000.0,
    )))
}
