//! TokenSentry Library
//!
//! Composite risk scoring for blockchain tokens:
//! - Typed pipeline: fact snapshot (on-chain, market, reputation facets)
//!   scored by four weighted components with graceful fallbacks
//! - Source-code pattern detector for advanced risk flags
//! - Free-text heuristic pipeline for unstructured project queries

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::engine::{aggregate, label_from_score, RiskEngine};
pub use crate::core::heuristic::{evaluate_query, QueryRiskLevel, QueryScanResult};
pub use crate::core::patterns::{detect_risk_patterns, PATTERN_RULES};
pub use crate::models::{
    AppError, AppResult, Chain, ErrorCode, FactSnapshot, MarketFacts, OnchainFacts, PoolSummary,
    ReputationLinks, RiskComponent, RiskFlag, RiskLabel, RiskResult, ScoreWeights, SentryConfig,
    Severity,
};
pub use crate::providers::snapshot::SnapshotBuilder;
pub use crate::utils::cache::ScanCache;
