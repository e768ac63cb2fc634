//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::models::AppError;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiErrorBody, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API error body with the internal error code surfaced
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "API_BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}

impl From<&AppError> for ApiErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
        }
    }
}

// ============================================
// Token scan (typed pipeline)
// ============================================

#[derive(Debug, Deserialize)]
pub struct TokenScanRequest {
    pub chain: String,
    pub contract_address: String,
}

/// Query parameters for the raw snapshot route
#[derive(Debug, Deserialize)]
pub struct SnapshotQuery {
    pub chain: String,
    pub contract_address: String,
}

// ============================================
// Free-text scan (heuristic pipeline)
// ============================================

#[derive(Debug, Deserialize)]
pub struct QueryScanRequest {
    pub query: String,
}

// ============================================
// Health & stats
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub uptime_seconds: u64,
    pub cache: crate::utils::cache::CacheStats,
}
