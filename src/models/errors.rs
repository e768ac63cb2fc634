//! Centralized error handling
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - UPSTREAM_xxx: upstream fact-source errors (absorbed before scoring)
//! - CFG_xxx: configuration / client-input errors
//! - API_xxx: API-surface errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Upstream fact-source errors
    // ============================================
    /// Block explorer request failed
    ExplorerError,
    /// Explorer response could not be parsed
    ExplorerInvalidResponse,
    /// DexScreener request failed
    DexScreenerError,
    /// Upstream request timed out
    UpstreamTimeout,

    // ============================================
    // Configuration / client-input errors
    // ============================================
    /// Caller requested a chain the engine does not recognize
    UnsupportedChain,
    /// Invalid contract address format
    InvalidAddress,
    /// Missing environment variable
    MissingEnv,

    // ============================================
    // API errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Rate limit exceeded
    ApiRateLimited,
    /// Internal server error
    ApiInternalError,

    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExplorerError => "UPSTREAM_EXPLORER_ERROR",
            Self::ExplorerInvalidResponse => "UPSTREAM_EXPLORER_INVALID_RESPONSE",
            Self::DexScreenerError => "UPSTREAM_DEXSCREENER_ERROR",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",

            Self::UnsupportedChain => "CFG_UNSUPPORTED_CHAIN",
            Self::InvalidAddress => "CFG_INVALID_ADDRESS",
            Self::MissingEnv => "CFG_MISSING_ENV",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiRateLimited => "API_RATE_LIMITED",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::UnsupportedChain | Self::InvalidAddress => 400,
            Self::ApiRateLimited => 429,
            _ => 500,
        }
    }

    /// Check if error is an upstream failure that the snapshot builder
    /// absorbs into an absent facet (never propagated into the scorers)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::ExplorerError
                | Self::ExplorerInvalidResponse
                | Self::DexScreenerError
                | Self::UpstreamTimeout
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Block explorer request failed
    pub fn explorer_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExplorerError, msg)
    }

    /// Explorer response could not be parsed
    pub fn explorer_invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExplorerInvalidResponse, msg)
    }

    /// DexScreener request failed
    pub fn dexscreener_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DexScreenerError, msg)
    }

    /// Unsupported chain identifier
    pub fn unsupported_chain(chain: &str) -> Self {
        Self::new(
            ErrorCode::UnsupportedChain,
            format!("Unsupported chain: {}", chain),
        )
    }

    /// Invalid contract address
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAddress, msg)
    }

    /// Missing environment variable
    pub fn missing_env(var: &str) -> Self {
        Self::new(
            ErrorCode::MissingEnv,
            format!("Missing environment variable: {}", var),
        )
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::UpstreamTimeout, "Upstream request timeout")
        } else {
            Self::new(ErrorCode::Unknown, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ExplorerInvalidResponse, "JSON parse error", err)
    }
}
