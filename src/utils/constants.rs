//! Constants Module - Single Source of Truth
//!
//! Application constants, upstream endpoints and chain tables used across
//! the service. No hardcoded values in other modules.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "TokenSentry";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = "TokenSentry/0.1";

// ============================================
// SERVICE DEFAULTS
// ============================================

/// Default API bind address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default timeout for upstream fact fetches (seconds)
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;

/// Default scan-result cache TTL (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

// ============================================
// UPSTREAM ENDPOINTS
// ============================================

/// Etherscan v2 multi-chain API base URL
pub const EXPLORER_BASE_URL: &str = "https://api.etherscan.io/v2/api";

/// DexScreener token-pairs API base URL
pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com/latest/dex/tokens";

// ============================================
// CHAIN IDS - Single Source of Truth
// ============================================

/// Ethereum Mainnet
pub const CHAIN_ID_ETHEREUM: u64 = 1;
/// BNB Smart Chain
pub const CHAIN_ID_BSC: u64 = 56;
/// Base
pub const CHAIN_ID_BASE: u64 = 8453;

/// All supported chain IDs
pub const SUPPORTED_CHAIN_IDS: [u64; 3] = [CHAIN_ID_ETHEREUM, CHAIN_ID_BSC, CHAIN_ID_BASE];

/// Get human-readable chain name
pub fn get_chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        CHAIN_ID_ETHEREUM => "Ethereum",
        CHAIN_ID_BSC => "BNB Smart Chain",
        CHAIN_ID_BASE => "Base",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_names() {
        assert_eq!(get_chain_name(CHAIN_ID_ETHEREUM), "Ethereum");
        assert_eq!(get_chain_name(CHAIN_ID_BASE), "Base");
        assert_eq!(get_chain_name(999), "Unknown");
    }
}
