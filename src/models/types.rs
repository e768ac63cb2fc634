//! Type definitions for TokenSentry
//! Fact snapshot facets, risk flags, component scores and the final result

use serde::{Deserialize, Serialize};

use crate::models::errors::{AppError, AppResult};

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Bsc,
    Base,
}

impl Chain {
    /// Parse a chain identifier as sent by API clients.
    /// Unknown identifiers are the one client-input error the engine surfaces.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "ethereum" | "eth" => Ok(Self::Ethereum),
            "bsc" | "binance" => Ok(Self::Bsc),
            "base" => Ok(Self::Base),
            other => Err(AppError::unsupported_chain(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Bsc => "bsc",
            Self::Base => "base",
        }
    }

    /// Numeric chain id used by the explorer API
    pub fn explorer_id(&self) -> u64 {
        match self {
            Self::Ethereum => 1,
            Self::Bsc => 56,
            Self::Base => 8453,
        }
    }

    /// Chain identifier used by DexScreener pair records
    pub fn dexscreener_id(&self) -> &'static str {
        self.as_str()
    }
}

// ============================================
// Fact Snapshot (input to the scoring engine)
// ============================================

/// On-chain facts for a token, as reported by the block explorer.
/// Every field is independently optional: a missing field inside a present
/// facet is not the same as a missing facet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnchainFacts {
    pub contract_address: String,

    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u32>,

    /// Raw supply in base units, as the explorer returns it
    pub total_supply_raw: Option<String>,
    /// Supply normalized by decimals
    pub total_supply: Option<f64>,

    pub is_contract_verified: Option<bool>,
    pub contract_creator: Option<String>,
    pub creation_tx_hash: Option<String>,
    pub holders_count: Option<u64>,

    /// Flattened contract source text when the contract is verified
    pub source_code: Option<String>,

    // Official links as the explorer reports them (merged later with
    // market-side socials by the reputation provider)
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub github: Option<String>,
}

/// Best liquidity pool for a token on one DEX
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSummary {
    pub dex_id: String,
    pub pair_address: String,

    pub price_usd: Option<f64>,
    pub liquidity_usd: Option<f64>,
    pub fdv_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub price_change_24h: Option<f64>,

    pub url: Option<String>,
}

/// Market facts for a token (DexScreener)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketFacts {
    pub contract_address: String,

    pub name: Option<String>,
    pub symbol: Option<String>,

    /// Highest-liquidity pool on the requested chain, if any
    pub best_pool: Option<PoolSummary>,
}

/// Official project links, merged from explorer and market sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReputationLinks {
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub github: Option<String>,
}

impl ReputationLinks {
    /// Link slots in fixed display order: (label, value)
    pub fn slots(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("website", self.website.as_deref()),
            ("twitter/x", self.twitter.as_deref()),
            ("discord", self.discord.as_deref()),
            ("github", self.github.as_deref()),
        ]
    }
}

/// Typed bundle of everything the collaborators could fetch for one token.
/// A facet is None when its upstream source failed entirely; the scorers
/// fall back to fixed high-risk values in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSnapshot {
    pub chain: Chain,
    pub contract_address: String,

    pub onchain: Option<OnchainFacts>,
    pub market: Option<MarketFacts>,
    pub reputation: Option<ReputationLinks>,
}

impl FactSnapshot {
    /// Empty snapshot: every facet absent (all fetches failed)
    pub fn empty(chain: Chain, contract_address: impl Into<String>) -> Self {
        Self {
            chain,
            contract_address: contract_address.into(),
            onchain: None,
            market: None,
            reputation: None,
        }
    }
}

// ============================================
// Risk flags (pattern detector output)
// ============================================

/// Severity of a detected risk pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Additive score delta this severity contributes to the advanced scorer
    pub fn score_delta(&self) -> f64 {
        match self {
            Self::Low => 5.0,
            Self::Medium => 10.0,
            Self::High => 20.0,
            Self::Critical => 30.0,
        }
    }
}

/// A named, severity-tagged signal found in contract source text.
/// Immutable once created; only the pattern detector produces these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFlag {
    pub name: String,
    pub severity: Severity,
    pub reason: String,
}

// ============================================
// Component scores & final result
// ============================================

/// One component's bounded risk contribution plus its justifications.
/// Recomputed on every evaluation, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskComponent {
    pub name: String,
    /// 0 = safe, 100 = maximum risk (clamped)
    pub score: f64,
    pub weight: f64,
    pub reasons: Vec<String>,
}

/// Discrete risk bucket derived from the global score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::VeryLow => "✅",
            Self::Low => "🟡",
            Self::Medium => "🟠",
            Self::High => "🔴",
            Self::Critical => "💀",
        }
    }
}

/// Final scan result for one token.
/// Created once per request, immutable, not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskResult {
    pub chain: Chain,
    pub contract_address: String,
    pub project_name: Option<String>,
    pub symbol: Option<String>,

    pub global_score: f64,
    pub label: RiskLabel,

    /// Ordered component breakdown (evaluation order is fixed)
    pub components: Vec<RiskComponent>,

    pub reputation_links: Option<ReputationLinks>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_parse() {
        assert_eq!(Chain::parse("ethereum").unwrap(), Chain::Ethereum);
        assert_eq!(Chain::parse("ETH").unwrap(), Chain::Ethereum);
        assert_eq!(Chain::parse(" bsc ").unwrap(), Chain::Bsc);
        assert!(Chain::parse("solana").is_err());
    }

    #[test]
    fn test_severity_deltas() {
        assert_eq!(Severity::Low.score_delta(), 5.0);
        assert_eq!(Severity::Medium.score_delta(), 10.0);
        assert_eq!(Severity::High.score_delta(), 20.0);
        assert_eq!(Severity::Critical.score_delta(), 30.0);
    }

    #[test]
    fn test_reputation_slots_order() {
        let links = ReputationLinks {
            website: Some("https://example.org".to_string()),
            ..Default::default()
        };
        let slots = links.slots();
        assert_eq!(slots[0].0, "website");
        assert!(slots[0].1.is_some());
        assert!(slots[1].1.is_none());
    }
}
