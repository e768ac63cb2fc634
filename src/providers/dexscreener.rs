//! DexScreener API client
//!
//! Builds the market facet of the fact snapshot: for a token address, fetch
//! all DEX pairs, keep the ones on the requested chain and summarize the
//! highest-liquidity pool. Free API, no key required.
//!
//! An empty pair list is not an error: the token may simply be CEX-only,
//! and the market scorer handles the absent pool.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{
    AppError, AppResult, Chain, MarketFacts, PoolSummary, ReputationLinks, SentryConfig,
};
use crate::utils::constants::{DEXSCREENER_BASE_URL, USER_AGENT};

/// DexScreener API response
#[derive(Debug, Deserialize)]
pub struct DexScreenerResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

/// A trading pair from DexScreener
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    /// Chain id (e.g. "ethereum", "bsc", "base")
    pub chain_id: String,
    /// DEX identifier (e.g. "uniswap", "pancakeswap")
    pub dex_id: String,
    /// Pair address
    pub pair_address: String,
    /// Base token info
    pub base_token: Option<DexToken>,
    /// Liquidity info
    pub liquidity: Option<DexLiquidity>,
    /// Price in USD (stringly typed upstream)
    pub price_usd: Option<String>,
    /// Fully diluted valuation
    pub fdv: Option<f64>,
    /// Volume windows
    pub volume: Option<DexVolume>,
    /// Price change windows
    pub price_change: Option<DexPriceChange>,
    /// Pair page URL
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexToken {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    // Social links, present on some token records
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexLiquidity {
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexVolume {
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexPriceChange {
    pub h24: Option<f64>,
}

impl DexPair {
    fn liquidity_usd(&self) -> Option<f64> {
        self.liquidity.as_ref().and_then(|l| l.usd)
    }

    fn to_pool_summary(&self) -> PoolSummary {
        PoolSummary {
            dex_id: self.dex_id.clone(),
            pair_address: self.pair_address.clone(),
            price_usd: self.price_usd.as_deref().and_then(|p| p.parse().ok()),
            liquidity_usd: self.liquidity_usd(),
            fdv_usd: self.fdv,
            volume_24h_usd: self.volume.as_ref().and_then(|v| v.h24),
            price_change_24h: self.price_change.as_ref().and_then(|c| c.h24),
            url: self.url.clone(),
        }
    }
}

/// DexScreener API client
pub struct DexScreenerClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl DexScreenerClient {
    pub fn new(config: &SentryConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            base_url: DEXSCREENER_BASE_URL.to_string(),
            timeout: config.upstream_timeout,
        }
    }

    /// Override the endpoint (tests)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch all pairs for a token address across chains
    async fn get_token_pairs(&self, contract_address: &str) -> AppResult<Vec<DexPair>> {
        let url = format!("{}/{}", self.base_url, contract_address.trim());
        debug!("🔍 DexScreener: fetching pairs for {}", contract_address);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::dexscreener_error(format!(
                "HTTP {} from DexScreener",
                response.status()
            )));
        }

        let data: DexScreenerResponse = response
            .json()
            .await
            .map_err(|e| AppError::dexscreener_error(format!("parse error: {}", e)))?;

        Ok(data.pairs.unwrap_or_default())
    }

    /// Fetch the market facet for a token on one chain, together with any
    /// social links found on the token record (secondary reputation source).
    pub async fn fetch_market(
        &self,
        chain: Chain,
        contract_address: &str,
    ) -> AppResult<MarketBundle> {
        let contract_address = contract_address.trim();
        let pairs = self.get_token_pairs(contract_address).await?;

        let best = select_best_pool(&pairs, chain);

        let (name, symbol) = best
            .and_then(|p| p.base_token.as_ref())
            .map(|t| (t.name.clone(), t.symbol.clone()))
            .unwrap_or((None, None));

        info!(
            "📊 DexScreener: {} pairs total, best pool on {}: {}",
            pairs.len(),
            chain.as_str(),
            best.map(|p| p.dex_id.as_str()).unwrap_or("none")
        );

        Ok(MarketBundle {
            facts: MarketFacts {
                contract_address: contract_address.to_string(),
                name,
                symbol,
                best_pool: best.map(DexPair::to_pool_summary),
            },
            social_links: extract_social_links(&pairs),
        })
    }
}

/// Market facet plus the social links DexScreener reports for the token
#[derive(Debug, Clone)]
pub struct MarketBundle {
    pub facts: MarketFacts,
    pub social_links: ReputationLinks,
}

/// Social links from the first pair's token record (one record is enough;
/// DexScreener repeats the same token metadata on every pair)
fn extract_social_links(pairs: &[DexPair]) -> ReputationLinks {
    pairs
        .first()
        .and_then(|p| p.base_token.as_ref())
        .map(|t| ReputationLinks {
            website: t.website.clone(),
            twitter: t.twitter.clone(),
            discord: t.discord.clone(),
            github: t.github.clone(),
        })
        .unwrap_or_default()
}

/// Pick the highest-liquidity pair on the target chain.
/// Pairs without a liquidity figure cannot be ranked and are skipped.
fn select_best_pool(pairs: &[DexPair], chain: Chain) -> Option<&DexPair> {
    pairs
        .iter()
        .filter(|p| p.chain_id.eq_ignore_ascii_case(chain.dexscreener_id()))
        .filter(|p| p.liquidity_usd().is_some())
        .max_by(|a, b| {
            let la = a.liquidity_usd().unwrap_or(0.0);
            let lb = b.liquidity_usd().unwrap_or(0.0);
            la.partial_cmp(&lb).unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(chain_id: &str, dex_id: &str, liquidity: Option<f64>) -> DexPair {
        DexPair {
            chain_id: chain_id.to_string(),
            dex_id: dex_id.to_string(),
            pair_address: "0xpair".to_string(),
            base_token: None,
            liquidity: liquidity.map(|usd| DexLiquidity { usd: Some(usd) }),
            price_usd: Some("1.25".to_string()),
            fdv: None,
            volume: None,
            price_change: None,
            url: None,
        }
    }

    #[test]
    fn test_select_best_pool_prefers_highest_liquidity() {
        let pairs = vec![
            pair("ethereum", "sushiswap", Some(50_000.0)),
            pair("ethereum", "uniswap", Some(900_000.0)),
            pair("bsc", "pancakeswap", Some(5_000_000.0)),
        ];

        let best = select_best_pool(&pairs, Chain::Ethereum).unwrap();
        assert_eq!(best.dex_id, "uniswap");
    }

    #[test]
    fn test_select_best_pool_skips_unranked_pairs() {
        let pairs = vec![
            pair("ethereum", "mystery", None),
            pair("ethereum", "uniswap", Some(10_000.0)),
        ];

        let best = select_best_pool(&pairs, Chain::Ethereum).unwrap();
        assert_eq!(best.dex_id, "uniswap");
    }

    #[test]
    fn test_select_best_pool_wrong_chain_yields_none() {
        let pairs = vec![pair("bsc", "pancakeswap", Some(100_000.0))];
        assert!(select_best_pool(&pairs, Chain::Base).is_none());
    }

    #[test]
    fn test_pool_summary_parses_stringly_price() {
        let p = pair("ethereum", "uniswap", Some(1000.0));
        let summary = p.to_pool_summary();
        assert_eq!(summary.price_usd, Some(1.25));
        assert_eq!(summary.liquidity_usd, Some(1000.0));
    }

    #[test]
    fn test_extract_social_links_from_first_pair() {
        let mut first = pair("ethereum", "uniswap", Some(1000.0));
        first.base_token = Some(DexToken {
            address: None,
            name: Some("Example".to_string()),
            symbol: Some("EXM".to_string()),
            website: Some("https://example.org".to_string()),
            twitter: None,
            discord: None,
            github: None,
        });
        let second = pair("ethereum", "sushiswap", Some(500.0));

        let links = extract_social_links(&[first, second]);
        assert_eq!(links.website.as_deref(), Some("https://example.org"));
        assert!(links.twitter.is_none());

        assert_eq!(extract_social_links(&[]), ReputationLinks::default());
    }
}
