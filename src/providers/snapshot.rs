//! Fact snapshot builder
//!
//! Gathers all upstream facets for one token concurrently and assembles the
//! FactSnapshot the scoring engine consumes. Every upstream failure is
//! absorbed here into an absent facet — no provider error ever reaches the
//! scorers, which degrade to fallback scores instead.

use tracing::warn;

use crate::models::{Chain, FactSnapshot, SentryConfig};
use crate::providers::dexscreener::DexScreenerClient;
use crate::providers::explorer::ExplorerClient;
use crate::providers::reputation::{links_from_onchain, merge_links};

/// Builds fact snapshots from the upstream collaborators
pub struct SnapshotBuilder {
    explorer: ExplorerClient,
    dexscreener: DexScreenerClient,
}

impl SnapshotBuilder {
    pub fn new(config: &SentryConfig) -> Self {
        Self {
            explorer: ExplorerClient::new(config),
            dexscreener: DexScreenerClient::new(config),
        }
    }

    /// Fetch every facet for a token. Both fetches run concurrently; each
    /// failure degrades its facet to None and is logged, never propagated.
    pub async fn build(&self, chain: Chain, contract_address: &str) -> FactSnapshot {
        let contract_address = contract_address.trim();

        let (onchain_result, market_result) = tokio::join!(
            self.explorer.fetch_onchain_facts(chain, contract_address),
            self.dexscreener.fetch_market(chain, contract_address),
        );

        let onchain = match onchain_result {
            Ok(facts) => Some(facts),
            Err(e) => {
                warn!("⚠️ On-chain facet unavailable for {}: {}", contract_address, e);
                None
            }
        };

        let (market, market_socials) = match market_result {
            Ok(bundle) => (Some(bundle.facts), Some(bundle.social_links)),
            Err(e) => {
                warn!("⚠️ Market facet unavailable for {}: {}", contract_address, e);
                (None, None)
            }
        };

        // Reputation facet: merged links, explorer source first. The facet
        // is absent only when no link source could be fetched at all.
        let reputation = match (&onchain, market_socials) {
            (None, None) => None,
            (onchain, socials) => {
                let mut sources = Vec::new();
                if let Some(facts) = onchain {
                    sources.push(links_from_onchain(facts));
                }
                if let Some(socials) = socials {
                    sources.push(socials);
                }
                Some(merge_links(&sources))
            }
        };

        FactSnapshot {
            chain,
            contract_address: contract_address.to_string(),
            onchain,
            market,
            reputation,
        }
    }
}
