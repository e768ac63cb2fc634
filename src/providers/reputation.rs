//! Reputation link fusion
//!
//! Official links show up in several upstream sources (block explorer
//! metadata, DexScreener token records). Sources are merged per field with
//! a single "first non-empty wins" combinator over an explicit priority
//! order, so precedence lives in data instead of nested conditionals.

use crate::models::{OnchainFacts, ReputationLinks};

/// Extract the explorer-reported links from the on-chain facet
pub fn links_from_onchain(onchain: &OnchainFacts) -> ReputationLinks {
    ReputationLinks {
        website: onchain.website.clone(),
        twitter: onchain.twitter.clone(),
        discord: onchain.discord.clone(),
        github: onchain.github.clone(),
    }
}

/// First non-empty value across sources, in priority order
fn first_non_empty<'a>(
    sources: &'a [ReputationLinks],
    field: impl Fn(&'a ReputationLinks) -> Option<&'a String>,
) -> Option<String> {
    sources
        .iter()
        .filter_map(|source| field(source))
        .find(|value| !value.is_empty())
        .cloned()
}

/// Merge link sources, earlier entries taking precedence per field.
pub fn merge_links(sources: &[ReputationLinks]) -> ReputationLinks {
    ReputationLinks {
        website: first_non_empty(sources, |s| s.website.as_ref()),
        twitter: first_non_empty(sources, |s| s.twitter.as_ref()),
        discord: first_non_empty(sources, |s| s.discord.as_ref()),
        github: first_non_empty(sources, |s| s.github.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(website: Option<&str>, twitter: Option<&str>) -> ReputationLinks {
        ReputationLinks {
            website: website.map(str::to_string),
            twitter: twitter.map(str::to_string),
            discord: None,
            github: None,
        }
    }

    #[test]
    fn test_earlier_source_wins_per_field() {
        let explorer = links(Some("https://explorer.example"), None);
        let market = links(Some("https://market.example"), Some("https://x.com/p"));

        let merged = merge_links(&[explorer, market]);
        assert_eq!(merged.website.as_deref(), Some("https://explorer.example"));
        // Missing in the primary source: filled from the secondary
        assert_eq!(merged.twitter.as_deref(), Some("https://x.com/p"));
    }

    #[test]
    fn test_empty_strings_do_not_win() {
        let explorer = links(Some(""), None);
        let market = links(Some("https://market.example"), None);

        let merged = merge_links(&[explorer, market]);
        assert_eq!(merged.website.as_deref(), Some("https://market.example"));
    }

    #[test]
    fn test_no_sources_yields_empty_links() {
        let merged = merge_links(&[]);
        assert_eq!(merged, ReputationLinks::default());
    }
}
