//! Component scorers for the typed-snapshot pipeline
//!
//! Each scorer is a pure function `(facts) -> RiskComponent`. Missing data
//! never errors: an absent facet yields a fixed high-risk fallback score
//! with a single explanatory reason. When data is present the scorer starts
//! from a neutral baseline and applies independent additive deltas, one
//! reason per adjustment. The raw sum is accumulated first and clamped to
//! [0,100] exactly once at the end.

use crate::core::patterns::detect_risk_patterns;
use crate::models::{MarketFacts, OnchainFacts, ReputationLinks, RiskComponent};

/// Clamp a raw score into the [0,100] band
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

// ============================================
// Contract risk (on-chain facts)
// ============================================

const CONTRACT_FALLBACK_SCORE: f64 = 80.0;
const CONTRACT_BASELINE: f64 = 20.0;

/// Score contract-level risk: verification, supply transparency, holders.
pub fn score_contract_risk(onchain: Option<&OnchainFacts>, weight: f64) -> RiskComponent {
    let name = "On-chain contract risk";

    let Some(onchain) = onchain else {
        return RiskComponent {
            name: name.to_string(),
            score: clamp_score(CONTRACT_FALLBACK_SCORE),
            weight,
            reasons: vec!["Could not fetch on-chain data (explorer unavailable).".to_string()],
        };
    };

    let mut score = CONTRACT_BASELINE;
    let mut reasons = Vec::new();

    if onchain.is_contract_verified.unwrap_or(false) {
        score -= 10.0;
        reasons.push("Contract source verified on the block explorer.".to_string());
    } else {
        score += 25.0;
        reasons.push(
            "Contract source NOT verified (possible hidden code / backdoor).".to_string(),
        );
    }

    match onchain.total_supply {
        None => {
            score += 10.0;
            reasons.push("Total supply unknown (transparency gap).".to_string());
        }
        Some(supply) => {
            reasons.push(format!("Total supply detected: {}.", supply));
        }
    }

    match onchain.holders_count {
        Some(holders) if holders < 100 => {
            score += 30.0;
            reasons.push("Fewer than 100 holders (high manipulation risk).".to_string());
        }
        Some(holders) if holders < 1000 => {
            score += 15.0;
            reasons.push("Fewer than 1000 holders (centralization risk).".to_string());
        }
        Some(_) => {
            score -= 5.0;
            reasons.push("Significant holder community.".to_string());
        }
        None => {
            score += 5.0;
            reasons.push("Holder count unknown.".to_string());
        }
    }

    RiskComponent {
        name: name.to_string(),
        score: clamp_score(score),
        weight,
        reasons,
    }
}

// ============================================
// Market / liquidity risk
// ============================================

const MARKET_FALLBACK_SCORE: f64 = 75.0;
const MARKET_BASELINE: f64 = 40.0;

/// Score market risk: liquidity depth, 24h volume, volatility, FDV ratio.
pub fn score_market_risk(market: Option<&MarketFacts>, weight: f64) -> RiskComponent {
    let name = "Market & liquidity risk";

    let pool = market.and_then(|m| m.best_pool.as_ref());
    let Some(pool) = pool else {
        return RiskComponent {
            name: name.to_string(),
            score: clamp_score(MARKET_FALLBACK_SCORE),
            weight,
            reasons: vec![
                "No DEX pool found for this token (possibly illiquid or opaque).".to_string(),
            ],
        };
    };

    let mut score = MARKET_BASELINE;
    let mut reasons = Vec::new();

    match pool.liquidity_usd {
        None => {
            score += 20.0;
            reasons.push("Liquidity unknown (incomplete data).".to_string());
        }
        Some(liq) if liq < 20_000.0 => {
            score += 35.0;
            reasons.push("Liquidity under $20k (very risky, heavy slippage likely).".to_string());
        }
        Some(liq) if liq < 100_000.0 => {
            score += 20.0;
            reasons.push("Liquidity between $20k and $100k (high risk).".to_string());
        }
        Some(liq) if liq < 500_000.0 => {
            score += 10.0;
            reasons.push("Liquidity between $100k and $500k (moderate risk).".to_string());
        }
        Some(liq) if liq < 5_000_000.0 => {
            reasons.push("Liquidity above $500k (fairly comfortable).".to_string());
        }
        Some(_) => {
            score -= 10.0;
            reasons.push("Very deep liquidity (good for stability).".to_string());
        }
    }

    match pool.volume_24h_usd {
        None => {
            score += 10.0;
            reasons.push("24h volume unknown.".to_string());
        }
        Some(vol) if vol < 10_000.0 => {
            score += 25.0;
            reasons.push("24h volume under $10k (inactive market).".to_string());
        }
        Some(vol) if vol < 100_000.0 => {
            score += 10.0;
            reasons.push("24h volume between $10k and $100k (moderate activity).".to_string());
        }
        Some(vol) if vol > 1_000_000.0 => {
            score -= 10.0;
            reasons.push("24h volume above $1M (strong activity).".to_string());
        }
        Some(_) => {}
    }

    if let Some(change) = pool.price_change_24h {
        if change.abs() > 40.0 {
            score += 15.0;
            reasons.push(format!(
                "Very large 24h price move ({}%), possible pump & dump.",
                change
            ));
        } else if change.abs() > 20.0 {
            score += 5.0;
            reasons.push(format!(
                "Significant 24h price move ({}%), volatility worth watching.",
                change
            ));
        } else if change.abs() < 5.0 {
            score -= 5.0;
            reasons.push("Price relatively stable over 24h.".to_string());
        }
    }

    if let (Some(fdv), Some(liq)) = (pool.fdv_usd, pool.liquidity_usd) {
        if liq > 0.0 {
            let ratio = fdv / liq;
            if ratio > 100.0 {
                score += 10.0;
                reasons.push(format!(
                    "FDV/liquidity very high (~{:.1}): token may be overvalued.",
                    ratio
                ));
            } else if ratio < 10.0 {
                score -= 5.0;
                reasons.push(format!(
                    "FDV/liquidity reasonable (~{:.1}): saner valuation.",
                    ratio
                ));
            }
        }
    }

    RiskComponent {
        name: name.to_string(),
        score: clamp_score(score),
        weight,
        reasons,
    }
}

// ============================================
// Reputation risk (official links)
// ============================================

const REPUTATION_FALLBACK_SCORE: f64 = 80.0;

/// Fixed score table keyed by how many of the four official links exist
const REPUTATION_SCORE_TABLE: [f64; 5] = [85.0, 70.0, 50.0, 35.0, 20.0];

/// Score reputation risk from the count of official links present.
pub fn score_reputation_risk(links: Option<&ReputationLinks>, weight: f64) -> RiskComponent {
    let name = "Reputation risk (official links)";

    let Some(links) = links else {
        return RiskComponent {
            name: name.to_string(),
            score: clamp_score(REPUTATION_FALLBACK_SCORE),
            weight,
            reasons: vec!["Could not fetch official links (upstream unavailable).".to_string()],
        };
    };

    let slots = links.slots();
    let present: Vec<&str> = slots
        .iter()
        .filter(|(_, v)| v.is_some())
        .map(|(label, _)| *label)
        .collect();
    let missing: Vec<&str> = slots
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(label, _)| *label)
        .collect();

    let score = REPUTATION_SCORE_TABLE[present.len()];

    let mut reasons = vec![match present.len() {
        0 => "No official link (website, twitter/x, discord, github) was found.".to_string(),
        1 => format!(
            "Only one official link detected ({}). Very limited public presence.",
            present[0]
        ),
        2 => format!(
            "Two official links detected ({}). Average reputation.",
            present.join(", ")
        ),
        3 => format!(
            "Several official links detected ({}). Publicly accountable project.",
            present.join(", ")
        ),
        _ => "Full presence (website, twitter/x, discord, github). Good reputation signal."
            .to_string(),
    }];

    if !present.is_empty() {
        reasons.push(format!("Links found: {}.", present.join(", ")));
    }
    if !missing.is_empty() {
        reasons.push(format!("Links missing: {}.", missing.join(", ")));
    }

    RiskComponent {
        name: name.to_string(),
        score: clamp_score(score),
        weight,
        reasons,
    }
}

// ============================================
// Advanced risk (source-code patterns)
// ============================================

const ADVANCED_FALLBACK_SCORE: f64 = 70.0;
const ADVANCED_NO_FLAGS_SCORE: f64 = 20.0;
const ADVANCED_BASELINE: f64 = 40.0;

/// Score advanced risk by delegating to the pattern detector.
pub fn score_advanced_risk(
    onchain: Option<&OnchainFacts>,
    market: Option<&MarketFacts>,
    weight: f64,
) -> RiskComponent {
    let name = "Advanced contract risks";

    let Some(onchain) = onchain else {
        return RiskComponent {
            name: name.to_string(),
            score: clamp_score(ADVANCED_FALLBACK_SCORE),
            weight,
            reasons: vec!["Could not analyze contract code (no on-chain data).".to_string()],
        };
    };

    let source = onchain.source_code.as_deref().unwrap_or_default();
    let flags = detect_risk_patterns(source, onchain.name.as_deref(), market);

    if flags.is_empty() {
        return RiskComponent {
            name: name.to_string(),
            score: clamp_score(ADVANCED_NO_FLAGS_SCORE),
            weight,
            reasons: vec![
                "No advanced risk pattern detected in the code (basic heuristic scan)."
                    .to_string(),
            ],
        };
    }

    let mut score = ADVANCED_BASELINE;
    let mut reasons = Vec::with_capacity(flags.len());

    for flag in &flags {
        score += flag.severity.score_delta();
        reasons.push(format!("{}: {}", flag.name, flag.reason));
    }

    RiskComponent {
        name: name.to_string(),
        score: clamp_score(score),
        weight,
        reasons,
    }
}
