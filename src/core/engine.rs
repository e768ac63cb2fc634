//! Risk aggregation engine
//! Combines component sub-scores into one normalized global score and a
//! discrete label, and assembles the final RiskResult for a snapshot.

use tracing::debug;

use crate::core::scorers::{
    clamp_score, score_advanced_risk, score_contract_risk, score_market_risk,
    score_reputation_risk,
};
use crate::models::{FactSnapshot, RiskComponent, RiskLabel, RiskResult, ScoreWeights};

/// Map a global score to its discrete risk label.
/// Boundary values belong to the upper bracket: 20.0 is Low, not VeryLow.
pub fn label_from_score(score: f64) -> RiskLabel {
    if score < 20.0 {
        RiskLabel::VeryLow
    } else if score < 40.0 {
        RiskLabel::Low
    } else if score < 60.0 {
        RiskLabel::Medium
    } else if score < 80.0 {
        RiskLabel::High
    } else {
        RiskLabel::Critical
    }
}

/// Weighted aggregation over an ordered component list.
/// Normalizes by the actual weight sum so an absent component cannot bias
/// the result; a zero weight sum uses divisor 1 instead of dividing by zero.
pub fn aggregate(components: &[RiskComponent]) -> (f64, RiskLabel) {
    let weighted_sum: f64 = components.iter().map(|c| c.score * c.weight).sum();
    let weight_total: f64 = components.iter().map(|c| c.weight).sum();
    let divisor = if weight_total == 0.0 { 1.0 } else { weight_total };

    let global_score = clamp_score(weighted_sum / divisor);
    (global_score, label_from_score(global_score))
}

/// The scoring engine for the typed-snapshot pipeline.
/// Pure and synchronous: all async fact gathering happens before this point.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    weights: ScoreWeights,
}

impl RiskEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Evaluate a fact snapshot into a complete RiskResult.
    /// Never fails: missing facets degrade to fallback sub-scores.
    pub fn evaluate(&self, snapshot: &FactSnapshot) -> RiskResult {
        let onchain = snapshot.onchain.as_ref();
        let market = snapshot.market.as_ref();
        let reputation = snapshot.reputation.as_ref();

        let components = vec![
            score_contract_risk(onchain, self.weights.contract),
            score_market_risk(market, self.weights.market),
            score_reputation_risk(reputation, self.weights.reputation),
            score_advanced_risk(onchain, market, self.weights.advanced),
        ];

        let (global_score, label) = aggregate(&components);

        debug!(
            chain = snapshot.chain.as_str(),
            address = %snapshot.contract_address,
            score = global_score,
            label = label.as_str(),
            "snapshot evaluated"
        );

        // Project identity: market name first, explorer second
        let project_name = market
            .and_then(|m| m.name.clone())
            .or_else(|| onchain.and_then(|o| o.name.clone()));
        let symbol = market
            .and_then(|m| m.symbol.clone())
            .or_else(|| onchain.and_then(|o| o.symbol.clone()));

        RiskResult {
            chain: snapshot.chain,
            contract_address: snapshot.contract_address.clone(),
            project_name,
            symbol,
            global_score,
            label,
            components,
            reputation_links: reputation.cloned(),
        }
    }
}
