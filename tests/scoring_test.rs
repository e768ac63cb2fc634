//! Integration tests for the typed-snapshot scoring pipeline

use token_sentry::core::scorers::{score_contract_risk, score_market_risk};
use token_sentry::{
    aggregate, detect_risk_patterns, label_from_score, Chain, FactSnapshot, MarketFacts,
    OnchainFacts, PoolSummary, ReputationLinks, RiskComponent, RiskEngine, RiskLabel, Severity,
};

fn pool(liquidity: Option<f64>, volume: Option<f64>, change: Option<f64>) -> PoolSummary {
    PoolSummary {
        dex_id: "uniswap".to_string(),
        pair_address: "0xpair".to_string(),
        price_usd: Some(1.0),
        liquidity_usd: liquidity,
        fdv_usd: None,
        volume_24h_usd: volume,
        price_change_24h: change,
        url: None,
    }
}

fn market_with(pool_summary: PoolSummary) -> MarketFacts {
    MarketFacts {
        contract_address: "0xtoken".to_string(),
        name: Some("Example Token".to_string()),
        symbol: Some("EXM".to_string()),
        best_pool: Some(pool_summary),
    }
}

#[test]
fn empty_snapshot_degrades_to_exact_fallback_scores() {
    let engine = RiskEngine::new();
    let snapshot = FactSnapshot::empty(Chain::Ethereum, "0xdead");
    let result = engine.evaluate(&snapshot);

    let scores: Vec<f64> = result.components.iter().map(|c| c.score).collect();
    assert_eq!(scores, vec![80.0, 75.0, 80.0, 70.0]);

    let expected = 80.0 * 0.4 + 75.0 * 0.25 + 80.0 * 0.15 + 70.0 * 0.2;
    assert!((result.global_score - expected).abs() < 1e-9);
    assert_eq!(result.label, RiskLabel::High);
}

#[test]
fn global_score_stays_bounded_for_extreme_components() {
    let extremes = vec![
        RiskComponent {
            name: "a".to_string(),
            score: 100.0,
            weight: 0.9,
            reasons: vec![],
        },
        RiskComponent {
            name: "b".to_string(),
            score: 100.0,
            weight: 0.1,
            reasons: vec![],
        },
    ];
    let (score, label) = aggregate(&extremes);
    assert!(score <= 100.0);
    assert_eq!(label, RiskLabel::Critical);
}

#[test]
fn aggregation_is_invariant_to_component_order() {
    let forward = vec![
        RiskComponent {
            name: "a".to_string(),
            score: 35.0,
            weight: 0.4,
            reasons: vec![],
        },
        RiskComponent {
            name: "b".to_string(),
            score: 90.0,
            weight: 0.25,
            reasons: vec![],
        },
        RiskComponent {
            name: "c".to_string(),
            score: 10.0,
            weight: 0.35,
            reasons: vec![],
        },
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(aggregate(&forward).0, aggregate(&reversed).0);
}

#[test]
fn label_ladder_boundaries() {
    assert_eq!(label_from_score(19.9), RiskLabel::VeryLow);
    assert_eq!(label_from_score(20.0), RiskLabel::Low);
    assert_eq!(label_from_score(39.9), RiskLabel::Low);
    assert_eq!(label_from_score(40.0), RiskLabel::Medium);
    assert_eq!(label_from_score(59.9), RiskLabel::Medium);
    assert_eq!(label_from_score(60.0), RiskLabel::High);
    assert_eq!(label_from_score(79.9), RiskLabel::High);
    assert_eq!(label_from_score(80.0), RiskLabel::Critical);
}

#[test]
fn verification_makes_contract_component_safer() {
    let verified = OnchainFacts {
        contract_address: "0xtoken".to_string(),
        is_contract_verified: Some(true),
        holders_count: Some(5000),
        total_supply: Some(21_000_000.0),
        ..Default::default()
    };
    let mut unverified = verified.clone();
    unverified.is_contract_verified = Some(false);

    let safe = score_contract_risk(Some(&verified), 0.4);
    let risky = score_contract_risk(Some(&unverified), 0.4);

    assert!(safe.score < risky.score);
}

#[test]
fn thin_liquidity_scores_strictly_riskier() {
    let thin = market_with(pool(Some(2_000.0), Some(50_000.0), Some(1.0)));
    let deep = market_with(pool(Some(200_000.0), Some(50_000.0), Some(1.0)));

    let thin_score = score_market_risk(Some(&thin), 0.25);
    let deep_score = score_market_risk(Some(&deep), 0.25);

    assert!(thin_score.score > deep_score.score);
}

#[test]
fn mint_and_owner_source_yields_two_ordered_flags() {
    let source = "contract Token { function mint(address to, uint256 v) public onlyOwner {} }";
    let flags = detect_risk_patterns(source, Some("Token"), None);

    assert_eq!(flags.len(), 2);
    assert_eq!(flags[0].severity, Severity::High);
    assert_eq!(flags[1].severity, Severity::Low);
}

#[test]
fn full_evaluation_of_a_healthy_token() {
    let engine = RiskEngine::new();

    let onchain = OnchainFacts {
        contract_address: "0xtoken".to_string(),
        name: Some("Example Token".to_string()),
        symbol: Some("EXM".to_string()),
        is_contract_verified: Some(true),
        holders_count: Some(12_000),
        total_supply: Some(1_000_000.0),
        source_code: Some("contract ExampleToken { function transfer() public {} }".to_string()),
        ..Default::default()
    };

    let market = market_with(pool(Some(8_000_000.0), Some(2_000_000.0), Some(2.0)));

    let reputation = ReputationLinks {
        website: Some("https://example.org".to_string()),
        twitter: Some("https://x.com/example".to_string()),
        discord: Some("https://discord.gg/example".to_string()),
        github: Some("https://github.com/example".to_string()),
    };

    let snapshot = FactSnapshot {
        chain: Chain::Ethereum,
        contract_address: "0xtoken".to_string(),
        onchain: Some(onchain),
        market: Some(market),
        reputation: Some(reputation),
    };

    let result = engine.evaluate(&snapshot);

    // contract: 20-10-5=5, market: 40-10-10-5=15, reputation: 20, advanced: 20
    let scores: Vec<f64> = result.components.iter().map(|c| c.score).collect();
    assert_eq!(scores, vec![5.0, 15.0, 20.0, 20.0]);
    assert_eq!(result.label, RiskLabel::VeryLow);

    assert_eq!(result.project_name.as_deref(), Some("Example Token"));
    assert_eq!(result.symbol.as_deref(), Some("EXM"));
    assert!(result.reputation_links.is_some());

    // Every component carries at least one reason
    for component in &result.components {
        assert!(!component.reasons.is_empty());
    }
}

#[test]
fn risky_token_lands_in_upper_buckets() {
    let engine = RiskEngine::new();

    let onchain = OnchainFacts {
        contract_address: "0xrug".to_string(),
        name: Some("RugProxy".to_string()),
        is_contract_verified: Some(false),
        holders_count: Some(40),
        source_code: Some(
            "contract RugProxy is Ownable, Pausable { \
             function mint(uint256 a) external onlyOwner {} \
             mapping(address => bool) public blacklist; \
             uint256 public taxFee; }"
                .to_string(),
        ),
        ..Default::default()
    };

    let market = market_with(pool(Some(5_000.0), Some(2_000.0), Some(55.0)));

    let snapshot = FactSnapshot {
        chain: Chain::Bsc,
        contract_address: "0xrug".to_string(),
        onchain: Some(onchain),
        market: Some(market),
        reputation: Some(ReputationLinks::default()),
    };

    let result = engine.evaluate(&snapshot);

    assert!(result.global_score >= 80.0, "score was {}", result.global_score);
    assert_eq!(result.label, RiskLabel::Critical);
}
