//! Integration tests for the free-text heuristic pipeline

use token_sentry::{evaluate_query, QueryRiskLevel};

#[test]
fn known_project_baseline_drives_quantum_risk() {
    let result = evaluate_query("naoris audited multisig");
    assert_eq!(result.quantum_risk, 20);
}

#[test]
fn reassuring_keywords_lower_hack_risk() {
    let with_signals = evaluate_query("naoris audited multisig");
    let without = evaluate_query("naoris");

    assert!(with_signals.hack_risk < without.hack_risk);
}

#[test]
fn scores_stay_in_band_for_keyword_pileups() {
    let negative = evaluate_query(
        "audited by certik multisig open source github liquidity locked lp burned \
         no tax kyc doxxed team fair launch post-quantum quantum safe pqc",
    );
    let positive = evaluate_query(
        "1000x guaranteed moon pump lambo no audit low liquidity high tax top10 \
         anti-whale disabled airdrop free ecdsa rsa",
    );

    for result in [&negative, &positive] {
        assert!(result.score <= 100);
        assert!(result.hack_risk <= 100);
        assert!(result.quantum_risk <= 100);
    }
    assert!(negative.score > positive.score);
}

#[test]
fn evm_address_queries_are_recognized() {
    let result = evaluate_query("0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
    assert!(result.message.contains("EVM contract address detected"));
}

#[test]
fn hype_heavy_query_is_high_risk() {
    let result = evaluate_query(
        "scamcoin 1000x guaranteed moon pump no audit high tax low liquidity \
         top10 team wallet 40% airdrop free ecdsa anti-whale disabled",
    );
    assert_eq!(result.risk_level, QueryRiskLevel::High);
}

#[test]
fn result_message_is_self_describing() {
    let result = evaluate_query("ethereum");
    assert!(result.message.contains(&format!("score={}", result.score)));
    assert!(result
        .message
        .contains(&format!("quantum_risk={}", result.quantum_risk)));
    assert!(result.message.contains("Ethereum"));
}
