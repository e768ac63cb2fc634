//! Free-text heuristic pipeline
//!
//! Alternate entry point for when no on-chain lookup is available: scores an
//! unstructured project query (name, address, domain, pitch text) with five
//! independent keyword scorers over the lower-cased text. Deliberately kept
//! separate from the typed-snapshot pipeline — the two share clamping and
//! reason-aggregation conventions only, not weight tables.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref DOMAIN_RE: Regex = Regex::new(r"^[a-z0-9.-]+\.[a-z]{2,}$").unwrap();
    static ref BTC_WALLET_RE: Regex = Regex::new(r"^[13][a-km-zA-HJ-NP-Z1-9]{25,34}$").unwrap();
}

/// Clamp an accumulated keyword score into the [0,100] band
fn clamp_text_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0) as u8
}

// ============================================
// Result & classification types
// ============================================

/// Coarse risk bucket for query scans (distinct ladder from RiskLabel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryRiskLevel {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl QueryRiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// Flat result record for a query scan.
/// `score` is a safety score: higher = safer, unlike the risk components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryScanResult {
    pub score: u8,
    pub hack_risk: u8,
    pub quantum_risk: u8,
    pub risk_level: QueryRiskLevel,
    pub message: String,
}

/// What kind of entity the query looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    EvmContract,
    Domain,
    Wallet,
    Project,
}

/// Well-known projects with fixed baseline risk profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownProject {
    Naoris,
    Qanx,
    Btc,
    Eth,
}

/// One scorer's raw output: accumulated risk plus its justifications
struct TextSubScore {
    value: u8,
    reasons: Vec<String>,
}

// ============================================
// Keyword rule table machinery
// ============================================

/// One additive keyword rule, evaluated independently of the others.
/// Fires when at least one `any_of` substring matches (if the set is
/// non-empty) and every `all_of` substring matches.
struct TextRule {
    any_of: &'static [&'static str],
    all_of: &'static [&'static str],
    delta: f64,
    reason: &'static str,
}

impl TextRule {
    fn matches(&self, text: &str) -> bool {
        let any_ok = self.any_of.is_empty() || self.any_of.iter().any(|kw| text.contains(kw));
        let all_ok = self.all_of.iter().all(|kw| text.contains(kw));
        any_ok && all_ok
    }
}

/// Apply a rule table to the text: commutative additive deltas, one reason
/// per matched rule. Clamping happens once, after the full sum.
fn apply_rules(base: f64, rules: &[TextRule], text: &str, reasons: &mut Vec<String>) -> f64 {
    let mut score = base;
    for rule in rules {
        if rule.matches(text) {
            score += rule.delta;
            reasons.push(rule.reason.to_string());
        }
    }
    score
}

// ============================================
// Entity classification & known projects
// ============================================

fn classify_entity(normalized: &str) -> (EntityKind, String) {
    if normalized.starts_with("0x") && (normalized.len() == 42 || normalized.len() == 64) {
        (
            EntityKind::EvmContract,
            "EVM contract address detected.".to_string(),
        )
    } else if DOMAIN_RE.is_match(normalized) {
        (EntityKind::Domain, "Domain name detected.".to_string())
    } else if BTC_WALLET_RE.is_match(normalized) {
        (EntityKind::Wallet, "Wallet address detected.".to_string())
    } else {
        (
            EntityKind::Project,
            "Analyzed as a project/token name.".to_string(),
        )
    }
}

fn detect_known_project(normalized: &str) -> Option<(KnownProject, String)> {
    if normalized.contains("naoris") {
        Some((
            KnownProject::Naoris,
            "Identified as Naoris Protocol (strong security posture, post-quantum focus)."
                .to_string(),
        ))
    } else if normalized.contains("qanx") || normalized.contains("qanplatform") {
        Some((
            KnownProject::Qanx,
            "Identified as QANX (intermediate profile, security/quantum oriented).".to_string(),
        ))
    } else if normalized == "btc" || normalized == "bitcoin" {
        Some((KnownProject::Btc, "Identified as Bitcoin.".to_string()))
    } else if normalized == "eth" || normalized == "ethereum" {
        Some((KnownProject::Eth, "Identified as Ethereum.".to_string()))
    } else {
        None
    }
}

// ============================================
// Scorer 1: smart contract / code
// ============================================

const CONTRACT_TEXT_RULES: &[TextRule] = &[
    TextRule {
        any_of: &["audit"],
        all_of: &[],
        delta: -12.0,
        reason: "Audit mentioned: lower chance of a critical bug.",
    },
    TextRule {
        any_of: &["audited by", "certik"],
        all_of: &[],
        delta: -8.0,
        reason: "Third-party audit mentioned (e.g. Certik).",
    },
    TextRule {
        any_of: &["multisig"],
        all_of: &[],
        delta: -7.0,
        reason: "Multisig detected: better key governance.",
    },
    TextRule {
        any_of: &["open source", "github"],
        all_of: &[],
        delta: -5.0,
        reason: "Open source / Github reference: more auditable code.",
    },
    TextRule {
        any_of: &["proxy"],
        all_of: &["upgradable"],
        delta: 8.0,
        reason: "Upgradable proxy contract: requires more trust in the team.",
    },
    TextRule {
        any_of: &["no audit", "unaudited"],
        all_of: &[],
        delta: 10.0,
        reason: "Explicitly unaudited: increased risk.",
    },
    TextRule {
        any_of: &["renounced"],
        all_of: &["false"],
        delta: 8.0,
        reason: "Ownership not renounced: team keeps strong control over the contract.",
    },
];

fn score_contract_text(
    normalized: &str,
    entity: EntityKind,
    known: Option<KnownProject>,
) -> TextSubScore {
    let mut reasons = Vec::new();

    let mut base = 60.0; // unknown project
    match known {
        Some(KnownProject::Naoris) => {
            base = 25.0;
            reasons.push(
                "Naoris: cybersecurity-focused project, generally robust code profile."
                    .to_string(),
            );
        }
        Some(KnownProject::Qanx) => {
            base = 45.0;
            reasons.push("QANX: intermediate project, security and infra focus.".to_string());
        }
        Some(KnownProject::Btc) => {
            base = 20.0;
            reasons.push("Bitcoin: heavily tested, battle-proven code.".to_string());
        }
        Some(KnownProject::Eth) => {
            base = 30.0;
            reasons.push("Ethereum: mature ecosystem, but higher code complexity.".to_string());
        }
        None => {}
    }

    match entity {
        EntityKind::EvmContract => {
            base += 10.0;
            reasons
                .push("EVM contract: large attack surface (potential code bugs).".to_string());
        }
        EntityKind::Wallet => {
            base += 5.0;
            reasons.push("Wallet: risk mostly tied to private key handling.".to_string());
        }
        _ => {}
    }

    let score = apply_rules(base, CONTRACT_TEXT_RULES, normalized, &mut reasons);
    TextSubScore {
        value: clamp_text_score(score),
        reasons,
    }
}

// ============================================
// Scorer 2: liquidity / market
// ============================================

const LIQUIDITY_TEXT_RULES: &[TextRule] = &[
    TextRule {
        any_of: &["liquidity locked", "lp locked"],
        all_of: &[],
        delta: -15.0,
        reason: "Locked liquidity mentioned: lower rug risk.",
    },
    TextRule {
        any_of: &["lp burned", "liquidity burned"],
        all_of: &[],
        delta: -10.0,
        reason: "LP burned: rug pull much harder.",
    },
    TextRule {
        any_of: &["no tax"],
        all_of: &[],
        delta: -3.0,
        reason: "No tax: fewer ponzi-style fee mechanics.",
    },
    TextRule {
        any_of: &["low liquidity"],
        all_of: &[],
        delta: 12.0,
        reason: "Low liquidity announced: very sensitive to price moves.",
    },
    TextRule {
        any_of: &["high tax", "buy tax", "sell tax"],
        all_of: &[],
        delta: 8.0,
        reason: "Heavy transaction taxes: toxic tokenomics risk.",
    },
    TextRule {
        any_of: &["anti-whale disabled"],
        all_of: &[],
        delta: 8.0,
        reason: "Anti-whale disabled: large dumps possible.",
    },
];

fn score_liquidity_text(normalized: &str) -> TextSubScore {
    let mut reasons = Vec::new();
    let score = apply_rules(60.0, LIQUIDITY_TEXT_RULES, normalized, &mut reasons);
    TextSubScore {
        value: clamp_text_score(score),
        reasons,
    }
}

// ============================================
// Scorer 3: distribution / holders
// ============================================

const DISTRIBUTION_TEXT_RULES: &[TextRule] = &[
    TextRule {
        any_of: &["top 10 hold", "top10"],
        all_of: &[],
        delta: 10.0,
        reason: "Heavily concentrated top 10 holders: mass dump risk.",
    },
    TextRule {
        any_of: &["anti-whale"],
        all_of: &[],
        delta: -8.0,
        reason: "Anti-whale mechanism detected: large sells limited.",
    },
    TextRule {
        any_of: &["fair launch"],
        all_of: &[],
        delta: -5.0,
        reason: "Fair launch: more balanced initial distribution.",
    },
    TextRule {
        any_of: &["team wallet"],
        all_of: &["40%"],
        delta: 12.0,
        reason: "Large share held by the team: outcome depends on their behavior.",
    },
];

fn score_distribution_text(normalized: &str) -> TextSubScore {
    let mut reasons = Vec::new();
    let score = apply_rules(55.0, DISTRIBUTION_TEXT_RULES, normalized, &mut reasons);
    TextSubScore {
        value: clamp_text_score(score),
        reasons,
    }
}

// ============================================
// Scorer 4: off-chain reputation
// ============================================

const REPUTATION_TEXT_RULES: &[TextRule] = &[
    TextRule {
        any_of: &[
            "1000x",
            "100x",
            "pump",
            "moon",
            "lambo",
            "no risk",
            "guaranteed",
            "double your money",
        ],
        all_of: &[],
        delta: 15.0,
        reason: "Excessive marketing promises (100x, pump, guaranteed): strong scam signal.",
    },
    TextRule {
        any_of: &["airdrop"],
        all_of: &["free"],
        delta: 8.0,
        reason: "Free airdrop: phishing or bait-marketing risk.",
    },
    TextRule {
        any_of: &["kyc"],
        all_of: &[],
        delta: -8.0,
        reason: "KYC mentioned: team at least partially identified.",
    },
    TextRule {
        any_of: &["doxxed team", "team doxxed"],
        all_of: &[],
        delta: -10.0,
        reason: "Doxxed team: better public accountability.",
    },
    TextRule {
        any_of: &["listed on coingecko", "listed on cmc"],
        all_of: &[],
        delta: -5.0,
        reason: "CMC/CoinGecko listing: minimum filter passed.",
    },
    TextRule {
        any_of: &["partnership"],
        all_of: &["exchange"],
        delta: -4.0,
        reason: "Announced exchange partnerships: added credibility.",
    },
];

fn score_reputation_text(normalized: &str) -> TextSubScore {
    let mut reasons = Vec::new();
    let score = apply_rules(55.0, REPUTATION_TEXT_RULES, normalized, &mut reasons);
    TextSubScore {
        value: clamp_text_score(score),
        reasons,
    }
}

// ============================================
// Scorer 5: quantum resistance profile
// ============================================

const QUANTUM_TEXT_RULES: &[TextRule] = &[
    TextRule {
        any_of: &[
            "post-quantum",
            "postquantum",
            "quantum safe",
            "pqc",
            "lattice",
            "hash-based",
            "hash based",
        ],
        all_of: &[],
        delta: -20.0,
        reason: "Explicit post-quantum cryptography / PQC mention.",
    },
    TextRule {
        any_of: &["ecdsa", "rsa"],
        all_of: &[],
        delta: 10.0,
        reason: "Explicit classical ECDSA/RSA reference: long-term vulnerable.",
    },
];

fn score_quantum_text(normalized: &str, known: Option<KnownProject>) -> TextSubScore {
    let mut reasons = Vec::new();

    let base = match known {
        Some(KnownProject::Naoris) => {
            reasons.push(
                "Naoris: explicitly oriented toward post-quantum defense.".to_string(),
            );
            20.0
        }
        Some(KnownProject::Qanx) => {
            reasons.push("QANX: security/quantum orientation already announced.".to_string());
            35.0
        }
        Some(KnownProject::Btc) | Some(KnownProject::Eth) => {
            reasons.push(
                "Bitcoin/Ethereum: classical cryptography, vulnerable long term.".to_string(),
            );
            80.0
        }
        None => 60.0,
    };

    let score = apply_rules(base, QUANTUM_TEXT_RULES, normalized, &mut reasons);
    TextSubScore {
        value: clamp_text_score(score),
        reasons,
    }
}

// ============================================
// Aggregation
// ============================================

// Hack-risk blend over the first four scorers (distinct from the typed
// pipeline's weight table)
const HACK_WEIGHT_CONTRACT: f64 = 0.4;
const HACK_WEIGHT_LIQUIDITY: f64 = 0.25;
const HACK_WEIGHT_DISTRIBUTION: f64 = 0.2;
const HACK_WEIGHT_REPUTATION: f64 = 0.15;

// Final safety-score blend
const GLOBAL_WEIGHT_HACK: f64 = 0.7;
const GLOBAL_WEIGHT_QUANTUM: f64 = 0.3;

/// Run the full heuristic pipeline over a free-text query.
pub fn evaluate_query(query: &str) -> QueryScanResult {
    let normalized = query.trim().to_lowercase();

    let (entity, entity_reason) = classify_entity(&normalized);
    let known = detect_known_project(&normalized);

    let mut reasons = vec![entity_reason];
    if let Some((_, ref reason)) = known {
        reasons.push(reason.clone());
    }
    let known = known.map(|(project, _)| project);

    let contract = score_contract_text(&normalized, entity, known);
    let liquidity = score_liquidity_text(&normalized);
    let distribution = score_distribution_text(&normalized);
    let reputation = score_reputation_text(&normalized);
    let quantum = score_quantum_text(&normalized, known);

    for sub in [&contract, &liquidity, &distribution, &reputation, &quantum] {
        reasons.extend(sub.reasons.iter().cloned());
    }

    let hack_risk_raw = contract.value as f64 * HACK_WEIGHT_CONTRACT
        + liquidity.value as f64 * HACK_WEIGHT_LIQUIDITY
        + distribution.value as f64 * HACK_WEIGHT_DISTRIBUTION
        + reputation.value as f64 * HACK_WEIGHT_REPUTATION;
    let hack_risk = clamp_text_score(hack_risk_raw);

    let quantum_risk = quantum.value;

    let total_risk =
        hack_risk as f64 * GLOBAL_WEIGHT_HACK + quantum_risk as f64 * GLOBAL_WEIGHT_QUANTUM;
    let score = clamp_text_score(100.0 - total_risk);

    let risk_level = if score >= 70 {
        QueryRiskLevel::Low
    } else if score >= 40 {
        QueryRiskLevel::Medium
    } else {
        QueryRiskLevel::High
    };

    if reasons.is_empty() {
        reasons.push("No strong signal detected, generic risk profile applied.".to_string());
    }

    let message = format!(
        "Analysis of '{}': score={}/100, overall risk level={}. (hack_risk={}, quantum_risk={}). {}",
        query.trim(),
        score,
        risk_level.as_str(),
        hack_risk,
        quantum_risk,
        reasons.join(" ")
    );

    QueryScanResult {
        score,
        hack_risk,
        quantum_risk,
        risk_level,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_classification() {
        let addr = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";
        assert_eq!(classify_entity(addr).0, EntityKind::EvmContract);
        assert_eq!(classify_entity("example.org").0, EntityKind::Domain);
        assert_eq!(
            classify_entity("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2").0,
            EntityKind::Wallet
        );
        assert_eq!(classify_entity("some random token").0, EntityKind::Project);
    }

    #[test]
    fn test_known_project_detection() {
        assert_eq!(
            detect_known_project("naoris protocol").map(|(p, _)| p),
            Some(KnownProject::Naoris)
        );
        assert_eq!(
            detect_known_project("btc").map(|(p, _)| p),
            Some(KnownProject::Btc)
        );
        // Exact-match projects do not fire on longer text
        assert_eq!(detect_known_project("btc maximalist").map(|(p, _)| p), None);
        assert_eq!(detect_known_project("unknown coin"), None);
    }

    #[test]
    fn test_naoris_quantum_baseline() {
        let result = evaluate_query("naoris audited multisig");
        assert_eq!(result.quantum_risk, 20);
    }

    #[test]
    fn test_positive_signals_reduce_hack_risk() {
        let plain = evaluate_query("naoris");
        let reassuring = evaluate_query("naoris audited multisig");
        assert!(reassuring.hack_risk < plain.hack_risk);
        assert!(reassuring.score > plain.score);
    }

    #[test]
    fn test_scam_signals_raise_risk() {
        let hype = evaluate_query("supercoin 1000x guaranteed moon");
        let sober = evaluate_query("supercoin");
        assert!(hype.hack_risk > sober.hack_risk);
        assert!(hype.score < sober.score);
    }

    #[test]
    fn test_risk_level_buckets() {
        // Strong positive profile lands in the LOW bucket
        let result = evaluate_query(
            "naoris audited multisig liquidity locked lp burned kyc doxxed team \
             fair launch post-quantum",
        );
        assert!(result.score >= 70, "score was {}", result.score);
        assert_eq!(result.risk_level, QueryRiskLevel::Low);

        // Generic unknown project: middling risks, MEDIUM bucket
        let result = evaluate_query("unknowncoin");
        assert_eq!(result.risk_level, QueryRiskLevel::Medium);

        // Hype plus red flags everywhere: HIGH bucket
        let result = evaluate_query(
            "scamcoin 1000x guaranteed moon pump no audit high tax low liquidity \
             top10 team wallet 40% airdrop free ecdsa anti-whale disabled",
        );
        assert!(result.score < 40, "score was {}", result.score);
        assert_eq!(result.risk_level, QueryRiskLevel::High);
    }

    #[test]
    fn test_message_carries_scores_and_reasons() {
        let result = evaluate_query("qanx");
        assert!(result.message.contains("qanx"));
        assert!(result.message.contains(&format!("hack_risk={}", result.hack_risk)));
        assert!(result.message.contains("QANX"));
    }

    #[test]
    fn test_sub_scores_clamped() {
        // Pile every negative keyword on: still >= 0
        let query = "naoris audit audited by certik multisig open source github \
                     liquidity locked lp burned no tax kyc doxxed team \
                     listed on coingecko partnership exchange fair launch anti-whale \
                     post-quantum";
        let result = evaluate_query(query);
        assert!(result.hack_risk <= 100);
        assert!(result.quantum_risk <= 100);
        assert!(result.score <= 100);
    }
}
