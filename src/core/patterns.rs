//! Advanced-pattern detector
//! Scans verified contract source text for known risk-indicating code
//! patterns and emits severity-tagged flags.
//!
//! This is a weak-signal detector, not an audit. Each rule is an
//! independent, non-exclusive substring test; rules are kept as data so the
//! table can be tested and extended without touching control flow.

use crate::models::{MarketFacts, RiskFlag, Severity};

/// One detector rule. A rule fires at most one flag.
pub struct PatternRule {
    pub name: &'static str,
    pub severity: Severity,
    /// Any of these substrings in the lower-cased source fires the rule
    pub keywords: &'static [&'static str],
    /// Also fire when the contract name itself contains this substring
    pub name_keyword: Option<&'static str>,
    pub reason: &'static str,
}

/// Fixed, ordered rule table. Emission order of flags follows this order
/// and the aggregator preserves it when rendering reasons.
pub const PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        name: "Proxy / upgradeable contract",
        severity: Severity::Medium,
        keywords: &["proxy", "delegatecall", "transparentupgradeableproxy"],
        name_keyword: Some("proxy"),
        reason: "The contract contains proxy or upgrade machinery (proxy, delegatecall). \
                 Its logic can be changed after deployment.",
    },
    PatternRule {
        name: "Mint function detected",
        severity: Severity::High,
        keywords: &["function mint", "mint("],
        name_keyword: None,
        reason: "The contract exposes a mint function. If owner-controlled, the supply \
                 can be inflated at any time.",
    },
    PatternRule {
        name: "Blacklist mechanism",
        severity: Severity::Medium,
        keywords: &["blacklist", "blocklist", "isblacklisted"],
        name_keyword: None,
        reason: "The contract contains blacklist/blocklist logic. Specific addresses can \
                 be prevented from transferring or selling the token.",
    },
    PatternRule {
        name: "Pausable contract / potential trading lock",
        severity: Severity::Medium,
        keywords: &["pausable", "whennotpaused", "pause()"],
        name_keyword: None,
        reason: "The contract is pausable. The owner can potentially block all transfers \
                 at any time.",
    },
    PatternRule {
        name: "Transfer taxes",
        severity: Severity::Medium,
        keywords: &[
            "taxfee",
            "liquidityfee",
            "marketingfee",
            "buytax",
            "selltax",
            "feepercent",
            "totalfees",
        ],
        name_keyword: None,
        reason: "The contract carries transfer fee variables. Fees may be high or \
                 owner-adjustable.",
    },
    PatternRule {
        name: "Owner control (Ownable)",
        severity: Severity::Low,
        keywords: &["onlyowner", "ownable"],
        name_keyword: None,
        reason: "The contract uses an Ownable / onlyOwner scheme. Critical functions are \
                 reserved to the owner.",
    },
    PatternRule {
        name: "Trading limits / anti-bot",
        severity: Severity::Low,
        keywords: &["cooldown", "maxtransactionamount"],
        name_keyword: None,
        reason: "The contract carries transaction-limit or cooldown variables. \
                 Misconfigured, these can lock out legitimate users.",
    },
];

impl PatternRule {
    /// Independent test against the lower-cased source and contract name
    fn matches(&self, code_lower: &str, name_lower: &str) -> bool {
        if let Some(kw) = self.name_keyword {
            if name_lower.contains(kw) {
                return true;
            }
        }
        self.keywords.iter().any(|kw| code_lower.contains(kw))
    }

    fn to_flag(&self) -> RiskFlag {
        RiskFlag {
            name: self.name.to_string(),
            severity: self.severity,
            reason: self.reason.to_string(),
        }
    }
}

/// Scan contract source text for known risk patterns.
///
/// Returns an empty list (not an error) when the source text is empty.
/// Matching is case-insensitive over the full text. Market facts are not
/// consulted by any current rule; the parameter is part of the detector
/// contract for rules that cross-check market state.
pub fn detect_risk_patterns(
    source_code: &str,
    contract_name: Option<&str>,
    _market: Option<&MarketFacts>,
) -> Vec<RiskFlag> {
    if source_code.is_empty() {
        return Vec::new();
    }

    let code_lower = source_code.to_lowercase();
    let name_lower = contract_name.unwrap_or_default().to_lowercase();

    PATTERN_RULES
        .iter()
        .filter(|rule| rule.matches(&code_lower, &name_lower))
        .map(PatternRule::to_flag)
        .collect()
}
