//! Block explorer client (Etherscan v2 multi-chain API)
//!
//! Builds the on-chain facet of the fact snapshot: contract verification,
//! supply, holders and explorer-reported official links. One API, several
//! chains, selected via the `chainid` query parameter.
//!
//! Numeric fields that fail to parse are treated as absent, never as
//! errors. Only a failed primary request surfaces as an AppError, which the
//! snapshot builder absorbs into an absent facet.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{AppError, AppResult, Chain, OnchainFacts, SentryConfig};
use crate::utils::constants::{EXPLORER_BASE_URL, USER_AGENT};

/// Explorer API envelope. `result` stays untyped: the API returns a list,
/// an object or a bare string depending on module/action.
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: Option<Value>,
    message: Option<String>,
    result: Option<Value>,
}

/// Etherscan v2 API client
pub struct ExplorerClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ExplorerClient {
    pub fn new(config: &SentryConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            base_url: EXPLORER_BASE_URL.to_string(),
            api_key: config.explorer_api_key.clone(),
            timeout: config.upstream_timeout,
        }
    }

    /// Override the endpoint (tests)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn call(
        &self,
        chain: Chain,
        module: &str,
        action: &str,
        extra: &[(&str, &str)],
    ) -> AppResult<ExplorerResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::missing_env("ETHERSCAN_API_KEY"))?;

        let chain_id = chain.explorer_id().to_string();
        let mut params = vec![
            ("apikey", api_key),
            ("chainid", chain_id.as_str()),
            ("module", module),
            ("action", action),
        ];
        params.extend_from_slice(extra);

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::explorer_error(format!(
                "HTTP {} from explorer",
                response.status()
            )));
        }

        let body: ExplorerResponse = response
            .json()
            .await
            .map_err(|e| AppError::explorer_invalid_response(e.to_string()))?;

        // status "1" / message "OK" is the success shape; "0" with "No data
        // found" style messages still carries a usable result for some
        // actions, so only hard errors are rejected here
        let status_ok = match &body.status {
            Some(Value::String(s)) => s == "1" || s == "0",
            Some(Value::Number(n)) => n.as_i64() == Some(1) || n.as_i64() == Some(0),
            _ => true,
        };
        if !status_ok {
            return Err(AppError::explorer_error(format!(
                "Explorer error response: status={:?}, message={:?}",
                body.status, body.message
            )));
        }

        Ok(body)
    }

    /// Fetch the on-chain facet for a token.
    /// The source-code and supply calls are required; token-info is
    /// best-effort and degrades its fields to None on failure.
    pub async fn fetch_onchain_facts(
        &self,
        chain: Chain,
        contract_address: &str,
    ) -> AppResult<OnchainFacts> {
        let contract_address = contract_address.trim();
        debug!("🔍 Explorer: fetching on-chain facts for {}", contract_address);

        // 1) Contract source & verification metadata
        let source_resp = self
            .call(
                chain,
                "contract",
                "getsourcecode",
                &[("address", contract_address)],
            )
            .await?;
        let source_obj = first_result_object(source_resp.result.as_ref());

        let source_code = source_obj
            .and_then(|o| o.get("SourceCode"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let is_verified = source_code.is_some();

        let mut facts = OnchainFacts {
            contract_address: contract_address.to_string(),
            name: get_str(source_obj, &["ContractName", "TokenName"]),
            symbol: get_str(source_obj, &["Symbol", "TokenSymbol"]),
            is_contract_verified: Some(is_verified),
            contract_creator: get_str(source_obj, &["ContractCreator"]),
            creation_tx_hash: get_str(source_obj, &["TxHash"]),
            source_code,
            website: get_str(source_obj, &["Website"]),
            twitter: get_str(source_obj, &["Twitter"]),
            discord: get_str(source_obj, &["Discord"]),
            github: get_str(source_obj, &["Github", "GitHub"]),
            ..Default::default()
        };

        // 2) Raw total supply
        let supply_resp = self
            .call(
                chain,
                "stats",
                "tokensupply",
                &[("contractaddress", contract_address)],
            )
            .await?;
        facts.total_supply_raw = match supply_resp.result {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(Value::Object(map)) => map
                .get("tokensupply")
                .or_else(|| map.get("TokenSupply"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };

        // 3) Extended token info (optional tier on the explorer side)
        match self
            .call(
                chain,
                "token",
                "tokeninfo",
                &[("contractaddress", contract_address)],
            )
            .await
        {
            Ok(info_resp) => {
                let info = first_result_object(info_resp.result.as_ref());

                if facts.name.is_none() {
                    facts.name = get_str(info, &["tokenName", "name"]);
                }
                if facts.symbol.is_none() {
                    facts.symbol = get_str(info, &["tokenSymbol", "symbol"]);
                }

                facts.decimals =
                    get_parsed(info, &["divisor", "decimals", "tokenDecimal"]);
                facts.holders_count = get_parsed(info, &["tokenHolderCount", "holders"]);

                if facts.website.is_none() {
                    facts.website = get_str(info, &["website", "Website", "homePage"]);
                }
                if facts.twitter.is_none() {
                    facts.twitter = get_str(info, &["twitter", "Twitter", "twitterHandle"]);
                }
                if facts.discord.is_none() {
                    facts.discord = get_str(info, &["discord", "Discord"]);
                }
                if facts.github.is_none() {
                    facts.github = get_str(info, &["github", "Github", "GitHub"]);
                }
            }
            Err(e) => {
                warn!("⚠️ Explorer token-info unavailable: {}", e);
            }
        }

        // 4) Normalize supply by decimals
        facts.total_supply = normalize_supply(facts.total_supply_raw.as_deref(), facts.decimals);

        Ok(facts)
    }
}

/// Explorer result payloads come as a one-element list or a bare object
fn first_result_object(result: Option<&Value>) -> Option<&Value> {
    match result {
        Some(Value::Array(items)) => items.first(),
        Some(obj @ Value::Object(_)) => Some(obj),
        _ => None,
    }
}

/// First non-empty string among the given keys
fn get_str(obj: Option<&Value>, keys: &[&str]) -> Option<String> {
    let obj = obj?;
    keys.iter()
        .filter_map(|k| obj.get(k))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First parsable numeric value among the given keys.
/// An unparsable value is the same as a missing one.
fn get_parsed<T: std::str::FromStr>(obj: Option<&Value>, keys: &[&str]) -> Option<T> {
    let obj = obj?;
    keys.iter().filter_map(|k| obj.get(k)).find_map(|v| match v {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    })
}

fn normalize_supply(raw: Option<&str>, decimals: Option<u32>) -> Option<f64> {
    let raw: f64 = raw?.parse().ok()?;
    let decimals = decimals?;
    Some(raw / 10f64.powi(decimals as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_result_object_shapes() {
        let list = json!([{"SourceCode": "abc"}]);
        assert!(first_result_object(Some(&list)).is_some());

        let obj = json!({"SourceCode": "abc"});
        assert!(first_result_object(Some(&obj)).is_some());

        let bare = json!("error string");
        assert!(first_result_object(Some(&bare)).is_none());
        assert!(first_result_object(None).is_none());
    }

    #[test]
    fn test_get_str_skips_empty_values() {
        let obj = json!({"Website": "", "homePage": "https://example.org"});
        assert_eq!(
            get_str(Some(&obj), &["Website", "homePage"]),
            Some("https://example.org".to_string())
        );
    }

    #[test]
    fn test_malformed_numeric_fields_become_absent() {
        let obj = json!({"holders": "not-a-number"});
        let holders: Option<u64> = get_parsed(Some(&obj), &["holders"]);
        assert_eq!(holders, None);

        let obj = json!({"holders": "1234"});
        let holders: Option<u64> = get_parsed(Some(&obj), &["holders"]);
        assert_eq!(holders, Some(1234));

        let obj = json!({"decimals": 18});
        let decimals: Option<u32> = get_parsed(Some(&obj), &["decimals"]);
        assert_eq!(decimals, Some(18));
    }

    #[test]
    fn test_normalize_supply() {
        assert_eq!(
            normalize_supply(Some("1000000000000000000000"), Some(18)),
            Some(1000.0)
        );
        assert_eq!(normalize_supply(Some("garbage"), Some(18)), None);
        assert_eq!(normalize_supply(Some("1000"), None), None);
        assert_eq!(normalize_supply(None, Some(18)), None);
    }
}
