//! Provider fetch orchestration.
//!
//! One operation per source: list recent approved transactions for N days.
//! Credentials are checked before any network IO, collaborator failures are
//! logged with full detail but surfaced as a generic source-scoped message,
//! and every fetch takes an explicit cancellation token so a superseded
//! request can be abandoned without touching later ones.

use inflow_core::{Transaction, normalize_json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::{ProviderError, ProviderResult};
use crate::source::Source;

/// Value shipped in the default config; a token equal to this is treated
/// as not configured.
pub const TOKEN_PLACEHOLDER: &str = "REPLACE_WITH_PROVIDER_TOKEN";

/// Default lookback window in days.
pub const DEFAULT_DAYS: u32 = 30;

/// Fixed result window requested from the payments search endpoint.
const SEARCH_LIMIT: u32 = 50;

/// Connection settings for both providers. Tokens are optional here;
/// `ProviderSet` rejects requests for a source whose token is absent or
/// still the placeholder.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub payments_base_url: String,
    pub payments_token: Option<String>,
    pub bank_token: Option<String>,
}

/// One fetch's worth of data for a source.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub source: Source,
    pub days: u32,
    pub balance: f64,
    pub transactions: Vec<Transaction>,
}

/// Payments search response envelope. Records are kept as raw JSON so one
/// wrong-shaped entry degrades during normalization instead of failing the
/// whole fetch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    results: Vec<Value>,
}

/// Configured clients for every source the API serves.
#[derive(Debug, Clone)]
pub struct ProviderSet {
    http: reqwest::Client,
    settings: ProviderSettings,
}

impl ProviderSet {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Fetch recent transactions for one source. A cancelled token aborts
    /// in-flight work and yields [`ProviderError::Cancelled`].
    pub async fn fetch_recent(
        &self,
        source: Source,
        days: u32,
        cancel: &CancellationToken,
    ) -> ProviderResult<FetchResult> {
        let token = self.require_token(source)?.to_string();
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let transactions = match source {
            Source::ProviderA => self.fetch_payments(&token, days, cancel).await?,
            // TODO: call the real bank API once access is granted; until
            // then the source answers with an empty window.
            Source::ProviderB => Vec::new(),
        };

        Ok(FetchResult {
            source,
            days,
            // Balance endpoint not wired yet; the dashboard treats 0 as
            // "unknown".
            balance: 0.0,
            transactions,
        })
    }

    fn require_token(&self, source: Source) -> ProviderResult<&str> {
        let token = match source {
            Source::ProviderA => self.settings.payments_token.as_deref(),
            Source::ProviderB => self.settings.bank_token.as_deref(),
        };
        match token {
            Some(t) if !t.is_empty() && t != TOKEN_PLACEHOLDER => Ok(t),
            _ => Err(ProviderError::MissingCredential(source)),
        }
    }

    async fn fetch_payments(
        &self,
        token: &str,
        days: u32,
        cancel: &CancellationToken,
    ) -> ProviderResult<Vec<Transaction>> {
        let source = Source::ProviderA;
        let url = format!(
            "{}/v1/payments/search",
            self.settings.payments_base_url.trim_end_matches('/')
        );
        let params = [
            ("sort", "date_created".to_string()),
            ("criteria", "desc".to_string()),
            ("range", "date_created".to_string()),
            ("begin_date", format!("NOW-{days}DAYS")),
            ("end_date", "NOW".to_string()),
            ("limit", SEARCH_LIMIT.to_string()),
            ("status", "approved".to_string()),
        ];

        let request = async {
            let resp = self
                .http
                .get(&url)
                .bearer_auth(token)
                .query(&params)
                .send()
                .await
                .map_err(|e| collaborator(source, format!("request: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(collaborator(source, format!("{status} {body}")));
            }

            let out: SearchResponse = resp
                .json()
                .await
                .map_err(|e| collaborator(source, format!("decoding response: {e}")))?;
            Ok(out.results)
        };

        let results = tokio::select! {
            _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
            out = request => out?,
        };

        Ok(results
            .iter()
            .map(|raw| normalize_json(raw, source.as_str()))
            .collect())
    }
}

/// Build a collaborator error, logging the raw detail for operators.
fn collaborator(source: Source, detail: String) -> ProviderError {
    log::error!("[{source}] {detail}");
    ProviderError::Collaborator(source, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(payments_token: Option<&str>, bank_token: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            payments_base_url: "https://api.payments.example".to_string(),
            payments_token: payments_token.map(String::from),
            bank_token: bank_token.map(String::from),
        }
    }

    #[test]
    fn test_missing_token_rejected() {
        let set = ProviderSet::new(settings(None, None));
        assert!(matches!(
            set.require_token(Source::ProviderA),
            Err(ProviderError::MissingCredential(Source::ProviderA))
        ));
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let set = ProviderSet::new(settings(Some(TOKEN_PLACEHOLDER), Some("")));
        assert!(set.require_token(Source::ProviderA).is_err());
        assert!(set.require_token(Source::ProviderB).is_err());
    }

    #[test]
    fn test_real_token_accepted() {
        let set = ProviderSet::new(settings(Some("tok-1"), None));
        assert_eq!(set.require_token(Source::ProviderA).unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn test_bank_source_answers_empty_window() {
        let set = ProviderSet::new(settings(None, Some("tok-2")));
        let cancel = CancellationToken::new();
        let out = set
            .fetch_recent(Source::ProviderB, 30, &cancel)
            .await
            .unwrap();
        assert_eq!(out.source, Source::ProviderB);
        assert_eq!(out.days, 30);
        assert_eq!(out.balance, 0.0);
        assert!(out.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let set = ProviderSet::new(settings(Some("tok-1"), None));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = set
            .fetch_recent(Source::ProviderA, 30, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Cancelled));
    }

    #[tokio::test]
    async fn test_credential_check_runs_before_network() {
        // Placeholder token must fail even though the base URL is
        // unreachable; no request is ever issued.
        let set = ProviderSet::new(ProviderSettings {
            payments_base_url: "http://127.0.0.1:1".to_string(),
            payments_token: Some(TOKEN_PLACEHOLDER.to_string()),
            bank_token: None,
        });
        let cancel = CancellationToken::new();
        let err = set
            .fetch_recent(Source::ProviderA, 30, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential(_)));
    }

    #[test]
    fn test_search_response_parsing_and_normalization() {
        let payload = json!({
            "paging": {"total": 2, "limit": 50},
            "results": [
                {
                    "id": 119000001,
                    "date_created": "2024-11-21T10:00:00.000-04:00",
                    "description": "Sale",
                    "total_paid_amount": 100.0,
                    "transaction_amount": 95.0,
                    "fee_details": [{"amount": 5.0, "type": "application_fee"}]
                },
                {}
            ]
        });
        let resp: SearchResponse = serde_json::from_value(payload).unwrap();
        let txns: Vec<Transaction> = resp
            .results
            .iter()
            .map(|raw| normalize_json(raw, Source::ProviderA.as_str()))
            .collect();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, 100.0);
        assert_eq!(txns[0].net_amount, 95.0);
        assert_eq!(txns[0].id, "119000001");
        assert_eq!(txns[0].origin, "provider_a");
        assert_eq!(txns[1].amount, 0.0);
        assert_eq!(txns[1].description, "No description");
    }

    #[test]
    fn test_string_amounts_inside_envelope_do_not_fail_the_fetch() {
        // Providers occasionally send amounts as strings; one such record
        // must degrade per-field, not poison the other results.
        let payload = json!({
            "results": [
                {"total_paid_amount": "100", "description": "Sale", "monto": "12"},
                {"total_paid_amount": 40.0, "description": "Other sale"}
            ]
        });
        let resp: SearchResponse = serde_json::from_value(payload).unwrap();
        let txns: Vec<Transaction> = resp
            .results
            .iter()
            .map(|raw| normalize_json(raw, Source::ProviderA.as_str()))
            .collect();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, 12.0);
        assert_eq!(txns[0].net_amount, 100.0);
        assert_eq!(txns[1].amount, 40.0);
    }

    #[test]
    fn test_empty_search_response() {
        let resp: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.results.is_empty());
    }
}
