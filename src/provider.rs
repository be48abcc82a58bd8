use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::ProviderConfig;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

/// The provider rejects the call because the request-rate ceiling was hit.
pub const RATE_LIMIT_CODE: i64 = 38194;
/// The provider has no offers for this route/date. Expected and frequent.
pub const NO_DATA_CODE: i64 = 6003;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Structured error the provider returned in its response body.
    #[error("provider error [{code}] {detail}")]
    Api { code: i64, detail: String },

    #[error("provider transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response outside the provider's documented shape. Unlike `Api` this
    /// is never suppressed by callers.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// HTTP client for the provider's flight-offers API. Handles the OAuth2
/// client-credentials flow and keeps the token cached until shortly before
/// it expires.
pub struct ProviderClient {
    http: reqwest::Client,
    config: ProviderConfig,
    token: Mutex<Option<CachedToken>>,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> ProviderClient {
        ProviderClient {
            http: reqwest::Client::new(),
            config,
            token: Mutex::new(None),
        }
    }

    /// One-way, non-stop, economy, single-adult search for a single
    /// origin/destination/date. Returns the raw offer records in provider
    /// order; parsing into `FlightOffer` is the caller's job.
    pub async fn flight_offers(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<Value>, ProviderError> {
        let token = self.access_token().await?;
        let date_str = date.format("%Y-%m-%d").to_string();
        let response = self
            .http
            .get(format!("{}{}", self.config.base_url, FLIGHT_OFFERS_PATH))
            .bearer_auth(token)
            .query(&[
                ("originLocationCode", origin),
                ("destinationLocationCode", destination),
                ("departureDate", date_str.as_str()),
                ("adults", "1"),
                // The provider only understands the lowercase literal here;
                // a native bool would serialize differently in some stacks.
                ("nonStop", "true"),
                ("travelClass", "ECONOMY"),
                ("currencyCode", "EUR"),
                ("max", "10"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(parse_api_error(status, &body));
        }

        match body.get("data") {
            Some(Value::Array(records)) => Ok(records.clone()),
            _ => Err(ProviderError::Malformed(
                "success response without a data array".to_string(),
            )),
        }
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .http
            .post(format!("{}{}", self.config.base_url, TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.config.api_key),
                ("client_secret", &self.config.api_secret),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            return Err(parse_api_error(status, &body));
        }

        let token: TokenResponse = serde_json::from_value(body)
            .map_err(|e| ProviderError::Malformed(format!("bad token response: {e}")))?;

        // Refresh 30s early so an in-flight search never carries a token
        // that expires mid-call.
        let lifetime = token.expires_in.saturating_sub(30);
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + std::time::Duration::from_secs(lifetime),
        });
        Ok(access_token)
    }
}

/// Maps the provider's `{"errors": [{code, detail}]}` body onto the tagged
/// error variant. A non-success status without that shape is a contract
/// violation, not an API error.
fn parse_api_error(status: StatusCode, body: &Value) -> ProviderError {
    let first = body.pointer("/errors/0");
    let code = first.and_then(|e| e.get("code")).and_then(Value::as_i64);
    match code {
        Some(code) => {
            let detail = first
                .and_then(|e| e.get("detail"))
                .and_then(Value::as_str)
                .unwrap_or("no detail")
                .to_string();
            ProviderError::Api { code, detail }
        }
        None => ProviderError::Malformed(format!(
            "status {status} without a structured error body: {body}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_structured_api_error() {
        let body = json!({"errors": [{"code": 38194, "detail": "Too many requests"}]});
        let err = parse_api_error(StatusCode::TOO_MANY_REQUESTS, &body);
        match err {
            ProviderError::Api { code, detail } => {
                assert_eq!(code, RATE_LIMIT_CODE);
                assert_eq!(detail, "Too many requests");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn unstructured_error_body_is_malformed() {
        let body = json!({"message": "gateway exploded"});
        let err = parse_api_error(StatusCode::BAD_GATEWAY, &body);
        assert!(matches!(err, ProviderError::Malformed(_)));
    }
}
