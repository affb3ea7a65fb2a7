//! Shared HTTP client for all providers.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::GatewayError;

/// Upstream calls are abandoned after this long unless configured otherwise.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the outbound HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
            user_agent: None,
        }
    }
}

/// Shared HTTP client. Makes exactly one attempt per call; retrying is the caller's business.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, GatewayError> {
        let default_ua = format!("iris-gateway/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// POST a JSON body and return the upstream's JSON answer.
    ///
    /// Failures come back already classified: timeouts, throttling, error statuses
    /// (with the upstream's own `error.message` when it sent one) and unusable bodies.
    #[tracing::instrument(
        name = "upstream_post_json",
        skip(self, headers, query, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        query: &[(String, String)],
        body: &Req,
    ) -> Result<Value, GatewayError>
    where
        Req: Serialize + ?Sized,
    {
        let mut req_builder = self.client.post(url).json(body);

        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        if !query.is_empty() {
            req_builder = req_builder.query(query);
        }

        let res = req_builder.send().await.map_err(classify_transport_error)?;
        let status = res.status();

        if status.is_success() {
            debug!(status = %status, "upstream request successful");

            let response_text = res.text().await.map_err(classify_transport_error)?;

            return serde_json::from_str(&response_text).map_err(|e| {
                warn!(error = %e, "upstream success body is not JSON");
                GatewayError::no_response()
            });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!(status = %status, "upstream rate limited the request");
            return Err(GatewayError::RateLimited);
        }

        let error_text = res.text().await.unwrap_or_default();
        warn!(status = %status, "upstream returned error status");

        let message = extract_error_message(&error_text)
            .unwrap_or_else(|| format!("Upstream API returned status {}", status.as_u16()));

        Err(GatewayError::Upstream {
            message,
            status_code: status.as_u16(),
            source: None,
        })
    }
}

fn classify_transport_error(e: reqwest::Error) -> GatewayError {
    // Gemini carries the API key in the query string.
    let e = e.without_url();

    if e.is_timeout() {
        warn!(error = %e, "upstream request timed out");
        return GatewayError::Timeout {
            source: Some(Box::new(e)),
        };
    }

    warn!(error = %e, "upstream request failed");
    GatewayError::Upstream {
        message: "Failed to reach upstream API".to_string(),
        status_code: 500,
        source: Some(Box::new(e)),
    }
}

/// Both Gemini and OpenAI report failures as `{ "error": { "message": ... } }`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;

    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
