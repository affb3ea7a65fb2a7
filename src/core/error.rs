use serde::Serialize;
use thiserror::Error;

/// Message returned to callers whenever an upstream provider throttles us.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Try again later.";

/// Message returned when an upstream answered 2xx but without usable content.
pub const NO_RESPONSE_MESSAGE: &str = "No response from API";

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The caller sent something we refuse to forward. No network call was made.
    #[error("{0}")]
    BadRequest(String),

    /// Deployment problem, typically a missing API key. No network call was made.
    #[error("{0}")]
    Configuration(String),

    #[error("Upstream request timed out")]
    Timeout {
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Rate limit exceeded. Try again later.")]
    RateLimited,

    /// The upstream was reachable but failed, or answered with a body we could not use.
    #[error("{message}")]
    Upstream {
        message: String,
        status_code: u16,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Canonical error category, independent of which provider produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    BadRequest,
    ConfigurationError,
    Timeout,
    RateLimited,
    UpstreamError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::ConfigurationError => "ConfigurationError",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::UpstreamError => "UpstreamError",
        };
        f.write_str(name)
    }
}

/// The only error shape that leaves the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub kind: ErrorKind,
    pub message: String,
    pub http_status: u16,
}

impl GatewayError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        GatewayError::BadRequest(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        GatewayError::Configuration(message.into())
    }

    pub(crate) fn no_response() -> Self {
        GatewayError::Upstream {
            message: NO_RESPONSE_MESSAGE.to_string(),
            status_code: 500,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::BadRequest(_) => ErrorKind::BadRequest,
            GatewayError::Configuration(_) => ErrorKind::ConfigurationError,
            GatewayError::Timeout { .. } => ErrorKind::Timeout,
            GatewayError::RateLimited => ErrorKind::RateLimited,
            GatewayError::Upstream { .. } => ErrorKind::UpstreamError,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::BadRequest(_) => 400,
            GatewayError::Configuration(_) => 500,
            GatewayError::Timeout { .. } => 408,
            GatewayError::RateLimited => 429,
            // Only forward statuses that actually describe a failure.
            GatewayError::Upstream { status_code, .. } if (400..=599).contains(status_code) => {
                *status_code
            }
            GatewayError::Upstream { .. } => 500,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            kind: self.kind(),
            message: self.to_string(),
            http_status: self.status_code(),
        }
    }
}
