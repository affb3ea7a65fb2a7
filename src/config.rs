//! Environment-driven configuration for the gateway and its HTTP listener.

use std::time::Duration;

use crate::core::{GatewayError, HttpClientConfig};
use crate::provider::{GeminiConfig, OpenAiConfig, Provider};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const PORT_ENV_VAR: &str = "PORT";
pub const HOST_ENV_VAR: &str = "HOST";
pub const TIMEOUT_ENV_VAR: &str = "IRIS_UPSTREAM_TIMEOUT_SECS";
pub const MAX_BODY_BYTES_ENV_VAR: &str = "IRIS_MAX_BODY_BYTES";
/// Largest accepted `/generate-content` body. Page content arrives pre-truncated.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Which providers are available and how to reach them.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub gemini: Option<GeminiConfig>,
    pub openai: Option<OpenAiConfig>,
    pub http: HttpClientConfig,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn with_openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = Some(config);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Blank API keys count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new();

        if let Some(api_key) = value(Provider::Gemini.default_api_key_env_var()) {
            let mut gemini = GeminiConfig::new(api_key);
            if let Some(base_url) = value(Provider::Gemini.base_url_env_var()) {
                gemini = gemini.with_base_url(base_url);
            }
            config = config.with_gemini(gemini);
        }

        if let Some(api_key) = value(Provider::OpenAI.default_api_key_env_var()) {
            let mut openai = OpenAiConfig::new(api_key);
            if let Some(base_url) = value(Provider::OpenAI.base_url_env_var()) {
                openai = openai.with_base_url(base_url);
            }
            config = config.with_openai(openai);
        }

        if let Some(secs) = value(TIMEOUT_ENV_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                GatewayError::configuration(format!(
                    "{TIMEOUT_ENV_VAR} must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_ENV_VAR).filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup(PORT_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            config.port = port.trim().parse().map_err(|_| {
                GatewayError::configuration(format!("{PORT_ENV_VAR} must be a port number, got {port:?}"))
            })?;
        }

        if let Some(limit) = lookup(MAX_BODY_BYTES_ENV_VAR).filter(|l| !l.trim().is_empty()) {
            config.max_body_bytes = limit.trim().parse().map_err(|_| {
                GatewayError::configuration(format!(
                    "{MAX_BODY_BYTES_ENV_VAR} must be a number of bytes, got {limit:?}"
                ))
            })?;
        }

        Ok(config)
    }

    /// `host:port`, resolved when the listener binds so hostnames work too.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
