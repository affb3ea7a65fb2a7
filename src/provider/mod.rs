mod constants;
pub(crate) mod gemini;
pub(crate) mod openai;

pub use gemini::{GeminiClient, GeminiConfig};
pub use openai::{OpenAiClient, OpenAiConfig};

use std::str::FromStr;

use crate::core::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gemini,
    OpenAI,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Gemini => write!(f, "Gemini"),
            Provider::OpenAI => write!(f, "OpenAI"),
        }
    }
}

impl FromStr for Provider {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAI),
            _ => Err(GatewayError::bad_request("Invalid provider")),
        }
    }
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Gemini, Provider::OpenAI];

    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::Gemini => constants::gemini::API_KEY_ENV_VAR,
            Provider::OpenAI => constants::openai::API_KEY_ENV_VAR,
        }
    }

    /// Get the environment variable that overrides this provider's base URL
    pub fn base_url_env_var(&self) -> &'static str {
        match self {
            Provider::Gemini => constants::gemini::API_BASE_ENV_VAR,
            Provider::OpenAI => constants::openai::API_BASE_ENV_VAR,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => constants::gemini::API_BASE,
            Provider::OpenAI => constants::openai::API_BASE,
        }
    }

    /// Lowercase name used on the wire and in `/health`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAI => "openai",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers() {
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!(" OpenAI ".parse::<Provider>().unwrap(), Provider::OpenAI);
    }

    #[test]
    fn rejects_unknown_providers() {
        for name in ["ninjatech", "anthropic", ""] {
            let err = name.parse::<Provider>().unwrap_err();
            assert!(matches!(err, GatewayError::BadRequest(_)));
            assert_eq!(err.to_string(), "Invalid provider");
        }
    }
}
