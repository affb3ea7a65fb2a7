use crate::core::error::GatewayError;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling temperature used when the caller does not pick one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    /// Parse a role as it arrives on the wire. Gemini's `model` is an alias of `assistant`.
    pub fn from_wire(role: &str) -> Option<Self> {
        match role.trim().to_ascii_lowercase().as_str() {
            "system" => Some(ChatRole::System),
            "user" => Some(ChatRole::User),
            "assistant" | "model" => Some(ChatRole::Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Configuration for text generation parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    /// Sampling temperature, `DEFAULT_TEMPERATURE` when unset
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }
}

/// How much of the page the user agreed to share with the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrivacyLevel {
    /// Only URL, title and page metadata.
    Minimal,
    #[default]
    Standard,
}

impl PrivacyLevel {
    /// Anything but `"minimal"` falls back to standard disclosure.
    pub fn from_wire(level: Option<&str>) -> Self {
        match level {
            Some(level) if level.trim().eq_ignore_ascii_case("minimal") => PrivacyLevel::Minimal,
            _ => PrivacyLevel::Standard,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
}

/// Page the user is looking at, as extracted by the extension.
///
/// `content` is expected to be truncated already; the gateway embeds it as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

/// A provider-agnostic chat request. Lives for a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub provider: Provider,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub generation_config: GenerationConfig,
    pub page_context: Option<PageContext>,
    pub privacy_level: PrivacyLevel,
}

impl GenerationRequest {
    pub fn new(provider: Provider, model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            provider,
            model: model.into(),
            messages,
            generation_config: GenerationConfig::default(),
            page_context: None,
            privacy_level: PrivacyLevel::default(),
        }
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = config;
        self
    }

    pub fn with_page_context(mut self, page_context: PageContext) -> Self {
        self.page_context = Some(page_context);
        self
    }

    pub fn with_privacy_level(mut self, privacy_level: PrivacyLevel) -> Self {
        self.privacy_level = privacy_level;
        self
    }

    /// Reject requests that must never reach an upstream.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.model.trim().is_empty() {
            return Err(GatewayError::bad_request(
                "Missing required parameter: model",
            ));
        }

        if self.messages.is_empty() {
            return Err(GatewayError::bad_request(
                "Missing required parameter: messages. Make sure to add at least one message.",
            ));
        }

        if let Some(temperature) = self.generation_config.temperature {
            if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
                return Err(GatewayError::bad_request(
                    "temperature must be between 0 and 2",
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateContent {
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

/// The single success body every caller receives, whichever provider answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResponse {
    pub candidates: Vec<Candidate>,
}

impl CanonicalResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: CandidateContent {
                    parts: vec![Part { text: text.into() }],
                    role: Some("model".to_string()),
                },
            }],
        }
    }

    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
    }
}

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    text: String,
    body: Value,
}

impl GenerationResult {
    /// Wrap plain text into the canonical body.
    pub fn from_text(text: impl Into<String>) -> Result<Self, GatewayError> {
        let text = text.into();
        let body = serde_json::to_value(CanonicalResponse::from_text(text.clone())).map_err(
            |e| GatewayError::Upstream {
                message: "Failed to build response".to_string(),
                status_code: 500,
                source: Some(Box::new(e)),
            },
        )?;
        Ok(Self { text, body })
    }

    /// Keep an already canonical body untouched, as long as it carries text.
    pub fn from_canonical_body(body: Value) -> Result<Self, GatewayError> {
        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(GatewayError::no_response)?
            .to_string();
        Ok(Self { text, body })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}
