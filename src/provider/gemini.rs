//! Google Gemini `generateContent` adapter.
//!
//! Gemini's native success body already has the canonical `candidates` shape, so it is
//! validated and handed back untouched.

use async_trait::async_trait;
use serde::Serialize;

use crate::core::{
    ChatRole, GatewayError, GenerationRequest, GenerationResult, HttpClient, ProviderAdapter,
};
use crate::provider::{Provider, constants::gemini};

/// Gemini-specific configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: gemini::API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

pub struct GeminiClient {
    config: GeminiConfig,
    http: HttpClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiClient {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    #[tracing::instrument(
        name = "gemini_generate",
        skip(self, request),
        fields(model = %request.model),
        err
    )]
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError> {
        let payload = build_request(request);
        let url = self.config.endpoint(&request.model);
        // Gemini takes the key as a query parameter rather than a header.
        let query = [("key".to_string(), self.config.api_key.clone())];

        let body = self.http.post_json(&url, &[], &query, &payload).await?;

        GenerationResult::from_canonical_body(body)
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Role {
    User,
    Model,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Content {
    role: Role,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    generation_config: GenerationConfig,
}

fn build_request(request: &GenerationRequest) -> Request {
    let mut system_parts = Vec::new();
    let mut contents = Vec::new();

    for message in &request.messages {
        let part = Part {
            text: message.content.clone(),
        };
        match message.role {
            ChatRole::System => system_parts.push(part),
            ChatRole::User => contents.push(Content {
                role: Role::User,
                parts: vec![part],
            }),
            ChatRole::Assistant => contents.push(Content {
                role: Role::Model,
                parts: vec![part],
            }),
        }
    }

    // Gemini refuses an empty `contents`; a system-only conversation becomes the user turn.
    let system_instruction = if contents.is_empty() {
        contents.push(Content {
            role: Role::User,
            parts: system_parts,
        });
        None
    } else if system_parts.is_empty() {
        None
    } else {
        Some(SystemInstruction {
            parts: system_parts,
        })
    };

    Request {
        contents,
        system_instruction,
        generation_config: GenerationConfig {
            temperature: request.generation_config.temperature(),
            max_output_tokens: request.generation_config.max_output_tokens,
        },
    }
}
