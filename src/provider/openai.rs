//! OpenAI chat-completions adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{
    ChatRole, GatewayError, GenerationRequest, GenerationResult, HttpClient, ProviderAdapter,
};
use crate::provider::{Provider, constants::openai};

/// OpenAI-specific configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: openai::API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            openai::CHAT_COMPLETIONS_ENDPOINT
        )
    }

    fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        )
    }
}

pub struct OpenAiClient {
    config: OpenAiConfig,
    http: HttpClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAI
    }

    #[tracing::instrument(
        name = "openai_generate",
        skip(self, request),
        fields(model = %request.model),
        err
    )]
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError> {
        let payload = build_request(request);
        let headers = [self.config.auth_header()];

        let body = self
            .http
            .post_json(&self.config.endpoint(), &headers, &[], &payload)
            .await?;

        let text = extract_text(body)?;
        GenerationResult::from_text(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn build_request(request: &GenerationRequest) -> Request<'_> {
    let messages = request
        .messages
        .iter()
        .map(|m| Message {
            role: match m.role {
                ChatRole::System => MessageRole::System,
                ChatRole::User => MessageRole::User,
                ChatRole::Assistant => MessageRole::Assistant,
            },
            content: &m.content,
        })
        .collect();

    Request {
        model: &request.model,
        messages,
        temperature: request.generation_config.temperature(),
        max_tokens: request.generation_config.max_output_tokens,
    }
}

/// Lift `choices[0].message.content` out of a chat-completions body.
fn extract_text(body: Value) -> Result<String, GatewayError> {
    let response: Response =
        serde_json::from_value(body).map_err(|_| GatewayError::no_response())?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(GatewayError::no_response)
}
