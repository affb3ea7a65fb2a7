//! JSON body accepted by `POST /generate-content`.
//!
//! The extension has shipped a few payload flavours over time: `provider` or `llm`,
//! `messages` with `content` or Gemini-style `contents` with `parts`, options at the top
//! level or under `generationConfig`. All of them land in one `GenerationRequest`.

use serde::Deserialize;

use crate::core::{
    ChatMessage, ChatRole, GatewayError, GenerationConfig, GenerationRequest, PageContext,
    PrivacyLevel,
};
use crate::provider::Provider;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody {
    #[serde(default)]
    pub provider: Option<String>,
    /// Older spelling of `provider`.
    #[serde(default)]
    pub llm: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<WireMessage>>,
    /// Gemini spelling of `messages`.
    #[serde(default)]
    pub contents: Option<Vec<WireMessage>>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    #[serde(default)]
    pub generation_config: Option<WireGenerationConfig>,
    #[serde(default)]
    pub page_context: Option<PageContext>,
    #[serde(default)]
    pub privacy_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGenerationConfig {
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WireMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<WirePart>>,
}

#[derive(Debug, Deserialize)]
pub struct WirePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentBody {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, GatewayError> {
        serde_json::from_slice(bytes)
            .map_err(|e| GatewayError::bad_request(format!("Invalid request body: {e}")))
    }
}

impl WireMessage {
    fn into_chat_message(self, index: usize) -> Result<ChatMessage, GatewayError> {
        // Gemini allows omitting the role on single-turn requests.
        let role = match self.role.as_deref() {
            None => ChatRole::User,
            Some(role) => ChatRole::from_wire(role).ok_or_else(|| {
                GatewayError::bad_request(format!("Unsupported role {role:?} in message {index}"))
            })?,
        };

        let content = match (self.content, self.parts) {
            (Some(content), _) => content,
            (None, Some(parts)) if !parts.is_empty() => parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>(),
            _ => {
                return Err(GatewayError::bad_request(format!(
                    "Message {index} has no content"
                )));
            }
        };

        Ok(ChatMessage::new(role, content))
    }
}

impl TryFrom<GenerateContentBody> for GenerationRequest {
    type Error = GatewayError;

    fn try_from(body: GenerateContentBody) -> Result<Self, Self::Error> {
        // The canonical spelling wins when a body carries both.
        let provider: Provider = body
            .provider
            .or(body.llm)
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| GatewayError::bad_request("Missing required parameter: provider"))?
            .parse()?;

        let model = body
            .model
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| GatewayError::bad_request("Missing required parameter: model"))?;

        let messages = body
            .messages
            .or(body.contents)
            .filter(|messages| !messages.is_empty())
            .ok_or_else(|| GatewayError::bad_request("Missing required parameter: messages"))?
            .into_iter()
            .enumerate()
            .map(|(index, message)| message.into_chat_message(index))
            .collect::<Result<Vec<_>, _>>()?;

        let nested = body.generation_config.unwrap_or_default();
        let generation_config = GenerationConfig {
            temperature: body.temperature.or(nested.temperature),
            max_output_tokens: body.max_output_tokens.or(nested.max_output_tokens),
        };

        let mut request = GenerationRequest::new(provider, model, messages)
            .with_generation_config(generation_config)
            .with_privacy_level(PrivacyLevel::from_wire(body.privacy_level.as_deref()));

        if let Some(page_context) = body.page_context {
            request = request.with_page_context(page_context);
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<GenerationRequest, GatewayError> {
        let body = GenerateContentBody::from_slice(value.to_string().as_bytes())?;
        GenerationRequest::try_from(body)
    }

    #[test]
    fn accepts_extension_payload() {
        let request = parse(json!({
            "provider": "openai",
            "model": "gpt-4o-mini",
            "temperature": 0.3,
            "messages": [
                { "role": "user", "content": "What is this page about?" },
                { "role": "assistant", "content": "A recipe." },
            ],
            "pageContext": {
                "url": "https://example.com",
                "title": "Soup",
                "content": "Boil water.",
                "metadata": { "publishedDate": "2024-01-01" }
            },
            "privacyLevel": "minimal"
        }))
        .unwrap();

        assert_eq!(request.provider, Provider::OpenAI);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[1].role, ChatRole::Assistant);
        assert_eq!(request.generation_config.temperature, Some(0.3));
        assert_eq!(request.privacy_level, PrivacyLevel::Minimal);
        let page = request.page_context.unwrap();
        assert_eq!(
            page.metadata.unwrap().published_date.as_deref(),
            Some("2024-01-01")
        );
    }

    #[test]
    fn accepts_gemini_style_payload() {
        let request = parse(json!({
            "llm": "gemini",
            "model": "gemini-2.0-flash",
            "contents": [
                { "role": "user", "parts": [{ "text": "Here is " }, { "text": "context" }] },
                { "role": "model", "parts": [{ "text": "Understood." }] },
            ],
            "generationConfig": { "temperature": 0.9, "maxOutputTokens": 1024 }
        }))
        .unwrap();

        assert_eq!(request.provider, Provider::Gemini);
        assert_eq!(request.messages[0], ChatMessage::user("Here is context"));
        assert_eq!(request.messages[1], ChatMessage::assistant("Understood."));
        assert_eq!(request.generation_config.temperature, Some(0.9));
        assert_eq!(request.generation_config.max_output_tokens, Some(1024));
    }

    #[test]
    fn both_spellings_may_appear_and_canonical_one_wins() {
        let request = parse(json!({
            "provider": "openai",
            "llm": "gemini",
            "model": "gpt-4o-mini",
            "messages": [{ "role": "user", "content": "from messages" }],
            "contents": [{ "role": "user", "parts": [{ "text": "from contents" }] }]
        }))
        .unwrap();

        assert_eq!(request.provider, Provider::OpenAI);
        assert_eq!(request.messages, vec![ChatMessage::user("from messages")]);

        let agreeing = parse(json!({
            "provider": "gemini",
            "llm": "gemini",
            "model": "gemini-2.0-flash",
            "contents": [{ "parts": [{ "text": "hi" }] }]
        }))
        .unwrap();
        assert_eq!(agreeing.provider, Provider::Gemini);
        assert_eq!(agreeing.messages, vec![ChatMessage::user("hi")]);
    }

    #[test]
    fn top_level_options_win_over_generation_config() {
        let request = parse(json!({
            "provider": "gemini",
            "model": "gemini-2.0-flash",
            "messages": [{ "role": "user", "content": "hi" }],
            "maxOutputTokens": 64,
            "generationConfig": { "temperature": 0.1, "maxOutputTokens": 1024 }
        }))
        .unwrap();

        assert_eq!(request.generation_config.temperature, Some(0.1));
        assert_eq!(request.generation_config.max_output_tokens, Some(64));
    }

    #[test]
    fn rejects_missing_required_fields() {
        let missing_provider = parse(json!({ "model": "m", "messages": [{ "content": "hi" }] }));
        let missing_model = parse(json!({ "provider": "openai", "messages": [{ "content": "hi" }] }));
        let empty_messages = parse(json!({ "provider": "openai", "model": "m", "messages": [] }));
        let no_messages = parse(json!({ "provider": "openai", "model": "m" }));

        for result in [missing_provider, missing_model, empty_messages, no_messages] {
            assert!(matches!(result, Err(GatewayError::BadRequest(_))));
        }
    }

    #[test]
    fn rejects_unknown_provider_and_role() {
        let err = parse(json!({
            "provider": "ninjatech",
            "model": "m",
            "messages": [{ "role": "user", "content": "hi" }]
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid provider");

        let err = parse(json!({
            "provider": "openai",
            "model": "m",
            "messages": [{ "role": "tool", "content": "hi" }]
        }))
        .unwrap_err();
        assert!(matches!(err, GatewayError::BadRequest(_)));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = GenerateContentBody::from_slice(b"{not json").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
