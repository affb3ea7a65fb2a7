//! The completion gateway: one `generate` call, whichever provider answers.

pub mod context;

use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::core::{
    ChatMessage, GatewayError, GenerationRequest, GenerationResult, HttpClient, ProviderAdapter,
};
use crate::provider::{GeminiClient, OpenAiClient, Provider};

pub use context::system_message;

/// Provider adapters plus the client they share.
///
/// Holds no per-request state, so one instance can serve any number of concurrent calls.
pub struct Gateway {
    gemini: Option<GeminiClient>,
    openai: Option<OpenAiClient>,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = HttpClient::new(&config.http)?;

        // Blank keys count as missing.
        let gemini = config
            .gemini
            .filter(|gemini| !gemini.api_key.trim().is_empty())
            .map(|gemini| GeminiClient::new(gemini, http.clone()));
        let openai = config
            .openai
            .filter(|openai| !openai.api_key.trim().is_empty())
            .map(|openai| OpenAiClient::new(openai, http.clone()));

        Ok(Self { gemini, openai })
    }

    /// Whether an API key is available for `provider`.
    pub fn is_configured(&self, provider: Provider) -> bool {
        match provider {
            Provider::Gemini => self.gemini.is_some(),
            Provider::OpenAI => self.openai.is_some(),
        }
    }

    fn adapter(&self, provider: Provider) -> Result<&dyn ProviderAdapter, GatewayError> {
        let adapter: Option<&dyn ProviderAdapter> = match provider {
            Provider::Gemini => self.gemini.as_ref().map(|c| c as &dyn ProviderAdapter),
            Provider::OpenAI => self.openai.as_ref().map(|c| c as &dyn ProviderAdapter),
        };

        adapter.ok_or_else(|| {
            GatewayError::configuration(format!(
                "{provider} API key not configured. Set {}.",
                provider.default_api_key_env_var()
            ))
        })
    }

    /// Validate, prepend the page-aware system message and forward to the provider.
    #[tracing::instrument(
        name = "generate",
        skip(self, request),
        fields(provider = %request.provider, model = %request.model)
    )]
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        let result = self.dispatch(request).await;

        match &result {
            Ok(generated) => info!(bytes = generated.text().len(), "generation succeeded"),
            Err(e) => warn!(
                kind = %e.kind(),
                status = e.status_code(),
                error = %e,
                "generation failed"
            ),
        }

        result
    }

    async fn dispatch(
        &self,
        mut request: GenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        request.validate()?;
        let adapter = self.adapter(request.provider)?;

        let system = system_message(request.page_context.as_ref(), request.privacy_level);
        request.messages.insert(0, ChatMessage::system(system));

        adapter.generate(&request).await
    }
}
