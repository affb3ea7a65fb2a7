//! # iris-gateway
//!
//! Completion gateway behind the Iris web assistant. Callers send one provider-agnostic
//! chat request; the gateway translates it for Gemini or OpenAI, makes a single upstream
//! call and answers with one canonical body:
//!
//! ```json
//! { "candidates": [{ "content": { "parts": [{ "text": "..." }] } }] }
//! ```
//!
//! Failures are folded into a small taxonomy (`BadRequest`, `ConfigurationError`,
//! `Timeout`, `RateLimited`, `UpstreamError`) so callers never branch on the provider.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iris_gateway::{ChatMessage, Gateway, GatewayConfig, GenerationRequest, Provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Gateway::new(GatewayConfig::from_env()?)?;
//!
//!     let request = GenerationRequest::new(
//!         Provider::Gemini,
//!         "gemini-2.0-flash",
//!         vec![ChatMessage::user("Summarize this page in one sentence.")],
//!     );
//!
//!     let result = gateway.generate(request).await?;
//!     println!("{}", result.text());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod gateway;
pub mod provider;
pub mod server;

pub use config::{GatewayConfig, ServerConfig};
pub use core::{
    CanonicalResponse, ChatMessage, ChatRole, ErrorEnvelope, ErrorKind, GatewayError,
    GenerationConfig, GenerationRequest, GenerationResult, PageContext, PageMetadata,
    PrivacyLevel, ProviderAdapter,
};
pub use gateway::Gateway;
pub use provider::{GeminiConfig, OpenAiConfig, Provider};
pub use server::{AppState, router};
