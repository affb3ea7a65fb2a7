use async_trait::async_trait;

use super::{
    error::GatewayError,
    types::{GenerationRequest, GenerationResult},
};
use crate::provider::Provider;

/// One upstream chat-completion API behind the gateway's contract.
///
/// Implementations translate the request into the provider's wire format, make exactly
/// one HTTP call and normalize the answer into a canonical `GenerationResult`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError>;
}
