pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::{ErrorEnvelope, ErrorKind, GatewayError};
pub use http::{HttpClient, HttpClientConfig};
pub use traits::ProviderAdapter;
pub use types::{
    CanonicalResponse, ChatMessage, ChatRole, GenerationConfig, GenerationRequest,
    GenerationResult, PageContext, PageMetadata, PrivacyLevel,
};
