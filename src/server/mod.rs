//! HTTP surface of the gateway.

mod error;
pub mod wire;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::core::{GatewayError, GenerationRequest};
use crate::gateway::Gateway;
use crate::provider::Provider;
use wire::GenerateContentBody;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/generate-content", post(generate_content))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        // The extension calls in from whatever page the user is on.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

/// Serve the router on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let providers: serde_json::Map<String, Value> = Provider::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), json!(state.gateway.is_configured(*p))))
        .collect();

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "providers": providers,
    }))
}

async fn generate_content(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, GatewayError> {
    // Oversized or unreadable bodies still get the JSON error envelope.
    let body = body.map_err(|rejection| GatewayError::bad_request(rejection.body_text()))?;
    let body = GenerateContentBody::from_slice(&body)?;
    let request = GenerationRequest::try_from(body)?;

    let result = state.gateway.generate(request).await?;

    Ok(Json(result.into_body()))
}
