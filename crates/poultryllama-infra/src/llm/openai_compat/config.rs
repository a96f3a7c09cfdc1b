//! Configuration and defaults for OpenAI-compatible providers.
//!
//! The Hugging Face inference router exposes an OpenAI-compatible chat
//! completions endpoint; a `model:provider` suffix on the model id selects
//! the hosted backend (e.g. `...:novita`).

use secrecy::SecretString;

use poultryllama_types::config::GatewayConfig;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`]. Does not derive
/// Debug so the API key cannot end up in logs.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "huggingface").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://router.huggingface.co/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier used when a request leaves the model empty.
    pub model: String,
}

/// Provider configuration derived from the gateway settings.
pub fn from_gateway_config(config: &GatewayConfig, api_key: SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: config.provider_name.clone(),
        base_url: config.base_url.trim_end_matches('/').to_string(),
        api_key,
        model: config.model.clone(),
    }
}
