//! Gateway configuration types for PoultryLlama.
//!
//! `GatewayConfig` represents the optional `poultryllama.toml` that controls
//! the listen address, the completion endpoint and model, and the system
//! instruction every conversation starts with. All fields have defaults, so
//! an empty file (or no file at all) yields a working configuration.

use serde::{Deserialize, Serialize};

/// Instruction seeded at index 0 of every new transcript.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are PoultryLlama, a friendly, knowledgeable assistant for poultry farmers. \
Your job is to provide clear, practical, and trustworthy advice on raising healthy poultry. \
Always explain concepts in simple terms, avoid jargon, and focus on what a farmer can do realistically. \
You can answer questions about chicken health, feeding, diseases, housing, egg production, and more. \
Be empathetic, supportive, and non-judgmental \u{2014} many users may be new or facing challenges. \
Avoid speculation, and if something is uncertain or needs a vet's attention, say so politely.";

/// Name of the environment variable holding the inference API credential.
pub const CREDENTIAL_ENV_VAR: &str = "HF_TOKEN";

/// Top-level configuration for the gateway process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Interface to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Provider label used in logs and spans.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// Base URL of the OpenAI-compatible chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on generated tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature; provider default when unset.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// System instruction for new conversations.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_provider_name() -> String {
    "huggingface".to_string()
}

fn default_base_url() -> String {
    "https://router.huggingface.co/v1".to_string()
}

fn default_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.3:novita".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            provider_name: default_provider_name(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
            system_prompt: default_system_prompt(),
        }
    }
}

impl GatewayConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
