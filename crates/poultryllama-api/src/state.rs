//! Application state shared by all request handlers.
//!
//! AppState pins the gateway to the concrete infra provider at startup;
//! handlers only see the type-erased `ChatGateway`.

use std::sync::Arc;

use secrecy::SecretString;

use poultryllama_core::chat::{ChatGateway, CompletionSettings};
use poultryllama_core::conversation::ConversationStore;
use poultryllama_core::llm::box_provider::BoxLlmProvider;
use poultryllama_infra::llm::openai_compat::OpenAiCompatibleProvider;
use poultryllama_infra::llm::openai_compat::config::from_gateway_config;
use poultryllama_types::config::GatewayConfig;

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ChatGateway>,
}

impl AppState {
    /// Wire the conversation store and the HTTP completion provider.
    pub fn init(config: &GatewayConfig, api_key: SecretString) -> Self {
        let provider = OpenAiCompatibleProvider::new(from_gateway_config(config, api_key));
        let store = ConversationStore::new(config.system_prompt.clone());
        let gateway = ChatGateway::new(
            store,
            BoxLlmProvider::new(provider),
            CompletionSettings::from(config),
        );

        Self::from_gateway(gateway)
    }

    pub fn from_gateway(gateway: ChatGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}
