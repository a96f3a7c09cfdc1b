//! LlmProvider trait definition.
//!
//! This is the port every completion backend implements. The gateway only
//! ever needs one non-streaming call per chat turn.

use poultryllama_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion provider backends.
///
/// Uses native async fn in traits (RPITIT). Implementations live in
/// poultryllama-infra (e.g., `OpenAiCompatibleProvider`); tests provide
/// scripted in-memory providers.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "huggingface").
    fn name(&self) -> &str;

    /// Send the full transcript and receive the assistant's reply.
    ///
    /// Exactly one attempt: implementations must not retry internally.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
