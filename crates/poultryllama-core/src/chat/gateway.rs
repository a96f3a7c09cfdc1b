//! Chat gateway orchestrating a single conversation turn.
//!
//! `ChatGateway::handle_chat` is the whole request path:
//! validate input -> lock the user's transcript -> append the user turn ->
//! send the full transcript to the provider -> append the assistant turn.
//!
//! The per-user lock is held for the entire sequence, so two requests for
//! the same user never interleave their appends, while requests for
//! different users run in parallel.
//!
//! On provider failure the user turn stays in the transcript and no
//! assistant turn is added. The next successful turn continues from there.

use tracing::{Instrument, debug, info, info_span, warn};

use poultryllama_observe::genai_attrs::{
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_ID, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT,
};
use poultryllama_types::config::GatewayConfig;
use poultryllama_types::error::ChatError;
use poultryllama_types::llm::CompletionRequest;

use crate::conversation::ConversationStore;
use crate::llm::box_provider::BoxLlmProvider;

/// Fixed per-request completion parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl From<&GatewayConfig> for CompletionSettings {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Stateless coordinator between the conversation store and the provider.
///
/// Holds no conversation state itself; everything lives in the injected
/// [`ConversationStore`].
pub struct ChatGateway {
    store: ConversationStore,
    provider: BoxLlmProvider,
    settings: CompletionSettings,
}

impl ChatGateway {
    pub fn new(
        store: ConversationStore,
        provider: BoxLlmProvider,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            store,
            provider,
            settings,
        }
    }

    /// The store this gateway appends to.
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Run one chat turn for `user_id` and return the assistant's reply.
    ///
    /// # Errors
    ///
    /// - [`ChatError::Validation`] if either argument is empty or blank;
    ///   nothing is written to the store.
    /// - [`ChatError::Provider`] if the completion call fails; the user
    ///   turn has already been committed.
    pub async fn handle_chat(&self, user_id: &str, message: &str) -> Result<String, ChatError> {
        validate(user_id, message)?;

        let handle = self.store.get_or_create(user_id);
        let mut transcript = handle.lock().await;

        if transcript.has_unanswered_user_turn() {
            debug!(user_id = %user_id, "Continuing after an unanswered user turn");
        }
        transcript.push_user(message);

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: transcript.messages().to_vec(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let span = info_span!(
            "chat",
            gen_ai.operation.name = OP_CHAT,
            gen_ai.provider.name = %self.provider.name(),
            gen_ai.request.model = %self.settings.model,
            gen_ai.request.max_tokens = self.settings.max_tokens,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            gen_ai.response.finish_reasons = tracing::field::Empty,
            gen_ai.response.id = tracing::field::Empty,
            user_id = %user_id,
            transcript_len = request.messages.len(),
        );

        let result = self
            .provider
            .complete(&request)
            .instrument(span.clone())
            .await;

        match result {
            Ok(response) => {
                span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
                span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
                span.record(
                    GEN_AI_RESPONSE_FINISH_REASONS,
                    response.stop_reason.to_string().as_str(),
                );
                span.record(GEN_AI_RESPONSE_ID, response.id.as_str());

                let reply = response.message.content;
                transcript.push_assistant(reply.clone());
                info!(
                    user_id = %user_id,
                    transcript_len = transcript.len(),
                    reply_chars = reply.len(),
                    "Chat turn completed"
                );
                Ok(reply)
            }
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    transcript_len = transcript.len(),
                    error = %e,
                    "Completion failed; user turn left unanswered"
                );
                Err(ChatError::Provider(e))
            }
        }
    }
}

fn validate(user_id: &str, message: &str) -> Result<(), ChatError> {
    if user_id.trim().is_empty() {
        return Err(ChatError::Validation("user_id must not be empty".to_string()));
    }
    if message.trim().is_empty() {
        return Err(ChatError::Validation("message must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use poultryllama_types::llm::{
        CompletionResponse, LlmError, Message, MessageRole, StopReason, Usage,
    };
    use tokio::sync::Barrier;

    use crate::llm::provider::LlmProvider;

    /// Scripted provider: pops queued outcomes, otherwise echoes the last
    /// user message. Records every request it receives.
    #[derive(Default)]
    struct ScriptedProvider {
        script: Mutex<VecDeque<Result<String, String>>>,
        requests: Arc<Mutex<Vec<CompletionRequest>>>,
        delay: Option<Duration>,
    }

    impl ScriptedProvider {
        fn with_script(script: Vec<Result<&str, &str>>) -> Self {
            Self {
                script: Mutex::new(
                    script
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                ..Default::default()
            }
        }
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            let next = self.script.lock().unwrap().pop_front();
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let content = match next {
                Some(Ok(reply)) => reply,
                Some(Err(message)) => return Err(LlmError::Provider { message }),
                None => {
                    let last = request.messages.last().expect("non-empty transcript");
                    format!("re: {}", last.content)
                }
            };

            Ok(CompletionResponse {
                id: "resp-1".to_string(),
                message: Message::assistant(content),
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 5,
                },
            })
        }
    }

    /// Blocks every call on a shared barrier, so it only completes when
    /// `n` calls are in flight at the same time.
    struct RendezvousProvider {
        barrier: Arc<Barrier>,
    }

    impl LlmProvider for RendezvousProvider {
        fn name(&self) -> &str {
            "rendezvous"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.barrier.wait().await;
            Ok(CompletionResponse {
                id: "r".to_string(),
                message: Message::assistant("met"),
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    fn settings() -> CompletionSettings {
        CompletionSettings {
            model: "test-model".to_string(),
            max_tokens: 256,
            temperature: None,
        }
    }

    fn gateway_with(provider: impl LlmProvider + 'static) -> ChatGateway {
        ChatGateway::new(
            ConversationStore::new("sys"),
            BoxLlmProvider::new(provider),
            settings(),
        )
    }

    fn assert_alternating(messages: &[Message]) {
        assert_eq!(messages[0].role, MessageRole::System);
        for (i, m) in messages.iter().enumerate().skip(1) {
            let expected = if i % 2 == 1 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            assert_eq!(m.role, expected, "unexpected role at index {i}");
        }
    }

    #[tokio::test]
    async fn test_first_turn_returns_reply_and_records_three_messages() {
        let provider =
            ScriptedProvider::with_script(vec![Ok("Start with roughly 14g/day, increasing with age.")]);
        let gw = gateway_with(provider);

        let reply = gw
            .handle_chat("alice", "How much feed per chick per day?")
            .await
            .unwrap();
        assert_eq!(reply, "Start with roughly 14g/day, increasing with age.");

        let messages = gw.store().snapshot("alice").await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], Message::user("How much feed per chick per day?"));
        assert_eq!(
            messages[2],
            Message::assistant("Start with roughly 14g/day, increasing with age.")
        );
    }

    #[tokio::test]
    async fn test_second_turn_replays_full_history() {
        let provider = ScriptedProvider::with_script(vec![
            Ok("Start with roughly 14g/day, increasing with age."),
            Ok("Switch to grower feed around six weeks."),
        ]);
        let requests = Arc::clone(&provider.requests);
        let gw = gateway_with(provider);

        gw.handle_chat("alice", "How much feed per chick per day?")
            .await
            .unwrap();
        gw.handle_chat("alice", "At what age does that change?")
            .await
            .unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].messages.len(), 2);
        let second = &requests[1].messages;
        let roles: Vec<MessageRole> = second.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User
            ]
        );
        assert_eq!(second[3].content, "At what age does that change?");
        assert_eq!(requests[1].model, "test-model");
        assert_eq!(requests[1].max_tokens, 256);
    }

    #[tokio::test]
    async fn test_n_turns_yield_one_plus_two_n_messages() {
        let gw = gateway_with(ScriptedProvider::default());
        for i in 0..5 {
            gw.handle_chat("dave", &format!("question {i}")).await.unwrap();
        }

        let messages = gw.store().snapshot("dave").await.unwrap();
        assert_eq!(messages.len(), 1 + 2 * 5);
        assert_alternating(&messages);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected_without_touching_store() {
        let gw = gateway_with(ScriptedProvider::default());

        let err = gw.handle_chat("", "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        let err = gw.handle_chat("alice", "   ").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));

        assert!(gw.store().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_dangling_user_turn() {
        let provider = ScriptedProvider::with_script(vec![Err("model is loading"), Ok("Yes.")]);
        let requests = Arc::clone(&provider.requests);
        let gw = gateway_with(provider);

        let err = gw.handle_chat("erin", "Is my hen broody?").await.unwrap_err();
        assert!(matches!(err, ChatError::Provider(_)));
        assert!(err.to_string().contains("model is loading"));

        let messages = gw.store().snapshot("erin").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], Message::user("Is my hen broody?"));

        // Next turn continues the same transcript, no reset
        let reply = gw.handle_chat("erin", "Hello?").await.unwrap();
        assert_eq!(reply, "Yes.");
        let messages = gw.store().snapshot("erin").await.unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[2], Message::user("Hello?"));
        assert_eq!(messages[3], Message::assistant("Yes."));

        // The provider saw the dangling turn replayed
        assert_eq!(requests.lock().unwrap()[1].messages.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_turns_for_same_user_never_interleave() {
        let provider = ScriptedProvider {
            delay: Some(Duration::from_millis(5)),
            ..Default::default()
        };
        let gw = Arc::new(gateway_with(provider));

        let mut tasks = Vec::new();
        for i in 0..12 {
            let gw = Arc::clone(&gw);
            tasks.push(tokio::spawn(async move {
                gw.handle_chat("frank", &format!("msg {i}")).await
            }));
        }
        for t in tasks {
            t.await.unwrap().unwrap();
        }

        let messages = gw.store().snapshot("frank").await.unwrap();
        assert_eq!(messages.len(), 1 + 2 * 12);
        assert_alternating(&messages);
        // Each reply answers the question directly before it
        for pair in messages[1..].chunks(2) {
            assert_eq!(pair[1].content, format!("re: {}", pair[0].content));
        }
    }

    #[tokio::test]
    async fn test_different_users_proceed_in_parallel() {
        let provider = RendezvousProvider {
            barrier: Arc::new(Barrier::new(2)),
        };
        let gw = Arc::new(gateway_with(provider));

        let a = {
            let gw = Arc::clone(&gw);
            tokio::spawn(async move { gw.handle_chat("u1", "hi from u1").await })
        };
        let b = {
            let gw = Arc::clone(&gw);
            tokio::spawn(async move { gw.handle_chat("u2", "hi from u2").await })
        };

        // Both calls must be in flight together to pass the barrier.
        let joined = tokio::time::timeout(Duration::from_secs(5), async {
            (a.await.unwrap(), b.await.unwrap())
        })
        .await
        .expect("distinct users were serialized");
        joined.0.unwrap();
        joined.1.unwrap();

        let u1 = gw.store().snapshot("u1").await.unwrap();
        let u2 = gw.store().snapshot("u2").await.unwrap();
        assert_eq!(u1.len(), 3);
        assert_eq!(u2.len(), 3);
        assert_eq!(u1[1].content, "hi from u1");
        assert_eq!(u2[1].content, "hi from u2");
    }

    #[test]
    fn test_settings_from_config() {
        let config = GatewayConfig::default();
        let s = CompletionSettings::from(&config);
        assert_eq!(s.model, config.model);
        assert_eq!(s.max_tokens, 1024);
        assert!(s.temperature.is_none());
    }
}
