//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! Completion spans declare response-side fields up front as
//! `tracing::field::Empty` and fill them in with `Span::record` once the
//! provider answers, using the constants below as field keys.

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The finish reason for the response (e.g., "end_turn", "max_tokens").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// The unique response ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";
