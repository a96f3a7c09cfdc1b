//! Per-user conversation state.
//!
//! A [`Transcript`] is the ordered message history replayed to the model on
//! every turn; the [`ConversationStore`] maps user identifiers to them.

pub mod store;
pub mod transcript;

pub use store::{ConversationStore, TranscriptHandle};
pub use transcript::Transcript;
