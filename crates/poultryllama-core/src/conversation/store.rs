//! Process-wide mapping from user identifier to transcript.
//!
//! `ConversationStore` is backed by a `DashMap` of per-user
//! `Arc<tokio::sync::Mutex<Transcript>>`. The map shard lock is only held
//! long enough to clone the `Arc` out; the per-user mutex is what callers
//! hold across `.await`. Different users never contend on the same mutex.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use poultryllama_types::llm::Message;

use super::transcript::Transcript;

/// Shared, lockable handle to one user's transcript.
pub type TranscriptHandle = Arc<Mutex<Transcript>>;

/// In-memory store of every conversation seen since process start.
///
/// Cloning produces a shared view of the same underlying map. Entries are
/// created on first reference and never removed.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    inner: Arc<DashMap<String, TranscriptHandle>>,
    system_prompt: Arc<str>,
}

impl ConversationStore {
    /// Create an empty store whose new transcripts start with `system_prompt`.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            system_prompt: Arc::from(system_prompt.into()),
        }
    }

    /// Return the transcript for `user_id`, creating it if this is the first
    /// reference to that user.
    ///
    /// A freshly created transcript holds exactly the system message.
    pub fn get_or_create(&self, user_id: &str) -> TranscriptHandle {
        if let Some(existing) = self.inner.get(user_id) {
            return Arc::clone(existing.value());
        }

        let entry = self.inner.entry(user_id.to_string()).or_insert_with(|| {
            debug!(user_id = %user_id, "Starting new conversation");
            Arc::new(Mutex::new(Transcript::new(&*self.system_prompt)))
        });
        Arc::clone(entry.value())
    }

    /// Copy of the messages for `user_id`, or `None` if the user has no
    /// conversation yet. Waits for any in-flight turn on that user.
    pub async fn snapshot(&self, user_id: &str) -> Option<Vec<Message>> {
        let handle = self.inner.get(user_id).map(|r| Arc::clone(r.value()))?;
        let transcript = handle.lock().await;
        Some(transcript.messages().to_vec())
    }

    /// Whether a conversation exists for `user_id`.
    pub fn contains(&self, user_id: &str) -> bool {
        self.inner.contains_key(user_id)
    }

    /// Number of conversations.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
