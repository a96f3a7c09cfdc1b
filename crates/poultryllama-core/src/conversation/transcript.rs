//! Append-only message history for one user.

use poultryllama_types::llm::{Message, MessageRole};

/// Ordered, append-only conversation history.
///
/// Index 0 is always the system message the transcript was created with.
/// The message vector is private so nothing can reorder, edit, or prune it;
/// the only mutations are [`push_user`](Self::push_user) and
/// [`push_assistant`](Self::push_assistant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Start a transcript seeded with the given system instruction.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// All messages in replay order, system message first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages, including the system message (always >= 1).
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: a transcript carries at least its system message.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the last turn is a user message that never got a reply.
    ///
    /// Happens after a failed completion call; the next turn is appended
    /// after it rather than replacing it.
    pub fn has_unanswered_user_turn(&self) -> bool {
        self.messages
            .last()
            .is_some_and(|m| m.role == MessageRole::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_holds_only_system_message() {
        let t = Transcript::new("be helpful");
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
        assert_eq!(t.messages()[0], Message::system("be helpful"));
        assert!(!t.has_unanswered_user_turn());
    }

    #[test]
    fn test_pushes_preserve_insertion_order() {
        let mut t = Transcript::new("sys");
        t.push_user("q1");
        t.push_assistant("a1");
        t.push_user("q2");

        let roles: Vec<MessageRole> = t.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User
            ]
        );
        assert_eq!(t.messages()[3].content, "q2");
        assert!(t.has_unanswered_user_turn());
    }
}
