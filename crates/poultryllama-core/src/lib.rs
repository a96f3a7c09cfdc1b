//! Conversation state and chat orchestration for PoultryLlama.
//!
//! This crate defines the `LlmProvider` port that the infrastructure layer
//! implements, the per-user `ConversationStore`, and the `ChatGateway` that
//! runs one chat turn against both. It depends only on `poultryllama-types`
//! (plus attribute names from `poultryllama-observe`) -- never on
//! `poultryllama-infra` or any HTTP crate.

pub mod chat;
pub mod conversation;
pub mod llm;
