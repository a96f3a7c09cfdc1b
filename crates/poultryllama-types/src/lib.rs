//! Shared domain types for PoultryLlama.
//!
//! Message and completion shapes exchanged with the LLM provider, the
//! gateway configuration, and the error taxonomy shared by every crate.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod llm;
