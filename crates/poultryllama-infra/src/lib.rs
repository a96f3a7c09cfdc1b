//! Infrastructure implementations for PoultryLlama.
//!
//! - `llm`: OpenAI-compatible completion provider (Hugging Face router)
//! - `secret`: credential lookup from the process environment
//! - `config`: TOML config loading and command-line overrides

pub mod config;
pub mod llm;
pub mod secret;
