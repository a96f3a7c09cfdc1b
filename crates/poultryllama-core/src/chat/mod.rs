//! One chat turn: validate, append, complete, append.

pub mod gateway;

pub use gateway::{ChatGateway, CompletionSettings};
