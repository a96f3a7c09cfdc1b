//! Credential resolution.
//!
//! The inference credential only ever comes from the environment and is
//! wrapped in [`secrecy::SecretString`] as soon as it is read.

pub mod env;

pub use env::EnvSecretProvider;
