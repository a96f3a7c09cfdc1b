//! Environment variable secret provider.
//!
//! Read-only: secrets are set through the shell or the service manager,
//! never through this process. An empty variable counts as unset.

use secrecy::SecretString;

use poultryllama_types::error::ConfigError;

/// Reads secrets from environment variables.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key`, returning `None` when it is unset, empty, or not
    /// valid Unicode.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            // Present but not Unicode; secrets must be valid strings
            Err(std::env::VarError::NotUnicode(_)) => None,
            Err(std::env::VarError::NotPresent) => None,
        }
    }

    /// Look up `key` or fail with [`ConfigError::MissingSecret`].
    pub fn require(&self, key: &str) -> Result<SecretString, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingSecret(key.to_string()))
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
