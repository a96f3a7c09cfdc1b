//! Gateway configuration loader.
//!
//! Resolution order: built-in defaults, then the TOML file given on the
//! command line (if any), then individual command-line/env overrides.
//! Unlike a best-effort settings file, an explicitly requested config file
//! that is missing or malformed is a startup error.

use std::path::Path;

use poultryllama_types::config::GatewayConfig;
use poultryllama_types::error::ConfigError;

/// Individual settings supplied on the command line or via environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
}

/// Load the gateway configuration from `path`, or defaults when `None`.
pub async fn load_gateway_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let Some(path) = path else {
        tracing::debug!("No config file given, using defaults");
        return Ok(GatewayConfig::default());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let config = toml::from_str::<GatewayConfig>(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Apply overrides on top of a loaded config and validate the result.
pub fn resolve_config(
    mut config: GatewayConfig,
    overrides: ConfigOverrides,
) -> Result<GatewayConfig, ConfigError> {
    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }
    if let Some(model) = overrides.model {
        config.model = model;
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &GatewayConfig) -> Result<(), ConfigError> {
    if config.model.trim().is_empty() {
        return Err(ConfigError::Invalid("model must not be empty".to_string()));
    }
    if config.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
    }
    if config.system_prompt.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "system_prompt must not be empty".to_string(),
        ));
    }
    if config.max_tokens == 0 {
        return Err(ConfigError::Invalid(
            "max_tokens must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_without_path_returns_default() {
        let config = load_gateway_config(None).await.unwrap();
        assert_eq!(config, GatewayConfig::default());
    }

    #[tokio::test]
    async fn test_load_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("poultryllama.toml");
        tokio::fs::write(
            &config_path,
            r#"
port = 8080
model = "mistralai/Mistral-7B-Instruct-v0.3:novita"
max_tokens = 512
"#,
        )
        .await
        .unwrap();

        let config = load_gateway_config(Some(&config_path)).await.unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_gateway_config(Some(&tmp.path().join("nope.toml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("poultryllama.toml");
        tokio::fs::write(&config_path, "port = \"not a number\"")
            .await
            .unwrap();

        let err = load_gateway_config(Some(&config_path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = ConfigOverrides {
            host: Some("0.0.0.0".to_string()),
            port: Some(9999),
            model: None,
        };
        let config = resolve_config(GatewayConfig::default(), overrides).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9999");
        assert_eq!(config.model, GatewayConfig::default().model);
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let overrides = ConfigOverrides {
            model: Some("  ".to_string()),
            ..Default::default()
        };
        let err = resolve_config(GatewayConfig::default(), overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_system_prompt_is_rejected() {
        let config = GatewayConfig {
            system_prompt: String::new(),
            ..Default::default()
        };
        assert!(resolve_config(config, ConfigOverrides::default()).is_err());
    }
}
