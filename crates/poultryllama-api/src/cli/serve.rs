//! `poultryllama serve`: resolve configuration, require the inference
//! credential, wire the gateway, and run the HTTP server until Ctrl+C or
//! SIGTERM.

use std::path::PathBuf;

use tracing::{error, info};

use poultryllama_infra::config::{ConfigOverrides, load_gateway_config, resolve_config};
use poultryllama_infra::secret::EnvSecretProvider;
use poultryllama_types::config::CREDENTIAL_ENV_VAR;

use crate::http;
use crate::state::AppState;

pub async fn serve(
    host: Option<String>,
    port: Option<u16>,
    model: Option<String>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let loaded = load_gateway_config(config_path.as_deref()).await?;
    let config = resolve_config(loaded, ConfigOverrides { host, port, model })?;

    // Fail fast before binding anything if the credential is missing
    let api_key = EnvSecretProvider::new().require(CREDENTIAL_ENV_VAR)?;

    let state = AppState::init(&config, api_key);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        model = %config.model,
        provider = %config.provider_name,
        "PoultryLlama API listening"
    );

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
