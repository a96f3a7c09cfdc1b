//! PoultryLlama CLI and REST API entry point.
//!
//! Binary name: `poultryllama`
//!
//! Parses CLI arguments, initializes tracing, then either prints shell
//! completions or resolves configuration and starts the chat API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use poultryllama_observe::tracing_setup::{default_filter, init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "poultryllama", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(default_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            model,
            config,
        } => cli::serve::serve(host, port, model, config).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
