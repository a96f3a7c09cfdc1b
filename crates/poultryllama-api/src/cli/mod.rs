//! CLI command definitions for the `poultryllama` binary.
//!
//! Uses clap derive macros for argument parsing. Every serve option can
//! also come from a `POULTRYLLAMA_*` environment variable.

pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with PoultryLlama, the poultry farming assistant, over HTTP.
#[derive(Parser)]
#[command(name = "poultryllama", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat API server.
    Serve {
        /// Host to bind to.
        #[arg(long, env = "POULTRYLLAMA_HOST")]
        host: Option<String>,

        /// Port to listen on.
        #[arg(short, long, env = "POULTRYLLAMA_PORT")]
        port: Option<u16>,

        /// Model identifier sent to the inference endpoint.
        #[arg(long, env = "POULTRYLLAMA_MODEL")]
        model: Option<String>,

        /// Path to a TOML config file.
        #[arg(short, long, env = "POULTRYLLAMA_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
