//! queuebuild CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a default config file
//! - `status`  — Show the effective configuration
//! - `uri`     — Print the resolved queue URI
//! - `queue`   — Queue a build definition, optionally waiting for it
//! - `watch`   — Wait for a queued build to complete

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "queuebuild",
    about = "queuebuild — queue builds on a TFS build server",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.queuebuild/config.toml)
    #[arg(short, long, global = true, env = "QUEUEBUILD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Onboard,

    /// Show the effective configuration
    Status,

    /// Print the resolved queue URI
    Uri {
        /// Collection to resolve against (overrides config)
        #[arg(long)]
        collection: Option<String>,

        /// Team project to resolve against (overrides config)
        #[arg(long)]
        project: Option<String>,
    },

    /// Queue a build definition
    Queue {
        /// Build definition id
        definition_id: String,

        /// Source branch, e.g. refs/heads/master
        #[arg(short, long)]
        branch: Option<String>,

        /// Wait for the build to complete
        #[arg(short, long)]
        watch: bool,
    },

    /// Wait for a queued build to complete
    Watch {
        /// Build id returned when the build was queued
        build_id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Onboard => commands::onboard::run(config_path).await?,
        Commands::Status => commands::status::run(config_path).await?,
        Commands::Uri {
            collection,
            project,
        } => commands::uri::run(config_path, collection, project).await?,
        Commands::Queue {
            definition_id,
            branch,
            watch,
        } => commands::queue::run(config_path, definition_id, branch, watch).await?,
        Commands::Watch { build_id } => commands::watch::run(config_path, build_id).await?,
    }

    Ok(())
}
