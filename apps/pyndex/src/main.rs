//! pyndex - admin CLI for a self-hosted Python package index
//!
//! This is the main CLI application; all real work happens in the ops
//! crate.

mod cli;
mod display;
mod error;

use crate::cli::{Cli, Commands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use clap::Parser;
use pyndex_config::Config;
use pyndex_errors::OpsError;
use pyndex_ops::{OperationResult, OpsCtx};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("application error: {}", e);
        if json_mode {
            // Machine consumers still get a parseable failure report
            println!("{}", e.to_json());
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("starting pyndex v{}", env!("CARGO_PKG_VERSION"));

    // Configuration precedence: file, then environment, then CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;

    let renderer = OutputRenderer::new(cli.global.json);
    let ctx = OpsCtx::from_config(config)?;

    let result = execute_command(cli.command, &ctx).await?;
    renderer.render_result(&result)?;

    info!("command completed successfully");
    Ok(())
}

/// Execute the specified command
async fn execute_command(command: Commands, ctx: &OpsCtx) -> Result<OperationResult, CliError> {
    match command {
        Commands::Add { labels, owner } => {
            let owner = owner
                .or_else(|| ctx.config.general.default_owner.clone())
                .ok_or_else(|| pyndex_errors::Error::from(OpsError::NoOwnerSpecified))?;

            let report = pyndex_ops::add(ctx, &labels, &owner).await?;
            Ok(OperationResult::AddReport(report))
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled: bool) {
    if json_mode {
        // Suppress console logging so machine output stays clean
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
        return;
    }

    let default_filter = if debug_enabled {
        "info,pyndex=debug"
    } else {
        "warn,pyndex=warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
