//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pyndex - admin CLI for a self-hosted Python package index
#[derive(Parser)]
#[command(name = "pyndex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin CLI for a self-hosted Python package index")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Download packages from the configured index and add them to storage
    Add {
        /// Requirement labels (name or name==version)
        labels: Vec<String>,

        /// Owner recorded on the saved packages
        #[arg(short, long)]
        owner: Option<String>,
    },
}
