//! CLI entry points

pub mod serve;

use clap::{Parser, Subcommand};

/// Account service - user identity storage with credential verification
#[derive(Parser)]
#[command(name = "account-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve,
}
