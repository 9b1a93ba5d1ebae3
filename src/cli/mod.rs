//! Command-line interface for the city explorer server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// City Explorer - location-centric aggregator with a freshness cache
#[derive(Parser, Debug)]
#[command(name = "city-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default search paths
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Listen on this port, overriding config and `PORT`
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[default]
    Serve,

    /// Apply database migrations and exit
    Migrate,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or_default()
    }
}
