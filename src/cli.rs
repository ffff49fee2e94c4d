//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// linkboard - link listing and bookmarklet admin for a URL shortener
#[derive(Parser, Debug)]
#[command(name = "linkboard")]
#[command(version)]
#[command(about = "Admin listing, bookmarklet and translations for a URL shortener", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Generate example configuration file
    GenerateConfig {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite
        #[arg(long)]
        force: bool,
    },

    /// List the locales available in the language directory
    Languages,
}
