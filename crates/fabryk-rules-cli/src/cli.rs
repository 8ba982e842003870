//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Compile front-end search rules into search-engine query documents
#[derive(Parser, Debug)]
#[command(name = "fabryk-rules")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Compiler configuration file (TOML)
    #[arg(short, long, global = true, env = "FABRYK_RULES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a request document
    Compile {
        /// Request JSON file; reads stdin when absent or `-`
        input: Option<PathBuf>,

        /// Write the query document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration operations
    Config {
        /// Configuration operation
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Destination file
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
