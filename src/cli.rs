use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "A simple cli tool to inspect the entries of a ZIP archive.", long_about = None)]
pub struct Cli {
    /// Subcommands of the CLI.
    #[command(subcommand)]
    pub command: Command,

    /// Enables verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands of the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Lists every entry of the archive.
    List {
        /// Path to the ZIP archive.
        archive: PathBuf,
    },

    /// Shows the details of a single entry.
    Show {
        /// Path to the ZIP archive.
        archive: PathBuf,

        /// Entry name exactly as stored in the archive.
        name: String,
    },
}
