//! CLI argument parsing for tripstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ts")]
#[command(author, version, about = "Inspect record collections in a tripstore directory", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Store directory (overrides config)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the keys present in the store
    Keys,

    /// Print the records stored under a key as pretty JSON
    Dump {
        /// Collection key
        #[arg(required = true)]
        key: String,
    },

    /// List record ids under a key
    Ids {
        /// Collection key
        #[arg(required = true)]
        key: String,
    },

    /// Delete records by id from a collection
    Delete {
        /// Collection key
        #[arg(required = true)]
        key: String,

        /// Record id to delete
        #[arg(required = true)]
        id: String,
    },
}
