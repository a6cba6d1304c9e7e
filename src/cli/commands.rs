//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_PAGE_SIZE;

/// Keyset pagination CLI
#[derive(Parser, Debug)]
#[command(name = "keyset-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page from a DuckDB table and print records plus links
    Page {
        /// DuckDB database file (omit to page through a built-in demo table)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Table to page through
        #[arg(long, default_value = "items")]
        table: String,

        /// Unique, sortable pagination key column
        #[arg(long, default_value = "id")]
        key: String,

        /// Records per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,

        /// Previous-page cursor
        #[arg(long, default_value = "")]
        prev: String,

        /// Next-page cursor
        #[arg(long, default_value = "")]
        next: String,

        /// Route used in generated links
        #[arg(long, default_value = "/items")]
        route: String,

        /// Base URL; when set, links are absolute
        #[arg(long)]
        base_url: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line, links last)
    Json,
    /// Human-readable output
    Pretty,
}
