//! CLI module
//!
//! Command-line interface for paging through a DuckDB table.
//!
//! # Commands
//!
//! - `page` - Fetch one page of records and print them with navigation links

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
