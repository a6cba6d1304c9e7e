//! CLI execution

use std::path::{Path, PathBuf};

use serde_json::json;

use super::commands::{Cli, Commands, OutputFormat};
use crate::config::{PageConfig, NEXT_PARAM, PAGE_SIZE_PARAM, PREV_PARAM};
use crate::error::{Result, ResultExt};
use crate::pagination::{CursorPagination, PageLinks};
use crate::params::RequestParams;
use crate::provider::KeysetProvider;
use crate::store::{DuckDbStore, TableQuery};
use crate::types::{OptionStringExt, Record};
use crate::urls::UrlBuilder;

/// Executes a parsed CLI invocation
pub struct Runner {
    cli: Cli,
}

/// Arguments of the `page` subcommand
struct PageArgs<'a> {
    db: &'a Option<PathBuf>,
    table: &'a str,
    key: &'a str,
    limit: usize,
    prev: &'a str,
    next: &'a str,
    route: &'a str,
    base_url: &'a Option<String>,
    format: OutputFormat,
}

impl Runner {
    /// Create a runner for the parsed CLI
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the requested command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Page {
                db,
                table,
                key,
                limit,
                prev,
                next,
                route,
                base_url,
                format,
            } => self.run_page(&PageArgs {
                db,
                table,
                key,
                limit: *limit,
                prev,
                next,
                route,
                base_url,
                format: *format,
            }),
        }
    }

    fn run_page(&self, args: &PageArgs<'_>) -> Result<()> {
        let store = match args.db {
            Some(path) => open_store(path)?,
            None => demo_store()?,
        };
        let query = TableQuery::new(args.table)?;

        // The parameter set an HTTP layer would have extracted from the
        // request query string.
        let mut params = RequestParams::new();
        params.insert(PAGE_SIZE_PARAM, args.limit.to_string());
        if let Some(prev) = args.prev.to_string().none_if_empty() {
            params.insert(PREV_PARAM, prev);
        }
        if let Some(next) = args.next.to_string().none_if_empty() {
            params.insert(NEXT_PARAM, next);
        }

        let config = PageConfig::new(args.key, args.route)
            .with_page_size(args.limit)
            .with_prev(args.prev)
            .with_next(args.next);

        let urls = match args.base_url {
            Some(base) => UrlBuilder::with_base(base)?,
            None => UrlBuilder::new(),
        };

        let pagination = CursorPagination::new(config, params, urls)?;
        let mut provider = KeysetProvider::new(store, query, pagination);

        let records = provider.fetch_page()?;
        let links = provider.links(args.base_url.is_some())?;

        print_page(&records, &links, args.format)
    }
}

fn open_store(path: &Path) -> Result<DuckDbStore> {
    DuckDbStore::open(path).with_context(|| format!("failed to open {}", path.display()))
}

/// In-memory table with fifty rows, for trying out cursors without a database
fn demo_store() -> Result<DuckDbStore> {
    let store = DuckDbStore::open_in_memory()?;
    store.execute_batch(
        "CREATE TABLE items AS
         SELECT i AS id, 'item ' || i AS name FROM range(1, 51) t(i);",
    )?;
    Ok(store)
}

fn print_page(records: &[Record], links: &PageLinks, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
            println!("{}", serde_json::to_string(&json!({ "links": links }))?);
        }
        OutputFormat::Pretty => {
            println!("{} record(s)", records.len());
            for record in records {
                println!("  {}", serde_json::to_string(record)?);
            }
            println!("prev: {}", links.prev.as_deref().unwrap_or("-"));
            println!("next: {}", links.next.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}
