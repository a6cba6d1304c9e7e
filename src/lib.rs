//! # Keyset Pager
//!
//! Cursor-based (keyset) pagination for read APIs over ordered data stores.
//!
//! Instead of offset/limit paging, each request is bounded by a comparison on
//! one unique, sortable key and navigated through `prev`/`next` links. A
//! fetch probes one row past the page size to learn whether more data exists
//! without a count query, and the page's boundary keys become the cursors of
//! the generated links. The service stays stateless: all continuity lives in
//! the cursor values round-tripped through the client.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keyset_pager::{
//!     CursorPagination, KeysetProvider, PageConfig, RequestParams, UrlBuilder,
//! };
//! use keyset_pager::store::{DuckDbStore, TableQuery};
//!
//! fn handle(request_params: RequestParams) -> keyset_pager::Result<()> {
//!     let store = DuckDbStore::open("data.duckdb".as_ref())?;
//!     let query = TableQuery::new("messages")?;
//!
//!     let config = PageConfig::from_params("id", "/v2/messages", &request_params);
//!     let pagination = CursorPagination::new(config, request_params, UrlBuilder::new())?;
//!
//!     let mut provider = KeysetProvider::new(store, query, pagination);
//!     let records = provider.fetch_page()?;
//!     let links = provider.links(false)?;
//!
//!     // render records + links
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      KeysetProvider                         │
//! │  prepare query → fetch → normalize → write back cursors     │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                   │
//! ┌──────────┴──────────┐            ┌───────────┴─────────────┐
//! │  PageStore/PageQuery│            │    CursorPagination     │
//! ├─────────────────────┤            ├─────────────────────────┤
//! │ MemoryStore         │            │ direction (first/prev/  │
//! │ DuckDbStore         │            │   next), overflow probe,│
//! │                     │            │ ordered params, links   │
//! └─────────────────────┘            └─────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

// ============================================================================
// Module declarations
// ============================================================================

/// Command-line interface
pub mod cli;

/// Pagination configuration and parameter names
pub mod config;

/// Error types
pub mod error;

/// Per-request pagination state and link generation
pub mod pagination;

/// Ordered request parameters
pub mod params;

/// The keyset data provider
pub mod provider;

/// Query/store abstractions and backends
pub mod store;

/// Common types and type aliases
pub mod types;

/// URL construction for navigation links
pub mod urls;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PageConfig;
pub use error::{Error, Result};
pub use pagination::{CursorPagination, Direction, PageLinks};
pub use params::RequestParams;
pub use provider::KeysetProvider;
pub use types::*;
pub use urls::UrlBuilder;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
