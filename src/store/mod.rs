//! Query and store abstractions plus the built-in backends
//!
//! The provider is generic over [`PageStore`]; any ordered data source that
//! can compose a bound, an ordering, and a limit onto a cloneable query can
//! back it. Two backends ship with the crate: an in-memory store and a
//! DuckDB-backed store.

mod duckdb;
mod memory;
mod types;

pub use self::duckdb::{DuckDbStore, TableQuery};
pub use memory::{MemoryQuery, MemoryStore};
pub use types::{cursor_value, PageQuery, PageStore};
