//! Element property catalog.
//!
//! This module loads the reference property table (CSV export or versioned
//! JSON document) into an immutable index keyed by canonical element symbol.
//! Callers use `ElementCatalog` for lookups and weighted aggregates; the record
//! types mirror the table columns.

pub mod index;
pub mod model;
pub mod schema;
pub mod symbol;

pub use index::ElementCatalog;
pub use model::{AggregateRecord, ElementRecord, read_csv_records};
pub use schema::{CATALOG_SCHEMA_VERSION, read_json_records};
pub use symbol::{ElementSymbol, strip_decoration};
