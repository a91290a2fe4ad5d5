//! Catalog facet filtering and query-parameter synchronization.
//!
//! The `vitrina-schema` registry declares which facets exist per product
//! category; this crate holds the user's current facet selections as a pure
//! value, round-trips them through the flat string parameters carried in the
//! page URL, and evaluates them as a predicate over product records. Every
//! operation takes its full input as an argument and returns a new value, so
//! calls are free of shared state and ordering concerns.

mod codec;
pub mod error;
pub mod filter;
pub mod product;
pub mod query;
pub mod selection;

pub use error::ParseError;
pub use filter::{matches, AttributeValue, Facetable, FilterIterator};
pub use product::ProductRecord;
pub use query::CatalogQuery;
pub use selection::{FacetValue, FilterSelection, RangeValue};

pub use vitrina_schema as schema;
