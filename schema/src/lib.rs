//! Static facet schema registry for the storefront catalog.
//!
//! Declares, per product category, which facets exist, their types and options,
//! and their disclosure order. The registry is created once at process start and
//! never mutated; the query engine in the `vitrina` crate reads it to decode URL
//! parameters and evaluate filter predicates.

pub mod facet;
pub mod registry;

pub use facet::{CategoryFilterSchema, FacetDefinition, FacetKind, FacetOption, MissingPolicy, RangeBounds};
pub use registry::{FilterRegistry, SchemaError};
