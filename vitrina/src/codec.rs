//! Round-trips a [`FilterSelection`] through the flat string parameters
//! carried in the page URL. Decoding is lenient by design: a stale or corrupt
//! URL degrades to a less constrained selection, never an error.

use std::collections::{BTreeMap, BTreeSet};

use vitrina_schema::{CategoryFilterSchema, FacetKind, FacetOption};

use crate::selection::{FacetValue, FilterSelection, RangeValue};

/// The only value a boolean facet ever puts on the wire.
const BOOLEAN_ACTIVE: &str = "true";

impl FilterSelection {
    /// Serializes the selection to flat query parameters. Multiselect values
    /// are comma-joined, ranges use the `min..max` token, booleans emit
    /// `"true"` only. A range equal to the facet's declared full range is a
    /// no-op constraint and is omitted entirely.
    pub fn to_params(&self, schema: &CategoryFilterSchema) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        for (key, value) in self.iter() {
            match value {
                FacetValue::Values(values) => {
                    params.insert(key.clone(), values.iter().cloned().collect::<Vec<_>>().join(","));
                }
                FacetValue::Range(range) => {
                    if !is_full_range(schema, key, range) {
                        params.insert(key.clone(), range.to_string());
                    }
                }
                FacetValue::Flag => {
                    params.insert(key.clone(), BOOLEAN_ACTIVE.to_string());
                }
            }
        }
        params
    }

    /// Parses flat query parameters back into a selection, decoding each key
    /// per its declared facet type. Keys the schema does not declare and
    /// option values the facet does not declare are dropped silently, which is
    /// what keeps old URLs with stale facets working.
    pub fn from_params(params: &BTreeMap<String, String>, schema: &CategoryFilterSchema) -> FilterSelection {
        let mut selection = FilterSelection::empty();
        for (key, raw) in params {
            let Some(facet) = schema.get(key) else {
                tracing::trace!("dropping unknown facet key {key:?}");
                continue;
            };
            match &facet.kind {
                FacetKind::MultiSelect { options } => {
                    let values: BTreeSet<String> =
                        raw.split(',').filter_map(|v| canonical_option(options, v.trim())).collect();
                    selection.insert_raw(key.clone(), FacetValue::Values(values));
                }
                FacetKind::Range { .. } => match raw.parse::<RangeValue>() {
                    Ok(range) => selection.insert_raw(key.clone(), FacetValue::Range(range)),
                    Err(err) => tracing::trace!("dropping range token for {key:?}: {err}"),
                },
                FacetKind::Boolean => {
                    if raw.trim() == BOOLEAN_ACTIVE {
                        selection.insert_raw(key.clone(), FacetValue::Flag);
                    }
                }
            }
        }
        selection
    }
}

/// Matches a raw value against the declared options case-insensitively and
/// returns the declared spelling, so stale URLs with mixed case still
/// round-trip to canonical option values.
fn canonical_option(options: &[FacetOption], raw: &str) -> Option<String> {
    let folded = raw.to_lowercase();
    options.iter().find(|option| option.value.to_lowercase() == folded).map(|option| option.value.clone())
}

fn is_full_range(schema: &CategoryFilterSchema, key: &str, range: &RangeValue) -> bool {
    match schema.get(key).map(|facet| &facet.kind) {
        Some(FacetKind::Range { bounds, .. }) => range.min == Some(bounds.min) && range.max == Some(bounds.max),
        _ => false,
    }
}
