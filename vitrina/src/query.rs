//! The full query shape handed to the product-fetch collaborator: selected
//! categories, the free-text search term, and the facet selection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use vitrina_schema::CategoryFilterSchema;

use crate::selection::FilterSelection;

/// Reserved parameter key for the selected category set.
pub const CATEGORY_PARAM: &str = "categorias";
/// Reserved parameter key for the free-text search term. The term is opaque to
/// the engine and passes through to the data collaborator untouched.
pub const SEARCH_PARAM: &str = "search";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub categories: BTreeSet<String>,
    pub search: String,
    pub filters: FilterSelection,
}

impl CatalogQuery {
    pub fn to_params(&self, schema: &CategoryFilterSchema) -> BTreeMap<String, String> {
        let mut params = self.filters.to_params(schema);
        if !self.categories.is_empty() {
            params.insert(CATEGORY_PARAM.to_string(), self.categories.iter().cloned().collect::<Vec<_>>().join(","));
        }
        if !self.search.is_empty() {
            params.insert(SEARCH_PARAM.to_string(), self.search.clone());
        }
        params
    }

    /// The reserved keys are peeled off first; everything else decodes through
    /// the facet codec against the given schema.
    pub fn from_params(params: &BTreeMap<String, String>, schema: &CategoryFilterSchema) -> CatalogQuery {
        let categories = params
            .get(CATEGORY_PARAM)
            .map(|raw| raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
            .unwrap_or_default();
        let search = params.get(SEARCH_PARAM).cloned().unwrap_or_default();

        let mut facet_params = params.clone();
        facet_params.remove(CATEGORY_PARAM);
        facet_params.remove(SEARCH_PARAM);
        let filters = FilterSelection::from_params(&facet_params, schema);

        CatalogQuery { categories, search, filters }
    }
}
