mod common;

use std::collections::BTreeMap;

use anyhow::Result;
use vitrina::{matches, CatalogQuery, FilterSelection, ProductRecord};
use vitrina_schema::{CategoryFilterSchema, FilterRegistry};

use crate::common::catalog;

/// A URL written against a facet schema that no longer exists must degrade to
/// "no filter applied", never an error.
#[test]
fn stale_url_degrades_to_unfiltered() -> Result<()> {
    let schema = FilterRegistry::builtin().full_schema("gafas");
    let params = BTreeMap::from([
        ("montura".to_string(), "metalica".to_string()),       // facet removed long ago
        ("marca".to_string(), "gucci".to_string()),            // brand never declared
        ("precio".to_string(), "luxury..premium".to_string()), // not numbers
        ("enOferta".to_string(), "maybe".to_string()),         // not "true"
    ]);

    let query = CatalogQuery::from_params(&params, &schema);
    assert!(query.filters.is_empty());
    for product in catalog() {
        assert!(matches(&product, &query.filters, &schema));
    }
    Ok(())
}

/// Categories with no registered schema still serve pages; only global facets
/// decode there.
#[test]
fn unregistered_category_still_decodes_global_facets() -> Result<()> {
    let schema = FilterRegistry::builtin().full_schema("joyas");
    let params = BTreeMap::from([
        ("precio".to_string(), "..300".to_string()),
        ("quilates".to_string(), "18".to_string()),
    ]);

    let selection = FilterSelection::from_params(&params, &schema);
    assert_eq!(selection.len(), 1);
    assert!(selection.contains("precio"));

    let pendant = ProductRecord { categoria: "joyas".to_string(), precio: Some(250.0), ..Default::default() };
    assert!(matches(&pendant, &selection, &schema));
    Ok(())
}

/// A selection key the schema no longer declares is still evaluated from its
/// stored value, so an in-memory selection survives a schema change.
#[test]
fn selection_against_an_empty_schema_still_filters() -> Result<()> {
    let schema = CategoryFilterSchema::empty();
    let selection = FilterSelection::empty().set_value("marca", "ray-ban", true);

    let mut kept = 0;
    for product in catalog() {
        if matches(&product, &selection, &schema) {
            kept += 1;
        }
    }
    assert_eq!(kept, 2); // Ray-Ban and RAY-BAN, case-insensitively
    Ok(())
}

/// Facet count badges come straight off the selection; the no-op invariant is
/// what keeps them accurate after a flurry of toggles.
#[test]
fn applied_filter_count_tracks_active_constraints_only() -> Result<()> {
    let selection = FilterSelection::empty()
        .set_value("marca", "tous", true)
        .set_range("precio", Some(0.0), None)
        .set_boolean("enOferta", true)
        .set_boolean("enOferta", false)
        .set_range("precio", None, None)
        .set_value("marca", "tous", false);

    assert_eq!(selection.len(), 0);
    assert!(selection.is_empty());
    Ok(())
}

#[test]
fn malformed_registry_documents_are_rejected() -> Result<()> {
    assert!(FilterRegistry::from_json("not json").is_err());

    let inverted = r#"{
        "categories": {
            "relojes": [
                { "key": "precio", "label": "Precio", "type": "range",
                  "bounds": { "min": 500.0, "max": 100.0, "unit": "€" } }
            ]
        },
        "global": []
    }"#;
    assert!(FilterRegistry::from_json(inverted).is_err());
    Ok(())
}
