mod common;

use std::collections::BTreeMap;

use anyhow::Result;
use vitrina::{matches, CatalogQuery, FilterIterator, FilterSelection, ProductRecord};
use vitrina_schema::FilterRegistry;

use crate::common::{catalog, sunglasses};

/// The full page-view cycle: URL parameters in, a filtered product list out,
/// a user toggle, and parameters back for the next URL.
#[test]
fn url_to_products_and_back() -> Result<()> {
    let schema = FilterRegistry::builtin().full_schema("gafas");

    let params = BTreeMap::from([
        ("categorias".to_string(), "gafas".to_string()),
        ("search".to_string(), "aviador".to_string()),
        ("marca".to_string(), "ray-ban,persol".to_string()),
        ("precio".to_string(), "100..200".to_string()),
    ]);
    let query = CatalogQuery::from_params(&params, &schema);
    assert!(query.categories.contains("gafas"));
    assert_eq!(query.search, "aviador");
    assert_eq!(query.filters.len(), 2);

    let kept: Vec<ProductRecord> = FilterIterator::new(catalog().into_iter(), &query.filters, &schema).collect();
    let names: Vec<&str> = kept.iter().map(|p| p.nombre.as_str()).collect();
    // 150€ Ray-Ban and 180€ RAY-BAN pass; Persol at 220€ is over budget.
    assert_eq!(names, vec!["Aviador clásico", "Polarizadas"]);

    // User widens the price range and drops Persol from the brand set.
    let updated = CatalogQuery {
        filters: query.filters.set_range("precio", Some(100.0), Some(300.0)).set_value("marca", "persol", false),
        ..query
    };
    let next_params = updated.to_params(&schema);
    assert_eq!(next_params.get("marca"), Some(&"ray-ban".to_string()));
    assert_eq!(next_params.get("precio"), Some(&"100..300".to_string()));
    assert_eq!(next_params.get("categorias"), Some(&"gafas".to_string()));

    // And the new URL parses back to the same state.
    assert_eq!(CatalogQuery::from_params(&next_params, &schema), updated);
    Ok(())
}

#[test]
fn clearing_everything_matches_every_product() -> Result<()> {
    let schema = FilterRegistry::builtin().full_schema("gafas");
    let cleared = FilterSelection::empty();
    for product in catalog() {
        assert!(matches(&product, &cleared, &schema), "{} should match the empty selection", product.nombre);
    }
    assert_eq!(cleared, FilterSelection::empty().set_value("marca", "tous", true).set_value("marca", "tous", false));
    Ok(())
}

#[test]
fn sale_filter_uses_the_price_drop_rule() -> Result<()> {
    let schema = FilterRegistry::builtin().full_schema("gafas");
    let selection = FilterSelection::empty().set_boolean("enOferta", true);

    let kept: Vec<ProductRecord> = FilterIterator::new(catalog().into_iter(), &selection, &schema).collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].nombre, "Deportivas");
    Ok(())
}

#[test]
fn registry_loaded_from_json_behaves_like_the_builtin() -> Result<()> {
    let doc = serde_json::to_string(FilterRegistry::builtin())?;
    let registry = FilterRegistry::from_json(&doc)?;

    let schema = registry.full_schema("gafas");
    let selection = FilterSelection::empty().set_value("marca", "ray-ban", true);
    assert!(matches(&sunglasses("Aviador", "Ray-Ban", 150.0), &selection, &schema));
    Ok(())
}
