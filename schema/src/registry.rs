//! Category-keyed lookup of facet schemas, plus the storefront's builtin
//! catalog declaration.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::facet::{CategoryFilterSchema, FacetDefinition, FacetKind, FacetOption, MissingPolicy, RangeBounds};

/// Errors raised while constructing or loading a registry. Lookup itself never
/// fails; a category with no registered schema is not an error.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid registry document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate facet key {key:?} in category {category:?}")]
    DuplicateFacet { category: String, key: String },
    #[error("multiselect facet {0:?} declares no options")]
    NoOptions(String),
    #[error("range facet {key:?} declares min {min} greater than max {max}")]
    InvertedRange { key: String, min: f64, max: f64 },
}

/// All facet schemas for the catalog: per-category plus the global facets that
/// apply regardless of category. Built once at startup, read-only thereafter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRegistry {
    categories: BTreeMap<String, CategoryFilterSchema>,
    global: CategoryFilterSchema,
}

impl FilterRegistry {
    pub fn new(categories: BTreeMap<String, CategoryFilterSchema>, global: CategoryFilterSchema) -> Result<Self, SchemaError> {
        let registry = Self { categories, global };
        registry.validate()?;
        Ok(registry)
    }

    /// Loads a registry from a JSON document and validates it.
    pub fn from_json(doc: &str) -> Result<Self, SchemaError> {
        let registry: FilterRegistry = serde_json::from_str(doc)?;
        registry.validate()?;
        Ok(registry)
    }

    /// The schema registered for a category. Returns an empty schema when none
    /// is registered; categories may legitimately have zero specific facets.
    pub fn category(&self, key: &str) -> CategoryFilterSchema {
        match self.categories.get(key) {
            Some(schema) => schema.clone(),
            None => {
                tracing::debug!("no filter schema registered for category {key:?}");
                CategoryFilterSchema::empty()
            }
        }
    }

    /// Facets that apply across all categories.
    pub fn global(&self) -> &CategoryFilterSchema { &self.global }

    /// The category schema merged with the global facets. This is the schema
    /// the query engine decodes URL parameters against.
    pub fn full_schema(&self, key: &str) -> CategoryFilterSchema { self.category(key).merged(&self.global) }

    /// The storefront's static catalog schema.
    pub fn builtin() -> &'static FilterRegistry { &BUILTIN }

    fn validate(&self) -> Result<(), SchemaError> {
        for (category, schema) in
            self.categories.iter().map(|(k, s)| (k.as_str(), s)).chain(std::iter::once(("global", &self.global)))
        {
            let mut seen: Vec<&str> = Vec::new();
            for facet in schema.iter() {
                if seen.contains(&facet.key.as_str()) {
                    return Err(SchemaError::DuplicateFacet { category: category.to_string(), key: facet.key.clone() });
                }
                seen.push(&facet.key);
                match &facet.kind {
                    FacetKind::MultiSelect { options } if options.is_empty() => {
                        return Err(SchemaError::NoOptions(facet.key.clone()));
                    }
                    FacetKind::Range { bounds, .. } if bounds.min > bounds.max => {
                        return Err(SchemaError::InvertedRange { key: facet.key.clone(), min: bounds.min, max: bounds.max });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

fn options(values: &[(&str, &str)]) -> Vec<FacetOption> {
    values.iter().map(|(value, label)| FacetOption::new(*value, *label)).collect()
}

static BUILTIN: LazyLock<FilterRegistry> = LazyLock::new(|| {
    let relojes = CategoryFilterSchema::new(vec![
        FacetDefinition::multiselect(
            "marca",
            "Marca",
            options(&[("tous", "TOUS"), ("casio", "Casio"), ("seiko", "Seiko"), ("lotus", "Lotus")]),
        )
        .priority(1),
        FacetDefinition::multiselect(
            "tipo",
            "Tipo",
            options(&[("analogico", "Analógico"), ("digital", "Digital"), ("smartwatch", "Smartwatch")]),
        )
        .priority(2),
        FacetDefinition::multiselect(
            "materialCorrea",
            "Material de la correa",
            options(&[("acero", "Acero"), ("piel", "Piel"), ("silicona", "Silicona")]),
        )
        .priority(3),
        FacetDefinition::multiselect(
            "colorCorrea",
            "Color de la correa",
            options(&[("negro", "Negro"), ("marron", "Marrón"), ("plateado", "Plateado")]),
        )
        .priority(4)
        .depends_on("materialCorrea"),
        FacetDefinition::multiselect(
            "funciones",
            "Funciones",
            options(&[("gps", "GPS"), ("pulsometro", "Pulsómetro"), ("notificaciones", "Notificaciones")]),
        )
        .priority(5)
        .applicable_for(["smartwatch"]),
        FacetDefinition::boolean("enOferta", "En oferta").priority(6),
    ]);

    let gafas = CategoryFilterSchema::new(vec![
        FacetDefinition::multiselect(
            "marca",
            "Marca",
            options(&[("ray-ban", "Ray-Ban"), ("persol", "Persol"), ("oakley", "Oakley"), ("tous", "TOUS")]),
        )
        .priority(1),
        FacetDefinition::multiselect("tipo", "Tipo", options(&[("sol", "Sol"), ("graduadas", "Graduadas")])).priority(2),
        FacetDefinition::multiselect("color", "Color", options(&[("negro", "Negro"), ("carey", "Carey"), ("dorado", "Dorado")]))
            .priority(3),
        FacetDefinition::multiselect(
            "protecciones",
            "Protecciones",
            options(&[("uv400", "UV400"), ("polarizadas", "Polarizadas"), ("espejo", "Espejo")]),
        )
        .priority(4)
        .applicable_for(["sol"]),
        FacetDefinition::boolean("enOferta", "En oferta").priority(5),
    ]);

    let bolsos = CategoryFilterSchema::new(vec![
        FacetDefinition::multiselect("marca", "Marca", options(&[("tous", "TOUS"), ("bimba-y-lola", "Bimba y Lola")]))
            .priority(1),
        FacetDefinition::multiselect(
            "material",
            "Material",
            options(&[("piel", "Piel"), ("lona", "Lona"), ("nylon", "Nylon")]),
        )
        .priority(2),
        FacetDefinition::multiselect("color", "Color", options(&[("negro", "Negro"), ("beige", "Beige"), ("rojo", "Rojo")]))
            .priority(3),
        // A bag with no declared size never matches an active size constraint.
        FacetDefinition::range("talla", "Talla", RangeBounds { min: 20.0, max: 60.0, unit: "cm".into() }, MissingPolicy::Exclude)
            .priority(4),
    ]);

    let global = CategoryFilterSchema::new(vec![FacetDefinition::range(
        "precio",
        "Precio",
        RangeBounds { min: 0.0, max: 1000.0, unit: "€".into() },
        MissingPolicy::Zero,
    )
    .priority(0)]);

    let categories = BTreeMap::from([
        ("relojes".to_string(), relojes),
        ("gafas".to_string(), gafas),
        ("bolsos".to_string(), bolsos),
    ]);

    FilterRegistry::new(categories, global).expect("builtin registry is valid")
});
