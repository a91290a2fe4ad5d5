use serde::{Deserialize, Serialize};

/// A single selectable option of a multiselect facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    /// Result count for this option, when the caller has one to display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl FacetOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into(), count: None }
    }
}

/// Declared bounds of a range facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

/// What a range constraint does with a product that has no value for the
/// attribute. Declared per facet; there is no blanket rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Treat the missing attribute as 0. The storefront's price convention.
    Zero,
    /// A product without the attribute never satisfies an active constraint.
    #[default]
    Exclude,
}

/// The type of a facet, with the static data that type needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FacetKind {
    MultiSelect {
        options: Vec<FacetOption>,
    },
    Range {
        bounds: RangeBounds,
        #[serde(default)]
        missing: MissingPolicy,
    },
    Boolean,
}

/// Static declaration of one filterable product attribute. Immutable once the
/// registry is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetDefinition {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FacetKind,
    /// Lower sorts first in the disclosure order; absent sorts last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Key of another facet that must be active for this one to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    /// Product subtypes this facet is enforced for; absent means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_for: Option<Vec<String>>,
}

impl FacetDefinition {
    pub fn multiselect(key: impl Into<String>, label: impl Into<String>, options: Vec<FacetOption>) -> Self {
        Self::with_kind(key, label, FacetKind::MultiSelect { options })
    }

    pub fn range(key: impl Into<String>, label: impl Into<String>, bounds: RangeBounds, missing: MissingPolicy) -> Self {
        Self::with_kind(key, label, FacetKind::Range { bounds, missing })
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(key, label, FacetKind::Boolean)
    }

    fn with_kind(key: impl Into<String>, label: impl Into<String>, kind: FacetKind) -> Self {
        Self { key: key.into(), label: label.into(), kind, priority: None, depends_on: None, applicable_for: None }
    }

    #[must_use]
    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn depends_on(mut self, key: impl Into<String>) -> Self {
        self.depends_on = Some(key.into());
        self
    }

    #[must_use]
    pub fn applicable_for(mut self, subtypes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.applicable_for = Some(subtypes.into_iter().map(Into::into).collect());
        self
    }
}

/// Facets registered for one product category, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryFilterSchema {
    facets: Vec<FacetDefinition>,
}

impl CategoryFilterSchema {
    pub fn new(facets: Vec<FacetDefinition>) -> Self { Self { facets } }

    pub fn empty() -> Self { Self::default() }

    pub fn get(&self, key: &str) -> Option<&FacetDefinition> { self.facets.iter().find(|f| f.key == key) }

    pub fn contains(&self, key: &str) -> bool { self.get(key).is_some() }

    pub fn is_empty(&self) -> bool { self.facets.is_empty() }

    pub fn len(&self) -> usize { self.facets.len() }

    pub fn iter(&self) -> impl Iterator<Item = &FacetDefinition> { self.facets.iter() }

    /// Facets in disclosure order: ascending by priority, a missing priority
    /// sorts last, ties keep declaration order.
    pub fn ordered(&self) -> Vec<&FacetDefinition> {
        let mut out: Vec<&FacetDefinition> = self.facets.iter().collect();
        out.sort_by_key(|f| f.priority.unwrap_or(u32::MAX));
        out
    }

    /// This schema's facets plus any facets of `other` not shadowed by key.
    /// Used to combine a category schema with the global one.
    pub fn merged(&self, other: &CategoryFilterSchema) -> CategoryFilterSchema {
        let mut facets = self.facets.clone();
        for facet in &other.facets {
            if !self.contains(&facet.key) {
                facets.push(facet.clone());
            }
        }
        CategoryFilterSchema { facets }
    }
}
