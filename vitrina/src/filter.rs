//! Evaluates a [`FilterSelection`] as a predicate over product records. This
//! is the client-side path for collections that are already in memory rather
//! than pre-filtered by the data collaborator.

use std::collections::BTreeSet;

use vitrina_schema::{CategoryFilterSchema, FacetDefinition, FacetKind, MissingPolicy};

use crate::selection::{FacetValue, FilterSelection, RangeValue};

/// The value a product record exposes for one facet key.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
    Number(f64),
    Flag(bool),
}

/// Facet-keyed attribute access for product records. The engine only ever
/// reads records through this trait; the full record shape belongs to the
/// data collaborator.
pub trait Facetable {
    fn attribute(&self, key: &str) -> Option<AttributeValue>;
}

/// The facet key whose values drive `applicable_for` restrictions.
const SUBTYPE_KEY: &str = "tipo";

/// True iff the record satisfies every active constraint in the selection
/// (logical AND across facets). Never errors: a facet the schema no longer
/// declares is evaluated from the stored value alone, and the dependency and
/// applicability rules degrade to "skip".
pub fn matches<R: Facetable + ?Sized>(record: &R, selection: &FilterSelection, schema: &CategoryFilterSchema) -> bool {
    selection.iter().all(|(key, value)| {
        let facet = schema.get(key);
        if let Some(facet) = facet {
            if !dependency_active(facet, selection) {
                return true;
            }
            if !applies_to(facet, record, selection) {
                return true;
            }
        }
        match value {
            FacetValue::Values(values) => intersects(record.attribute(key), values),
            FacetValue::Range(range) => in_range(record.attribute(key), range, facet),
            FacetValue::Flag => matches!(record.attribute(key), Some(AttributeValue::Flag(true))),
        }
    })
}

/// A facet with a `depends_on` relation only applies while its dependency is
/// itself active in the selection.
fn dependency_active(facet: &FacetDefinition, selection: &FilterSelection) -> bool {
    match &facet.depends_on {
        Some(dependency) => selection.contains(dependency),
        None => true,
    }
}

/// An `applicable_for` facet is only enforced when the record's subtype, or
/// the currently selected subtype facet, intersects the declared list.
fn applies_to<R: Facetable + ?Sized>(facet: &FacetDefinition, record: &R, selection: &FilterSelection) -> bool {
    let Some(subtypes) = &facet.applicable_for else {
        return true;
    };
    let in_record = match record.attribute(SUBTYPE_KEY) {
        Some(attr) => subtypes.iter().any(|subtype| attr_has(&attr, subtype)),
        None => false,
    };
    let in_selection = match selection.get(SUBTYPE_KEY) {
        Some(FacetValue::Values(values)) => subtypes.iter().any(|subtype| values.iter().any(|v| eq_fold(v, subtype))),
        _ => false,
    };
    in_record || in_selection
}

fn intersects(attr: Option<AttributeValue>, values: &BTreeSet<String>) -> bool {
    match attr {
        Some(attr) => values.iter().any(|value| attr_has(&attr, value)),
        None => false,
    }
}

/// Case-insensitive membership test; source data routinely mixes case for
/// brand and category strings.
fn attr_has(attr: &AttributeValue, value: &str) -> bool {
    match attr {
        AttributeValue::Text(text) => eq_fold(text, value),
        AttributeValue::List(items) => items.iter().any(|item| eq_fold(item, value)),
        AttributeValue::Number(_) | AttributeValue::Flag(_) => false,
    }
}

fn in_range(attr: Option<AttributeValue>, range: &RangeValue, facet: Option<&FacetDefinition>) -> bool {
    let number = match attr {
        Some(AttributeValue::Number(number)) => Some(number),
        Some(AttributeValue::Text(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(number) => range.contains(number),
        None => match missing_policy(facet) {
            MissingPolicy::Zero => range.contains(0.0),
            MissingPolicy::Exclude => false,
        },
    }
}

fn missing_policy(facet: Option<&FacetDefinition>) -> MissingPolicy {
    match facet.map(|f| &f.kind) {
        Some(FacetKind::Range { missing, .. }) => *missing,
        _ => MissingPolicy::default(),
    }
}

fn eq_fold(a: &str, b: &str) -> bool { a.to_lowercase() == b.to_lowercase() }

/// Iterator adapter yielding only the records that match the selection.
pub struct FilterIterator<'a, I> {
    iter: I,
    selection: &'a FilterSelection,
    schema: &'a CategoryFilterSchema,
}

impl<'a, I, R> FilterIterator<'a, I>
where
    I: Iterator<Item = R>,
    R: Facetable,
{
    pub fn new(iter: I, selection: &'a FilterSelection, schema: &'a CategoryFilterSchema) -> Self {
        Self { iter, selection, schema }
    }
}

impl<'a, I, R> Iterator for FilterIterator<'a, I>
where
    I: Iterator<Item = R>,
    R: Facetable,
{
    type Item = R;

    fn next(&mut self) -> Option<Self::Item> {
        let (selection, schema) = (self.selection, self.schema);
        self.iter.find(|record| matches(record, selection, schema))
    }
}
