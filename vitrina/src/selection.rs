//! The user's current facet selections as a pure value.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// An optional lower/upper bound pair. Either side may be absent, meaning
/// unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeValue {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeValue {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self { Self { min, max } }

    /// True when neither bound is set - the constraint is a no-op.
    pub fn is_unbounded(&self) -> bool { self.min.is_none() && self.max.is_none() }

    /// Inclusive on both sides.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Wire token: `"50..200"`, `"50.."`, `"..200"`. An absent bound is omitted.
impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = self.min {
            write!(f, "{}", min)?;
        }
        write!(f, "..")?;
        if let Some(max) = self.max {
            write!(f, "{}", max)?;
        }
        Ok(())
    }
}

impl FromStr for RangeValue {
    type Err = ParseError;

    /// A bound that fails numeric parsing is treated as absent. A bare number
    /// constrains both sides to that value. Errors only when the token yields
    /// no bound at all.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::EmptyRange);
        }
        let (min, max) = match s.split_once("..") {
            Some((lo, hi)) => (lo.trim().parse::<f64>().ok(), hi.trim().parse::<f64>().ok()),
            None => {
                let exact = s.parse::<f64>().ok();
                (exact, exact)
            }
        };
        if min.is_none() && max.is_none() {
            return Err(ParseError::NoBounds(s.to_string()));
        }
        Ok(Self { min, max })
    }
}

/// The active constraint stored for one facet key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetValue {
    /// Selected option values of a multiselect facet. Never stored empty.
    Values(BTreeSet<String>),
    /// Bounds of a range facet. Never stored with both bounds absent.
    Range(RangeValue),
    /// An active boolean facet. Inactive booleans are not stored at all.
    Flag,
}

impl FacetValue {
    /// True when the value no longer constrains anything and must be dropped
    /// from the selection.
    fn is_noop(&self) -> bool {
        match self {
            FacetValue::Values(values) => values.is_empty(),
            FacetValue::Range(range) => range.is_unbounded(),
            FacetValue::Flag => false,
        }
    }
}

/// The complete set of active facet constraints, keyed by facet key.
///
/// A key is present only while it carries an active constraint. Mutations
/// return a new selection and drop keys whose constraint became a no-op, so
/// the previous state stays valid for comparison and undo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(BTreeMap<String, FacetValue>);

impl FilterSelection {
    /// The selection with no active constraints.
    pub fn empty() -> Self { Self::default() }

    pub fn get(&self, key: &str) -> Option<&FacetValue> { self.0.get(key) }

    pub fn contains(&self, key: &str) -> bool { self.0.contains_key(key) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FacetValue)> { self.0.iter() }

    /// Adds `value` to (or removes it from) the option set at `key`.
    #[must_use]
    pub fn set_value(&self, key: &str, value: &str, included: bool) -> Self {
        let mut values = match self.0.get(key) {
            Some(FacetValue::Values(values)) => values.clone(),
            _ => BTreeSet::new(),
        };
        if included {
            values.insert(value.to_string());
        } else {
            values.remove(value);
        }
        self.store(key, FacetValue::Values(values))
    }

    /// Stores the given bounds as provided; removes the key when both are
    /// absent. Bounds are not clamped against the schema here - transient
    /// out-of-range input is the caller's concern.
    #[must_use]
    pub fn set_range(&self, key: &str, min: Option<f64>, max: Option<f64>) -> Self {
        self.store(key, FacetValue::Range(RangeValue::new(min, max)))
    }

    /// Marks a boolean facet active, or removes it.
    #[must_use]
    pub fn set_boolean(&self, key: &str, active: bool) -> Self {
        let mut next = self.clone();
        if active {
            next.0.insert(key.to_string(), FacetValue::Flag);
        } else {
            next.0.remove(key);
        }
        next
    }

    /// Unconditionally removes the key.
    #[must_use]
    pub fn clear_facet(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.0.remove(key);
        next
    }

    /// Inserts the value, or removes the key when the value is a no-op.
    fn store(&self, key: &str, value: FacetValue) -> Self {
        let mut next = self.clone();
        if value.is_noop() {
            next.0.remove(key);
        } else {
            next.0.insert(key.to_string(), value);
        }
        next
    }

    /// Direct insertion for the codec, which builds values already normalized.
    pub(crate) fn insert_raw(&mut self, key: String, value: FacetValue) {
        if !value.is_noop() {
            self.0.insert(key, value);
        }
    }
}
