//! Modifier tables and variant resolution.
//!
//! A [`ModifierTable`] groups style contributions by modifier dimension
//! (`size`, `tone`, ...) and variant key (`small`, `large`, ...). Resolving a
//! table against a [`VariantSelection`] picks at most one variant per
//! dimension.
//!
//! # Missing selections
//!
//! A dimension with no selection, or with a selected key the table does not
//! know, contributes nothing. This is not an error: variants are optional.
//!
//! # Order
//!
//! Output follows the order dimensions were declared in the table, not the
//! order of the selection. When the output is merged, later dimensions win
//! over earlier ones for properties they both set.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::merge::StyleSource;
use crate::registry::Identifier;
use crate::style::PropertyMap;

/// A single variant's styles.
#[derive(Debug, Clone, PartialEq)]
pub enum Contribution {
    /// A compiled registry entry.
    Style(Identifier),
    /// Raw properties, merged without prior registration.
    Properties(PropertyMap),
}

impl From<Identifier> for Contribution {
    fn from(id: Identifier) -> Self {
        Contribution::Style(id)
    }
}

impl From<PropertyMap> for Contribution {
    fn from(map: PropertyMap) -> Self {
        Contribution::Properties(map)
    }
}

impl From<Contribution> for StyleSource {
    fn from(contribution: Contribution) -> Self {
        match contribution {
            Contribution::Style(id) => StyleSource::Static(id),
            Contribution::Properties(map) => StyleSource::Dynamic(map),
        }
    }
}

/// The variant chosen for each modifier dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelection {
    selected: HashMap<String, String>,
}

impl VariantSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a variant, returning the updated selection for chaining.
    pub fn select(mut self, modifier: &str, key: &str) -> Self {
        self.set(modifier, key);
        self
    }

    pub fn set(&mut self, modifier: &str, key: &str) {
        self.selected.insert(modifier.to_string(), key.to_string());
    }

    pub fn get(&self, modifier: &str) -> Option<&str> {
        self.selected.get(modifier).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariantSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            selected: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Style contributions keyed by `(modifier, variant)`.
///
/// ```rust
/// use standout_cascade::{Contribution, ModifierTable, PropertyMap, VariantSelection};
///
/// let table = ModifierTable::new()
///     .variant("size", "small", PropertyMap::new().with("padding", 2))
///     .variant("size", "large", PropertyMap::new().with("padding", 8))
///     .variant("tone", "muted", PropertyMap::new().with("color", "gray"));
///
/// let picked = table.resolve(&VariantSelection::new().select("size", "large").select("tone", "loud"));
/// assert_eq!(picked, vec![Contribution::Properties(PropertyMap::new().with("padding", 8))]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierTable {
    dimensions: IndexMap<String, IndexMap<String, Contribution>>,
}

impl ModifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variant, returning the updated table for chaining.
    pub fn variant(
        mut self,
        modifier: &str,
        key: &str,
        contribution: impl Into<Contribution>,
    ) -> Self {
        self.insert(modifier, key, contribution);
        self
    }

    /// Adds a variant, replacing an earlier one with the same key.
    pub fn insert(&mut self, modifier: &str, key: &str, contribution: impl Into<Contribution>) {
        self.dimensions
            .entry(modifier.to_string())
            .or_default()
            .insert(key.to_string(), contribution.into());
    }

    pub fn get(&self, modifier: &str, key: &str) -> Option<&Contribution> {
        self.dimensions.get(modifier)?.get(key)
    }

    /// Modifier dimensions in declaration order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.dimensions.keys().map(String::as_str)
    }

    /// Variant keys of a dimension in declaration order.
    pub fn variants(&self, modifier: &str) -> impl Iterator<Item = &str> {
        self.dimensions
            .get(modifier)
            .into_iter()
            .flat_map(|variants| variants.keys().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Resolves the selected variants, one per dimension at most, in
    /// dimension declaration order.
    pub fn resolve(&self, selection: &VariantSelection) -> Vec<Contribution> {
        self.dimensions
            .iter()
            .filter_map(|(modifier, variants)| {
                let key = selection.get(modifier)?;
                variants.get(key).cloned()
            })
            .collect()
    }

    /// Resolves the selection into merge sources, lowest precedence first.
    pub fn sources(&self, selection: &VariantSelection) -> Vec<StyleSource> {
        self.resolve(selection)
            .into_iter()
            .map(StyleSource::from)
            .collect()
    }
}
