//! The merge engine.
//!
//! [`MergeEngine::merge`] reconciles an ordered list of [`StyleSource`]s into
//! one identifier plus the variable bindings the element needs inline.
//!
//! # Precedence
//!
//! Sources are given lowest precedence first. Each source's properties are
//! applied in order, later ones overwriting earlier ones per property name.
//! Callers put legacy/dynamic styling first and static declarations last, so
//! static declarations win when both set the same property. Overwriting is
//! by key presence: a later `0`, `""` or `unset` still replaces an earlier
//! value. Dynamic maps are not compiled, so NaN and infinite numbers in them
//! are dropped (with a warning) rather than rendered.
//!
//! # Registration discipline
//!
//! Every new registry entry costs the rendering runtime a rule insertion, so
//! the engine avoids them:
//!
//! 1. A single static source is returned as-is, without touching the
//!    registry's write path. This is by far the most common case.
//! 2. Any other combination is merged and registered by content, so a
//!    combination that recurs (on other elements or later renders) reuses
//!    the entry created the first time.
//! 3. Merges are memoized by their flattened inputs, so a repeated
//!    combination skips rebuilding the merged map altogether.
//!
//! # Example
//!
//! ```rust
//! use standout_cascade::{MergeEngine, PropertyMap, PropertyValue, StyleRegistry, StyleSource};
//!
//! let registry = StyleRegistry::new();
//! let card = registry.register(PropertyMap::new().with("padding", 12));
//! let engine = MergeEngine::new(&registry);
//!
//! let legacy = StyleSource::Dynamic(PropertyMap::new().with("padding", 4).with("color", "red"));
//! let result = engine.merge(&[legacy, StyleSource::Static(card)]).unwrap();
//!
//! let merged = registry.lookup(result.final_id.as_ref().unwrap()).unwrap();
//! assert_eq!(merged.properties().get("padding"), Some(&PropertyValue::Number(12.0)));
//! assert_eq!(merged.properties().get("color"), Some(&PropertyValue::from("red")));
//! ```

mod cache;

use std::collections::{BTreeSet, HashMap};

use log::{debug, trace, warn};

pub(crate) use cache::{MergeCache, MergeKeyPart};

use crate::registry::{Identifier, RegistryError, StyleRegistry};
use crate::style::{PropertyMap, VariableName};

/// One styling source handed to the merge engine.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSource {
    /// An entry already in the registry; its properties are looked up.
    Static(Identifier),
    /// Ad-hoc properties (legacy styling), not registered on their own.
    Dynamic(PropertyMap),
    /// Several sources, expanded in place in order.
    Compound(Vec<StyleSource>),
}

impl From<Identifier> for StyleSource {
    fn from(id: Identifier) -> Self {
        StyleSource::Static(id)
    }
}

impl From<&Identifier> for StyleSource {
    fn from(id: &Identifier) -> Self {
        StyleSource::Static(id.clone())
    }
}

impl From<PropertyMap> for StyleSource {
    fn from(map: PropertyMap) -> Self {
        StyleSource::Dynamic(map)
    }
}

impl From<Vec<StyleSource>> for StyleSource {
    fn from(sources: Vec<StyleSource>) -> Self {
        StyleSource::Compound(sources)
    }
}

/// A render-time value for a custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    pub name: VariableName,
    pub value: String,
}

/// Render-time values supplied by the caller, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableValues {
    values: HashMap<VariableName, String>,
}

impl VariableValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning the updated set for chaining.
    pub fn with(mut self, name: impl Into<VariableName>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<VariableName>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &VariableName) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Binds every referenced variable that has a value, in name order.
    fn bind(&self, refs: &BTreeSet<VariableName>) -> Vec<VariableBinding> {
        if self.values.is_empty() {
            return Vec::new();
        }
        refs.iter()
            .filter_map(|name| {
                self.get(name).map(|value| VariableBinding {
                    name: name.clone(),
                    value: value.to_string(),
                })
            })
            .collect()
    }
}

impl<K: Into<VariableName>, V: Into<String>> FromIterator<(K, V)> for VariableValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = VariableValues::new();
        for (name, value) in iter {
            values.set(name, value);
        }
        values
    }
}

/// The outcome of a merge: a class identifier and inline variable bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// `None` only when there was nothing to merge.
    pub final_id: Option<Identifier>,
    pub bindings: Vec<VariableBinding>,
}

impl MergeResult {
    /// The class name to render on the element.
    pub fn class_name(&self) -> Option<&str> {
        self.final_id.as_ref().map(Identifier::as_str)
    }

    /// Inline variable assignments, e.g. `--tint: red; --gap: 4px`.
    pub fn inline_style(&self) -> String {
        self.bindings
            .iter()
            .map(|binding| format!("{}: {}", binding.name, binding.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn is_empty(&self) -> bool {
        self.final_id.is_none() && self.bindings.is_empty()
    }
}

/// A flattened source, borrowed from the caller's input.
#[derive(Debug, Clone, Copy)]
enum Flat<'a> {
    Static(&'a Identifier),
    Dynamic(&'a PropertyMap),
}

fn flatten<'a>(sources: &'a [StyleSource], out: &mut Vec<Flat<'a>>) {
    for source in sources {
        match source {
            StyleSource::Static(id) => out.push(Flat::Static(id)),
            StyleSource::Dynamic(map) => out.push(Flat::Dynamic(map)),
            StyleSource::Compound(inner) => flatten(inner, out),
        }
    }
}

/// Applies an unchecked dynamic map, dropping numbers with no CSS form.
///
/// Compiled entries were validated by the compiler; legacy maps were not.
fn overlay_dynamic(merged: &mut PropertyMap, map: &PropertyMap) {
    for (name, value) in map.iter() {
        if value.is_finite() {
            merged.set(name, value.clone());
        } else {
            warn!("dropping non-finite value for '{}' from dynamic styles", name);
        }
    }
}

/// Merges style sources against a registry.
#[derive(Debug, Clone, Copy)]
pub struct MergeEngine<'r> {
    registry: &'r StyleRegistry,
}

impl<'r> MergeEngine<'r> {
    pub fn new(registry: &'r StyleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r StyleRegistry {
        self.registry
    }

    /// Merges sources without any render-time variable values.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if a static source names an
    /// identifier this registry never produced.
    pub fn merge(&self, sources: &[StyleSource]) -> Result<MergeResult, RegistryError> {
        self.merge_with(sources, &VariableValues::new())
    }

    /// Merges sources, binding referenced variables from `values`.
    ///
    /// Bindings come from the final entry only: a variable reference that a
    /// higher-precedence source overwrote is not bound. Referenced variables
    /// without a value are left unbound for the renderer's fallback.
    pub fn merge_with(
        &self,
        sources: &[StyleSource],
        values: &VariableValues,
    ) -> Result<MergeResult, RegistryError> {
        let mut flat = Vec::with_capacity(sources.len());
        flatten(sources, &mut flat);

        let entry = match flat.as_slice() {
            [] => return Ok(MergeResult::default()),
            [Flat::Static(id)] => {
                trace!("single static source {}, no merge needed", id);
                self.registry.lookup(id)?
            }
            _ => {
                let id = self.merge_flat(&flat)?;
                self.registry.lookup(&id)?
            }
        };

        Ok(MergeResult {
            final_id: Some(entry.id().clone()),
            bindings: values.bind(entry.variable_refs()),
        })
    }

    fn merge_flat(&self, flat: &[Flat<'_>]) -> Result<Identifier, RegistryError> {
        let key: Vec<MergeKeyPart> = flat
            .iter()
            .map(|source| match source {
                Flat::Static(id) => MergeKeyPart::Static((*id).clone()),
                Flat::Dynamic(map) => MergeKeyPart::Dynamic(map.canonical()),
            })
            .collect();

        if let Some(id) = self.registry.merges.get(&key) {
            trace!("merge memo hit for {} sources -> {}", flat.len(), id);
            return Ok(id);
        }

        let mut merged = PropertyMap::new();
        for source in flat {
            match source {
                Flat::Static(id) => merged.overlay(self.registry.lookup(id)?.properties()),
                Flat::Dynamic(map) => overlay_dynamic(&mut merged, map),
            }
        }

        let id = self.registry.register(merged);
        debug!("merged {} sources into {}", flat.len(), id);
        self.registry.merges.insert(key, id.clone());
        Ok(id)
    }
}
