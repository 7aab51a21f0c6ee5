//! Registry entries and their identifiers.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::style::{referenced_variables, PropertyMap, VariableName};

/// Opaque, content-derived token naming a registry entry.
///
/// Rendered as a class name. Cloning is cheap (`Arc<str>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Arc<str>);

impl Identifier {
    /// Only the registry mints identifiers.
    pub(crate) fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}


/// An immutable set of resolved properties stored in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    id: Identifier,
    properties: PropertyMap,
    variable_refs: BTreeSet<VariableName>,
    pub(crate) canonical: Vec<(String, String)>,
}

impl RegistryEntry {
    pub(crate) fn new(
        id: Identifier,
        properties: PropertyMap,
        canonical: Vec<(String, String)>,
    ) -> Self {
        // Derived from the canonical text so equal content always carries
        // equal references, whichever source registered it first.
        let variable_refs = canonical
            .iter()
            .flat_map(|(_, value)| referenced_variables(value))
            .collect();
        Self {
            id,
            properties,
            variable_refs,
            canonical,
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Custom properties this entry reads, sorted by name.
    pub fn variable_refs(&self) -> &BTreeSet<VariableName> {
        &self.variable_refs
    }

    /// Renders the entry as a single class rule: `.id{name:value;...}`.
    pub fn css_rule(&self) -> String {
        format!(".{}{{{}}}", self.id, self.properties.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_identifier_borrows_as_str() {
        let mut map = HashMap::new();
        map.insert(Identifier::new("sc-abc"), 1);
        assert_eq!(map.get("sc-abc"), Some(&1));
    }

    #[test]
    fn test_entry_collects_variable_refs() {
        let props = PropertyMap::new()
            .with("color", VariableName::new("tint"))
            .with("padding", 4);
        let canonical = props.canonical();
        let entry = RegistryEntry::new(Identifier::new("sc-x"), props, canonical);
        assert_eq!(entry.variable_refs().len(), 1);
        assert!(entry.variable_refs().contains(&VariableName::new("tint")));
    }

    #[test]
    fn test_entry_refs_from_literal_text() {
        let props = PropertyMap::new().with("color", "var(--tint)");
        let canonical = props.canonical();
        let entry = RegistryEntry::new(Identifier::new("sc-x"), props, canonical);
        assert!(entry.variable_refs().contains(&VariableName::new("tint")));
    }

    #[test]
    fn test_css_rule() {
        let props = PropertyMap::new().with("padding", 12);
        let canonical = props.canonical();
        let entry = RegistryEntry::new(Identifier::new("sc-x"), props, canonical);
        assert_eq!(entry.css_rule(), ".sc-x{padding:12px;}");
    }
}
