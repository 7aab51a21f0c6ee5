//! Ordered property maps with last-write-wins semantics.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::names::css_property_name;
use super::value::{referenced_variables, PropertyValue, VariableName};

/// An ordered mapping from CSS property name to value.
///
/// Names are normalized to their CSS spelling on insertion. Setting a
/// property that is already present replaces its value: the last write wins,
/// by key presence, regardless of what the new value is.
///
/// # Example
///
/// ```rust
/// use standout_cascade::{PropertyMap, PropertyValue};
///
/// let map = PropertyMap::new()
///     .with("padding", 4)
///     .with("backgroundColor", "white")
///     .with("padding", 12);
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get("padding"), Some(&PropertyValue::Number(12.0)));
/// assert_eq!(map.get("background-color"), Some(&PropertyValue::from("white")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning the updated map for chaining.
    pub fn with(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a property, returning the value it replaced.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.entries
            .insert(css_property_name(name).into_owned(), value.into())
    }

    /// Gets a property by author or CSS spelling.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.get(css_property_name(name).as_ref())
    }

    /// Returns true if the property is set, whatever its value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(css_property_name(name).as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(css-name, value)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Applies every property of `other` on top of this map.
    pub fn overlay(&mut self, other: &PropertyMap) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    /// Returns the custom properties referenced by values in this map.
    ///
    /// Both [`PropertyValue::Var`] values and `var(--name)` written inside
    /// literal text count.
    pub fn variable_refs(&self) -> BTreeSet<VariableName> {
        let mut refs = BTreeSet::new();
        for (name, value) in &self.entries {
            refs.extend(referenced_variables(&value.css_text(name)));
        }
        refs
    }

    /// Returns the resolved `(css-name, css-value)` pairs sorted by name.
    ///
    /// Two maps with the same canonical form render identical CSS.
    pub fn canonical(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|(name, value)| (name.clone(), value.css_text(name).into_owned()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Renders the map as a CSS declaration block body (`name:value;...`).
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (name, value) in &self.entries {
            css.push_str(name);
            css.push(':');
            css.push_str(&value.css_text(name));
            css.push(';');
        }
        css
    }
}

impl<K: AsRef<str>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (name, value) in iter {
            map.set(name.as_ref(), value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_value() {
        let mut map = PropertyMap::new();
        assert_eq!(map.set("padding", 4), None);
        assert_eq!(map.set("padding", 12), Some(PropertyValue::Number(4.0)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("padding"), Some(&PropertyValue::Number(12.0)));
    }

    #[test]
    fn test_camel_and_kebab_are_one_property() {
        let map = PropertyMap::new()
            .with("background-color", "red")
            .with("backgroundColor", "blue");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("background-color"), Some(&PropertyValue::from("blue")));
    }

    #[test]
    fn test_contains_by_presence() {
        let map = PropertyMap::new().with("margin", "").with("color", PropertyValue::Unset);
        assert!(map.contains("margin"));
        assert!(map.contains("color"));
        assert!(!map.contains("padding"));
    }

    #[test]
    fn test_overlay_is_per_property() {
        let mut base = PropertyMap::new().with("padding", 4).with("color", "red");
        let top = PropertyMap::new().with("padding", 12);
        base.overlay(&top);

        assert_eq!(base.get("padding"), Some(&PropertyValue::Number(12.0)));
        assert_eq!(base.get("color"), Some(&PropertyValue::from("red")));
    }

    #[test]
    fn test_overlay_with_empty_value_overwrites() {
        let mut base = PropertyMap::new().with("padding", 4);
        base.overlay(&PropertyMap::new().with("padding", 0));
        assert_eq!(base.get("padding"), Some(&PropertyValue::Number(0.0)));

        let mut base = PropertyMap::new().with("color", "red");
        base.overlay(&PropertyMap::new().with("color", PropertyValue::Unset));
        assert_eq!(base.get("color"), Some(&PropertyValue::Unset));
    }

    #[test]
    fn test_canonical_is_order_independent() {
        let a = PropertyMap::new().with("padding", 4).with("color", "red");
        let b = PropertyMap::new().with("color", "red").with("padding", 4);
        assert_eq!(a.canonical(), b.canonical());
        assert_eq!(
            a.canonical(),
            vec![
                ("color".to_string(), "red".to_string()),
                ("padding".to_string(), "4px".to_string()),
            ]
        );
    }

    #[test]
    fn test_variable_refs() {
        let map = PropertyMap::new()
            .with("color", VariableName::new("tint"))
            .with("background", VariableName::new("bg"))
            .with("padding", 4);
        let refs: Vec<_> = map.variable_refs().into_iter().collect();
        assert_eq!(refs, vec![VariableName::new("bg"), VariableName::new("tint")]);
    }

    #[test]
    fn test_variable_refs_in_literal_text() {
        let map = PropertyMap::new()
            .with("width", "calc(var(--gap) * 2)")
            .with("color", "var( --tint, red)")
            .with("border", VariableName::new("edge"));
        let refs: Vec<_> = map.variable_refs().into_iter().collect();
        assert_eq!(
            refs,
            vec![
                VariableName::new("edge"),
                VariableName::new("gap"),
                VariableName::new("tint"),
            ]
        );
    }

    #[test]
    fn test_to_css() {
        let map = PropertyMap::new().with("padding", 4).with("zIndex", 2);
        assert_eq!(map.to_css(), "padding:4px;z-index:2;");
    }

    #[test]
    fn test_from_iterator() {
        let map: PropertyMap = vec![("padding", 4), ("margin", 8)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("margin"), Some(&PropertyValue::Number(8.0)));
    }
}
