//! Property values and custom property names.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::names::is_unitless;

/// Name of a CSS custom property.
///
/// The leading `--` is optional on input and always present once stored, so
/// `VariableName::new("accent")` and `VariableName::new("--accent")` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VariableName(String);

impl VariableName {
    /// Creates a variable name, adding the `--` prefix if missing.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        if name.starts_with("--") {
            Self(name.to_string())
        } else {
            Self(format!("--{}", name))
        }
    }

    /// Returns the name including its `--` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `var(...)` expression that reads this variable.
    pub fn reference(&self) -> String {
        format!("var({})", self.0)
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for VariableName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for VariableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<VariableName> for String {
    fn from(name: VariableName) -> Self {
        name.0
    }
}

/// A single property value.
///
/// Numbers keep their numeric form until they are rendered, at which point
/// the property name decides whether a `px` unit is appended.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Literal CSS text, passed through as written.
    Text(String),
    /// A number; rendered with `px` unless the property is unitless or the
    /// number is zero.
    Number(f64),
    /// A reference to a custom property resolved at render time.
    Var(VariableName),
    /// Explicit `unset`. Overwrites lower-precedence values like any other
    /// value.
    Unset,
}

impl PropertyValue {
    /// Renders the value as CSS text for the given (CSS-spelled) property.
    pub fn css_text(&self, css_name: &str) -> Cow<'_, str> {
        match self {
            PropertyValue::Text(text) => Cow::Borrowed(text.as_str()),
            PropertyValue::Number(n) if *n == 0.0 => Cow::Borrowed("0"),
            PropertyValue::Number(n) if is_unitless(css_name) => Cow::Owned(n.to_string()),
            PropertyValue::Number(n) => Cow::Owned(format!("{}px", n)),
            PropertyValue::Var(name) => Cow::Owned(name.reference()),
            PropertyValue::Unset => Cow::Borrowed("unset"),
        }
    }

    /// Returns the referenced variable, if this value is a variable reference.
    pub fn variable(&self) -> Option<&VariableName> {
        match self {
            PropertyValue::Var(name) => Some(name),
            _ => None,
        }
    }

    /// False only for NaN and infinite numbers, which have no CSS form.
    pub fn is_finite(&self) -> bool {
        match self {
            PropertyValue::Number(n) => n.is_finite(),
            _ => true,
        }
    }
}

/// Yields the custom property named by every `var(--name ...)` in CSS text.
///
/// Literal text and [`PropertyValue::Var`] render the same way, so this is
/// the single source of variable references for a property set.
pub(crate) fn referenced_variables(text: &str) -> impl Iterator<Item = VariableName> + '_ {
    text.match_indices("var(").filter_map(move |(start, _)| {
        let standalone = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_name_char(c));
        if !standalone {
            return None;
        }
        let name = text[start + 4..].trim_start().strip_prefix("--")?;
        let len = name.find(|c: char| !is_name_char(c)).unwrap_or(name.len());
        (len > 0).then(|| VariableName::new(&name[..len]))
    })
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        PropertyValue::Text(text.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        PropertyValue::Text(text)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<f32> for PropertyValue {
    fn from(n: f32) -> Self {
        PropertyValue::Number(f64::from(n))
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        PropertyValue::Number(f64::from(n))
    }
}

impl From<u32> for PropertyValue {
    fn from(n: u32) -> Self {
        PropertyValue::Number(f64::from(n))
    }
}

impl From<VariableName> for PropertyValue {
    fn from(name: VariableName) -> Self {
        PropertyValue::Var(name)
    }
}

impl From<&VariableName> for PropertyValue {
    fn from(name: &VariableName) -> Self {
        PropertyValue::Var(name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_name_adds_prefix() {
        assert_eq!(VariableName::new("accent").as_str(), "--accent");
        assert_eq!(VariableName::new("--accent"), VariableName::new("accent"));
    }

    #[test]
    fn test_variable_name_reference() {
        assert_eq!(VariableName::new("tint").reference(), "var(--tint)");
    }

    #[test]
    fn test_referenced_variables_in_text() {
        let found: Vec<_> = referenced_variables("calc(var(--gap) + var(--pad, 2px))").collect();
        assert_eq!(found, vec![VariableName::new("gap"), VariableName::new("pad")]);

        let var = PropertyValue::from(VariableName::new("tint"));
        let found: Vec<_> = referenced_variables(&var.css_text("color")).collect();
        assert_eq!(found, vec![VariableName::new("tint")]);
    }

    #[test]
    fn test_referenced_variables_ignores_lookalikes() {
        assert_eq!(referenced_variables("envvar(--x)").count(), 0);
        assert_eq!(referenced_variables("var(x)").count(), 0);
        assert_eq!(referenced_variables("var(--)").count(), 0);
        assert_eq!(referenced_variables("red").count(), 0);
    }

    #[test]
    fn test_is_finite() {
        assert!(PropertyValue::from(4).is_finite());
        assert!(PropertyValue::from("red").is_finite());
        assert!(!PropertyValue::Number(f64::NAN).is_finite());
        assert!(!PropertyValue::Number(f64::INFINITY).is_finite());
    }

    #[test]
    fn test_number_gets_px() {
        let value = PropertyValue::from(12);
        assert_eq!(value.css_text("padding"), "12px");
    }

    #[test]
    fn test_fractional_number() {
        assert_eq!(PropertyValue::from(0.5).css_text("margin"), "0.5px");
        assert_eq!(PropertyValue::from(0.5).css_text("opacity"), "0.5");
    }

    #[test]
    fn test_zero_has_no_unit() {
        assert_eq!(PropertyValue::from(0).css_text("padding"), "0");
        assert_eq!(PropertyValue::from(-0.0).css_text("padding"), "0");
    }

    #[test]
    fn test_unitless_number() {
        assert_eq!(PropertyValue::from(10).css_text("z-index"), "10");
        assert_eq!(PropertyValue::from(2).css_text("--columns"), "2");
    }

    #[test]
    fn test_text_passes_through() {
        assert_eq!(PropertyValue::from("1rem").css_text("padding"), "1rem");
        assert_eq!(PropertyValue::from("").css_text("padding"), "");
    }

    #[test]
    fn test_var_and_unset() {
        let var = PropertyValue::from(VariableName::new("tint"));
        assert_eq!(var.css_text("color"), "var(--tint)");
        assert_eq!(var.variable(), Some(&VariableName::new("tint")));
        assert_eq!(PropertyValue::Unset.css_text("color"), "unset");
        assert_eq!(PropertyValue::Unset.variable(), None);
    }
}
