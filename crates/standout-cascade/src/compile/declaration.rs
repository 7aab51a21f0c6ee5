//! Author-facing style declarations.

use indexmap::IndexMap;

use crate::style::{css_property_name, PropertyMap, PropertyValue, VariableName};

/// A declared property value.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclValue {
    /// A value known when the declaration is compiled.
    Static(PropertyValue),
    /// A value only known at render time, identified by an author key.
    ///
    /// Compiles to a variable reference when variable extraction is on and
    /// is rejected otherwise.
    Dynamic(String),
}

macro_rules! static_decl_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for DeclValue {
                fn from(value: $ty) -> Self {
                    DeclValue::Static(PropertyValue::from(value))
                }
            }
        )*
    };
}

static_decl_from!(&str, String, f64, f32, i32, u32, VariableName, &VariableName);

impl From<PropertyValue> for DeclValue {
    fn from(value: PropertyValue) -> Self {
        DeclValue::Static(value)
    }
}

/// An ordered style declaration, the input of the static compiler.
///
/// ```rust
/// use standout_cascade::Declaration;
///
/// let decl = Declaration::new()
///     .set("padding", 4)
///     .dynamic("backgroundColor", "tint");
/// assert_eq!(decl.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declaration {
    entries: IndexMap<String, DeclValue>,
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a property, replacing any earlier value for it.
    pub fn set(mut self, name: &str, value: impl Into<DeclValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Declares a property whose value is supplied at render time.
    pub fn dynamic(mut self, name: &str, key: &str) -> Self {
        self.insert(name, DeclValue::Dynamic(key.to_string()));
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<DeclValue>) {
        self.entries
            .insert(css_property_name(name).into_owned(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeclValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl From<PropertyMap> for Declaration {
    fn from(map: PropertyMap) -> Self {
        let mut decl = Declaration::new();
        for (name, value) in map.iter() {
            decl.insert(name, value.clone());
        }
        decl
    }
}

/// Variant declarations grouped by modifier dimension, in declaration order.
///
/// ```rust
/// use standout_cascade::{Declaration, ModifierDeclaration};
///
/// let decl = ModifierDeclaration::new()
///     .variant("size", "small", Declaration::new().set("padding", 2))
///     .variant("size", "large", Declaration::new().set("padding", 8));
/// assert_eq!(decl.dimensions().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierDeclaration {
    dimensions: IndexMap<String, IndexMap<String, Declaration>>,
}

impl ModifierDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the styles of one variant of a modifier dimension.
    pub fn variant(mut self, modifier: &str, key: &str, declaration: Declaration) -> Self {
        self.dimensions
            .entry(modifier.to_string())
            .or_default()
            .insert(key.to_string(), declaration);
        self
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.dimensions.keys().map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Declaration>)> {
        self.dimensions
            .iter()
            .map(|(name, variants)| (name.as_str(), variants))
    }
}
