//! Static style compilation.
//!
//! [`StyleCompiler`] turns a [`Declaration`] into a registry entry and returns
//! its [`Identifier`]. Compilation happens once per declaration, typically at
//! module initialization, so the registry is populated before any render.
//!
//! # Render-time values
//!
//! A value declared with [`Declaration::dynamic`] is not known when the
//! declaration is compiled. With [`CompileOptions::extract_variables`] set,
//! the property compiles to `var(--<key>)` and the entry records the variable
//! in its [`RegistryEntry::variable_refs`](crate::RegistryEntry::variable_refs);
//! the value is bound per element at render time. Without it, compilation
//! fails with [`StyleError::InvalidDeclaration`] and nothing is registered.
//!
//! ```rust
//! use standout_cascade::{CompileOptions, Declaration, StyleCompiler, StyleRegistry, VariableName};
//!
//! let registry = StyleRegistry::new();
//! let compiler = StyleCompiler::new(&registry);
//!
//! let decl = Declaration::new().dynamic("backgroundColor", "tint");
//! assert!(compiler.compile(&decl, &CompileOptions::default()).is_err());
//!
//! let id = compiler
//!     .compile(&decl, &CompileOptions::default().extract_variables(true))
//!     .unwrap();
//! let entry = registry.lookup(&id).unwrap();
//! assert!(entry.variable_refs().contains(&VariableName::new("tint")));
//! ```

mod declaration;

use log::debug;

pub use declaration::{DeclValue, Declaration, ModifierDeclaration};

use crate::modifier::ModifierTable;
use crate::registry::{Identifier, StyleRegistry};
use crate::style::{kebab_case, PropertyMap, PropertyValue, StyleError, VariableName};

/// Options controlling how a declaration compiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Compile render-time values to variable references instead of failing.
    pub extract_variables: bool,
    /// Inserted into extracted variable names: `--<prefix>-<key>`.
    pub variable_prefix: Option<String>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract_variables(mut self, extract: bool) -> Self {
        self.extract_variables = extract;
        self
    }

    pub fn variable_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.variable_prefix = Some(prefix.into());
        self
    }

    /// Returns the variable name a render-time key extracts to.
    pub fn variable_name(&self, key: &str) -> VariableName {
        match &self.variable_prefix {
            Some(prefix) => VariableName::new(format!("{}-{}", kebab_case(prefix), kebab_case(key))),
            None => VariableName::new(kebab_case(key)),
        }
    }
}

/// Compiles declarations into a registry.
#[derive(Debug, Clone, Copy)]
pub struct StyleCompiler<'r> {
    registry: &'r StyleRegistry,
}

impl<'r> StyleCompiler<'r> {
    pub fn new(registry: &'r StyleRegistry) -> Self {
        Self { registry }
    }

    /// A compiler over the process-wide registry.
    pub fn global() -> StyleCompiler<'static> {
        StyleCompiler::new(StyleRegistry::global())
    }

    /// Default options taken from the registry's configuration.
    pub fn default_options(&self) -> CompileOptions {
        self.registry.config().compile_options()
    }

    /// Compiles a declaration and returns the identifier of its entry.
    ///
    /// Identical declarations (after last-write-wins resolution) compile to
    /// the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidDeclaration`] if a property name is empty,
    /// a number is not finite, or a render-time value appears while variable
    /// extraction is off. Nothing is registered in that case.
    pub fn compile(
        &self,
        declaration: &Declaration,
        options: &CompileOptions,
    ) -> Result<Identifier, StyleError> {
        let properties = resolve_declaration(declaration, options)?;
        let id = self.registry.register(properties);
        debug!("compiled declaration into {}", id);
        Ok(id)
    }

    /// Compiles every variant of a modifier declaration.
    ///
    /// Dimension and variant order are preserved. The whole table fails if
    /// any variant fails.
    pub fn compile_modifiers(
        &self,
        declaration: &ModifierDeclaration,
        options: &CompileOptions,
    ) -> Result<ModifierTable, StyleError> {
        let mut table = ModifierTable::new();
        for (modifier, variants) in declaration.iter() {
            for (key, variant) in variants {
                let id = self.compile(variant, options)?;
                table.insert(modifier, key, id);
            }
        }
        Ok(table)
    }
}

fn resolve_declaration(
    declaration: &Declaration,
    options: &CompileOptions,
) -> Result<PropertyMap, StyleError> {
    let mut properties = PropertyMap::new();
    for (name, value) in declaration.iter() {
        if name.is_empty() {
            return Err(invalid(name, "property name is empty"));
        }
        let resolved = match value {
            DeclValue::Static(PropertyValue::Number(n)) if !n.is_finite() => {
                return Err(invalid(name, &format!("{} is not a finite number", n)));
            }
            DeclValue::Static(value) => value.clone(),
            DeclValue::Dynamic(key) if options.extract_variables => {
                PropertyValue::Var(options.variable_name(key))
            }
            DeclValue::Dynamic(key) => {
                return Err(invalid(
                    name,
                    &format!(
                        "value '{}' is only known at render time and variable extraction is off",
                        key
                    ),
                ));
            }
        };
        properties.set(name, resolved);
    }
    Ok(properties)
}

fn invalid(property: &str, reason: &str) -> StyleError {
    StyleError::InvalidDeclaration {
        property: property.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{Contribution, VariantSelection};

    #[test]
    fn test_compile_static_declaration() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let id = compiler
            .compile(&Declaration::new().set("padding", 4), &CompileOptions::new())
            .unwrap();

        let entry = registry.lookup(&id).unwrap();
        assert_eq!(entry.properties().to_css(), "padding:4px;");
        assert!(entry.variable_refs().is_empty());
    }

    #[test]
    fn test_identical_declarations_share_identifier() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let options = CompileOptions::new();
        let a = compiler
            .compile(&Declaration::new().set("padding", 4).set("color", "red"), &options)
            .unwrap();
        let b = compiler
            .compile(&Declaration::new().set("color", "red").set("padding", 4), &options)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dynamic_without_extraction_fails() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let decl = Declaration::new().set("padding", 4).dynamic("color", "tint");

        let err = compiler.compile(&decl, &CompileOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            StyleError::InvalidDeclaration { ref property, .. } if property == "color"
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dynamic_with_extraction_references_variable() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let decl = Declaration::new().dynamic("backgroundColor", "accentColor");
        let options = CompileOptions::new().extract_variables(true);

        let id = compiler.compile(&decl, &options).unwrap();
        let entry = registry.lookup(&id).unwrap();
        assert_eq!(
            entry.properties().to_css(),
            "background-color:var(--accent-color);"
        );
        let refs: Vec<_> = entry.variable_refs().iter().cloned().collect();
        assert_eq!(refs, vec![VariableName::new("accent-color")]);
    }

    #[test]
    fn test_variable_prefix() {
        let options = CompileOptions::new().variable_prefix("card");
        assert_eq!(options.variable_name("tint").as_str(), "--card-tint");
        assert_eq!(CompileOptions::new().variable_name("tint").as_str(), "--tint");
    }

    #[test]
    fn test_non_finite_number_fails() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let decl = Declaration::new().set("width", f64::NAN);
        assert!(compiler.compile(&decl, &CompileOptions::new()).is_err());
    }

    #[test]
    fn test_empty_property_name_fails() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let decl = Declaration::new().set("  ", "red");
        assert!(compiler.compile(&decl, &CompileOptions::new()).is_err());
    }

    #[test]
    fn test_unknown_property_passes_through() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let id = compiler
            .compile(
                &Declaration::new().set("made-up-thing", "yes"),
                &CompileOptions::new(),
            )
            .unwrap();
        assert_eq!(
            registry.lookup(&id).unwrap().properties().to_css(),
            "made-up-thing:yes;"
        );
    }

    #[test]
    fn test_default_options_follow_registry_config() {
        let registry = StyleRegistry::with_config(crate::CascadeConfig {
            extract_variables: true,
            ..crate::CascadeConfig::default()
        });
        let compiler = StyleCompiler::new(&registry);
        let options = compiler.default_options();
        assert!(compiler
            .compile(&Declaration::new().dynamic("color", "tint"), &options)
            .is_ok());
    }

    #[test]
    fn test_compile_modifiers() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let decl = ModifierDeclaration::new()
            .variant("size", "small", Declaration::new().set("padding", 2))
            .variant("size", "large", Declaration::new().set("padding", 8));

        let table = compiler
            .compile_modifiers(&decl, &CompileOptions::new())
            .unwrap();
        let resolved = table.resolve(&VariantSelection::new().select("size", "large"));
        assert_eq!(resolved.len(), 1);
        let Contribution::Style(id) = &resolved[0] else {
            panic!("expected a compiled style");
        };
        assert_eq!(
            registry.lookup(id).unwrap().properties().to_css(),
            "padding:8px;"
        );
    }

    #[test]
    fn test_compile_modifiers_fails_on_bad_variant() {
        let registry = StyleRegistry::new();
        let compiler = StyleCompiler::new(&registry);
        let decl = ModifierDeclaration::new().variant(
            "tone",
            "live",
            Declaration::new().dynamic("color", "tint"),
        );
        assert!(compiler
            .compile_modifiers(&decl, &CompileOptions::new())
            .is_err());
    }
}
