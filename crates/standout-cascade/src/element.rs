//! Per-element entry point for the rendering layer.
//!
//! [`CsProp`] is what a renderer calls once per element. It takes the
//! element's own style identifiers and any legacy properties attached to it
//! from outside, and returns the class name and inline variable bindings to
//! render.
//!
//! Legacy properties always have the lowest precedence; the element's own
//! identifiers follow in declaration order, so later identifiers win.
//!
//! ```rust
//! use standout_cascade::{CompileOptions, CsProp, Declaration, StyleCompiler, StyleRegistry};
//!
//! let registry = StyleRegistry::new();
//! let compiler = StyleCompiler::new(&registry);
//! let options = CompileOptions::default();
//! let styles1 = compiler.compile(&Declaration::new().set("padding", 4), &options).unwrap();
//! let styles2 = compiler.compile(&Declaration::new().set("padding", 12), &options).unwrap();
//!
//! let cs = CsProp::new(&registry);
//! let own = cs.resolve_for_element(&[styles1.clone()], None).unwrap();
//! assert_eq!(own.final_id, Some(styles1.clone()));
//!
//! let merged = cs.resolve_for_element(&[styles1, styles2], None).unwrap();
//! let entry = registry.lookup(merged.final_id.as_ref().unwrap()).unwrap();
//! assert_eq!(entry.properties().to_css(), "padding:12px;");
//! ```

use crate::merge::{MergeEngine, MergeResult, StyleSource, VariableValues};
use crate::registry::{Identifier, RegistryError, StyleRegistry};
use crate::style::PropertyMap;

/// Resolves the styles of individual rendered elements.
#[derive(Debug, Clone, Copy)]
pub struct CsProp<'r> {
    engine: MergeEngine<'r>,
}

impl<'r> CsProp<'r> {
    pub fn new(registry: &'r StyleRegistry) -> Self {
        Self {
            engine: MergeEngine::new(registry),
        }
    }

    /// An adapter over the process-wide registry.
    pub fn global() -> CsProp<'static> {
        CsProp::new(StyleRegistry::global())
    }

    /// Resolves an element's styles without render-time variable values.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if an identifier was not produced
    /// by this adapter's registry.
    pub fn resolve_for_element(
        &self,
        own: &[Identifier],
        ambient_legacy: Option<&PropertyMap>,
    ) -> Result<MergeResult, RegistryError> {
        self.resolve_for_element_with(own, ambient_legacy, &VariableValues::new())
    }

    /// Resolves an element's styles, binding referenced variables from
    /// `values`.
    ///
    /// An empty legacy map contributes nothing and is skipped, so an element
    /// with one identifier keeps that identifier.
    pub fn resolve_for_element_with(
        &self,
        own: &[Identifier],
        ambient_legacy: Option<&PropertyMap>,
        values: &VariableValues,
    ) -> Result<MergeResult, RegistryError> {
        let mut sources = Vec::with_capacity(own.len() + 1);
        if let Some(legacy) = ambient_legacy.filter(|map| !map.is_empty()) {
            sources.push(StyleSource::Dynamic(legacy.clone()));
        }
        sources.extend(own.iter().map(StyleSource::from));
        self.engine.merge_with(&sources, values)
    }
}
