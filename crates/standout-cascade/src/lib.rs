//! # Standout Cascade - content-addressed style merging
//!
//! Standout Cascade reconciles the styling sources attached to one rendered
//! element into a single class identifier, while keeping the shared rule
//! registry as small as possible.
//!
//! ## Overview
//!
//! 1. **Compile** static declarations once with [`StyleCompiler`]; each gets a
//!    content-derived [`Identifier`] in the [`StyleRegistry`].
//! 2. **Resolve** each element with [`CsProp`]: its own identifiers plus any
//!    legacy properties become one identifier and a few inline
//!    [`VariableBinding`]s.
//! 3. **Inject** new rules into the live stylesheet with [`Injector`], once per
//!    identifier.
//!
//! ```rust
//! use standout_cascade::{
//!     CompileOptions, CsProp, Declaration, Injector, PropertyMap, StyleCompiler,
//!     StyleRegistry, VariableValues,
//! };
//!
//! let registry = StyleRegistry::new();
//! let compiler = StyleCompiler::new(&registry);
//! let options = CompileOptions::new().extract_variables(true);
//!
//! let card = compiler
//!     .compile(&Declaration::new().set("padding", 12).dynamic("color", "tint"), &options)
//!     .unwrap();
//!
//! let legacy = PropertyMap::new().with("padding", 4).with("margin", 8);
//! let values = VariableValues::new().with("tint", "teal");
//! let result = CsProp::new(&registry)
//!     .resolve_for_element_with(&[card], Some(&legacy), &values)
//!     .unwrap();
//!
//! assert!(result.class_name().unwrap().starts_with("sc-"));
//! assert_eq!(result.inline_style(), "--tint: teal");
//!
//! let mut rules: Vec<String> = Vec::new();
//! let injector = Injector::new();
//! injector.inject_result(&registry, &result, &mut rules).unwrap();
//! assert!(rules[0].contains("padding:12px;margin:8px;color:var(--tint);"));
//! ```
//!
//! ## Precedence
//!
//! Within a merge, sources apply lowest precedence first and later sources
//! overwrite earlier ones property by property. Legacy styling attached to an
//! element is always the lowest tier; the element's own identifiers follow
//! in declaration order. Modifier tables ([`ModifierTable`]) resolve to
//! sources in the order their dimensions were declared.
//!
//! ## Registry growth
//!
//! The registry never shrinks. It grows by one entry per distinct static
//! declaration and per distinct *novel* merged combination, never per
//! render: a single identifier is returned untouched, and equal content
//! always maps to the existing entry.
//!
//! ## Configuration
//!
//! [`CascadeConfig`] sets the class prefix and default compile options, and
//! [`Stylesheet`] loads declarations from YAML.
//!
//! ## Tree-level merge promotion
//!
//! Whether wrapping a component in legacy styling should switch its children
//! into merged mode is decided by the rendering layer; this crate only merges
//! what it is given for one element.

mod compile;
mod config;
mod element;
mod inject;
mod merge;
mod modifier;
mod registry;
mod style;
mod stylesheet;

pub use compile::{CompileOptions, DeclValue, Declaration, ModifierDeclaration, StyleCompiler};
pub use config::CascadeConfig;
pub use element::CsProp;
pub use inject::{Injector, RuleSink};
pub use merge::{MergeEngine, MergeResult, StyleSource, VariableBinding, VariableValues};
pub use modifier::{Contribution, ModifierTable, VariantSelection};
pub use registry::{Identifier, RegistryEntry, RegistryError, StyleRegistry};
pub use style::{
    css_property_name, is_unitless, kebab_case, PropertyMap, PropertyValue, StyleError,
    VariableName,
};
pub use stylesheet::{CompiledSheet, Stylesheet, StylesheetError};
