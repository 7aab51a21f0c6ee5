//! Style primitives consumed by the registry and the merge engine.
//!
//! This module provides:
//!
//! - [`PropertyMap`]: An ordered, last-write-wins map of CSS properties
//! - [`PropertyValue`]: A literal, number, variable reference or `unset`
//! - [`VariableName`]: A custom property name (always `--` prefixed)
//! - [`StyleError`]: Errors raised while compiling declarations
//!
//! Property names may be written the way authors write them in code
//! (`backgroundColor`) or as CSS (`background-color`); both normalize to the
//! CSS form, so the two spellings overwrite each other inside a map.

mod error;
mod map;
mod names;
mod value;

pub use error::StyleError;
pub use map::PropertyMap;
pub use names::{css_property_name, is_unitless, kebab_case};
pub(crate) use value::referenced_variables;
pub use value::{PropertyValue, VariableName};
