//! Content-addressed style registry.
//!
//! This module provides:
//!
//! - [`StyleRegistry`]: The append-only identifier → property-set store
//! - [`Identifier`]: A content-derived class-name token
//! - [`RegistryEntry`]: An immutable resolved property set
//! - [`RegistryError`]: Lookup failures
//!
//! # Identifiers
//!
//! An identifier is the configured class prefix followed by the base-36
//! xxh3 hash of the entry's resolved `(name, value)` pairs sorted by name.
//! Declaration order never affects the identifier. If two different property
//! sets ever share a hash, the later one receives a `-<n>` suffix, so equal
//! identifiers always mean equal content.
//!
//! # The process-wide registry
//!
//! Every component takes the registry it works against explicitly. Normal
//! operation uses the single instance returned by [`StyleRegistry::global`];
//! tests and embedders construct their own.

mod entry;
mod hash;
mod store;

use once_cell::sync::Lazy;
use thiserror::Error;

pub use entry::{Identifier, RegistryEntry};
pub use store::StyleRegistry;

static GLOBAL_REGISTRY: Lazy<StyleRegistry> = Lazy::new(StyleRegistry::new);

impl StyleRegistry {
    /// Returns the process-wide registry, created on first use with the
    /// default configuration.
    pub fn global() -> &'static StyleRegistry {
        &GLOBAL_REGISTRY
    }
}

/// Error returned by registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The identifier was not produced by this registry.
    ///
    /// Identifiers handed to consumers always come from `register` or a
    /// compiler, so this indicates an internal consistency failure (for
    /// example, an identifier from a different registry instance).
    #[error("no registry entry for identifier '{id}'")]
    NotFound { id: Identifier },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PropertyMap;
    use serial_test::serial;

    #[test]
    fn test_not_found_display() {
        let err = RegistryError::NotFound {
            id: Identifier::new("sc-gone"),
        };
        assert!(err.to_string().contains("sc-gone"));
    }

    #[test]
    #[serial]
    fn test_global_registry_is_shared() {
        let props = PropertyMap::new().with("outline", "1px dotted teal");
        let a = StyleRegistry::global().register(props.clone());
        let before = StyleRegistry::global().len();
        let b = StyleRegistry::global().register(props);

        assert_eq!(a, b);
        assert_eq!(StyleRegistry::global().len(), before);
        assert!(std::ptr::eq(StyleRegistry::global(), StyleRegistry::global()));
    }
}
