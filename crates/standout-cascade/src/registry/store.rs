//! The append-only style registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};

use super::entry::{Identifier, RegistryEntry};
use super::hash::{base36, content_hash};
use super::RegistryError;
use crate::config::CascadeConfig;
use crate::merge::MergeCache;
use crate::style::PropertyMap;

/// Process-wide store mapping identifiers to resolved property sets.
///
/// Entries are content-addressed: registering a property set whose resolved
/// `(name, value)` pairs equal an existing entry's returns that entry's
/// identifier instead of creating a new one. Entries are never mutated or
/// removed.
///
/// # Thread Safety
///
/// The registry is `Sync`. [`StyleRegistry::register`] performs its
/// check-then-insert under a single write lock, so concurrent registrations
/// of equal content yield one entry.
///
/// # Example
///
/// ```rust
/// use standout_cascade::{PropertyMap, StyleRegistry};
///
/// let registry = StyleRegistry::new();
/// let a = registry.register(PropertyMap::new().with("padding", 4).with("color", "red"));
/// let b = registry.register(PropertyMap::new().with("color", "red").with("padding", 4));
///
/// assert_eq!(a, b);
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StyleRegistry {
    config: CascadeConfig,
    state: RwLock<RegistryState>,
    pub(crate) merges: MergeCache,
}

#[derive(Debug, Default)]
struct RegistryState {
    entries: HashMap<Identifier, Arc<RegistryEntry>>,
    /// Identifiers in creation order.
    order: Vec<Identifier>,
    /// Content hash to every identifier sharing it (almost always one).
    buckets: HashMap<u64, Vec<Identifier>>,
}

impl RegistryState {
    fn find(&self, hash: u64, canonical: &[(String, String)]) -> Option<Identifier> {
        self.buckets
            .get(&hash)?
            .iter()
            .find(|id| {
                self.entries
                    .get(*id)
                    .is_some_and(|entry| entry.canonical == canonical)
            })
            .cloned()
    }
}

impl StyleRegistry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given configuration.
    pub fn with_config(config: CascadeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Registers a property set, returning its content-derived identifier.
    ///
    /// If an entry with the same resolved property set already exists its
    /// identifier is returned and the registry is left unchanged.
    pub fn register(&self, properties: PropertyMap) -> Identifier {
        let canonical = properties.canonical();
        let hash = content_hash(&canonical);

        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(id) = state.find(hash, &canonical) {
                return id;
            }
        }

        self.insert(properties, canonical, hash)
    }

    fn insert(
        &self,
        properties: PropertyMap,
        canonical: Vec<(String, String)>,
        hash: u64,
    ) -> Identifier {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have inserted the same content between the locks.
        if let Some(id) = state.find(hash, &canonical) {
            return id;
        }

        let taken = state.buckets.get(&hash).map_or(0, Vec::len);
        let id = if taken == 0 {
            Identifier::new(format!("{}-{}", self.config.class_prefix, base36(hash)))
        } else {
            warn!(
                "content hash {} shared by {} distinct property sets",
                base36(hash),
                taken + 1
            );
            Identifier::new(format!(
                "{}-{}-{}",
                self.config.class_prefix,
                base36(hash),
                taken
            ))
        };

        debug!("registered {} ({} properties)", id, properties.len());
        let entry = Arc::new(RegistryEntry::new(id.clone(), properties, canonical));
        state.entries.insert(id.clone(), entry);
        state.order.push(id.clone());
        state.buckets.entry(hash).or_default().push(id.clone());
        id
    }

    /// Looks up an entry by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if this registry never produced `id`.
    pub fn lookup(&self, id: &Identifier) -> Result<Arc<RegistryEntry>, RegistryError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .entries
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound { id: id.clone() })
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.contains_key(id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifiers in the order their entries were created.
    pub fn identifiers(&self) -> Vec<Identifier> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.order.clone()
    }

    /// Number of distinct source combinations the merge engine has memoized.
    pub fn memoized_merges(&self) -> usize {
        self.merges.len()
    }

    /// Inserts an entry under an explicit hash, bypassing content hashing.
    #[cfg(test)]
    pub(crate) fn register_with_hash(&self, properties: PropertyMap, hash: u64) -> Identifier {
        let canonical = properties.canonical();
        self.insert(properties, canonical, hash)
    }
}
