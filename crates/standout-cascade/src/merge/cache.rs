//! Memo of previously performed merges.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::registry::Identifier;

/// One flattened merge input, in a form that identifies its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum MergeKeyPart {
    Static(Identifier),
    /// Canonical `(name, value)` pairs of a dynamic map.
    Dynamic(Vec<(String, String)>),
}

/// Maps flattened source sequences to the identifier their merge produced.
///
/// Registry entries are immutable, so a sequence always merges to the same
/// identifier and entries never need invalidating.
#[derive(Debug, Default)]
pub(crate) struct MergeCache {
    memo: Mutex<HashMap<Vec<MergeKeyPart>, Identifier>>,
}

impl MergeCache {
    pub(crate) fn get(&self, key: &[MergeKeyPart]) -> Option<Identifier> {
        let memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        memo.get(key).cloned()
    }

    pub(crate) fn insert(&self, key: Vec<MergeKeyPart>, id: Identifier) {
        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        memo.insert(key, id);
    }

    pub(crate) fn len(&self) -> usize {
        self.memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_roundtrip() {
        let cache = MergeCache::default();
        let key = vec![
            MergeKeyPart::Dynamic(vec![("padding".to_string(), "4px".to_string())]),
            MergeKeyPart::Static(Identifier::new("sc-a")),
        ];
        assert_eq!(cache.get(&key), None);

        cache.insert(key.clone(), Identifier::new("sc-merged"));
        assert_eq!(cache.get(&key), Some(Identifier::new("sc-merged")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_key_is_order_sensitive() {
        let cache = MergeCache::default();
        let a = MergeKeyPart::Static(Identifier::new("sc-a"));
        let b = MergeKeyPart::Static(Identifier::new("sc-b"));
        cache.insert(vec![a.clone(), b.clone()], Identifier::new("sc-ab"));
        assert_eq!(cache.get(&[b, a]), None);
    }
}
