//! First-use rule injection.
//!
//! The rendering runtime must receive each registry entry's rule exactly once,
//! the first time an element uses its identifier. [`Injector`] remembers what
//! it has handed out and forwards only new rules to a [`RuleSink`].

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use log::debug;

use crate::merge::MergeResult;
use crate::registry::{Identifier, RegistryError, StyleRegistry};

/// Receives CSS rules for insertion into a live stylesheet.
pub trait RuleSink {
    fn insert_rule(&mut self, rule: String);
}

impl RuleSink for Vec<String> {
    fn insert_rule(&mut self, rule: String) {
        self.push(rule);
    }
}

/// Tracks which identifiers have been injected.
#[derive(Debug, Default)]
pub struct Injector {
    injected: Mutex<HashSet<Identifier>>,
}

impl Injector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects the rule for `id` unless it was injected before.
    ///
    /// Returns `true` if a rule was handed to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` is not in `registry`.
    pub fn inject<S: RuleSink + ?Sized>(
        &self,
        registry: &StyleRegistry,
        id: &Identifier,
        sink: &mut S,
    ) -> Result<bool, RegistryError> {
        let entry = registry.lookup(id)?;
        // The lock is held while the sink runs so a rule is never inserted twice.
        let mut injected = self.injected.lock().unwrap_or_else(PoisonError::into_inner);
        if !injected.insert(id.clone()) {
            return Ok(false);
        }
        debug!("injecting rule for {}", id);
        sink.insert_rule(entry.css_rule());
        Ok(true)
    }

    /// Injects the rule behind a merge result, if it has one.
    pub fn inject_result<S: RuleSink + ?Sized>(
        &self,
        registry: &StyleRegistry,
        result: &MergeResult,
        sink: &mut S,
    ) -> Result<bool, RegistryError> {
        match &result.final_id {
            Some(id) => self.inject(registry, id, sink),
            None => Ok(false),
        }
    }

    pub fn is_injected(&self, id: &Identifier) -> bool {
        self.injected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }

    /// Number of rules injected so far.
    pub fn len(&self) -> usize {
        self.injected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PropertyMap;

    #[test]
    fn test_inject_once() {
        let registry = StyleRegistry::new();
        let id = registry.register(PropertyMap::new().with("padding", 12));
        let injector = Injector::new();
        let mut rules: Vec<String> = Vec::new();

        assert!(injector.inject(&registry, &id, &mut rules).unwrap());
        assert!(!injector.inject(&registry, &id, &mut rules).unwrap());

        assert_eq!(rules, vec![format!(".{}{{padding:12px;}}", id)]);
        assert!(injector.is_injected(&id));
        assert_eq!(injector.len(), 1);
    }

    #[test]
    fn test_inject_unknown_fails_without_marking() {
        let registry = StyleRegistry::new();
        let injector = Injector::new();
        let mut rules: Vec<String> = Vec::new();
        let missing = Identifier::new("sc-missing");

        assert!(injector.inject(&registry, &missing, &mut rules).is_err());
        assert!(!injector.is_injected(&missing));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_inject_empty_result() {
        let registry = StyleRegistry::new();
        let injector = Injector::new();
        let mut rules: Vec<String> = Vec::new();
        assert!(!injector
            .inject_result(&registry, &MergeResult::default(), &mut rules)
            .unwrap());
        assert!(injector.is_empty());
    }
}
