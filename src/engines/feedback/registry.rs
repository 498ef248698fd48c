use crate::types::PolicyKey;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Maps caller-facing candidate ids back to the bandit's policy keys.
///
/// Filled at design time; a later design of the same candidate id overwrites
/// the entry so feedback always targets the most recently returned guide.
#[derive(Debug, Default)]
pub struct CandidateRegistry {
    entries: RwLock<HashMap<String, PolicyKey>>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, candidate_id: impl Into<String>, key: PolicyKey) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(candidate_id.into(), key);
    }

    pub fn register_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, PolicyKey)>,
    {
        let mut map = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        map.extend(entries);
    }

    pub fn resolve(&self, candidate_id: &str) -> Option<PolicyKey> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(candidate_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let registry = CandidateRegistry::new();
        registry.register("BRCA1_42", PolicyKey::new(42, "ACGTACGT"));
        assert_eq!(registry.resolve("BRCA1_42"), Some(PolicyKey::new(42, "ACGTACGT")));
        assert_eq!(registry.resolve("BRCA1_43"), None);
    }

    #[test]
    fn test_reregistration_overwrites() {
        let registry = CandidateRegistry::new();
        registry.register("G_5", PolicyKey::new(5, "AAA"));
        registry.register_all(vec![("G_5".to_string(), PolicyKey::new(5, "CCC"))]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("G_5"), Some(PolicyKey::new(5, "CCC")));
    }
}
