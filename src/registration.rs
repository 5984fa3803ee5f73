//! Registration storage backing the registry.

use std::any::Any;
use std::collections::HashMap;

use crate::key::Key;
use crate::lifetime::Lifetime;

#[cfg(feature = "ahash")]
type MapState = ahash::RandomState;
#[cfg(not(feature = "ahash"))]
type MapState = std::collections::hash_map::RandomState;

// Vec beats HashMap for small registries; most registries are small.
const SMALL_THRESHOLD: usize = 16;

/// One registered manager plus its metadata.
pub(crate) struct Registration {
    pub(crate) lifetime: Lifetime,
    pub(crate) pool_size: Option<u32>,
    /// Type-erased `ManagerBox<T>`; lookup downcasts it back using the
    /// same type that derived the key.
    pub(crate) manager: Box<dyn Any + Send + Sync>,
}

impl Registration {
    pub(crate) fn new(
        lifetime: Lifetime,
        pool_size: Option<u32>,
        manager: Box<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            lifetime,
            pool_size,
            manager,
        }
    }
}

/// Hybrid manager store: a sorted Vec for the first registrations
/// (cache-friendly linear scan) with a HashMap fallback once the
/// registry grows past the threshold. Read-only after `finalize`.
pub(crate) struct ManagerStore {
    small: Vec<(Key, Registration)>,
    large: HashMap<Key, Registration, MapState>,
}

impl ManagerStore {
    pub(crate) fn new() -> Self {
        Self {
            small: Vec::new(),
            large: HashMap::default(),
        }
    }

    /// Inserts with replace semantics: a later registration under the
    /// same key wins.
    pub(crate) fn insert(&mut self, key: Key, registration: Registration) {
        if let Some(pos) = self.small.iter().position(|(k, _)| *k == key) {
            self.small[pos] = (key, registration);
        } else if self.large.contains_key(&key) || self.small.len() >= SMALL_THRESHOLD {
            self.large.insert(key, registration);
        } else {
            self.small.push((key, registration));
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: &Key) -> Option<&Registration> {
        for (k, registration) in &self.small {
            if k == key {
                return Some(registration);
            }
        }
        self.large.get(key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Key, &Registration)> {
        self.small
            .iter()
            .map(|(k, r)| (k, r))
            .chain(self.large.iter())
    }

    pub(crate) fn len(&self) -> usize {
        self.small.len() + self.large.len()
    }

    /// Sorts the small segment for better locality during lookups.
    pub(crate) fn finalize(&mut self) {
        self.small.sort_by(|a, b| a.0.cmp(&b.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(lifetime: Lifetime) -> Registration {
        Registration::new(lifetime, None, Box::new(()))
    }

    #[test]
    fn replace_semantics_apply_in_both_segments() {
        let mut store = ManagerStore::new();
        let key = Key::of::<u32>();

        store.insert(key, dummy(Lifetime::Transient));
        store.insert(key, dummy(Lifetime::Singleton));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key).map(|r| r.lifetime), Some(Lifetime::Singleton));
    }

    #[test]
    fn lookups_work_past_the_small_threshold() {
        let mut store = ManagerStore::new();

        // Distinct names under one type to overflow the Vec segment.
        let names: [&'static str; 20] = [
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p",
            "q", "r", "s", "t",
        ];
        for name in names {
            store.insert(Key::named::<u8>(name), dummy(Lifetime::Transient));
        }
        store.finalize();

        assert_eq!(store.len(), 20);
        for name in names {
            assert!(store.get(&Key::named::<u8>(name)).is_some());
        }
        assert!(store.get(&Key::named::<u8>("zz")).is_none());
    }
}
