//! Property-based tests for registry resolution.
//!
//! These verify behavior that should hold regardless of the specific
//! registration mix: lookups against unregistered keys always fail with
//! the right error, singletons stay consistent, and elastic pools never
//! retain more than their capacity.

use foundry_di::{FactoryError, RegistryBuilder};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Fixed name universe so keys stay 'static.
const NAMES: [&str; 6] = ["default", "alpha", "beta", "gamma", "delta", "epsilon"];

proptest! {
    #[test]
    fn singleton_resolution_consistency(value in "\\PC{0,50}") {
        let mut builder = RegistryBuilder::new();
        builder.add_singleton(value.clone());

        let registry = builder.build();

        let first = registry.get_shared::<String>().unwrap();
        let second = registry.get_shared::<String>().unwrap();
        let third = registry.get_shared::<String>().unwrap();

        prop_assert!(std::ptr::eq(&*first, &*second));
        prop_assert!(std::ptr::eq(&*second, &*third));
        prop_assert_eq!(&*first, &value);
    }
}

proptest! {
    #[test]
    fn lookups_only_succeed_for_registered_names(
        registered in proptest::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len()),
        probes in proptest::collection::vec(0usize..NAMES.len(), 1..20),
    ) {
        let mut builder = RegistryBuilder::new();
        for name in &registered {
            builder.add_named_transient_factory::<u64, _>(*name, |_| Some(7));
        }

        let registry = builder.build();
        prop_assert_eq!(registry.len(), registered.len());

        for probe in probes {
            let name = NAMES[probe];
            let result = registry.get_owned_named::<u64>(name);
            if registered.contains(&name) {
                prop_assert_eq!(*result.unwrap(), 7);
            } else {
                let error = result.unwrap_err();
                prop_assert!(
                    matches!(&error, FactoryError::NotRegistered(key) if key.name() == name),
                    "expected NotRegistered for {}, got {}",
                    name,
                    error
                );
            }
        }
    }
}

proptest! {
    #[test]
    fn transient_lookups_never_alias(count in 1usize..30) {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let mut builder = RegistryBuilder::new();
        builder.add_transient_factory::<usize, _>(move |_| {
            Some(counter_clone.fetch_add(1, Ordering::SeqCst))
        });

        let registry = builder.build();
        let mut seen = Vec::new();
        for _ in 0..count {
            seen.push(*registry.get_owned::<usize>().unwrap());
        }

        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), count);
        prop_assert_eq!(counter.load(Ordering::SeqCst), count);
    }
}

proptest! {
    #[test]
    fn elastic_pool_retention_stays_bounded(
        capacity in 0u32..6,
        // true = check a handle out, false = release the oldest one
        script in proptest::collection::vec(any::<bool>(), 1..60),
    ) {
        let built = Arc::new(AtomicUsize::new(0));
        let built_clone = built.clone();

        let mut builder = RegistryBuilder::new();
        builder.add_elastic_pool_factory::<usize, _>(capacity, move |_| {
            Some(built_clone.fetch_add(1, Ordering::SeqCst))
        });

        let registry = builder.build();
        let mut held = std::collections::VecDeque::new();

        for checkout in script {
            if checkout {
                // Never blocks, no matter how many are already out.
                held.push_back(registry.get_owned::<usize>().unwrap());
            } else if let Some(oldest) = held.pop_front() {
                drop(oldest);
            }
        }

        // Constructions only happen when nothing idle was available, so
        // they can never exceed the number of checkouts performed.
        let constructed = built.load(Ordering::SeqCst);
        prop_assert!(constructed >= held.len());

        // Drain everything, then verify at most `capacity` instances
        // were retained for reuse.
        held.clear();
        let before = built.load(Ordering::SeqCst);
        let refill: Vec<_> = (0..capacity + 1)
            .map(|_| registry.get_owned::<usize>().unwrap())
            .collect();
        let newly_built = built.load(Ordering::SeqCst) - before;
        prop_assert!(newly_built >= 1, "retention exceeded capacity {}", capacity);
        drop(refill);
    }
}

proptest! {
    #[test]
    fn replace_semantics_keep_last_registration(values in proptest::collection::vec(any::<u32>(), 1..10)) {
        let mut builder = RegistryBuilder::new();
        for value in &values {
            builder.add_singleton(*value);
        }

        let registry = builder.build();
        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(*registry.get_shared::<u32>().unwrap(), *values.last().unwrap());
    }
}
