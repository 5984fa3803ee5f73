//! # foundry-di
//!
//! Typed object-lifecycle registry: look instances up by type and key,
//! with the lifetime policy chosen at registration time.
//!
//! ## Features
//!
//! - **Four lifetime policies**: transient, singleton, blocking pool,
//!   and elastic pool
//! - **Recursive resolution**: factories resolve their own dependencies
//!   through a [`Resolver`] facade
//! - **Errors as data**: every failure (including factory panics) is
//!   reported through the returned [`Context`], never thrown
//! - **Thread-safe**: concurrent lookups and releases, with exactly-once
//!   singleton construction and deterministic return-to-pool
//! - **Cycle detection**: re-entrant resolution of a key is reported as
//!   an error instead of recursing
//!
//! ## Quick Start
//!
//! ```rust
//! use foundry_di::RegistryBuilder;
//!
//! struct Settings {
//!     endpoint: String,
//! }
//!
//! struct Session {
//!     endpoint: String,
//! }
//!
//! // Register managers
//! let mut builder = RegistryBuilder::new();
//! builder.add_singleton(Settings {
//!     endpoint: "tcp://localhost:5672".to_string(),
//! });
//! builder.add_elastic_pool_factory::<Session, _>(4, |resolver| {
//!     let settings = resolver.get_shared::<Settings>().ok()?;
//!     Some(Session {
//!         endpoint: settings.endpoint.clone(),
//!     })
//! });
//!
//! // Build and use the registry
//! let registry = builder.build();
//! let session = registry.get_owned::<Session>().unwrap();
//! assert_eq!(session.endpoint, "tcp://localhost:5672");
//! // Dropping the handle returns the session to the pool.
//! ```
//!
//! ## Lifetime Policies
//!
//! - **Transient**: the factory runs on every lookup
//! - **Singleton**: constructed once, shared for the registry lifetime
//! - **LockedPool**: at most N instances; lookups block while all are
//!   checked out
//! - **ElasticPool**: never blocks; keeps at most N idle instances for
//!   reuse
//!
//! ## Checking validity
//!
//! ```rust
//! use foundry_di::{FactoryError, RegistryBuilder};
//!
//! struct Missing;
//!
//! let registry = RegistryBuilder::new().build();
//!
//! // The raw lookup returns a context that must be checked.
//! let context = registry.get::<Missing>();
//! assert!(!context.is_valid());
//!
//! // The ownership adapters check for you.
//! match registry.get_owned::<Missing>() {
//!     Err(FactoryError::NotRegistered(key)) => {
//!         assert!(key.type_name().contains("Missing"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

// Module declarations
pub mod builder;
pub mod context;
pub mod descriptors;
pub mod error;
pub mod handle;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod registry;
pub mod resolver;

// Internal modules
mod internal;
mod manager;
mod registration;

// Re-export core types
pub use builder::RegistryBuilder;
pub use context::Context;
pub use descriptors::ManagerDescriptor;
pub use error::{FactoryError, FactoryResult};
pub use handle::{Owned, Shared};
pub use key::{key_of, Key, DEFAULT_KEY};
pub use lifetime::Lifetime;
pub use observer::{LoggingObserver, RegistryObserver};
pub use registry::Registry;
pub use resolver::Resolver;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_transient_resolution() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let mut builder = RegistryBuilder::new();
        builder.add_transient_factory::<String, _>(move |_| {
            let n = counter_clone.fetch_add(1, Ordering::SeqCst) + 1;
            Some(format!("instance-{}", n))
        });

        let registry = builder.build();
        let a = registry.get_owned::<String>().unwrap();
        let b = registry.get_owned::<String>().unwrap();

        assert_eq!(*a, "instance-1");
        assert_eq!(*b, "instance-2");
    }

    #[test]
    fn test_singleton_resolution() {
        let mut builder = RegistryBuilder::new();
        builder.add_singleton(42usize);

        let registry = builder.build();
        let a = registry.get_shared::<usize>().unwrap();
        let b = registry.get_shared::<usize>().unwrap();

        assert_eq!(*a, 42);
        assert!(std::ptr::eq(&*a, &*b)); // Same instance
    }

    #[test]
    fn test_unregistered_lookup_is_an_error() {
        let registry = RegistryBuilder::new().build();
        let context = registry.get::<u64>();

        assert!(!context.is_valid());
        assert!(context.instance().is_none());
    }

    #[test]
    fn test_elastic_pool_reuses_released_instances() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let mut builder = RegistryBuilder::new();
        builder.add_elastic_pool_factory::<usize, _>(2, move |_| {
            Some(counter_clone.fetch_add(1, Ordering::SeqCst))
        });

        let registry = builder.build();
        let first = registry.get_owned::<usize>().unwrap();
        assert_eq!(*first, 0);
        drop(first);

        // The released slot is reused, not reconstructed.
        let second = registry.get_owned::<usize>().unwrap();
        assert_eq!(*second, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_named_registrations_are_distinct() {
        let mut builder = RegistryBuilder::new();
        builder.add_singleton(1u32);
        builder.add_named_singleton("other", 2u32);

        let registry = builder.build();
        assert_eq!(*registry.get_shared::<u32>().unwrap(), 1);
        assert_eq!(*registry.get_shared_named::<u32>("other").unwrap(), 2);
    }
}
