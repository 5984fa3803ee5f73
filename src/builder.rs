//! Registration surface for assembling a registry.

use std::sync::Arc;

use crate::descriptors::ManagerDescriptor;
use crate::key::{key_of, DEFAULT_KEY};
use crate::lifetime::Lifetime;
use crate::manager::{
    ElasticPoolManager, FactoryFn, LockedPoolManager, ManagerBox, SingletonManager,
    TransientManager,
};
use crate::observer::{Observers, RegistryObserver};
use crate::registration::{ManagerStore, Registration};
use crate::registry::Registry;
use crate::resolver::Resolver;

/// Mutable collection of manager registrations.
///
/// All registration happens here, before any lookup: `build` consumes
/// the builder and produces an immutable, thread-safe [`Registry`].
/// Registering twice under the same type and name replaces the earlier
/// manager.
///
/// Factories receive a [`Resolver`] for recursive dependency lookups and
/// signal failure by returning `None` (or by panicking; both are
/// converted into error contexts, never propagated as panics).
///
/// # Examples
///
/// ```rust
/// use foundry_di::RegistryBuilder;
///
/// struct Config { workers: usize }
/// struct Dispatcher { workers: usize }
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_singleton(Config { workers: 4 });
/// builder.add_transient_factory::<Dispatcher, _>(|resolver| {
///     let config = resolver.get_shared::<Config>().ok()?;
///     Some(Dispatcher { workers: config.workers })
/// });
///
/// let registry = builder.build();
/// let dispatcher = registry.get_owned::<Dispatcher>().unwrap();
/// assert_eq!(dispatcher.workers, 4);
/// ```
pub struct RegistryBuilder {
    store: ManagerStore,
    observers: Vec<Arc<dyn RegistryObserver>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            store: ManagerStore::new(),
            observers: Vec::new(),
        }
    }

    /// Registers a transient factory under the default name.
    pub fn add_transient_factory<T, F>(&mut self, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync + 'static,
    {
        self.add_named_transient_factory(DEFAULT_KEY, factory);
    }

    /// Registers a transient factory under an explicit name.
    pub fn add_named_transient_factory<T, F>(&mut self, name: &'static str, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync + 'static,
    {
        let key = key_of::<T>(name);
        let factory: FactoryFn<T> = Arc::new(factory);
        let manager: ManagerBox<T> = Box::new(TransientManager::new(key, factory));
        self.store.insert(
            key,
            Registration::new(Lifetime::Transient, None, Box::new(manager)),
        );
    }

    /// Registers a singleton factory under the default name.
    pub fn add_singleton_factory<T, F>(&mut self, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync + 'static,
    {
        self.add_named_singleton_factory(DEFAULT_KEY, factory);
    }

    /// Registers a singleton factory under an explicit name.
    pub fn add_named_singleton_factory<T, F>(&mut self, name: &'static str, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync + 'static,
    {
        let key = key_of::<T>(name);
        let factory: FactoryFn<T> = Arc::new(factory);
        let manager: ManagerBox<T> = Box::new(SingletonManager::new(key, factory));
        self.store.insert(
            key,
            Registration::new(Lifetime::Singleton, None, Box::new(manager)),
        );
    }

    /// Registers a ready-made singleton instance under the default name.
    pub fn add_singleton<T: Send + Sync + 'static>(&mut self, instance: T) {
        self.add_named_singleton(DEFAULT_KEY, instance);
    }

    /// Registers a ready-made singleton instance under an explicit name.
    pub fn add_named_singleton<T: Send + Sync + 'static>(
        &mut self,
        name: &'static str,
        instance: T,
    ) {
        let key = key_of::<T>(name);
        let manager: ManagerBox<T> = Box::new(SingletonManager::prebuilt(key, instance));
        self.store.insert(
            key,
            Registration::new(Lifetime::Singleton, None, Box::new(manager)),
        );
    }

    /// Registers a blocking pool of at most `pool_size` instances under
    /// the default name.
    ///
    /// # Panics
    ///
    /// Panics if `pool_size` is zero; a zero-sized blocking pool could
    /// never satisfy a lookup.
    pub fn add_locked_pool_factory<T, F>(&mut self, pool_size: u32, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync + 'static,
    {
        self.add_named_locked_pool_factory(DEFAULT_KEY, pool_size, factory);
    }

    /// Named-key variant of
    /// [`add_locked_pool_factory`](RegistryBuilder::add_locked_pool_factory).
    pub fn add_named_locked_pool_factory<T, F>(
        &mut self,
        name: &'static str,
        pool_size: u32,
        factory: F,
    ) where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync + 'static,
    {
        assert!(pool_size > 0, "locked pool for {} must have a non-zero size", key_of::<T>(name));

        let key = key_of::<T>(name);
        let factory: FactoryFn<T> = Arc::new(factory);
        let manager: ManagerBox<T> = Box::new(LockedPoolManager::new(key, factory, pool_size));
        self.store.insert(
            key,
            Registration::new(Lifetime::LockedPool, Some(pool_size), Box::new(manager)),
        );
    }

    /// Registers an elastic pool retaining at most `capacity` idle
    /// instances under the default name.
    pub fn add_elastic_pool_factory<T, F>(&mut self, capacity: u32, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync + 'static,
    {
        self.add_named_elastic_pool_factory(DEFAULT_KEY, capacity, factory);
    }

    /// Named-key variant of
    /// [`add_elastic_pool_factory`](RegistryBuilder::add_elastic_pool_factory).
    pub fn add_named_elastic_pool_factory<T, F>(
        &mut self,
        name: &'static str,
        capacity: u32,
        factory: F,
    ) where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync + 'static,
    {
        let key = key_of::<T>(name);
        let factory: FactoryFn<T> = Arc::new(factory);
        let manager: ManagerBox<T> = Box::new(ElasticPoolManager::new(key, factory, capacity));
        self.store.insert(
            key,
            Registration::new(Lifetime::ElasticPool, Some(capacity), Box::new(manager)),
        );
    }

    /// Installs an observer notified around every lookup.
    pub fn add_observer(&mut self, observer: Arc<dyn RegistryObserver>) {
        self.observers.push(observer);
    }

    /// Describes every registration made so far.
    pub fn descriptors(&self) -> Vec<ManagerDescriptor> {
        self.store
            .iter()
            .map(|(key, registration)| ManagerDescriptor {
                key: *key,
                lifetime: registration.lifetime,
                pool_size: registration.pool_size,
            })
            .collect()
    }

    /// Number of registered managers.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Finalizes the registrations into an immutable [`Registry`].
    pub fn build(mut self) -> Registry {
        self.store.finalize();
        Registry::new(self.store, Observers::new(self.observers))
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
