//! The registry core: type-and-key lookup over registered managers.

use std::sync::Arc;
use std::time::Instant;

use crate::context::Context;
use crate::error::{FactoryError, FactoryResult};
use crate::handle::{Owned, Shared};
use crate::internal::enter_resolution;
use crate::key::{key_of, DEFAULT_KEY};
use crate::manager::ManagerBox;
use crate::observer::Observers;
use crate::registration::ManagerStore;

/// Immutable lookup table from type-and-key pairs to instance managers.
///
/// Built once by [`RegistryBuilder`](crate::RegistryBuilder) and
/// read-only afterwards: all remaining mutability lives inside the
/// individual managers (singleton cells, pool ledgers), each behind its
/// own synchronization. The registry is cheap to clone (`Arc` inner) and
/// safe to share across threads.
///
/// Lookups never fail at the signature level: [`get`](Registry::get)
/// always returns a [`Context`], which is either valid or carries a
/// [`FactoryError`]. The ownership adapters
/// ([`get_owned`](Registry::get_owned),
/// [`get_shared`](Registry::get_shared)) do the validity check and
/// surface the error as a `Result` instead.
///
/// # Examples
///
/// ```rust
/// use foundry_di::RegistryBuilder;
///
/// struct Greeter { greeting: String }
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_singleton_factory::<Greeter, _>(|_| {
///     Some(Greeter { greeting: "hello".to_string() })
/// });
///
/// let registry = builder.build();
/// let greeter = registry.get_owned::<Greeter>().unwrap();
/// assert_eq!(greeter.greeting, "hello");
/// ```
pub struct Registry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    store: ManagerStore,
    observers: Observers,
}

impl Registry {
    pub(crate) fn new(store: ManagerStore, observers: Observers) -> Self {
        Self {
            inner: Arc::new(RegistryInner { store, observers }),
        }
    }

    /// Looks up `T` under the default name.
    pub fn get<T: Send + Sync + 'static>(&self) -> Context<T> {
        self.get_named(DEFAULT_KEY)
    }

    /// Looks up `T` under an explicit name.
    ///
    /// Returns an error context when no manager is registered for the
    /// composite key; otherwise delegates to the registered manager's
    /// policy. Re-entering a key that is already being resolved on this
    /// thread (a dependency cycle) is reported as
    /// [`FactoryError::Circular`] instead of recursing.
    pub fn get_named<T: Send + Sync + 'static>(&self, name: &'static str) -> Context<T> {
        let key = key_of::<T>(name);

        let _frame = match enter_resolution(key) {
            Ok(guard) => guard,
            Err(path) => return self.report(Context::failed(FactoryError::Circular(path))),
        };

        let Some(registration) = self.inner.store.get(&key) else {
            return self.report(Context::failed(FactoryError::NotRegistered(key)));
        };

        // Safe by construction: the key embeds T's TypeId, so the erased
        // manager stored under it was registered for T.
        let Some(manager) = registration.manager.downcast_ref::<ManagerBox<T>>() else {
            return self.report(Context::failed(FactoryError::TypeMismatch(key)));
        };

        if self.inner.observers.is_empty() {
            return manager.get(self);
        }

        let start = Instant::now();
        self.inner.observers.resolving(&key);
        let context = manager.get(self);
        match context.error() {
            Some(error) => self.inner.observers.failed(&key, error),
            None => self.inner.observers.resolved(&key, start.elapsed()),
        }
        context
    }

    /// Looks up `T` and adapts the context into an [`Owned`] handle.
    pub fn get_owned<T: Send + Sync + 'static>(&self) -> FactoryResult<Owned<T>> {
        self.get_owned_named(DEFAULT_KEY)
    }

    /// Named-key variant of [`get_owned`](Registry::get_owned).
    pub fn get_owned_named<T: Send + Sync + 'static>(
        &self,
        name: &'static str,
    ) -> FactoryResult<Owned<T>> {
        Owned::from_context(self.get_named(name))
    }

    /// Looks up `T` and adapts the context into a [`Shared`] handle.
    pub fn get_shared<T: Send + Sync + 'static>(&self) -> FactoryResult<Shared<T>> {
        self.get_shared_named(DEFAULT_KEY)
    }

    /// Named-key variant of [`get_shared`](Registry::get_shared).
    pub fn get_shared_named<T: Send + Sync + 'static>(
        &self,
        name: &'static str,
    ) -> FactoryResult<Shared<T>> {
        Shared::from_context(self.get_named(name))
    }

    /// Number of registered managers.
    pub fn len(&self) -> usize {
        self.inner.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.store.len() == 0
    }

    fn report<T>(&self, context: Context<T>) -> Context<T> {
        if !self.inner.observers.is_empty() {
            if let Some(error) = context.error() {
                if let Some(key) = error.key() {
                    self.inner.observers.failed(key, error);
                }
            }
        }
        context
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Registry Debug ===\n");
        for (key, registration) in self.inner.store.iter() {
            match registration.pool_size {
                Some(size) => {
                    s.push_str(&format!("  {}: {:?} (size {})\n", key, registration.lifetime, size));
                }
                None => {
                    s.push_str(&format!("  {}: {:?}\n", key, registration.lifetime));
                }
            }
        }
        s
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
