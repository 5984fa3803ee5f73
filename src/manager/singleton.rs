//! Manager for the singleton (create-once) policy.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::context::Context;
use crate::key::Key;
use crate::registry::Registry;
use crate::resolver::Resolver;

use super::{construct, FactoryFn, Manager};

/// Constructs the instance on first successful lookup and retains it for
/// the registry's lifetime; later lookups share it.
///
/// The cell gives the optimistic lock-free fast path once initialized,
/// and `get_or_try_init` serializes contended first-time construction so
/// the factory runs exactly once. A failed construction leaves the cell
/// empty: failure is never cached, the next lookup retries.
pub(crate) struct SingletonManager<T: 'static> {
    key: Key,
    factory: FactoryFn<T>,
    cell: OnceCell<Arc<T>>,
}

impl<T: 'static> SingletonManager<T> {
    pub(crate) fn new(key: Key, factory: FactoryFn<T>) -> Self {
        Self {
            key,
            factory,
            cell: OnceCell::new(),
        }
    }

    /// Manager around a ready-made instance; the factory never runs.
    pub(crate) fn prebuilt(key: Key, instance: T) -> Self {
        Self {
            key,
            factory: Arc::new(|_: &Resolver<'_>| -> Option<T> { None }),
            cell: OnceCell::with_value(Arc::new(instance)),
        }
    }
}

impl<T: Send + Sync + 'static> Manager<T> for SingletonManager<T> {
    fn get(&self, registry: &Registry) -> Context<T> {
        // Optimistic check: no lock once the instance exists.
        if let Some(existing) = self.cell.get() {
            return Context::singleton(existing.clone());
        }

        let built = self
            .cell
            .get_or_try_init(|| construct(self.key, &self.factory, registry).map(Arc::new));

        match built {
            Ok(instance) => Context::singleton(instance.clone()),
            Err(error) => Context::failed(error),
        }
    }
}
