//! Manager for the transient (create-every-time) policy.

use std::sync::Arc;

use crate::context::Context;
use crate::key::Key;
use crate::registry::Registry;

use super::{construct, FactoryFn, Manager};

/// Runs the factory fresh on every lookup. Holds no state beyond the
/// callback, so no synchronization is involved.
pub(crate) struct TransientManager<T: 'static> {
    key: Key,
    factory: FactoryFn<T>,
}

impl<T: 'static> TransientManager<T> {
    pub(crate) fn new(key: Key, factory: FactoryFn<T>) -> Self {
        Self { key, factory }
    }
}

impl<T: Send + Sync + 'static> Manager<T> for TransientManager<T> {
    fn get(&self, registry: &Registry) -> Context<T> {
        match construct(self.key, &self.factory, registry) {
            Ok(instance) => Context::transient(Arc::new(instance)),
            Err(error) => Context::failed(error),
        }
    }
}
