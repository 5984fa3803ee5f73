//! Manager for the elastic (never-blocking) pool policy.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::Context;
use crate::key::Key;
use crate::registry::Registry;

use super::pool::{PoolLedger, PoolReturn, SlotId};
use super::{construct, FactoryFn, Manager};

/// Reuses idle instances when available and constructs new ones when
/// not; never blocks the caller.
///
/// The live instance count can transiently exceed `capacity`, but a
/// release only requeues the slot while fewer than `capacity` instances
/// are idle; beyond that the slot is destroyed.
pub(crate) struct ElasticPoolManager<T: 'static> {
    key: Key,
    factory: FactoryFn<T>,
    shared: Arc<ElasticPool<T>>,
}

struct ElasticPool<T> {
    capacity: u32,
    ledger: Mutex<PoolLedger<T>>,
}

impl<T: 'static> ElasticPoolManager<T> {
    pub(crate) fn new(key: Key, factory: FactoryFn<T>, capacity: u32) -> Self {
        Self {
            key,
            factory,
            shared: Arc::new(ElasticPool {
                capacity,
                ledger: Mutex::new(PoolLedger::new()),
            }),
        }
    }
}

impl<T: Send + Sync + 'static> Manager<T> for ElasticPoolManager<T> {
    fn get(&self, registry: &Registry) -> Context<T> {
        let mut ledger = self.shared.ledger.lock();

        if let Some((slot, instance)) = ledger.checkout_free() {
            return Context::pooled(instance, self.shared.clone(), slot);
        }

        match construct(self.key, &self.factory, registry) {
            Ok(instance) => {
                let instance = Arc::new(instance);
                let slot = ledger.admit(instance.clone());
                Context::pooled(instance, self.shared.clone(), slot)
            }
            Err(error) => Context::failed(error),
        }
    }
}

impl<T: Send + Sync> PoolReturn for ElasticPool<T> {
    fn put_back(&self, slot: SlotId) {
        let mut ledger = self.ledger.lock();
        if ledger.free_len() < self.capacity as usize {
            ledger.release(slot);
        } else {
            ledger.evict(slot);
        }
    }
}
