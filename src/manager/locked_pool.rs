//! Manager for the bounded, blocking pool policy.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::context::Context;
use crate::key::Key;
use crate::registry::Registry;

use super::pool::{PoolLedger, PoolReturn, SlotId};
use super::{construct, FactoryFn, Manager};

/// Hands out at most `pool_size` instances; blocks the caller while all
/// of them are checked out.
///
/// Instances are created lazily: while the countdown is positive and no
/// idle slot exists, a lookup constructs a new slot instead of waiting.
/// A construction failure does not consume the countdown, so pool
/// capacity is never lost to a failed factory. Once warm, exactly
/// `pool_size` slots exist and none is destroyed while the manager
/// lives.
pub(crate) struct LockedPoolManager<T: 'static> {
    key: Key,
    factory: FactoryFn<T>,
    shared: Arc<LockedPool<T>>,
}

struct LockedPool<T> {
    state: Mutex<LockedState<T>>,
    available: Condvar,
}

struct LockedState<T> {
    ledger: PoolLedger<T>,
    // Instances still allowed to be created before the pool is full.
    countdown: u32,
    // Threads blocked waiting for a putback; releases only signal when
    // this is non-zero.
    waiters: u32,
}

impl<T: 'static> LockedPoolManager<T> {
    pub(crate) fn new(key: Key, factory: FactoryFn<T>, pool_size: u32) -> Self {
        Self {
            key,
            factory,
            shared: Arc::new(LockedPool {
                state: Mutex::new(LockedState {
                    ledger: PoolLedger::new(),
                    countdown: pool_size,
                    waiters: 0,
                }),
                available: Condvar::new(),
            }),
        }
    }
}

impl<T: Send + Sync + 'static> Manager<T> for LockedPoolManager<T> {
    fn get(&self, registry: &Registry) -> Context<T> {
        let mut state = self.shared.state.lock();

        if state.countdown > 0 && !state.ledger.has_free() {
            // Grow the pool instead of waiting.
            return match construct(self.key, &self.factory, registry) {
                Ok(instance) => {
                    let instance = Arc::new(instance);
                    let slot = state.ledger.admit(instance.clone());
                    state.countdown -= 1;
                    Context::pooled(instance, self.shared.clone(), slot)
                }
                Err(error) => Context::failed(error),
            };
        }

        loop {
            if let Some((slot, instance)) = state.ledger.checkout_free() {
                return Context::pooled(instance, self.shared.clone(), slot);
            }

            state.waiters += 1;
            self.shared.available.wait(&mut state);
            state.waiters -= 1;
        }
    }
}

impl<T: Send + Sync> PoolReturn for LockedPool<T> {
    fn put_back(&self, slot: SlotId) {
        let mut state = self.state.lock();
        state.ledger.release(slot);
        if state.waiters > 0 {
            self.available.notify_one();
        }
    }
}
