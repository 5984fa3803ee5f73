//! Slot bookkeeping shared by the pooled managers.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Opaque identity of a pooled slot, issued by the ledger at admission.
///
/// Slot identities are never reused within a ledger, so a stale id held
/// by a late release cannot alias a newer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(u64);

/// Return-to-pool seam invoked by a pooled context on release.
pub(crate) trait PoolReturn: Send + Sync {
    fn put_back(&self, slot: SlotId);
}

/// Owns every slot a pool has created and tracks which ones are idle.
///
/// Invariant: a slot id is either in the free queue or checked out by
/// exactly one outstanding context, never both. `admit` hands the slot
/// out checked-out; only `release` makes it available again.
pub(crate) struct PoolLedger<T> {
    slots: HashMap<SlotId, Arc<T>>,
    free: VecDeque<SlotId>,
    next_slot: u64,
}

impl<T> PoolLedger<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
            free: VecDeque::new(),
            next_slot: 0,
        }
    }

    /// Registers a freshly constructed instance and returns its slot id.
    /// The slot starts checked out.
    pub(crate) fn admit(&mut self, instance: Arc<T>) -> SlotId {
        let slot = SlotId(self.next_slot);
        self.next_slot += 1;
        self.slots.insert(slot, instance);
        slot
    }

    /// Pops the oldest idle slot, if any, marking it checked out.
    pub(crate) fn checkout_free(&mut self) -> Option<(SlotId, Arc<T>)> {
        while let Some(slot) = self.free.pop_front() {
            if let Some(instance) = self.slots.get(&slot) {
                return Some((slot, instance.clone()));
            }
        }
        None
    }

    /// Returns a checked-out slot to the free queue.
    pub(crate) fn release(&mut self, slot: SlotId) {
        debug_assert!(self.slots.contains_key(&slot));
        self.free.push_back(slot);
    }

    /// Destroys a slot outright; the instance is dropped once the last
    /// outstanding reference goes away.
    pub(crate) fn evict(&mut self, slot: SlotId) {
        self.slots.remove(&slot);
    }

    pub(crate) fn has_free(&self) -> bool {
        !self.free.is_empty()
    }

    pub(crate) fn free_len(&self) -> usize {
        self.free.len()
    }
}
