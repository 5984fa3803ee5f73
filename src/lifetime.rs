//! Lifetime policy definitions.

/// Lifetime policies controlling how managers produce instances
///
/// Each registered key is backed by exactly one manager implementing one
/// of these policies. The policy decides when the factory runs, whether
/// instances are shared, and what happens when a handle is released.
///
/// # Policy Characteristics
///
/// - **Transient**: factory runs on every lookup, no shared state
/// - **Singleton**: factory runs once, all lookups share the instance
/// - **LockedPool**: at most N instances, callers block when all are out
/// - **ElasticPool**: never blocks, retains at most N idle instances
///
/// # Examples
///
/// ```rust
/// use foundry_di::{Lifetime, RegistryBuilder};
///
/// struct Connection { id: u32 }
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_locked_pool_factory::<Connection, _>(2, |_| {
///     Some(Connection { id: 7 })
/// });
///
/// let descriptors = builder.descriptors();
/// assert_eq!(descriptors[0].lifetime, Lifetime::LockedPool);
/// assert_eq!(descriptors[0].pool_size, Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// New instance per lookup, never cached
    ///
    /// The factory runs on the calling thread for every lookup and the
    /// returned context exclusively owns the result. No synchronization
    /// is involved. A failed construction is never cached; the next
    /// lookup simply runs the factory again.
    Transient,
    /// Single instance retained for the registry lifetime
    ///
    /// The first successful lookup constructs and retains the instance;
    /// later lookups return a context sharing it without reconstructing.
    /// Initialization is guarded so the factory runs exactly once even
    /// under contention. A failed construction leaves the manager
    /// uninitialized and a later lookup retries.
    Singleton,
    /// Bounded pool; lookups block when every instance is checked out
    ///
    /// At most N instances ever exist. Instances are created lazily up
    /// to the bound, then reused; once all are checked out, further
    /// lookups wait until a handle is released. Use when the underlying
    /// resource has a hard concurrency ceiling.
    LockedPool,
    /// Unbounded creation with bounded retention; lookups never block
    ///
    /// When no idle instance is available a new one is constructed, so
    /// the live count can transiently exceed N. Released instances are
    /// kept for reuse only while fewer than N are idle; beyond that
    /// they are dropped. Use when availability matters more than a hard
    /// ceiling.
    ElasticPool,
}
