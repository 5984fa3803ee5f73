//! Manager descriptors for introspection and diagnostics.

use crate::key::Key;
use crate::lifetime::Lifetime;

/// Metadata about one registered manager.
///
/// Useful for startup validation and debugging: enumerate what is
/// registered, under which lifetime, and with what pool bound, before
/// any lookup runs.
///
/// # Examples
///
/// ```rust
/// use foundry_di::{Lifetime, RegistryBuilder};
///
/// struct Worker;
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_singleton(42u32);
/// builder.add_elastic_pool_factory::<Worker, _>(4, |_| Some(Worker));
///
/// let pooled = builder
///     .descriptors()
///     .into_iter()
///     .find(|d| d.lifetime == Lifetime::ElasticPool)
///     .unwrap();
/// assert!(pooled.is_pooled());
/// assert_eq!(pooled.pool_size, Some(4));
/// assert!(pooled.type_name().contains("Worker"));
/// ```
#[derive(Debug, Clone)]
pub struct ManagerDescriptor {
    /// The lookup key the manager is registered under
    pub key: Key,
    /// Lifetime policy
    pub lifetime: Lifetime,
    /// Pool bound for the pooled policies, `None` otherwise
    pub pool_size: Option<u32>,
}

impl ManagerDescriptor {
    /// The type name half of the key.
    pub fn type_name(&self) -> &'static str {
        self.key.type_name()
    }

    /// The registration name half of the key.
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Whether the manager follows one of the pooled policies.
    pub fn is_pooled(&self) -> bool {
        matches!(self.lifetime, Lifetime::LockedPool | Lifetime::ElasticPool)
    }
}
