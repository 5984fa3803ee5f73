//! Lookup result wrapper returned by the registry.

use std::sync::Arc;

use crate::error::FactoryError;
use crate::manager::pool::{PoolReturn, SlotId};

/// Outcome of a lookup: a constructed instance or an error.
///
/// A valid context gives access to the instance for as long as the
/// context lives. How the instance is held depends on the lifetime
/// policy that produced it:
///
/// - transient contexts exclusively own their instance;
/// - singleton contexts share the instance retained by the manager;
/// - pooled contexts hold a checked-out pool slot, and dropping the
///   context returns the slot to its pool exactly once.
///
/// `Context` is intentionally not `Clone`, so a pooled slot can never be
/// released twice. Callers must check [`is_valid`](Context::is_valid)
/// (or go through [`Registry::get_owned`](crate::Registry::get_owned) /
/// [`Registry::get_shared`](crate::Registry::get_shared), which check it
/// for them) before touching the instance.
///
/// # Examples
///
/// ```rust
/// use foundry_di::RegistryBuilder;
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_transient_factory::<u32, _>(|_| Some(99));
/// let registry = builder.build();
///
/// let context = registry.get::<u32>();
/// assert!(context.is_valid());
/// assert_eq!(context.instance(), Some(&99));
/// assert!(context.error().is_none());
/// ```
pub struct Context<T> {
    inner: Inner<T>,
}

enum Inner<T> {
    Transient(Arc<T>),
    Singleton(Arc<T>),
    Pooled {
        instance: Arc<T>,
        pool: Arc<dyn PoolReturn>,
        slot: SlotId,
    },
    Error(FactoryError),
}

impl<T> Context<T> {
    pub(crate) fn transient(instance: Arc<T>) -> Self {
        Self { inner: Inner::Transient(instance) }
    }

    pub(crate) fn singleton(instance: Arc<T>) -> Self {
        Self { inner: Inner::Singleton(instance) }
    }

    pub(crate) fn pooled(instance: Arc<T>, pool: Arc<dyn PoolReturn>, slot: SlotId) -> Self {
        Self { inner: Inner::Pooled { instance, pool, slot } }
    }

    pub(crate) fn failed(error: FactoryError) -> Self {
        Self { inner: Inner::Error(error) }
    }

    /// Whether construction succeeded and an instance is available.
    pub fn is_valid(&self) -> bool {
        !matches!(self.inner, Inner::Error(_))
    }

    /// The constructed instance, or `None` for an error context.
    pub fn instance(&self) -> Option<&T> {
        match &self.inner {
            Inner::Transient(instance) | Inner::Singleton(instance) => Some(instance),
            Inner::Pooled { instance, .. } => Some(instance),
            Inner::Error(_) => None,
        }
    }

    /// The construction error, or `None` for a valid context.
    pub fn error(&self) -> Option<&FactoryError> {
        match &self.inner {
            Inner::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Splits a valid context into a shared instance handle plus the
    /// context keeping it alive, or surfaces the error.
    pub(crate) fn into_checked(self) -> Result<(Arc<T>, Self), FactoryError> {
        let instance = match &self.inner {
            Inner::Transient(instance) | Inner::Singleton(instance) => instance.clone(),
            Inner::Pooled { instance, .. } => instance.clone(),
            Inner::Error(error) => return Err(error.clone()),
        };
        Ok((instance, self))
    }
}

impl<T> Drop for Context<T> {
    fn drop(&mut self) {
        // Single-fire putback: Drop runs once and Context is not Clone.
        if let Inner::Pooled { pool, slot, .. } = &self.inner {
            pool.put_back(*slot);
        }
    }
}

impl<T> std::fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Inner::Transient(_) => f.write_str("Context::Transient"),
            Inner::Singleton(_) => f.write_str("Context::Singleton"),
            Inner::Pooled { slot, .. } => write!(f, "Context::Pooled({:?})", slot),
            Inner::Error(error) => write!(f, "Context::Error({})", error),
        }
    }
}
