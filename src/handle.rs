//! Ownership adapters over lookup contexts.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::context::Context;
use crate::error::FactoryResult;

/// Uniquely-owned handle to a resolved instance.
///
/// Adapts a valid [`Context`] into something that dereferences straight
/// to `T`, with the validity check already done. Dropping the handle
/// drops the context, which for pooled instances returns the slot to
/// its pool. The handle is move-only, so that release fires exactly
/// once.
///
/// # Examples
///
/// ```rust
/// use foundry_di::RegistryBuilder;
///
/// struct Channel { capacity: usize }
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_locked_pool_factory::<Channel, _>(1, |_| {
///     Some(Channel { capacity: 64 })
/// });
/// let registry = builder.build();
///
/// let channel = registry.get_owned::<Channel>().unwrap();
/// assert_eq!(channel.capacity, 64);
/// drop(channel); // slot goes back to the pool
///
/// assert!(registry.get_owned::<Channel>().is_ok());
/// ```
pub struct Owned<T> {
    instance: Arc<T>,
    _context: Context<T>,
}

impl<T> Owned<T> {
    pub(crate) fn from_context(context: Context<T>) -> FactoryResult<Self> {
        let (instance, context) = context.into_checked()?;
        Ok(Self {
            instance,
            _context: context,
        })
    }
}

impl<T> Deref for Owned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

impl<T: fmt::Debug> fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Owned").field(&*self.instance).finish()
    }
}

/// Reference-counted handle to a resolved instance.
///
/// Clones share one underlying context; the release (and, for pooled
/// instances, the return of the slot) happens when the last clone is
/// dropped. Cloning never touches the pool.
///
/// # Examples
///
/// ```rust
/// use foundry_di::RegistryBuilder;
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_singleton("shared".to_string());
/// let registry = builder.build();
///
/// let first = registry.get_shared::<String>().unwrap();
/// let second = first.clone();
/// assert_eq!(*first, *second);
/// ```
pub struct Shared<T> {
    instance: Arc<T>,
    _context: Arc<Context<T>>,
}

impl<T> Shared<T> {
    pub(crate) fn from_context(context: Context<T>) -> FactoryResult<Self> {
        let (instance, context) = context.into_checked()?;
        Ok(Self {
            instance,
            _context: Arc::new(context),
        })
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            instance: self.instance.clone(),
            _context: self._context.clone(),
        }
    }
}

impl<T> Deref for Shared<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&*self.instance).finish()
    }
}
