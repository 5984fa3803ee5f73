//! Instance managers, one per lifetime policy.
//!
//! Every registered key is backed by exactly one manager. Managers share
//! the [`construct`] helper, which is the single point where factory
//! outcomes (instance, no instance, panic, failed dependency) are
//! converted into results; no fault ever escapes it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::context::Context;
use crate::error::{FactoryError, FactoryResult};
use crate::key::Key;
use crate::registry::Registry;
use crate::resolver::Resolver;

pub(crate) mod pool;

mod elastic_pool;
mod locked_pool;
mod singleton;
mod transient;

pub(crate) use elastic_pool::ElasticPoolManager;
pub(crate) use locked_pool::LockedPoolManager;
pub(crate) use singleton::SingletonManager;
pub(crate) use transient::TransientManager;

/// Registered construction callback. Returning `None` signals failure;
/// panics are caught by [`construct`] and reported as error contexts.
pub(crate) type FactoryFn<T> =
    Arc<dyn for<'a> Fn(&Resolver<'a>) -> Option<T> + Send + Sync>;

/// Policy-specific "produce a context for this lookup" seam.
pub(crate) trait Manager<T>: Send + Sync {
    fn get(&self, registry: &Registry) -> Context<T>;
}

/// Type-erased manager as stored by the registry. The erased value is
/// downcast back to this exact type during lookup, keyed by the same
/// `TypeId` that formed the lookup key.
pub(crate) type ManagerBox<T> = Box<dyn Manager<T>>;

/// Runs the factory with a fresh resolver and classifies the outcome.
///
/// Precedence when several things went wrong: a panic wins over a
/// recorded dependency failure, which wins over a plain `None`. The
/// dependency check runs even when the factory returned an instance,
/// matching the contract that a failed nested lookup invalidates the
/// dependent object.
pub(crate) fn construct<T>(
    key: Key,
    factory: &FactoryFn<T>,
    registry: &Registry,
) -> FactoryResult<T> {
    let resolver = Resolver::new(registry);

    match panic::catch_unwind(AssertUnwindSafe(|| factory(&resolver))) {
        Err(payload) => Err(FactoryError::Faulted(key, panic_message(payload))),
        Ok(produced) => {
            if let Some(source) = resolver.take_failure() {
                return Err(FactoryError::DependencyFailed(key, Box::new(source)));
            }
            match produced {
                Some(instance) => Ok(instance),
                None => Err(FactoryError::NullInstance(key)),
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "factory raised a fault without a description".to_string()
    }
}
