//! Resolver facade handed to factory callbacks.

use std::cell::RefCell;

use crate::context::Context;
use crate::error::{FactoryError, FactoryResult};
use crate::handle::{Owned, Shared};
use crate::key::DEFAULT_KEY;
use crate::registry::Registry;

/// Narrow view of the registry passed to every factory callback.
///
/// Factories receive a `Resolver` instead of the full [`Registry`] so
/// construction-time code can only look dependencies up, not register
/// anything. The resolver also records the most recent failed lookup:
/// when the factory subsequently returns `None`, the construction helper
/// folds that recorded failure into the dependent's error context, which
/// is how nested failures trace through to the outermost caller.
///
/// # Examples
///
/// ```rust
/// use foundry_di::RegistryBuilder;
///
/// struct Config { url: String }
/// struct Client { url: String }
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_singleton(Config { url: "amqp://localhost".to_string() });
/// builder.add_transient_factory::<Client, _>(|resolver| {
///     let config = resolver.get_shared::<Config>().ok()?;
///     Some(Client { url: config.url.clone() })
/// });
///
/// let registry = builder.build();
/// let client = registry.get_owned::<Client>().unwrap();
/// assert_eq!(client.url, "amqp://localhost");
/// ```
pub struct Resolver<'a> {
    registry: &'a Registry,
    failure: RefCell<Option<FactoryError>>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            failure: RefCell::new(None),
        }
    }

    /// Looks up a dependency under the default name.
    pub fn get<T: Send + Sync + 'static>(&self) -> Context<T> {
        self.get_named(DEFAULT_KEY)
    }

    /// Looks up a dependency under an explicit name.
    pub fn get_named<T: Send + Sync + 'static>(&self, name: &'static str) -> Context<T> {
        let context = self.registry.get_named::<T>(name);
        if let Some(error) = context.error() {
            *self.failure.borrow_mut() = Some(error.clone());
        }
        context
    }

    /// Looks up a dependency and adapts it into a [`Shared`] handle,
    /// which is the convenient shape for storing inside the object being
    /// constructed. Pairs well with `?` in factories returning `Option`:
    /// `resolver.get_shared::<U>().ok()?`.
    pub fn get_shared<T: Send + Sync + 'static>(&self) -> FactoryResult<Shared<T>> {
        self.get_shared_named(DEFAULT_KEY)
    }

    /// Named-key variant of [`get_shared`](Resolver::get_shared).
    pub fn get_shared_named<T: Send + Sync + 'static>(
        &self,
        name: &'static str,
    ) -> FactoryResult<Shared<T>> {
        Shared::from_context(self.get_named(name))
    }

    /// Looks up a dependency and adapts it into an [`Owned`] handle.
    pub fn get_owned<T: Send + Sync + 'static>(&self) -> FactoryResult<Owned<T>> {
        self.get_owned_named(DEFAULT_KEY)
    }

    /// Named-key variant of [`get_owned`](Resolver::get_owned).
    pub fn get_owned_named<T: Send + Sync + 'static>(
        &self,
        name: &'static str,
    ) -> FactoryResult<Owned<T>> {
        Owned::from_context(self.get_named(name))
    }

    /// Takes the most recent recorded lookup failure, if any.
    pub(crate) fn take_failure(&self) -> Option<FactoryError> {
        self.failure.borrow_mut().take()
    }
}
