//! Observation hooks for registry lookups.

use std::sync::Arc;
use std::time::Duration;

use crate::error::FactoryError;
use crate::key::Key;

/// Hooks invoked around every registry lookup.
///
/// Observers are installed at registration time and see each lookup's
/// key, outcome, and duration. The registry skips all observation
/// bookkeeping (including timing) when no observer is installed, so the
/// hot path pays nothing for this seam.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use foundry_di::{LoggingObserver, RegistryBuilder};
///
/// let mut builder = RegistryBuilder::new();
/// builder.add_singleton(8080u16);
/// builder.add_observer(Arc::new(LoggingObserver::new()));
///
/// let registry = builder.build();
/// let port = registry.get::<u16>(); // logged to stderr
/// assert!(port.is_valid());
/// ```
pub trait RegistryObserver: Send + Sync {
    /// A lookup for `key` is starting.
    fn resolving(&self, key: &Key) {
        let _ = key;
    }

    /// A lookup for `key` produced a valid context.
    fn resolved(&self, key: &Key, duration: Duration) {
        let _ = (key, duration);
    }

    /// A lookup for `key` produced an error context.
    fn failed(&self, key: &Key, error: &FactoryError) {
        let _ = (key, error);
    }
}

/// Observer that writes lookup events to stderr.
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self::with_prefix("foundry-di")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryObserver for LoggingObserver {
    fn resolving(&self, key: &Key) {
        eprintln!("[{}] resolving {}", self.prefix, key);
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        eprintln!("[{}] resolved {} in {:?}", self.prefix, key, duration);
    }

    fn failed(&self, key: &Key, error: &FactoryError) {
        eprintln!("[{}] failed {}: {}", self.prefix, key, error);
    }
}

/// Installed observers, notified in registration order.
pub(crate) struct Observers {
    observers: Vec<Arc<dyn RegistryObserver>>,
}

impl Observers {
    pub(crate) fn new(observers: Vec<Arc<dyn RegistryObserver>>) -> Self {
        Self { observers }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    pub(crate) fn resolved(&self, key: &Key, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    pub(crate) fn failed(&self, key: &Key, error: &FactoryError) {
        for observer in &self.observers {
            observer.failed(key, error);
        }
    }
}
