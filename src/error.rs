//! Error types for the object registry.

use std::fmt;

use crate::key::Key;

/// Construction and lookup errors.
///
/// Every failure in foundry-di is reported as data: lookups return an
/// error [`Context`](crate::Context) and the ownership adapters return
/// `Err(FactoryError)`. No panic crosses the crate boundary, including
/// panics raised inside factory callbacks.
///
/// # Examples
///
/// ```rust
/// use foundry_di::{FactoryError, RegistryBuilder};
///
/// let registry = RegistryBuilder::new().build();
/// let context = registry.get::<String>();
///
/// assert!(!context.is_valid());
/// match context.error() {
///     Some(FactoryError::NotRegistered(key)) => {
///         assert_eq!(key.type_name(), "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum FactoryError {
    /// No manager is registered under the key
    NotRegistered(Key),
    /// Factory callback returned no instance
    NullInstance(Key),
    /// Factory callback panicked; carries the panic message, or a
    /// generic description when the payload had none
    Faulted(Key, String),
    /// A nested `Resolver` lookup failed while building this key
    DependencyFailed(Key, Box<FactoryError>),
    /// Resolution re-entered a key already being built (includes path)
    Circular(Vec<Key>),
    /// Registered manager does not match the requested type
    TypeMismatch(Key),
}

impl FactoryError {
    /// The key the error was reported for.
    ///
    /// For [`FactoryError::Circular`] this is the key that closed the
    /// cycle, which is always present in the recorded path.
    pub fn key(&self) -> Option<&Key> {
        match self {
            FactoryError::NotRegistered(key)
            | FactoryError::NullInstance(key)
            | FactoryError::Faulted(key, _)
            | FactoryError::DependencyFailed(key, _)
            | FactoryError::TypeMismatch(key) => Some(key),
            FactoryError::Circular(path) => path.last(),
        }
    }
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::NotRegistered(key) => {
                write!(f, "Type {} is not registered", key)
            }
            FactoryError::NullInstance(key) => {
                write!(f, "Factory returned no instance for {}", key)
            }
            FactoryError::Faulted(key, message) => {
                write!(f, "Factory for {} faulted: {}", key, message)
            }
            FactoryError::DependencyFailed(key, source) => {
                write!(f, "Failed to build {}: {}", key, source)
            }
            FactoryError::Circular(path) => {
                write!(f, "Circular dependency: ")?;
                for (i, key) in path.iter().enumerate() {
                    if i > 0 {
                        write!(f, " -> ")?;
                    }
                    write!(f, "{}", key)?;
                }
                Ok(())
            }
            FactoryError::TypeMismatch(key) => {
                write!(f, "Registered manager for {} has a mismatched type", key)
            }
        }
    }
}

impl std::error::Error for FactoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FactoryError::DependencyFailed(_, source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for registry operations
///
/// Convenience alias used by the ownership adapters and the resolver
/// facade.
pub type FactoryResult<T> = Result<T, FactoryError>;
