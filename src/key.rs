//! Lookup keys for the object registry.

use std::any::TypeId;
use std::fmt;

/// Name used for registrations and lookups that do not supply one.
///
/// Every registered manager is addressed by a type plus a string name.
/// Methods without a `_named` suffix use this name implicitly, so
/// `builder.add_singleton(value)` and `registry.get::<T>()` pair up
/// without the caller ever spelling the name out.
pub const DEFAULT_KEY: &str = "default";

/// Composite lookup key: a type identity plus a registration name.
///
/// Keys uniquely address managers in the [`Registry`](crate::Registry).
/// At most one manager is stored per key; registering a second manager
/// under the same key replaces the first. The `TypeId` half of the key
/// is what makes the registry's internal downcast safe: a key built for
/// `T` can only ever reach a manager that was registered for `T`.
///
/// # Examples
///
/// ```rust
/// use foundry_di::{Key, DEFAULT_KEY};
///
/// let default = Key::of::<u32>();
/// let named = Key::named::<u32>("port");
///
/// assert_eq!(default.name(), DEFAULT_KEY);
/// assert_eq!(named.name(), "port");
/// assert_ne!(default, named);
/// assert_eq!(named, Key::named::<u32>("port"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Key {
    id: TypeId,
    type_name: &'static str,
    name: &'static str,
}

impl Key {
    /// Key for `T` under the default name.
    pub fn of<T: 'static>() -> Self {
        Self::named::<T>(DEFAULT_KEY)
    }

    /// Key for `T` under an explicit registration name.
    pub fn named<T: 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            name,
        }
    }

    /// Human-readable type name, as reported by `std::any::type_name`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Registration name half of the key.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

// Equality and hashing ignore the display string: the TypeId already
// identifies the type, the string is only for diagnostics.
impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
    }
}

// Ordering for the sorted small-registry path.
impl PartialOrd for Key {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id).then_with(|| self.name.cmp(other.name))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_name, self.name)
    }
}

/// Helper for creating keys with the same derivation the registration
/// side uses.
#[inline(always)]
pub fn key_of<T: 'static>(name: &'static str) -> Key {
    Key::named::<T>(name)
}
