//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::key::Key;

// Thread-local stack of keys currently being resolved on this thread.
// Nested factory lookups push one frame per key; re-entering a key that
// is already on the stack is a cycle.
thread_local! {
    static RESOLUTION_STACK: RefCell<Vec<Key>> = const { RefCell::new(Vec::new()) };
}

/// Guard holding one frame on the thread-local resolution stack.
#[derive(Debug)]
pub(crate) struct StackGuard {
    key: Key,
}

/// Pushes `key` onto the resolution stack, or reports the cycle path if
/// the key is already being resolved on this thread.
pub(crate) fn enter_resolution(key: Key) -> Result<StackGuard, Vec<Key>> {
    RESOLUTION_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();

        if stack.iter().any(|frame| *frame == key) {
            let mut path = stack.clone();
            path.push(key);
            return Err(path);
        }

        stack.push(key);
        Ok(StackGuard { key })
    })
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            let popped = stack.pop();
            debug_assert_eq!(popped, Some(self.key));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reentering_a_key_reports_the_full_path() {
        let outer = Key::of::<u32>();
        let inner = Key::of::<String>();

        let _a = enter_resolution(outer).unwrap();
        let _b = enter_resolution(inner).unwrap();

        let path = enter_resolution(outer).unwrap_err();
        assert_eq!(path, vec![outer, inner, outer]);
    }

    #[test]
    fn frames_pop_when_guards_drop() {
        let key = Key::of::<u64>();
        {
            let _guard = enter_resolution(key).unwrap();
            assert!(enter_resolution(key).is_err());
        }
        assert!(enter_resolution(key).is_ok());
    }
}
