#![forbid(unsafe_code)]

//! Nesting counter that marks "a notification burst is in flight".

use std::cell::Cell;
use std::rc::Rc;

/// Shared dispatch-depth counter.
///
/// A [`Notifier`](super::Notifier) enters the guard for the duration of every
/// dispatch. Write paths that must not run during a dispatch check
/// [`is_active`](Self::is_active) first.
///
/// Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct ReentrancyGuard {
    depth: Rc<Cell<u32>>,
}

impl ReentrancyGuard {
    /// Create an idle guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the depth until the returned scope is dropped.
    pub fn enter(&self) -> GuardScope {
        self.depth.set(self.depth.get().saturating_add(1));
        GuardScope {
            depth: Rc::clone(&self.depth),
        }
    }

    /// Whether at least one scope is alive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.depth.get() > 0
    }

    /// Number of nested scopes currently alive.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth.get()
    }
}

/// RAII scope returned by [`ReentrancyGuard::enter`].
///
/// Decrements the depth on drop, including during unwinding.
#[must_use = "dropping the scope immediately leaves the guard"]
#[derive(Debug)]
pub struct GuardScope {
    depth: Rc<Cell<u32>>,
}

impl Drop for GuardScope {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_by_default() {
        let guard = ReentrancyGuard::new();
        assert!(!guard.is_active());
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn scopes_nest() {
        let guard = ReentrancyGuard::new();
        let outer = guard.enter();
        {
            let _inner = guard.enter();
            assert_eq!(guard.depth(), 2);
        }
        assert_eq!(guard.depth(), 1);
        drop(outer);
        assert!(!guard.is_active());
    }

    #[test]
    fn clones_share_depth() {
        let guard = ReentrancyGuard::new();
        let other = guard.clone();
        let _scope = guard.enter();
        assert!(other.is_active());
    }

    #[test]
    fn scope_released_on_panic() {
        let guard = ReentrancyGuard::new();
        let g = guard.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _scope = g.enter();
            panic!("listener failure");
        }));
        assert!(result.is_err());
        assert!(!guard.is_active());
    }
}
