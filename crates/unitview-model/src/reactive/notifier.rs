#![forbid(unsafe_code)]

//! Ordered listener list with guarded, snapshot-based dispatch.
//!
//! # Invariants
//!
//! 1. Listeners run in registration order.
//! 2. Registering the same callback twice delivers every event twice.
//! 3. Adding or removing listeners during a dispatch does not affect the
//!    dispatch already in progress.
//! 4. [`Notifier::is_notifying`] is `true` exactly while a dispatch runs.
//! 5. No interior borrow is held while a listener runs, so listeners may call
//!    back into the notifier (or into whatever owns it).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::guard::ReentrancyGuard;

/// A change callback receiving events of type `E`.
pub type Listener<E> = Rc<dyn Fn(&E)>;

/// Handle returned when a listener is registered; used to remove it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct NotifierInner<E> {
    listeners: RefCell<Vec<(ListenerId, Listener<E>)>>,
    next_id: Cell<u64>,
    guard: ReentrancyGuard,
}

/// Single-threaded event broadcaster.
///
/// Clones share the same listener list and guard.
pub struct Notifier<E> {
    inner: Rc<NotifierInner<E>>,
}

impl<E> Clone for Notifier<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: 'static> Notifier<E> {
    /// Create a notifier with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
                guard: ReentrancyGuard::new(),
            }),
        }
    }

    /// Append a listener.
    pub fn add(&self, listener: Listener<E>) -> ListenerId {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let removed = {
            let mut listeners = self.inner.listeners.borrow_mut();
            let index = listeners.iter().position(|(lid, _)| *lid == id);
            index.map(|index| listeners.remove(index))
        };
        // The listener may own subscriptions of its own; drop it unborrowed.
        removed.is_some()
    }

    /// Register a listener and tie its lifetime to the returned [`Subscription`].
    pub fn subscribe_listener(&self, listener: Listener<E>) -> Subscription {
        let id = self.add(listener);
        let weak: Weak<NotifierInner<E>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                Notifier { inner }.remove(id);
            }
        })
    }

    /// Register a closure; see [`subscribe_listener`](Self::subscribe_listener).
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        self.subscribe_listener(Rc::new(callback))
    }

    /// Deliver `event` to every listener registered when the call starts.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        let _scope = self.inner.guard.enter();
        for listener in snapshot {
            listener(event);
        }
    }

    /// Whether a dispatch is currently running.
    #[must_use]
    pub fn is_notifying(&self) -> bool {
        self.inner.guard.is_active()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.listeners.borrow().is_empty()
    }
}

impl<E: 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.inner.listeners.borrow().len())
            .field("depth", &self.inner.guard.depth())
            .finish()
    }
}

/// RAII guard that unregisters a listener when dropped.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a release action that runs exactly once, on drop.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unregister now. Equivalent to dropping.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
