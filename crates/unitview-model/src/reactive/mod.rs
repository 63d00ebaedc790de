#![forbid(unsafe_code)]

//! Change-propagation substrate shared by the model and its adapters.
//!
//! - [`Notifier`]: ordered listener list with snapshot dispatch.
//! - [`ReentrancyGuard`]: depth counter entered for every dispatch.
//! - [`Subscription`]: RAII guard that unregisters a listener on drop.
//! - [`Observable`]: the listener API every model and adapter exposes.
//!
//! # Architecture
//!
//! Everything here is single-threaded (`Rc` + `Cell`/`RefCell`). Dispatch is
//! synchronous: `notify` returns after every listener ran. Listeners may read
//! back from whatever notified them; write paths that would feed a new value
//! back consult [`Notifier::is_notifying`] and drop the write instead.

pub mod guard;
pub mod notifier;

pub use guard::{GuardScope, ReentrancyGuard};
pub use notifier::{Listener, ListenerId, Notifier, Subscription};

use std::rc::Rc;

/// Event delivered by a model when its value, automatic flag or unit changed.
///
/// Carries no payload; listeners read the new state back from the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeEvent;

/// The listener API shared by models and adapters.
pub trait Observable {
    /// Event type handed to listeners.
    type Event: 'static;

    /// Register a listener. The same listener may be added more than once.
    fn add_change_listener(&self, listener: Listener<Self::Event>) -> ListenerId;

    /// Unregister a listener. Returns `false` if `id` was not registered.
    fn remove_change_listener(&self, id: ListenerId) -> bool;

    /// Register a closure and tie its lifetime to the returned [`Subscription`].
    ///
    /// The subscription keeps a handle to `self` alive until dropped.
    fn subscribe(&self, callback: impl Fn(&Self::Event) + 'static) -> Subscription
    where
        Self: Clone + Sized + 'static,
    {
        let id = self.add_change_listener(Rc::new(callback));
        let this = self.clone();
        Subscription::new(move || {
            this.remove_change_listener(id);
        })
    }
}
