#![forbid(unsafe_code)]

//! Boolean projection of a model's automatic flag.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::model::ValueModel;
use crate::reactive::{ChangeEvent, Listener, ListenerId, Notifier, Observable, Subscription};

/// Event emitted by a [`ToggleAdapter`] when its selection flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedChange {
    /// Selection before the change.
    pub old: bool,
    /// Selection after the change.
    pub new: bool,
}

struct ToggleInner {
    model: ValueModel,
    selected: Cell<bool>,
    notifier: Notifier<SelectedChange>,
    _model_subscription: Subscription,
}

impl ToggleInner {
    fn model_changed(&self) {
        let new = self.model.is_automatic();
        let old = self.selected.get();
        if new == old {
            return;
        }
        self.selected.set(new);
        trace!(property = %self.model.name(), old, new, "toggle selection changed");
        self.notifier.notify(&SelectedChange { old, new });
    }
}

/// Toggle view of a model's automatic flag.
///
/// Unlike the other adapters it has its own listener list, and only emits
/// when the selection actually flips.
#[derive(Clone)]
pub struct ToggleAdapter {
    inner: Rc<ToggleInner>,
}

impl ToggleAdapter {
    /// Create a toggle view of `model`, snapshotting its automatic flag.
    #[must_use]
    pub fn new(model: &ValueModel) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<ToggleInner>| {
            let weak = weak.clone();
            let subscription = model.subscribe(move |_: &ChangeEvent| {
                if let Some(inner) = weak.upgrade() {
                    inner.model_changed();
                }
            });
            ToggleInner {
                model: model.clone(),
                selected: Cell::new(model.is_automatic()),
                notifier: Notifier::new(),
                _model_subscription: subscription,
            }
        });
        Self { inner }
    }

    /// The underlying model.
    #[must_use]
    pub fn model(&self) -> &ValueModel {
        &self.inner.model
    }

    /// Last observed automatic flag.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.inner.selected.get()
    }

    /// Whether the model offers an automatic mode at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.model.is_automatic_available()
    }

    /// Ask the model to switch automatic mode. Dropped while the model is notifying.
    pub fn set_selected(&self, selected: bool) {
        if self.inner.model.is_notifying() {
            trace!(property = %self.inner.model.name(), selected, "toggle write during dispatch dropped");
            return;
        }
        self.inner.model.set_automatic(selected);
    }
}

impl Observable for ToggleAdapter {
    type Event = SelectedChange;

    fn add_change_listener(&self, listener: Listener<SelectedChange>) -> ListenerId {
        self.inner.notifier.add(listener)
    }

    fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.inner.notifier.remove(id)
    }
}

impl std::fmt::Debug for ToggleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleAdapter")
            .field("model", &self.inner.model.name())
            .field("selected", &self.inner.selected.get())
            .field("listeners", &self.inner.notifier.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn constant_model_is_disabled() {
        let model = ValueModel::constant(1.0);
        let toggle = ToggleAdapter::new(&model);
        assert!(!toggle.is_enabled());
        assert!(!toggle.is_selected());
    }

    #[test]
    fn unchanged_flag_emits_nothing() {
        let model = ValueModel::constant(1.0);
        let toggle = ToggleAdapter::new(&model);
        let events = Rc::new(RefCell::new(Vec::new()));
        let e = Rc::clone(&events);
        let _sub = toggle.subscribe(move |change: &SelectedChange| e.borrow_mut().push(*change));

        toggle.set_selected(true);
        model.set_value(2.0).expect("writes");
        assert!(events.borrow().is_empty());
        assert!(!toggle.is_selected());
    }

    #[test]
    fn toggle_subscribes_to_model() {
        let model = ValueModel::constant(1.0);
        let toggle = ToggleAdapter::new(&model);
        assert_eq!(model.listener_count(), 1);
        drop(toggle);
        assert_eq!(model.listener_count(), 0);
    }

    #[test]
    fn debug_shows_state() {
        let toggle = ToggleAdapter::new(&ValueModel::constant(0.0));
        let debug = format!("{toggle:?}");
        assert!(debug.contains("selected: false"));
    }
}
