#![forbid(unsafe_code)]
#![allow(dead_code)]

//! Shared fixtures for the integration tests.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use unitview_model::{
    AccessError, ChangeEvent, Listener, Notifier, PropertyAccessors, PropertySource, Subscription,
};

/// Radius the fixture computes for itself in automatic mode.
pub const AUTO_RADIUS: f64 = 0.05;

/// A component with a writable radius (with automatic mode) and a read-only
/// length. Every setter notifies, whether or not anything changed.
pub struct Rocket {
    radius: Cell<f64>,
    length: Cell<f64>,
    automatic: Cell<bool>,
    fail_reads: Cell<bool>,
    fail_automatic: Cell<bool>,
    radius_writes: Cell<u32>,
    changes: Notifier<ChangeEvent>,
}

impl Rocket {
    pub fn new(radius: f64) -> Rc<Self> {
        Rc::new(Self {
            radius: Cell::new(radius),
            length: Cell::new(1.2),
            automatic: Cell::new(false),
            fail_reads: Cell::new(false),
            fail_automatic: Cell::new(false),
            radius_writes: Cell::new(0),
            changes: Notifier::new(),
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius.get()
    }

    pub fn set_radius(&self, radius: f64) {
        self.radius_writes.set(self.radius_writes.get() + 1);
        self.radius.set(radius);
        self.automatic.set(false);
        self.fire();
    }

    pub fn set_length(&self, length: f64) {
        self.length.set(length);
        self.fire();
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic.get()
    }

    pub fn set_automatic(&self, automatic: bool) {
        self.automatic.set(automatic);
        if automatic {
            self.radius.set(AUTO_RADIUS);
        }
        self.fire();
    }

    /// Notify without touching any property.
    pub fn fire(&self) {
        self.changes.notify(&ChangeEvent);
    }

    pub fn radius_writes(&self) -> u32 {
        self.radius_writes.get()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_automatic(&self, fail: bool) {
        self.fail_automatic.set(fail);
    }

    pub fn source_listeners(&self) -> usize {
        self.changes.len()
    }

    fn read_radius(&self) -> Result<f64, AccessError> {
        if self.fail_reads.get() {
            return Err(AccessError::new("radius unavailable"));
        }
        Ok(self.radius.get())
    }

    fn read_automatic(&self) -> Result<bool, AccessError> {
        if self.fail_automatic.get() {
            return Err(AccessError::new("automatic flag unavailable"));
        }
        Ok(self.automatic.get())
    }

    fn write_automatic(&self, automatic: bool) -> Result<(), AccessError> {
        if self.fail_automatic.get() {
            return Err(AccessError::new("automatic flag locked"));
        }
        self.set_automatic(automatic);
        Ok(())
    }
}

impl PropertySource for Rocket {
    fn subscribe(&self, listener: Listener<ChangeEvent>) -> Subscription {
        self.changes.subscribe_listener(listener)
    }

    fn resolve(self: Rc<Self>, property: &str) -> Option<PropertyAccessors> {
        match property {
            "Radius" => {
                let (read, write) = (Rc::clone(&self), Rc::clone(&self));
                let (auto_read, auto_write) = (Rc::clone(&self), self);
                Some(
                    PropertyAccessors::read_write(
                        move || read.read_radius(),
                        move |v| {
                            write.set_radius(v);
                            Ok(())
                        },
                    )
                    .with_automatic(
                        move || auto_read.read_automatic(),
                        move |automatic| auto_write.write_automatic(automatic),
                    ),
                )
            }
            "Length" => Some(PropertyAccessors::read_only(move || Ok(self.length.get()))),
            _ => None,
        }
    }
}

/// Counts `WARN` events.
#[derive(Clone, Default)]
pub struct WarnCounter {
    count: Arc<AtomicUsize>,
}

impl WarnCounter {
    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a subscriber installed and return how many warnings it logged.
pub fn count_warnings(f: impl FnOnce()) -> usize {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    tracing::subscriber::with_default(subscriber, f);
    counter.get()
}

/// A shared counter and a closure that bumps it.
pub fn tally() -> (Rc<Cell<u32>>, impl Fn(&ChangeEvent) + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    (count, move |_: &ChangeEvent| c.set(c.get() + 1))
}
