#![forbid(unsafe_code)]

//! The canonical value holder.
//!
//! A [`ValueModel`] is either a **constant** (it stores the value itself) or
//! **bound** to a property of a [`PropertySource`]. In both modes values are
//! canonical (SI) units; the current display unit is per-model state shared by
//! every adapter.
//!
//! # Invariants
//!
//! 1. The mode is fixed at construction.
//! 2. The current unit is always a member of the model's unit group.
//! 3. While [`is_notifying`](ValueModel::is_notifying) is `true`, adapters drop
//!    writes instead of forwarding them.
//! 4. The model is subscribed to its source exactly while it has listeners.
//! 5. Bounds are advisory. [`set_value`](ValueModel::set_value) never clamps.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Value reader fails | `value()` returns [`ModelError::Binding`] |
//! | Writer missing | `set_value()` returns [`ModelError::Unsupported`] |
//! | Automatic reader/writer fails | `warn!`, treated as "not automatic" |
//! | Read fails on a source notification | `warn!`, event treated as "no change" |

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};
use unitview_units::{Unit, UnitGroup, UnitRef};

use crate::config::{Bound, ModelConfig};
use crate::error::{ModelError, Result};
use crate::reactive::{ChangeEvent, Listener, ListenerId, Notifier, Observable, Subscription};
use crate::source::{PropertyAccessors, PropertySource};

const CONSTANT_NAME: &str = "constant";

struct Binding {
    source: Rc<dyn PropertySource>,
    accessors: PropertyAccessors,
}

struct ModelInner {
    name: String,
    binding: Option<Binding>,
    multiplier: f64,
    min: Bound,
    max: Bound,
    units: UnitGroup,
    current_unit: RefCell<UnitRef>,
    constant: Cell<f64>,
    last_value: Cell<f64>,
    last_automatic: Cell<bool>,
    changes: Notifier<ChangeEvent>,
    source_subscription: RefCell<Option<Subscription>>,
}

/// A single logical value in canonical units.
///
/// Cloning yields another handle to the same model.
///
/// ```
/// use unitview_model::{ModelConfig, ValueModel};
/// use unitview_units::UnitGroup;
///
/// let model = ValueModel::constant_with(0.5, ModelConfig::default().with_units(UnitGroup::length()));
/// model.set_current_unit_by_symbol("cm")?;
/// assert_eq!(model.current_unit().symbol(), "cm");
/// assert_eq!(model.value()?, 0.5);
/// # Ok::<(), unitview_model::ModelError>(())
/// ```
#[derive(Clone)]
pub struct ValueModel {
    inner: Rc<ModelInner>,
}

/// Non-owning handle to a [`ValueModel`].
#[derive(Clone, Debug)]
pub struct WeakValueModel {
    inner: Weak<ModelInner>,
}

impl WeakValueModel {
    /// Recover the model if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<ValueModel> {
        self.inner.upgrade().map(|inner| ValueModel { inner })
    }
}

impl ValueModel {
    fn from_parts(name: String, binding: Option<Binding>, value: f64, config: ModelConfig) -> Self {
        let ModelConfig {
            units,
            min,
            max,
            multiplier,
        } = config;
        let current_unit = units.default_unit();
        Self {
            inner: Rc::new(ModelInner {
                name,
                binding,
                multiplier,
                min,
                max,
                units,
                current_unit: RefCell::new(current_unit),
                constant: Cell::new(value),
                last_value: Cell::new(value),
                last_automatic: Cell::new(false),
                changes: Notifier::new(),
                source_subscription: RefCell::new(None),
            }),
        }
    }

    /// A dimensionless, unbounded constant.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::constant_with(value, ModelConfig::default())
    }

    /// A constant with explicit units and bounds. The multiplier is ignored.
    #[must_use]
    pub fn constant_with(value: f64, config: ModelConfig) -> Self {
        Self::from_parts(
            CONSTANT_NAME.to_owned(),
            None,
            value,
            config.with_multiplier(1.0),
        )
    }

    /// Bind to `property` of `source`, resolving its accessors by name.
    ///
    /// # Errors
    ///
    /// [`ModelError::Binding`] if the source does not know `property`.
    pub fn bind(
        source: Rc<dyn PropertySource>,
        property: &str,
        config: ModelConfig,
    ) -> Result<Self> {
        let accessors =
            Rc::clone(&source)
                .resolve(property)
                .ok_or_else(|| ModelError::Binding {
                    property: property.to_owned(),
                    reason: "no accessor resolved for this name".to_owned(),
                })?;
        Ok(Self::with_accessors(source, property, accessors, config))
    }

    /// Bind to `source` using explicitly supplied accessors.
    #[must_use]
    pub fn with_accessors(
        source: Rc<dyn PropertySource>,
        property: &str,
        accessors: PropertyAccessors,
        config: ModelConfig,
    ) -> Self {
        Self::from_parts(
            property.to_owned(),
            Some(Binding { source, accessors }),
            0.0,
            config,
        )
    }

    /// Property name, or `"constant"` for constant models.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether the model mirrors an external property.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.inner.binding.is_some()
    }

    /// Raw-to-canonical factor (`1` for constants).
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.inner.multiplier
    }

    /// Current value in canonical units.
    ///
    /// # Errors
    ///
    /// [`ModelError::Binding`] if the bound reader fails.
    pub fn value(&self) -> Result<f64> {
        match &self.inner.binding {
            None => Ok(self.inner.constant.get()),
            Some(binding) => binding
                .accessors
                .read()
                .map(|raw| raw * self.inner.multiplier)
                .map_err(|err| ModelError::access(&self.inner.name, &err)),
        }
    }

    /// Set the value, in canonical units.
    ///
    /// A constant stores the value and notifies. A bound model writes through;
    /// the notification then arrives from the source.
    ///
    /// # Errors
    ///
    /// [`ModelError::Unsupported`] for a read-only property,
    /// [`ModelError::Binding`] if the writer fails.
    pub fn set_value(&self, value: f64) -> Result<()> {
        let Some(binding) = &self.inner.binding else {
            self.inner.constant.set(value);
            self.inner.last_value.set(value);
            self.fire_state_changed();
            return Ok(());
        };
        match binding.accessors.write(value / self.inner.multiplier) {
            None => Err(ModelError::Unsupported {
                property: self.inner.name.clone(),
            }),
            Some(result) => result.map_err(|err| ModelError::access(&self.inner.name, &err)),
        }
    }

    /// Whether the property has an automatic-flag pair.
    #[must_use]
    pub fn is_automatic_available(&self) -> bool {
        self.inner
            .binding
            .as_ref()
            .is_some_and(|binding| binding.accessors.has_automatic())
    }

    /// Whether the value is currently computed automatically.
    ///
    /// `false` when unavailable or when the reader fails.
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        let Some(binding) = &self.inner.binding else {
            return false;
        };
        match binding.accessors.read_automatic() {
            None => false,
            Some(Ok(automatic)) => automatic,
            Some(Err(err)) => {
                warn!(property = %self.inner.name, error = %err, "automatic flag read failed");
                false
            }
        }
    }

    /// Switch automatic mode.
    ///
    /// Without an automatic pair this only notifies, so observers can resync.
    /// A failing writer is logged and also answered with a notification.
    pub fn set_automatic(&self, automatic: bool) {
        let result = self
            .inner
            .binding
            .as_ref()
            .and_then(|binding| binding.accessors.write_automatic(automatic));
        match result {
            None => self.fire_state_changed(),
            Some(Ok(())) => {}
            Some(Err(err)) => {
                warn!(
                    property = %self.inner.name,
                    automatic,
                    error = %err,
                    "automatic flag write failed"
                );
                self.fire_state_changed();
            }
        }
    }

    /// The unit values are displayed in.
    #[must_use]
    pub fn current_unit(&self) -> UnitRef {
        Rc::clone(&self.inner.current_unit.borrow())
    }

    /// Select the display unit. Notifies only if the unit actually changes.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnitNotInGroup`] if `unit` is not part of the unit group.
    pub fn set_current_unit(&self, unit: &dyn Unit) -> Result<()> {
        self.set_current_unit_by_symbol(unit.symbol())
    }

    /// Select the display unit by symbol.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnitNotInGroup`] if no unit of the group has `symbol`.
    pub fn set_current_unit_by_symbol(&self, symbol: &str) -> Result<()> {
        let unit = self
            .inner
            .units
            .find(symbol)
            .ok_or_else(|| ModelError::UnitNotInGroup {
                unit: symbol.to_owned(),
                group: self.inner.units.name().to_owned(),
            })?;
        if self.inner.current_unit.borrow().symbol() == symbol {
            return Ok(());
        }
        *self.inner.current_unit.borrow_mut() = unit;
        debug!(property = %self.inner.name, unit = symbol, "display unit changed");
        self.fire_state_changed();
        Ok(())
    }

    /// The unit group given at construction.
    #[must_use]
    pub fn unit_group(&self) -> &UnitGroup {
        &self.inner.units
    }

    /// Advisory lower bound, canonical units. Read on every call.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of a model-backed bound.
    pub fn minimum(&self) -> Result<f64> {
        self.inner.min.value()
    }

    /// Advisory upper bound, canonical units. Read on every call.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of a model-backed bound.
    pub fn maximum(&self) -> Result<f64> {
        self.inner.max.value()
    }

    /// Register a listener.
    ///
    /// The first listener subscribes the model to its source and snapshots
    /// the current value and automatic flag.
    pub fn add_change_listener(&self, listener: Listener<ChangeEvent>) -> ListenerId {
        if self.inner.changes.is_empty() {
            self.attach_source();
        }
        let id = self.inner.changes.add(listener);
        debug!(
            property = %self.inner.name,
            listeners = self.inner.changes.len(),
            "change listener added"
        );
        id
    }

    /// Unregister a listener. The last removal unsubscribes from the source.
    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        let removed = self.inner.changes.remove(id);
        if self.inner.changes.is_empty() {
            let subscription = self.inner.source_subscription.borrow_mut().take();
            if subscription.is_some() {
                debug!(property = %self.inner.name, "unsubscribed from source");
            }
        }
        debug!(
            property = %self.inner.name,
            listeners = self.inner.changes.len(),
            removed,
            "change listener removed"
        );
        removed
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.changes.len()
    }

    /// Whether the model is dispatching a change right now.
    #[must_use]
    pub fn is_notifying(&self) -> bool {
        self.inner.changes.is_notifying()
    }

    /// A handle that does not keep the model alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakValueModel {
        WeakValueModel {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Notify every listener.
    pub(crate) fn fire_state_changed(&self) {
        trace!(
            property = %self.inner.name,
            listeners = self.inner.changes.len(),
            "firing change"
        );
        self.inner.changes.notify(&ChangeEvent);
    }

    fn attach_source(&self) {
        let Some(binding) = &self.inner.binding else {
            return;
        };
        let model = self.downgrade();
        let subscription = binding.source.subscribe(Rc::new(move |_: &ChangeEvent| {
            if let Some(model) = model.upgrade() {
                model.source_changed();
            }
        }));
        *self.inner.source_subscription.borrow_mut() = Some(subscription);

        match self.value() {
            Ok(value) => self.inner.last_value.set(value),
            Err(err) => warn!(property = %self.inner.name, error = %err, "snapshot read failed"),
        }
        self.inner.last_automatic.set(self.is_automatic());
        debug!(property = %self.inner.name, "subscribed to source");
    }

    fn source_changed(&self) {
        let value = match self.value() {
            Ok(value) => value,
            Err(err) => {
                warn!(property = %self.inner.name, error = %err, "source change read failed");
                return;
            }
        };
        let automatic = self.is_automatic();
        if same_value(value, self.inner.last_value.get())
            && automatic == self.inner.last_automatic.get()
        {
            trace!(property = %self.inner.name, "source change does not affect property");
            return;
        }
        self.inner.last_value.set(value);
        self.inner.last_automatic.set(automatic);
        self.fire_state_changed();
    }
}

fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl Observable for ValueModel {
    type Event = ChangeEvent;

    fn add_change_listener(&self, listener: Listener<ChangeEvent>) -> ListenerId {
        ValueModel::add_change_listener(self, listener)
    }

    fn remove_change_listener(&self, id: ListenerId) -> bool {
        ValueModel::remove_change_listener(self, id)
    }
}

impl fmt::Display for ValueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bound() {
            write!(f, "ValueModel[{}]", self.inner.name)
        } else {
            write!(f, "ValueModel[constant={}]", self.inner.constant.get())
        }
    }
}

impl fmt::Debug for ValueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueModel")
            .field("name", &self.inner.name)
            .field("bound", &self.is_bound())
            .field("unit", &self.inner.current_unit.borrow().symbol())
            .field("listeners", &self.inner.changes.len())
            .finish()
    }
}
