#![forbid(unsafe_code)]

//! Stepped, unit-aware projection of a model.

use tracing::trace;
use unitview_units::approx_eq;

use crate::error::Result;
use crate::model::ValueModel;
use crate::reactive::{ChangeEvent, Listener, ListenerId, Observable, Subscription};

/// Spinner view of a [`ValueModel`]: the value in the current display unit,
/// with next/previous steps clamped to the model's bounds.
///
/// Listeners registered here are registered on the model.
///
/// ```
/// use unitview_model::{ModelConfig, SpinnerAdapter, ValueModel};
///
/// let model = ValueModel::constant_with(9.5, ModelConfig::default().with_bounds(0.0, 10.0));
/// let spinner = SpinnerAdapter::new(&model);
/// assert_eq!(spinner.next_value()?, Some(10.0));
/// spinner.set_value(10.0)?;
/// assert_eq!(spinner.next_value()?, None);
/// # Ok::<(), unitview_model::ModelError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SpinnerAdapter {
    model: ValueModel,
}

impl SpinnerAdapter {
    /// Create a spinner view of `model`.
    #[must_use]
    pub fn new(model: &ValueModel) -> Self {
        Self {
            model: model.clone(),
        }
    }

    /// The underlying model.
    #[must_use]
    pub fn model(&self) -> &ValueModel {
        &self.model
    }

    /// Current value in the display unit.
    ///
    /// # Errors
    ///
    /// Propagates a model read failure.
    pub fn value(&self) -> Result<f64> {
        Ok(self.model.current_unit().to_display(self.model.value()?))
    }

    /// Write a display-unit value. Dropped while the model is notifying.
    ///
    /// # Errors
    ///
    /// Propagates a model write failure.
    pub fn set_value(&self, shown: f64) -> Result<()> {
        if self.model.is_notifying() {
            trace!(property = %self.model.name(), value = shown, "spinner write during dispatch dropped");
            return Ok(());
        }
        let unit = self.model.current_unit();
        self.model.set_value(unit.to_canonical(shown))
    }

    /// Next step upwards, clamped to the maximum; `None` at the maximum.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of the value or of the bound.
    pub fn next_value(&self) -> Result<Option<f64>> {
        let unit = self.model.current_unit();
        let current = unit.to_display(self.model.value()?);
        let max = unit.to_display(self.model.maximum()?);
        if approx_eq(current, max) {
            return Ok(None);
        }
        Ok(Some(unit.next_step(current).min(max)))
    }

    /// Next step downwards, clamped to the minimum; `None` at the minimum.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of the value or of the bound.
    pub fn previous_value(&self) -> Result<Option<f64>> {
        let unit = self.model.current_unit();
        let current = unit.to_display(self.model.value()?);
        let min = unit.to_display(self.model.minimum()?);
        if approx_eq(current, min) {
            return Ok(None);
        }
        Ok(Some(unit.previous_step(current).max(min)))
    }

    /// Lower bound in the display unit, recomputed on every call.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of a model-backed bound.
    pub fn minimum(&self) -> Result<f64> {
        Ok(self.model.current_unit().to_display(self.model.minimum()?))
    }

    /// Upper bound in the display unit, recomputed on every call.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of a model-backed bound.
    pub fn maximum(&self) -> Result<f64> {
        Ok(self.model.current_unit().to_display(self.model.maximum()?))
    }

    /// Subscribe to model changes.
    pub fn subscribe(&self, callback: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        Observable::subscribe(&self.model, callback)
    }
}

impl Observable for SpinnerAdapter {
    type Event = ChangeEvent;

    fn add_change_listener(&self, listener: Listener<ChangeEvent>) -> ListenerId {
        self.model.add_change_listener(listener)
    }

    fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.model.remove_change_listener(id)
    }
}
