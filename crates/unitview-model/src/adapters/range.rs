#![forbid(unsafe_code)]

//! Discrete `[0, RANGE_MAX]` projection of a model.
//!
//! Positions map to values through a [`ScaleCurve`] anchored on three
//! control-point models: `low` at position `0`, `mid` at the breakpoint and
//! `high` at [`RANGE_MAX`].
//!
//! # Invariants
//!
//! 1. `value()` is monotone non-decreasing in the model value.
//! 2. Values at or below `low` map to `0`; at or above `high` to [`RANGE_MAX`].
//! 3. Writes are rounded in the model's display unit before they reach the model.
//! 4. With model-backed bounds, a change of either bound re-notifies the main
//!    model's listeners, unless the main model is already dispatching.

use std::cell::Cell;

use tracing::trace;

use super::curve::ScaleCurve;
use crate::error::Result;
use crate::model::ValueModel;
use crate::reactive::{ChangeEvent, Listener, ListenerId, Observable, Subscription};

/// Largest position of a range adapter.
pub const RANGE_MAX: i32 = 1000;

const MIDPOINT_BREAKPOINT: f64 = 0.5;

/// Slider view of a [`ValueModel`].
///
/// ```
/// use unitview_model::{RangeAdapter, ValueModel, RANGE_MAX};
///
/// let model = ValueModel::constant(0.0);
/// let range = RangeAdapter::with_midpoint(&model, 0.0, 50.0, 100.0)?;
/// range.set_value(RANGE_MAX / 2)?;
/// assert_eq!(model.value()?, 50.0);
/// assert_eq!(range.value()?, 500);
/// # Ok::<(), unitview_model::ModelError>(())
/// ```
#[derive(Debug)]
pub struct RangeAdapter {
    model: ValueModel,
    low: ValueModel,
    mid: ValueModel,
    high: ValueModel,
    curve: ScaleCurve,
    adjusting: Cell<bool>,
    _bound_subscriptions: Vec<Subscription>,
}

impl RangeAdapter {
    /// Linear mapping between two bound models, followed as they change.
    #[must_use]
    pub fn linear_models(model: &ValueModel, low: &ValueModel, high: &ValueModel) -> Self {
        let bound_subscriptions = [low, high]
            .into_iter()
            .map(|bound| {
                let weak = model.downgrade();
                bound.subscribe(move |_: &ChangeEvent| {
                    let Some(model) = weak.upgrade() else {
                        return;
                    };
                    if model.is_notifying() {
                        trace!(property = %model.name(), "range bound change during dispatch ignored");
                        return;
                    }
                    model.fire_state_changed();
                })
            })
            .collect();
        Self {
            model: model.clone(),
            low: low.clone(),
            mid: high.clone(),
            high: high.clone(),
            curve: ScaleCurve::linear(),
            adjusting: Cell::new(false),
            _bound_subscriptions: bound_subscriptions,
        }
    }

    /// Linear mapping between two fixed values.
    #[must_use]
    pub fn linear(model: &ValueModel, low: f64, high: f64) -> Self {
        let high = ValueModel::constant(high);
        Self::with_points(
            model,
            ValueModel::constant(low),
            high.clone(),
            high,
            ScaleCurve::linear(),
        )
    }

    /// Linear up to `mid` at the halfway position, quadratic up to `high`.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidArgument`](crate::ModelError::InvalidArgument)
    /// unless `low < mid ≤ high`.
    pub fn with_midpoint(model: &ValueModel, low: f64, mid: f64, high: f64) -> Result<Self> {
        Self::new(model, low, MIDPOINT_BREAKPOINT, mid, high)
    }

    /// Linear up to `mid` at `breakpoint`, quadratic up to `high`.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidArgument`](crate::ModelError::InvalidArgument)
    /// unless `low < mid ≤ high` and `0 < breakpoint < 1`.
    pub fn new(model: &ValueModel, low: f64, breakpoint: f64, mid: f64, high: f64) -> Result<Self> {
        let curve = ScaleCurve::new(low, breakpoint, mid, high)?;
        Ok(Self::with_points(
            model,
            ValueModel::constant(low),
            ValueModel::constant(mid),
            ValueModel::constant(high),
            curve,
        ))
    }

    fn with_points(
        model: &ValueModel,
        low: ValueModel,
        mid: ValueModel,
        high: ValueModel,
        curve: ScaleCurve,
    ) -> Self {
        Self {
            model: model.clone(),
            low,
            mid,
            high,
            curve,
            adjusting: Cell::new(false),
            _bound_subscriptions: Vec::new(),
        }
    }

    /// The underlying model.
    #[must_use]
    pub fn model(&self) -> &ValueModel {
        &self.model
    }

    /// Current position in `[0, RANGE_MAX]`.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of the model or of a control point.
    pub fn value(&self) -> Result<i32> {
        let value = self.model.value()?;
        let low = self.low.value()?;
        let high = self.high.value()?;
        if value.is_nan() || value <= low {
            return Ok(0);
        }
        if value >= high {
            return Ok(RANGE_MAX);
        }
        let x = self.curve.inverse(value, low, self.mid.value()?);
        // x is clamped to [0, 1], so the cast cannot overflow.
        Ok((x * f64::from(RANGE_MAX)) as i32)
    }

    /// Move to position `n`, clamped to `[0, RANGE_MAX]`.
    ///
    /// Dropped while the model is notifying.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of a control point or a model write failure.
    pub fn set_value(&self, n: i32) -> Result<()> {
        if self.model.is_notifying() {
            trace!(property = %self.model.name(), position = n, "range write during dispatch dropped");
            return Ok(());
        }
        let x = f64::from(n.clamp(0, RANGE_MAX)) / f64::from(RANGE_MAX);
        let raw = self
            .curve
            .forward(x, self.low.value()?, self.mid.value()?);
        let unit = self.model.current_unit();
        self.model
            .set_value(unit.to_canonical(unit.round(unit.to_display(raw))))
    }

    /// Always `0`.
    #[must_use]
    pub fn extent(&self) -> i32 {
        0
    }

    /// Always `0`.
    #[must_use]
    pub fn minimum(&self) -> i32 {
        0
    }

    /// Always [`RANGE_MAX`].
    #[must_use]
    pub fn maximum(&self) -> i32 {
        RANGE_MAX
    }

    /// Ignored; the extent is fixed.
    pub fn set_extent(&self, _extent: i32) {}

    /// Ignored; the minimum is fixed.
    pub fn set_minimum(&self, _minimum: i32) {}

    /// Ignored; the maximum is fixed.
    pub fn set_maximum(&self, _maximum: i32) {}

    /// Whether the user is in the middle of a drag.
    #[must_use]
    pub fn is_adjusting(&self) -> bool {
        self.adjusting.get()
    }

    /// Record drag state. Local to this adapter; nothing is notified.
    pub fn set_adjusting(&self, adjusting: bool) {
        self.adjusting.set(adjusting);
    }

    /// Set every range property at once. Only `adjusting` and `value` take effect.
    ///
    /// # Errors
    ///
    /// Same as [`set_value`](Self::set_value).
    pub fn set_range_properties(
        &self,
        value: i32,
        extent: i32,
        minimum: i32,
        maximum: i32,
        adjusting: bool,
    ) -> Result<()> {
        self.set_extent(extent);
        self.set_minimum(minimum);
        self.set_maximum(maximum);
        self.set_adjusting(adjusting);
        self.set_value(value)
    }

    /// Subscribe to model changes.
    pub fn subscribe(&self, callback: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        Observable::subscribe(&self.model, callback)
    }
}

impl Observable for RangeAdapter {
    type Event = ChangeEvent;

    fn add_change_listener(&self, listener: Listener<ChangeEvent>) -> ListenerId {
        self.model.add_change_listener(listener)
    }

    fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.model.remove_change_listener(id)
    }
}
