#![forbid(unsafe_code)]

//! Construction parameters for a [`ValueModel`].

use unitview_units::UnitGroup;

use crate::error::Result;
use crate::model::ValueModel;

/// A lower or upper limit, either fixed or read from another model.
#[derive(Clone, Debug)]
pub enum Bound {
    /// A constant limit in canonical units. May be infinite.
    Fixed(f64),
    /// A limit that follows another model's current value.
    Model(ValueModel),
}

impl Bound {
    /// Current value of the limit, in canonical units.
    ///
    /// # Errors
    ///
    /// Propagates a read failure of a [`Bound::Model`] limit.
    pub fn value(&self) -> Result<f64> {
        match self {
            Self::Fixed(v) => Ok(*v),
            Self::Model(model) => model.value(),
        }
    }
}

impl From<f64> for Bound {
    fn from(v: f64) -> Self {
        Self::Fixed(v)
    }
}

impl From<ValueModel> for Bound {
    fn from(model: ValueModel) -> Self {
        Self::Model(model)
    }
}

impl From<&ValueModel> for Bound {
    fn from(model: &ValueModel) -> Self {
        Self::Model(model.clone())
    }
}

/// Units, advisory bounds and raw-to-canonical multiplier of a model.
///
/// The default is dimensionless, unbounded, with multiplier `1`.
///
/// ```
/// use unitview_model::ModelConfig;
/// use unitview_units::UnitGroup;
///
/// // A diameter mirrored from a "Radius" property.
/// let config = ModelConfig::default()
///     .with_units(UnitGroup::length())
///     .with_min(0.0)
///     .with_multiplier(2.0);
/// assert_eq!(config.multiplier(), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub(crate) units: UnitGroup,
    pub(crate) min: Bound,
    pub(crate) max: Bound,
    pub(crate) multiplier: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            units: UnitGroup::none(),
            min: Bound::Fixed(f64::NEG_INFINITY),
            max: Bound::Fixed(f64::INFINITY),
            multiplier: 1.0,
        }
    }
}

impl ModelConfig {
    /// Set the unit group. The model starts in the group's default unit.
    #[must_use]
    pub fn with_units(mut self, units: UnitGroup) -> Self {
        self.units = units;
        self
    }

    /// Set the advisory lower bound.
    #[must_use]
    pub fn with_min(mut self, min: impl Into<Bound>) -> Self {
        self.min = min.into();
        self
    }

    /// Set the advisory upper bound.
    #[must_use]
    pub fn with_max(mut self, max: impl Into<Bound>) -> Self {
        self.max = max.into();
        self
    }

    /// Set both advisory bounds.
    #[must_use]
    pub fn with_bounds(self, min: impl Into<Bound>, max: impl Into<Bound>) -> Self {
        self.with_min(min).with_max(max)
    }

    /// Set the factor applied to raw accessor values (`canonical = raw * multiplier`).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Unit group.
    #[must_use]
    pub fn units(&self) -> &UnitGroup {
        &self.units
    }

    /// Raw-to-canonical factor.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}
