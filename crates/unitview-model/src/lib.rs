#![forbid(unsafe_code)]

//! A numeric property proxy with synchronized views.
//!
//! One logical value, held in canonical units by a [`ValueModel`], is
//! projected through three adapters at once:
//!
//! - [`SpinnerAdapter`]: the value in the current display unit, steppable
//!   between advisory bounds.
//! - [`RangeAdapter`]: a position in `[0, RANGE_MAX]` on a linear or
//!   linear-then-quadratic scale.
//! - [`ToggleAdapter`]: the "computed automatically" flag.
//!
//! A model is either a constant or bound to a property of a
//! [`PropertySource`]. When bound, the source is the source of truth: writes go
//! through, and the source's change notifications are re-broadcast to the
//! model's listeners only when the property actually changed.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use unitview_model::{ModelConfig, RangeAdapter, SpinnerAdapter, ValueModel};
//!
//! let model = ValueModel::constant_with(2.0, ModelConfig::default().with_bounds(0.0, 10.0));
//! let spinner = SpinnerAdapter::new(&model);
//! let range = RangeAdapter::linear(&model, 0.0, 10.0);
//!
//! let refreshes = Rc::new(Cell::new(0));
//! let r = Rc::clone(&refreshes);
//! let _sub = range.subscribe(move |_| r.set(r.get() + 1));
//!
//! spinner.set_value(7.5)?;
//! assert_eq!(range.value()?, 750);
//! assert_eq!(refreshes.get(), 1);
//! # Ok::<(), unitview_model::ModelError>(())
//! ```
//!
//! # Threading
//!
//! Everything is single-threaded and synchronous; handles are `!Send`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod model;
pub mod reactive;
pub mod source;

pub use adapters::{
    RANGE_MAX, RangeAdapter, ScaleCurve, SelectedChange, SpinnerAdapter, ToggleAdapter,
};
pub use config::{Bound, ModelConfig};
pub use error::{AccessError, ModelError, Result};
pub use model::{ValueModel, WeakValueModel};
pub use reactive::{
    ChangeEvent, GuardScope, Listener, ListenerId, Notifier, Observable, ReentrancyGuard,
    Subscription,
};
pub use source::{PropertyAccessors, PropertySource, ReadFn, WriteFn};
