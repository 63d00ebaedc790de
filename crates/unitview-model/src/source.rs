#![forbid(unsafe_code)]

//! The contract a bound object fulfils.
//!
//! A [`PropertySource`] announces "something changed" through
//! [`PropertySource::subscribe`] and maps a property name to a set of
//! [`PropertyAccessors`]. A name the source does not know is rejected when the
//! model is bound, never at first use.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use unitview_model::{
//!     AccessError, ChangeEvent, Listener, Notifier, PropertyAccessors, PropertySource,
//!     Subscription,
//! };
//!
//! struct Fin {
//!     span: Cell<f64>,
//!     changes: Notifier<ChangeEvent>,
//! }
//!
//! impl PropertySource for Fin {
//!     fn subscribe(&self, listener: Listener<ChangeEvent>) -> Subscription {
//!         self.changes.subscribe_listener(listener)
//!     }
//!
//!     fn resolve(self: Rc<Self>, property: &str) -> Option<PropertyAccessors> {
//!         match property {
//!             "Span" => {
//!                 let reader = Rc::clone(&self);
//!                 Some(PropertyAccessors::read_write(
//!                     move || Ok::<_, AccessError>(reader.span.get()),
//!                     move |v| {
//!                         self.span.set(v);
//!                         self.changes.notify(&ChangeEvent);
//!                         Ok(())
//!                     },
//!                 ))
//!             }
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::AccessError;
use crate::reactive::{ChangeEvent, Listener, Subscription};

/// Reader half of an accessor pair.
pub type ReadFn<T> = Rc<dyn Fn() -> Result<T, AccessError>>;

/// Writer half of an accessor pair.
pub type WriteFn<T> = Rc<dyn Fn(T) -> Result<(), AccessError>>;

/// An object whose properties a model can mirror.
pub trait PropertySource {
    /// Register for change notifications. Dropping the subscription unregisters.
    fn subscribe(&self, listener: Listener<ChangeEvent>) -> Subscription;

    /// Resolve the accessors for `property`, or `None` if it does not exist.
    fn resolve(self: Rc<Self>, property: &str) -> Option<PropertyAccessors>;
}

#[derive(Clone)]
struct AutomaticAccessors {
    read: ReadFn<bool>,
    write: WriteFn<bool>,
}

/// Reader, optional writer and optional automatic-flag pair for one property.
///
/// Values crossing these accessors are raw (before the model's multiplier).
#[derive(Clone)]
pub struct PropertyAccessors {
    read: ReadFn<f64>,
    write: Option<WriteFn<f64>>,
    automatic: Option<AutomaticAccessors>,
}

impl PropertyAccessors {
    /// A property that can only be read.
    pub fn read_only(read: impl Fn() -> Result<f64, AccessError> + 'static) -> Self {
        Self {
            read: Rc::new(read),
            write: None,
            automatic: None,
        }
    }

    /// A readable and writable property.
    pub fn read_write(
        read: impl Fn() -> Result<f64, AccessError> + 'static,
        write: impl Fn(f64) -> Result<(), AccessError> + 'static,
    ) -> Self {
        Self {
            read: Rc::new(read),
            write: Some(Rc::new(write)),
            automatic: None,
        }
    }

    /// Attach the "is automatic" / "set automatic" pair.
    #[must_use]
    pub fn with_automatic(
        mut self,
        read: impl Fn() -> Result<bool, AccessError> + 'static,
        write: impl Fn(bool) -> Result<(), AccessError> + 'static,
    ) -> Self {
        self.automatic = Some(AutomaticAccessors {
            read: Rc::new(read),
            write: Rc::new(write),
        });
        self
    }

    /// Whether a writer is present.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.write.is_some()
    }

    /// Whether the automatic pair is present.
    #[must_use]
    pub fn has_automatic(&self) -> bool {
        self.automatic.is_some()
    }

    pub(crate) fn read(&self) -> Result<f64, AccessError> {
        (self.read)()
    }

    pub(crate) fn write(&self, raw: f64) -> Option<Result<(), AccessError>> {
        self.write.as_ref().map(|write| write(raw))
    }

    pub(crate) fn read_automatic(&self) -> Option<Result<bool, AccessError>> {
        self.automatic.as_ref().map(|auto| (auto.read)())
    }

    pub(crate) fn write_automatic(&self, automatic: bool) -> Option<Result<(), AccessError>> {
        self.automatic.as_ref().map(|auto| (auto.write)(automatic))
    }
}

impl fmt::Debug for PropertyAccessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAccessors")
            .field("writable", &self.is_writable())
            .field("automatic", &self.has_automatic())
            .finish()
    }
}
