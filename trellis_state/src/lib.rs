// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis State: a single source of truth for widget values.
//!
//! Every Trellis widget that holds an "open" flag or a selected value does so
//! through a [`Controllable`]. A `Controllable` runs in one of two modes, chosen
//! once at construction:
//!
//! - **Controlled**: the host owns the value. [`Controllable::value`] always
//!   mirrors the last value passed to [`Controllable::sync`], and
//!   [`Controllable::set`] never writes it; it only reports the requested
//!   change through the `on_change` callback.
//! - **Uncontrolled**: the widget owns the value, seeded from a default.
//!   [`Controllable::set`] stores the new value and reports it.
//!
//! In both modes the callback fires only when the requested value differs from
//! the current one.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_state::Controllable;
//!
//! // Uncontrolled: the widget owns its open flag.
//! let mut open = Controllable::new(None, false);
//! assert!(open.set(true));
//! assert!(*open.value());
//!
//! // Controlled: the host owns it; `set` only reports intent.
//! let mut open = Controllable::new(Some(false), false);
//! assert!(open.set(true));
//! assert!(!*open.value());
//! open.sync(Some(true));
//! assert!(*open.value());
//! ```
//!
//! ## Switching modes
//!
//! Passing `Some(..)` to [`Controllable::sync`] on an uncontrolled instance (or
//! `None` on a controlled one) is a host bug. The instance keeps its original
//! mode, logs a warning, and trips a debug assertion.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

/// Which side owns a [`Controllable`]'s value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The host owns the value and feeds it back through [`Controllable::sync`].
    Controlled,
    /// The widget owns the value.
    Uncontrolled,
}

type ChangeFn<T> = Box<dyn FnMut(&T)>;

/// A value that is either owned by the widget or mirrored from the host.
pub struct Controllable<T> {
    value: T,
    mode: Mode,
    on_change: Option<ChangeFn<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controllable")
            .field("value", &self.value)
            .field("mode", &self.mode)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<T: PartialEq> Controllable<T> {
    /// Create a controllable value.
    ///
    /// If `controlled` is `Some`, the instance is controlled for its whole
    /// lifetime and `default` is ignored. Otherwise it owns its value, seeded
    /// from `default`.
    pub fn new(controlled: Option<T>, default: T) -> Self {
        match controlled {
            Some(value) => Self::controlled(value),
            None => Self::uncontrolled(default),
        }
    }

    /// Create an instance whose value is owned by the host.
    pub fn controlled(value: T) -> Self {
        Self {
            value,
            mode: Mode::Controlled,
            on_change: None,
        }
    }

    /// Create an instance that owns its value.
    pub fn uncontrolled(default: T) -> Self {
        Self {
            value: default,
            mode: Mode::Uncontrolled,
            on_change: None,
        }
    }

    /// Attach the change callback (builder form).
    #[must_use]
    pub fn with_on_change(mut self, on_change: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Replace or clear the change callback.
    pub fn set_on_change(&mut self, on_change: Option<Box<dyn FnMut(&T)>>) {
        self.on_change = on_change;
    }

    /// Current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Ownership mode chosen at construction.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` if the host owns the value.
    pub fn is_controlled(&self) -> bool {
        self.mode == Mode::Controlled
    }

    /// Request a new value.
    ///
    /// Returns `true` if the request differed from the current value (and the
    /// callback, if any, was invoked). In controlled mode the stored value is
    /// left untouched until the host calls [`Controllable::sync`].
    pub fn set(&mut self, next: T) -> bool {
        if next == self.value {
            return false;
        }
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&next);
        }
        if self.mode == Mode::Uncontrolled {
            self.value = next;
        }
        true
    }

    /// Request a value computed from the current one.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.value);
        self.set(next)
    }

    /// Feed the host-supplied value for this render.
    ///
    /// In controlled mode `Some(value)` replaces the mirrored value without
    /// invoking the callback. Uncontrolled instances expect `None`.
    pub fn sync(&mut self, controlled: Option<T>) {
        match (self.mode, controlled) {
            (Mode::Controlled, Some(value)) => self.value = value,
            (Mode::Uncontrolled, None) => {}
            (mode, controlled) => {
                let requested = if controlled.is_some() {
                    Mode::Controlled
                } else {
                    Mode::Uncontrolled
                };
                tracing::warn!(?mode, ?requested, "controllable switched ownership mode; ignoring");
                debug_assert_eq!(
                    mode, requested,
                    "a Controllable must not switch between controlled and uncontrolled"
                );
            }
        }
    }
}

impl<T: PartialEq + Default> Default for Controllable<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn uncontrolled_set_stores_and_reports() {
        let (log, cb) = recorder::<bool>();
        let mut open = Controllable::new(None, false).with_on_change(cb);

        assert!(!open.is_controlled());
        assert!(open.set(true));
        assert!(*open.value());
        assert_eq!(*log.borrow(), vec![true]);
    }

    #[test]
    fn controlled_set_only_reports() {
        let (log, cb) = recorder::<bool>();
        let mut open = Controllable::new(Some(false), true).with_on_change(cb);

        // Default is ignored in controlled mode.
        assert!(!*open.value());
        assert!(open.set(true));
        assert!(!*open.value());
        assert_eq!(*log.borrow(), vec![true]);

        // Host accepts the change on its next render.
        open.sync(Some(true));
        assert!(*open.value());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn unchanged_requests_do_not_fire() {
        let (log, cb) = recorder::<u8>();
        let mut value = Controllable::uncontrolled(3_u8).with_on_change(cb);
        assert!(!value.set(3));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn update_uses_current_value() {
        let mut count = Controllable::uncontrolled(1_u32);
        count.update(|c| c + 1);
        count.update(|c| c * 10);
        assert_eq!(*count.value(), 20);
    }

    #[test]
    fn uncontrolled_sync_none_is_noop() {
        let mut value = Controllable::uncontrolled(5_i32);
        value.sync(None);
        assert_eq!(*value.value(), 5);
        assert_eq!(value.mode(), Mode::Uncontrolled);
    }

    #[test]
    fn controlled_value_tracks_every_sync() {
        let mut value = Controllable::controlled(Some('a'));
        value.sync(Some(Some('b')));
        assert_eq!(*value.value(), Some('b'));
        value.sync(Some(None));
        assert_eq!(*value.value(), None);
    }
}
