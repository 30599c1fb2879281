// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis OTP: state for one-time-code inputs.
//!
//! An [`OtpInput`] is a fixed number of single-character slots plus the index
//! of the slot holding focus. Typing fills a slot and advances, Backspace
//! clears and retreats, and pasting distributes a code across the slots from
//! the focused one onward.
//!
//! Only ASCII letters and digits are accepted. Anything else is dropped
//! without complaint; rejecting a stray keystroke is routine, not an error.
//!
//! ```rust
//! use trellis_otp::{OtpConfig, OtpInput};
//!
//! let mut otp = OtpInput::new(OtpConfig::default());
//! otp.focus(0);
//! assert_eq!(otp.paste(0, "12-34"), 4);
//! assert_eq!(otp.value(), "1234");
//! assert_eq!(otp.active_index(), Some(4));
//! assert!(!otp.is_complete());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use trellis_event_state::Key;
use trellis_state::Controllable;

/// Slot contents: `None` for an empty slot.
pub type Slots = Vec<Option<char>>;

/// Options for an [`OtpInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtpConfig {
    /// Number of slots.
    pub max_length: usize,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self { max_length: 6 }
    }
}

/// Build slot contents from a string, keeping valid characters only.
///
/// The result always has `max_length` entries.
pub fn slots_from_str(text: &str, max_length: usize) -> Slots {
    let mut slots: Slots = text
        .chars()
        .filter(|ch| is_valid(*ch))
        .take(max_length)
        .map(Some)
        .collect();
    slots.resize(max_length, None);
    slots
}

fn is_valid(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

type CompleteFn = Box<dyn FnMut(&str)>;

/// State of a one-time-code input.
pub struct OtpInput {
    slots: Controllable<Slots>,
    max_length: usize,
    active: Option<usize>,
    disabled: bool,
    on_complete: Option<CompleteFn>,
}

impl fmt::Debug for OtpInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpInput")
            .field("slots", &self.slots)
            .field("max_length", &self.max_length)
            .field("active", &self.active)
            .field("disabled", &self.disabled)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl OtpInput {
    /// An empty, uncontrolled input.
    pub fn new(config: OtpConfig) -> Self {
        Self::with_slots(
            Controllable::uncontrolled(vec![None; config.max_length]),
            config,
        )
    }

    /// An input over caller-provided slot state (controlled or seeded).
    ///
    /// Slot vectors of the wrong length are read as if padded or truncated to
    /// `max_length`.
    pub fn with_slots(slots: Controllable<Slots>, config: OtpConfig) -> Self {
        Self {
            slots,
            max_length: config.max_length,
            active: None,
            disabled: false,
            on_complete: None,
        }
    }

    /// Called with the code whenever an edit fills the last empty slot (builder form).
    #[must_use]
    pub fn with_on_complete(mut self, on_complete: impl FnMut(&str) + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Number of slots.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Disable or re-enable input.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.active = None;
        }
    }

    /// Returns `true` if input is ignored.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns `true` if the host owns the slot contents.
    pub fn is_controlled(&self) -> bool {
        self.slots.is_controlled()
    }

    /// Character in slot `index`.
    pub fn slot(&self, index: usize) -> Option<char> {
        if index >= self.max_length {
            return None;
        }
        self.slots.value().get(index).copied().flatten()
    }

    /// Slot contents normalized to `max_length`.
    pub fn slots(&self) -> Slots {
        (0..self.max_length).map(|i| self.slot(i)).collect()
    }

    /// Filled characters in slot order.
    pub fn value(&self) -> String {
        (0..self.max_length).filter_map(|i| self.slot(i)).collect()
    }

    /// Returns `true` if every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.max_length > 0 && (0..self.max_length).all(|i| self.slot(i).is_some())
    }

    /// Slot holding focus.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Slot `index` received focus.
    pub fn focus(&mut self, index: usize) {
        if !self.disabled && index < self.max_length {
            self.active = Some(index);
        }
    }

    /// Focus left the input.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// A character was typed into slot `index`.
    ///
    /// Returns `true` if it was accepted.
    pub fn input(&mut self, index: usize, ch: char) -> bool {
        if self.disabled || index >= self.max_length || !is_valid(ch) {
            return false;
        }
        let mut next = self.slots();
        next[index] = Some(ch);
        self.commit(next);
        self.active = Some((index + 1).min(self.max_length - 1));
        true
    }

    /// A key went down in slot `index`. Returns `true` if it was handled.
    pub fn key_down(&mut self, index: usize, key: Key) -> bool {
        if self.disabled || index >= self.max_length {
            return false;
        }
        match key {
            Key::Backspace | Key::Delete => {
                let mut next = self.slots();
                next[index] = None;
                self.commit(next);
                self.active = Some(index.saturating_sub(1));
                true
            }
            Key::ArrowLeft => {
                self.active = Some(index.saturating_sub(1));
                true
            }
            Key::ArrowRight => {
                self.active = Some((index + 1).min(self.max_length - 1));
                true
            }
            Key::Character(ch) => self.input(index, ch),
            _ => false,
        }
    }

    /// Text was pasted into slot `index`.
    ///
    /// Valid characters fill the slots from `index` onward; those that do not
    /// fit are dropped. Focus moves past the last filled slot, or onto the last
    /// slot. Returns the number of slots filled.
    pub fn paste(&mut self, index: usize, text: &str) -> usize {
        if self.disabled || index >= self.max_length {
            return 0;
        }
        let mut next = self.slots();
        let mut filled = 0;
        for (slot, ch) in next[index..]
            .iter_mut()
            .zip(text.chars().filter(|ch| is_valid(*ch)))
        {
            *slot = Some(ch);
            filled += 1;
        }
        if filled == 0 {
            return 0;
        }
        self.commit(next);
        self.active = Some((index + filled).min(self.max_length - 1));
        filled
    }

    /// Empty every slot and move focus to the first one if focused.
    pub fn clear(&mut self) {
        if self.disabled {
            return;
        }
        self.commit(vec![None; self.max_length]);
        if self.active.is_some() {
            self.active = Some(0);
        }
    }

    /// Feed the host-owned slot contents for this render.
    pub fn sync(&mut self, slots: Option<Slots>) {
        self.slots.sync(slots);
    }

    fn commit(&mut self, next: Slots) {
        let was_complete = self.is_complete();
        let complete = self.max_length > 0 && next.iter().all(Option::is_some);
        let code: Option<String> = complete.then(|| next.iter().flatten().collect());
        if !self.slots.set(next) {
            return;
        }
        if let Some(code) = code {
            if was_complete {
                return;
            }
            tracing::debug!(len = self.max_length, "one-time code complete");
            if let Some(on_complete) = self.on_complete.as_mut() {
                on_complete(&code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use core::cell::RefCell;

    fn otp() -> OtpInput {
        OtpInput::new(OtpConfig::default())
    }

    #[test]
    fn typing_fills_and_advances() {
        let mut otp = otp();
        otp.focus(0);
        assert!(otp.input(0, '7'));
        assert_eq!(otp.slot(0), Some('7'));
        assert_eq!(otp.active_index(), Some(1));

        // Typing into the last slot keeps focus there.
        assert!(otp.input(5, 'a'));
        assert_eq!(otp.active_index(), Some(5));
        assert_eq!(otp.value(), "7a");
    }

    #[test]
    fn invalid_characters_are_ignored() {
        let mut otp = otp();
        otp.focus(2);
        assert!(!otp.input(2, '-'));
        assert!(!otp.input(2, ' '));
        assert!(!otp.input(2, 'é'));
        assert!(!otp.input(9, '1'));
        assert_eq!(otp.value(), "");
        assert_eq!(otp.active_index(), Some(2));
    }

    #[test]
    fn backspace_clears_and_retreats() {
        let mut otp = otp();
        otp.paste(0, "123");
        assert!(otp.key_down(2, Key::Backspace));
        assert_eq!(otp.value(), "12");
        assert_eq!(otp.active_index(), Some(1));

        assert!(otp.key_down(0, Key::Delete));
        assert_eq!(otp.slot(0), None);
        assert_eq!(otp.active_index(), Some(0));
    }

    #[test]
    fn arrows_move_focus_only() {
        let mut otp = otp();
        otp.paste(0, "12");
        assert!(otp.key_down(1, Key::ArrowLeft));
        assert_eq!(otp.active_index(), Some(0));
        assert!(otp.key_down(0, Key::ArrowLeft));
        assert_eq!(otp.active_index(), Some(0));
        assert!(otp.key_down(5, Key::ArrowRight));
        assert_eq!(otp.active_index(), Some(5));
        assert_eq!(otp.value(), "12");
        assert!(!otp.key_down(0, Key::Tab));
    }

    #[test]
    fn paste_fills_from_index() {
        let mut otp = otp();
        assert_eq!(otp.paste(0, "1234"), 4);
        assert_eq!(
            otp.slots(),
            vec![Some('1'), Some('2'), Some('3'), Some('4'), None, None]
        );
        assert_eq!(otp.active_index(), Some(4));
    }

    #[test]
    fn paste_overflow_focuses_last_slot() {
        let mut otp = otp();
        assert_eq!(otp.paste(3, "abcdef"), 3);
        assert_eq!(otp.value(), "abc");
        assert_eq!(otp.active_index(), Some(5));
        assert_eq!(otp.paste(0, "--"), 0);
    }

    #[test]
    fn completion_fires_once() {
        let codes = Rc::new(RefCell::new(Vec::new()));
        let log = codes.clone();
        let mut otp = OtpInput::new(OtpConfig { max_length: 4 })
            .with_on_complete(move |code| log.borrow_mut().push(code.to_string()));
        otp.paste(0, "12");
        otp.input(2, '3');
        assert!(codes.borrow().is_empty());
        otp.input(3, '4');
        assert!(otp.is_complete());
        // Overwriting a slot of a complete code does not re-fire.
        otp.input(0, '9');
        assert_eq!(*codes.borrow(), vec!["1234".to_string()]);
    }

    #[test]
    fn disabled_ignores_everything() {
        let mut otp = otp();
        otp.focus(1);
        otp.set_disabled(true);
        assert_eq!(otp.active_index(), None);
        assert!(!otp.input(0, '1'));
        assert_eq!(otp.paste(0, "1234"), 0);
        assert!(!otp.key_down(0, Key::Backspace));
        otp.focus(0);
        assert_eq!(otp.active_index(), None);
    }

    #[test]
    fn controlled_slots_wait_for_sync() {
        let requested = Rc::new(RefCell::new(Vec::new()));
        let log = requested.clone();
        let slots = Controllable::controlled(slots_from_str("", 4))
            .with_on_change(move |s: &Slots| log.borrow_mut().push(s.clone()));
        let mut otp = OtpInput::with_slots(slots, OtpConfig { max_length: 4 });

        assert!(otp.input(0, 'x'));
        assert_eq!(otp.value(), "");
        assert_eq!(otp.active_index(), Some(1));
        assert_eq!(requested.borrow().len(), 1);

        otp.sync(Some(slots_from_str("x", 4)));
        assert_eq!(otp.value(), "x");
    }

    #[test]
    fn short_slot_vectors_are_padded() {
        let otp = OtpInput::with_slots(
            Controllable::uncontrolled(vec![Some('1')]),
            OtpConfig::default(),
        );
        assert_eq!(otp.slots().len(), 6);
        assert_eq!(otp.value(), "1");
        assert_eq!(slots_from_str("a b c", 2), vec![Some('a'), Some('b')]);
    }

    #[test]
    fn clear_resets_focus() {
        let mut otp = otp();
        otp.paste(0, "123456");
        otp.clear();
        assert_eq!(otp.value(), "");
        assert_eq!(otp.active_index(), Some(0));
    }
}
