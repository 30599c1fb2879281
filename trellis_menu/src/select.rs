// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-value select with a live item list.

use alloc::string::String;
use alloc::vec::Vec;

use trellis_event_state::{Key, Typeahead};
use trellis_focus::{FocusEntry, FocusPolicy, FocusSpace, Navigation, RovingPolicy};
use trellis_state::Controllable;

/// One option of a [`Select`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectItem<V> {
    /// Value reported when chosen.
    pub value: V,
    /// Text shown in the list and in the trigger once chosen.
    pub label: String,
    /// Disabled options never highlight or select.
    pub disabled: bool,
}

impl<V> SelectItem<V> {
    /// An enabled option.
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark the option disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Open state, value and item list of a select.
///
/// Options may register before or after the value is set (they often mount
/// lazily). The trigger's display label is resolved against the live list and
/// recomputed whenever the list or the value changes; while the value matches
/// no registered option the placeholder is shown.
#[derive(Debug)]
pub struct Select<V> {
    open: Controllable<bool>,
    value: Controllable<Option<V>>,
    items: Vec<SelectItem<V>>,
    placeholder: String,
    /// Index of the option matching the value, refreshed on every change.
    resolved: Option<usize>,
    highlighted: Option<V>,
    typeahead: Typeahead,
    policy: RovingPolicy,
    disabled: bool,
}

impl<V: Clone + PartialEq> Select<V> {
    /// Create a select.
    pub fn new(open: Controllable<bool>, value: Controllable<Option<V>>) -> Self {
        let mut select = Self {
            open,
            value,
            items: Vec::new(),
            placeholder: String::new(),
            resolved: None,
            highlighted: None,
            typeahead: Typeahead::new(),
            policy: RovingPolicy::default(),
            disabled: false,
        };
        select.resolve();
        select
    }

    /// Text shown while nothing is selected (builder form).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Disable the trigger. Disabling an open select closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    // --- items ---

    /// Register an option, replacing an existing one with the same value.
    pub fn register(&mut self, item: SelectItem<V>) {
        match self.items.iter_mut().find(|i| i.value == item.value) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.resolve();
    }

    /// Remove the option holding `value`.
    pub fn unregister(&mut self, value: &V) {
        self.items.retain(|i| i.value != *value);
        if self.highlighted.as_ref() == Some(value) {
            self.highlighted = None;
        }
        self.resolve();
    }

    /// Replace the whole option list.
    pub fn set_items(&mut self, items: Vec<SelectItem<V>>) {
        self.items = items;
        if let Some(h) = &self.highlighted {
            if !self.items.iter().any(|i| i.value == *h) {
                self.highlighted = None;
            }
        }
        self.resolve();
    }

    /// Registered options in display order.
    pub fn items(&self) -> &[SelectItem<V>] {
        &self.items
    }

    // --- value ---

    /// Current value.
    pub fn value(&self) -> Option<&V> {
        self.value.value().as_ref()
    }

    /// Label for the trigger: the selected option's label, or the placeholder.
    pub fn display_label(&self) -> &str {
        match self.resolved {
            Some(i) => &self.items[i].label,
            None => &self.placeholder,
        }
    }

    /// Returns `true` while the placeholder is shown.
    pub fn is_placeholder(&self) -> bool {
        self.resolved.is_none()
    }

    /// Choose `value` and close. Disabled or unknown options are ignored.
    pub fn select(&mut self, value: &V) -> bool {
        let Some(item) = self.items.iter().find(|i| i.value == *value) else {
            return false;
        };
        if item.disabled || self.disabled {
            return false;
        }
        self.value.set(Some(value.clone()));
        self.resolve();
        tracing::debug!("select value chosen");
        self.close();
        true
    }

    fn resolve(&mut self) {
        let value = self.value.value().as_ref();
        self.resolved = value.and_then(|v| self.items.iter().position(|i| i.value == *v));
    }

    // --- open state ---

    /// Returns `true` while the list is open.
    pub fn is_open(&self) -> bool {
        *self.open.value()
    }

    /// Open the list, highlighting the selected option (or the first).
    pub fn open(&mut self) {
        self.open_with(Navigation::First);
    }

    fn open_with(&mut self, fallback: Navigation) {
        if self.disabled {
            return;
        }
        self.open.set(true);
        if self.is_open() {
            self.highlighted = self
                .resolved
                .filter(|&i| !self.items[i].disabled)
                .or_else(|| self.step(None, fallback))
                .map(|i| self.items[i].value.clone());
        }
    }

    /// Close the list.
    pub fn close(&mut self) {
        self.open.set(false);
        self.after_close();
    }

    /// An outside interaction dismissed the list.
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// Trigger clicked.
    pub fn trigger_click(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Feed host-controlled open flag and value for this render.
    pub fn sync(&mut self, open: Option<bool>, value: Option<Option<V>>) {
        self.open.sync(open);
        self.value.sync(value);
        self.resolve();
        self.after_close();
    }

    fn after_close(&mut self) {
        if !self.is_open() {
            self.highlighted = None;
            self.typeahead.reset();
        }
    }

    // --- highlight and keys ---

    /// Highlighted option.
    pub fn highlighted(&self) -> Option<&V> {
        self.highlighted.as_ref()
    }

    /// The pointer moved onto the option holding `value`.
    pub fn highlight(&mut self, value: &V) -> bool {
        if !self.is_open() {
            return false;
        }
        match self.items.iter().find(|i| i.value == *value) {
            Some(item) if !item.disabled => {
                self.highlighted = Some(value.clone());
                true
            }
            _ => false,
        }
    }

    /// Handle a key press on the trigger or the open list.
    ///
    /// `now` is the event timestamp in milliseconds. Returns `true` if the key
    /// was consumed.
    pub fn handle_key(&mut self, key: Key, now: u64) -> bool {
        if self.disabled {
            return false;
        }
        if !self.is_open() {
            return match key {
                Key::Enter | Key::Space | Key::ArrowDown => {
                    self.open_with(Navigation::First);
                    true
                }
                Key::ArrowUp => {
                    self.open_with(Navigation::Last);
                    true
                }
                // Typing on a closed select picks the match directly.
                Key::Character(ch) => {
                    if let Some(i) = self.typeahead_match(ch, now, self.resolved) {
                        let value = self.items[i].value.clone();
                        self.value.set(Some(value));
                        self.resolve();
                    }
                    true
                }
                _ => false,
            };
        }
        match key {
            Key::Space if self.typeahead.is_active(now) => {
                self.typeahead_highlight(' ', now);
                true
            }
            Key::Escape | Key::Tab => {
                self.close();
                true
            }
            Key::Enter | Key::Space => {
                if let Some(value) = self.highlighted.clone() {
                    self.select(&value);
                }
                true
            }
            Key::Character(ch) => {
                self.typeahead_highlight(ch, now);
                true
            }
            _ => {
                let Some(nav) = self.policy.navigation_for(key) else {
                    return false;
                };
                let origin = self.highlighted_index();
                if let Some(next) = self.step(origin, nav) {
                    self.highlighted = Some(self.items[next].value.clone());
                }
                true
            }
        }
    }

    fn highlighted_index(&self) -> Option<usize> {
        let h = self.highlighted.as_ref()?;
        self.items.iter().position(|i| i.value == *h)
    }

    fn typeahead_highlight(&mut self, ch: char, now: u64) {
        let origin = self.highlighted_index();
        if let Some(i) = self.typeahead_match(ch, now, origin) {
            self.highlighted = Some(self.items[i].value.clone());
        }
    }

    fn typeahead_match(&mut self, ch: char, now: u64, origin: Option<usize>) -> Option<usize> {
        let candidates: Vec<(usize, &str)> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| (!item.disabled).then_some((i, item.label.as_str())))
            .collect();
        self.typeahead.search(ch, now, &candidates, origin)
    }

    fn step(&self, origin: Option<usize>, nav: Navigation) -> Option<usize> {
        let entries: Vec<FocusEntry<usize>> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| FocusEntry::new(i).with_enabled(!item.disabled))
            .collect();
        self.policy.next(origin, nav, &FocusSpace { nodes: &entries })
    }
}
