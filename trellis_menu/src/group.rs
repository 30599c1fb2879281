// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radio, checkbox and toggle groups.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use trellis_event_state::Key;
use trellis_focus::{FocusEntry, FocusPolicy, FocusSpace, Orientation, RovingPolicy, WrapMode};
use trellis_state::Controllable;

/// One member of a [`RadioGroup`] or [`ToggleGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupItem<V> {
    /// The value this item stands for.
    pub value: V,
    /// Disabled items can neither be focused nor selected.
    pub disabled: bool,
}

impl<V> GroupItem<V> {
    /// An enabled item.
    pub fn new(value: V) -> Self {
        Self {
            value,
            disabled: false,
        }
    }

    /// Mark the item disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Roving focus over group items, by index.
fn step_index<V>(
    items: &[GroupItem<V>],
    policy: &RovingPolicy,
    origin: Option<usize>,
    key: Key,
) -> Option<usize> {
    let entries: Vec<FocusEntry<usize>> = items
        .iter()
        .enumerate()
        .map(|(i, item)| FocusEntry::new(i).with_enabled(!item.disabled))
        .collect();
    let space = FocusSpace { nodes: &entries };
    let nav = policy.navigation_for(key)?;
    policy.next(origin, nav, &space)
}

fn index_of<V: PartialEq>(items: &[GroupItem<V>], value: &V) -> Option<usize> {
    items.iter().position(|item| item.value == *value)
}

/// Exclusive selection: at most one value is selected at a time.
///
/// Arrow keys move focus and select the newly focused item, wrapping around
/// the ends.
#[derive(Debug)]
pub struct RadioGroup<V> {
    value: Controllable<Option<V>>,
    items: Vec<GroupItem<V>>,
    focused: Option<usize>,
    policy: RovingPolicy,
    disabled: bool,
}

impl<V: Clone + PartialEq> RadioGroup<V> {
    /// Create a group over `value`.
    pub fn new(value: Controllable<Option<V>>) -> Self {
        Self {
            value,
            items: Vec::new(),
            focused: None,
            policy: RovingPolicy {
                wrap: WrapMode::Loop,
                orientation: Orientation::Both,
                ..RovingPolicy::default()
            },
            disabled: false,
        }
    }

    /// Restrict arrow keys to one axis (builder form).
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.policy.orientation = orientation;
        self
    }

    /// Append an item.
    pub fn push(&mut self, item: GroupItem<V>) {
        self.items.push(item);
    }

    /// Items in display order.
    pub fn items(&self) -> &[GroupItem<V>] {
        &self.items
    }

    /// Enable or disable one item.
    pub fn set_item_disabled(&mut self, value: &V, disabled: bool) {
        if let Some(i) = index_of(&self.items, value) {
            self.items[i].disabled = disabled;
        }
    }

    /// Disable the whole group.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// The selected value.
    pub fn selected(&self) -> Option<&V> {
        self.value.value().as_ref()
    }

    /// Returns `true` if `value` is the selected one.
    pub fn is_selected(&self, value: &V) -> bool {
        self.selected() == Some(value)
    }

    /// Select `value`, replacing any previous selection.
    ///
    /// Returns `false` if the group or the item is disabled, the value is not
    /// in the group, or it is already selected.
    pub fn select(&mut self, value: &V) -> bool {
        if self.disabled {
            return false;
        }
        let Some(i) = index_of(&self.items, value) else {
            return false;
        };
        if self.items[i].disabled {
            return false;
        }
        self.focused = Some(i);
        self.value.set(Some(value.clone()))
    }

    /// Focused item.
    pub fn focused(&self) -> Option<&V> {
        self.focused.map(|i| &self.items[i].value)
    }

    /// The item that receives focus when tabbing into the group: the selected
    /// item if enabled, else the first enabled item.
    pub fn tab_stop(&self) -> Option<&V> {
        let selected = self
            .selected()
            .and_then(|v| index_of(&self.items, v))
            .filter(|&i| !self.items[i].disabled);
        selected
            .or_else(|| self.items.iter().position(|item| !item.disabled))
            .map(|i| &self.items[i].value)
    }

    /// Handle a key press. Returns `true` if it was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.disabled {
            return false;
        }
        if key == Key::Space {
            let Some(i) = self.focused else {
                return false;
            };
            let value = self.items[i].value.clone();
            self.select(&value);
            return true;
        }
        let Some(next) = step_index(&self.items, &self.policy, self.focused, key) else {
            return false;
        };
        let value = self.items[next].value.clone();
        self.select(&value);
        true
    }

    /// Feed the host-controlled value for this render.
    pub fn sync(&mut self, controlled: Option<Option<V>>) {
        self.value.sync(controlled);
    }
}

/// Independent on/off toggles keyed by id.
#[derive(Debug)]
pub struct CheckboxGroup<K> {
    values: Controllable<HashMap<K, bool>>,
    disabled_items: HashSet<K>,
    disabled: bool,
}

impl<K: Clone + Eq + Hash> CheckboxGroup<K> {
    /// Create a group over `values`. Missing ids read as unchecked.
    pub fn new(values: Controllable<HashMap<K, bool>>) -> Self {
        Self {
            values,
            disabled_items: HashSet::new(),
            disabled: false,
        }
    }

    /// Returns `true` if `id` is checked.
    pub fn is_checked(&self, id: &K) -> bool {
        self.values.value().get(id).copied().unwrap_or(false)
    }

    /// Ids that are currently checked.
    pub fn checked(&self) -> impl Iterator<Item = &K> {
        self.values
            .value()
            .iter()
            .filter_map(|(k, &on)| on.then_some(k))
    }

    /// Enable or disable one id.
    pub fn set_item_disabled(&mut self, id: K, disabled: bool) {
        if disabled {
            self.disabled_items.insert(id);
        } else {
            self.disabled_items.remove(&id);
        }
    }

    /// Returns `true` if `id` cannot be toggled.
    pub fn is_item_disabled(&self, id: &K) -> bool {
        self.disabled || self.disabled_items.contains(id)
    }

    /// Disable the whole group.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Set one id's checked state. Other ids are untouched.
    ///
    /// Returns `true` if a change was requested.
    pub fn set_checked(&mut self, id: K, checked: bool) -> bool {
        if self.is_item_disabled(&id) || self.is_checked(&id) == checked {
            return false;
        }
        self.values.update(|values| {
            let mut next = values.clone();
            next.insert(id, checked);
            next
        })
    }

    /// Flip one id.
    pub fn toggle(&mut self, id: K) -> bool {
        let checked = !self.is_checked(&id);
        self.set_checked(id, checked)
    }

    /// Feed the host-controlled values for this render.
    pub fn sync(&mut self, controlled: Option<HashMap<K, bool>>) {
        self.values.sync(controlled);
    }
}

/// Whether a [`ToggleGroup`] allows one or many pressed items.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToggleMode {
    /// At most one pressed item; pressing it again releases it.
    #[default]
    Single,
    /// Any number of pressed items.
    Multiple,
}

/// A row of toggle buttons with roving focus.
///
/// Unlike [`RadioGroup`], arrow keys only move focus; Enter or Space toggles
/// the focused item.
#[derive(Debug)]
pub struct ToggleGroup<V> {
    mode: ToggleMode,
    pressed: Controllable<Vec<V>>,
    items: Vec<GroupItem<V>>,
    focused: Option<usize>,
    policy: RovingPolicy,
    disabled: bool,
}

impl<V: Clone + PartialEq> ToggleGroup<V> {
    /// Create a horizontal, looping group.
    pub fn new(mode: ToggleMode, pressed: Controllable<Vec<V>>) -> Self {
        Self {
            mode,
            pressed,
            items: Vec::new(),
            focused: None,
            policy: RovingPolicy {
                wrap: WrapMode::Loop,
                orientation: Orientation::Horizontal,
                ..RovingPolicy::default()
            },
            disabled: false,
        }
    }

    /// Replace the focus policy (builder form).
    #[must_use]
    pub fn with_policy(mut self, policy: RovingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append an item.
    pub fn push(&mut self, item: GroupItem<V>) {
        self.items.push(item);
    }

    /// Single or multiple.
    pub fn mode(&self) -> ToggleMode {
        self.mode
    }

    /// Disable the whole group.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Pressed values.
    pub fn pressed(&self) -> &[V] {
        self.pressed.value()
    }

    /// Returns `true` if `value` is pressed.
    pub fn is_pressed(&self, value: &V) -> bool {
        self.pressed.value().contains(value)
    }

    /// Focused item.
    pub fn focused(&self) -> Option<&V> {
        self.focused.map(|i| &self.items[i].value)
    }

    /// Move focus to `value` (pointer down on it).
    pub fn focus(&mut self, value: &V) -> bool {
        match index_of(&self.items, value) {
            Some(i) if !self.items[i].disabled => {
                self.focused = Some(i);
                true
            }
            _ => false,
        }
    }

    /// Flip `value`. Returns `true` if a change was requested.
    pub fn toggle(&mut self, value: &V) -> bool {
        if self.disabled {
            return false;
        }
        let Some(i) = index_of(&self.items, value) else {
            return false;
        };
        if self.items[i].disabled {
            return false;
        }
        self.focused = Some(i);
        let on = self.is_pressed(value);
        let mode = self.mode;
        self.pressed.update(|pressed| match (mode, on) {
            (ToggleMode::Single, true) => Vec::new(),
            (ToggleMode::Single, false) => alloc::vec![value.clone()],
            (ToggleMode::Multiple, true) => pressed.iter().filter(|v| *v != value).cloned().collect(),
            (ToggleMode::Multiple, false) => {
                let mut next = pressed.clone();
                next.push(value.clone());
                next
            }
        })
    }

    /// Handle a key press. Returns `true` if it was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.disabled {
            return false;
        }
        if key.is_activation() {
            let Some(i) = self.focused else {
                return false;
            };
            let value = self.items[i].value.clone();
            self.toggle(&value);
            return true;
        }
        match step_index(&self.items, &self.policy, self.focused, key) {
            Some(next) => {
                self.focused = Some(next);
                true
            }
            None => false,
        }
    }

    /// Feed the host-controlled pressed values for this render.
    pub fn sync(&mut self, controlled: Option<Vec<V>>) {
        self.pressed.sync(controlled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn radio() -> RadioGroup<&'static str> {
        let mut group = RadioGroup::new(Controllable::uncontrolled(None));
        group.push(GroupItem::new("a"));
        group.push(GroupItem::new("b"));
        group.push(GroupItem::new("c").disabled());
        group
    }

    #[test]
    fn radio_selection_is_exclusive() {
        let mut group = radio();
        assert!(group.select(&"a"));
        assert!(group.select(&"b"));
        assert_eq!(group.selected(), Some(&"b"));
        assert!(!group.is_selected(&"a"));
    }

    #[test]
    fn radio_rejects_disabled_and_unknown() {
        let mut group = radio();
        assert!(!group.select(&"c"));
        assert!(!group.select(&"z"));
        assert_eq!(group.selected(), None);

        group.set_disabled(true);
        assert!(!group.select(&"a"));
    }

    #[test]
    fn radio_arrows_move_and_select_skipping_disabled() {
        let mut group = radio();
        group.select(&"b");
        assert!(group.handle_key(Key::ArrowDown));
        // "c" is disabled; wraps to "a".
        assert_eq!(group.selected(), Some(&"a"));
        assert_eq!(group.focused(), Some(&"a"));
        assert!(group.handle_key(Key::ArrowLeft));
        assert_eq!(group.selected(), Some(&"b"));
        assert!(!group.handle_key(Key::Escape));
    }

    #[test]
    fn radio_tab_stop_prefers_selection() {
        let mut group = radio();
        assert_eq!(group.tab_stop(), Some(&"a"));
        group.select(&"b");
        assert_eq!(group.tab_stop(), Some(&"b"));
        group.set_item_disabled(&"b", true);
        assert_eq!(group.tab_stop(), Some(&"a"));
    }

    #[test]
    fn controlled_radio_reports_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut group = RadioGroup::new(
            Controllable::controlled(Some("a")).with_on_change(move |v: &Option<&'static str>| sink.borrow_mut().push(*v)),
        );
        group.push(GroupItem::new("a"));
        group.push(GroupItem::new("b"));
        assert!(group.select(&"b"));
        assert_eq!(group.selected(), Some(&"a"));
        assert_eq!(*seen.borrow(), [Some("b")]);
        group.sync(Some(Some("b")));
        assert_eq!(group.selected(), Some(&"b"));
    }

    #[test]
    fn checkboxes_are_independent() {
        let mut group = CheckboxGroup::new(Controllable::uncontrolled(HashMap::new()));
        assert!(group.toggle("news"));
        assert!(group.toggle("offers"));
        assert!(group.toggle("news"));
        assert!(!group.is_checked(&"news"));
        assert!(group.is_checked(&"offers"));
        assert_eq!(group.checked().collect::<Vec<_>>(), [&"offers"]);
        assert!(!group.set_checked("offers", true));
    }

    #[test]
    fn disabled_checkbox_cannot_toggle() {
        let mut group = CheckboxGroup::new(Controllable::uncontrolled(HashMap::new()));
        group.set_item_disabled("terms", true);
        assert!(!group.toggle("terms"));
        assert!(!group.is_checked(&"terms"));
        group.set_item_disabled("terms", false);
        assert!(group.toggle("terms"));
        group.set_disabled(true);
        assert!(!group.toggle("terms"));
    }

    #[test]
    fn single_toggle_group_allows_release() {
        let mut group = ToggleGroup::new(ToggleMode::Single, Controllable::uncontrolled(Vec::new()));
        group.push(GroupItem::new('l'));
        group.push(GroupItem::new('c'));
        group.push(GroupItem::new('r'));

        assert!(group.toggle(&'l'));
        assert!(group.toggle(&'c'));
        assert_eq!(group.pressed(), &['c']);
        assert!(group.toggle(&'c'));
        assert!(group.pressed().is_empty());
    }

    #[test]
    fn multiple_toggle_group_keys() {
        let mut group = ToggleGroup::new(ToggleMode::Multiple, Controllable::uncontrolled(vec!['b']));
        group.push(GroupItem::new('b'));
        group.push(GroupItem::new('i').disabled());
        group.push(GroupItem::new('u'));

        assert!(group.focus(&'b'));
        assert!(group.handle_key(Key::ArrowRight));
        assert_eq!(group.focused(), Some(&'u'));
        assert!(group.handle_key(Key::Space));
        assert_eq!(group.pressed(), &['b', 'u']);
        // Vertical arrows are ignored in a horizontal group.
        assert!(!group.handle_key(Key::ArrowDown));
        assert!(!group.toggle(&'i'));
    }
}
