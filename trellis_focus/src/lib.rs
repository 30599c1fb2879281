// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Focus: roving focus over ordered item lists.
//!
//! Composite widgets (menus, selects, radio and toggle groups, OTP slots) keep
//! a single "highlighted" item and move it with the keyboard. This crate models
//! that movement as a combination of:
//! - **Navigation intents** ([`Navigation`]) such as [`Navigation::Next`],
//!   [`Navigation::Prev`], [`Navigation::First`], and [`Navigation::Last`].
//! - **Candidates** ([`FocusEntry`] / [`FocusSpace`]) listing the items in
//!   display order with their enabled state and an optional explicit order.
//! - Pluggable **policies** ([`FocusPolicy`]) that pick the next item given an
//!   origin, an intent, and a read-only view of the candidates.
//!
//! Disabled entries are never returned.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_focus::{FocusEntry, FocusPolicy, FocusSpace, Navigation, RovingPolicy, WrapMode};
//!
//! let entries = [
//!     FocusEntry::new(1_u32),
//!     FocusEntry::new(2).disabled(),
//!     FocusEntry::new(3),
//! ];
//! let space = FocusSpace { nodes: &entries };
//! let policy = RovingPolicy { wrap: WrapMode::Loop, ..RovingPolicy::default() };
//!
//! // Next skips the disabled item…
//! assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(3));
//! // …and loops back to the start.
//! assert_eq!(policy.next(Some(3), Navigation::Next, &space), Some(1));
//! ```
//!
//! ## Keys
//!
//! [`RovingPolicy::navigation_for`] maps a [`Key`] to an intent according to
//! the widget's [`Orientation`] and reading [`Direction`], so a vertical menu
//! ignores ArrowLeft/ArrowRight while a right-to-left toolbar swaps them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use trellis_event_state::Key;

/// Focus navigation intent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate in display order.
    Next,
    /// Move to the previous candidate in display order.
    Prev,
    /// Move to the first enabled candidate.
    First,
    /// Move to the last enabled candidate.
    Last,
}

/// Axis along which arrow keys move focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// ArrowLeft/ArrowRight move focus.
    Horizontal,
    /// ArrowUp/ArrowDown move focus.
    Vertical,
    /// All four arrows move focus.
    Both,
}

/// Reading direction, which decides what ArrowLeft/ArrowRight mean.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Wrap behavior at either end of the list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop at the ends; reaching the end yields no next candidate.
    Never,
    /// Wrap around to the other end.
    Loop,
}

/// A single candidate within a [`FocusSpace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Identifier for this item.
    pub id: K,
    /// Whether this item can receive focus.
    pub enabled: bool,
    /// Optional explicit ordering key; entries with one sort before entries without.
    pub order: Option<i32>,
}

impl<K> FocusEntry<K> {
    /// An enabled entry in display order.
    pub const fn new(id: K) -> Self {
        Self {
            id,
            enabled: true,
            order: None,
        }
    }

    /// Mark this entry disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Give this entry an explicit ordering key.
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

/// A read-only view of candidates in display order.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Candidates, in display order.
    pub nodes: &'a [FocusEntry<K>],
}

impl<K: Copy + Eq> FocusSpace<'_, K> {
    /// Returns `true` if `id` is present and enabled.
    pub fn is_enabled(&self, id: K) -> bool {
        self.nodes.iter().any(|e| e.id == id && e.enabled)
    }

    /// First enabled candidate in traversal order.
    pub fn first_enabled(&self) -> Option<K> {
        ordered_enabled(self.nodes).first().map(|&i| self.nodes[i].id)
    }

    /// Last enabled candidate in traversal order.
    pub fn last_enabled(&self) -> Option<K> {
        ordered_enabled(self.nodes).last().map(|&i| self.nodes[i].id)
    }
}

/// Trait for focus traversal policies.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target from `origin` (if any).
    fn next(&self, origin: Option<K>, direction: Navigation, space: &FocusSpace<'_, K>)
    -> Option<K>;
}

/// Roving focus policy for one-dimensional composites.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RovingPolicy {
    /// Wrap behavior at the ends.
    pub wrap: WrapMode,
    /// Which arrow keys move focus.
    pub orientation: Orientation,
    /// Reading direction.
    pub direction: Direction,
}

impl Default for RovingPolicy {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Never,
            orientation: Orientation::Vertical,
            direction: Direction::Ltr,
        }
    }
}

impl RovingPolicy {
    /// Map a key to a navigation intent, or `None` if this policy ignores it.
    pub fn navigation_for(&self, key: Key) -> Option<Navigation> {
        let horizontal = matches!(self.orientation, Orientation::Horizontal | Orientation::Both);
        let vertical = matches!(self.orientation, Orientation::Vertical | Orientation::Both);
        let (left, right) = match self.direction {
            Direction::Ltr => (Navigation::Prev, Navigation::Next),
            Direction::Rtl => (Navigation::Next, Navigation::Prev),
        };
        match key {
            Key::ArrowUp if vertical => Some(Navigation::Prev),
            Key::ArrowDown if vertical => Some(Navigation::Next),
            Key::ArrowLeft if horizontal => Some(left),
            Key::ArrowRight if horizontal => Some(right),
            Key::Home | Key::PageUp => Some(Navigation::First),
            Key::End | Key::PageDown => Some(Navigation::Last),
            _ => None,
        }
    }

    /// Convenience: map `key` and compute the next target in one step.
    pub fn next_for_key<K: Copy + Eq>(
        &self,
        origin: Option<K>,
        key: Key,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        let nav = self.navigation_for(key)?;
        self.next(origin, nav, space)
    }
}

impl<K> FocusPolicy<K> for RovingPolicy
where
    K: Copy + Eq,
{
    fn next(
        &self,
        origin: Option<K>,
        direction: Navigation,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        match direction {
            Navigation::First => space.first_enabled(),
            Navigation::Last => space.last_enabled(),
            Navigation::Next => next_linear(origin, space, self.wrap, Step::Forward),
            Navigation::Prev => next_linear(origin, space, self.wrap, Step::Backward),
        }
    }
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

/// Indices of enabled entries, sorted by explicit order then display order.
fn ordered_enabled<K>(nodes: &[FocusEntry<K>]) -> Vec<usize> {
    let mut indices: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.enabled.then_some(i))
        .collect();
    // Stable: entries without an explicit order keep display order.
    indices.sort_by(|&ia, &ib| compare_order(&nodes[ia], &nodes[ib]));
    indices
}

fn compare_order<K>(a: &FocusEntry<K>, b: &FocusEntry<K>) -> Ordering {
    match (a.order, b.order) {
        (Some(ao), Some(bo)) => ao.cmp(&bo),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn next_linear<K>(
    origin: Option<K>,
    space: &FocusSpace<'_, K>,
    wrap: WrapMode,
    step: Step,
) -> Option<K>
where
    K: Copy + Eq,
{
    let nodes = space.nodes;
    let indices = ordered_enabled(nodes);
    if indices.is_empty() {
        return None;
    }

    // Locate the origin within the sorted candidates, if present. A disabled
    // or unknown origin behaves like "no origin".
    let origin_pos = origin.and_then(|o| indices.iter().position(|&i| nodes[i].id == o));
    let last = indices.len() - 1;

    let pos = match (step, origin_pos) {
        (Step::Forward, None) => 0,
        (Step::Backward, None) => last,
        (Step::Forward, Some(pos)) if pos < last => pos + 1,
        (Step::Backward, Some(pos)) if pos > 0 => pos - 1,
        (Step::Forward, Some(_)) => match wrap {
            WrapMode::Loop => 0,
            WrapMode::Never => return None,
        },
        (Step::Backward, Some(_)) => match wrap {
            WrapMode::Loop => last,
            WrapMode::Never => return None,
        },
    };
    Some(nodes[indices[pos]].id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn looping() -> RovingPolicy {
        RovingPolicy {
            wrap: WrapMode::Loop,
            ..RovingPolicy::default()
        }
    }

    #[test]
    fn linear_next_prev_with_wrap() {
        let entries = vec![FocusEntry::new(1_u32), FocusEntry::new(2)];
        let space = FocusSpace { nodes: &entries };
        let policy = looping();

        assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(2));
        assert_eq!(policy.next(Some(2), Navigation::Next, &space), Some(1));
        assert_eq!(policy.next(Some(1), Navigation::Prev, &space), Some(2));
    }

    #[test]
    fn no_wrap_stops_at_edges() {
        let entries = vec![FocusEntry::new(1_u32), FocusEntry::new(2)];
        let space = FocusSpace { nodes: &entries };
        let policy = RovingPolicy::default();

        assert_eq!(policy.next(Some(2), Navigation::Next, &space), None);
        assert_eq!(policy.next(Some(1), Navigation::Prev, &space), None);
    }

    #[test]
    fn missing_origin_enters_from_the_matching_end() {
        let entries = vec![FocusEntry::new(1_u32), FocusEntry::new(2), FocusEntry::new(3)];
        let space = FocusSpace { nodes: &entries };
        let policy = RovingPolicy::default();

        assert_eq!(policy.next(None, Navigation::Next, &space), Some(1));
        assert_eq!(policy.next(None, Navigation::Prev, &space), Some(3));
        // Unknown origins behave the same way.
        assert_eq!(policy.next(Some(99), Navigation::Next, &space), Some(1));
    }

    #[test]
    fn skips_disabled_entries() {
        let entries = vec![
            FocusEntry::new(1_u32),
            FocusEntry::new(2).disabled(),
            FocusEntry::new(3),
        ];
        let space = FocusSpace { nodes: &entries };
        let policy = looping();

        assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(3));
        assert_eq!(policy.next(Some(3), Navigation::Prev, &space), Some(1));
        assert!(!space.is_enabled(2));
    }

    #[test]
    fn first_and_last_skip_disabled_ends() {
        let entries = vec![
            FocusEntry::new('a').disabled(),
            FocusEntry::new('b'),
            FocusEntry::new('c'),
            FocusEntry::new('d').disabled(),
        ];
        let space = FocusSpace { nodes: &entries };
        let policy = RovingPolicy::default();

        assert_eq!(policy.next(None, Navigation::First, &space), Some('b'));
        assert_eq!(policy.next(Some('b'), Navigation::Last, &space), Some('c'));
    }

    #[test]
    fn all_disabled_yields_nothing() {
        let entries = vec![FocusEntry::new(1_u32).disabled()];
        let space = FocusSpace { nodes: &entries };
        let policy = looping();
        assert_eq!(policy.next(None, Navigation::Next, &space), None);
        assert_eq!(space.first_enabled(), None);
    }

    #[test]
    fn respects_explicit_order() {
        let entries = vec![
            FocusEntry::new(1_u32).with_order(2),
            FocusEntry::new(2).with_order(1),
        ];
        let space = FocusSpace { nodes: &entries };
        let policy = looping();

        // Despite display order, explicit order wins.
        assert_eq!(policy.next(Some(2), Navigation::Next, &space), Some(1));
        assert_eq!(policy.next(None, Navigation::First, &space), Some(2));
    }

    #[test]
    fn keys_follow_orientation() {
        let vertical = RovingPolicy::default();
        assert_eq!(vertical.navigation_for(Key::ArrowDown), Some(Navigation::Next));
        assert_eq!(vertical.navigation_for(Key::ArrowLeft), None);
        assert_eq!(vertical.navigation_for(Key::Home), Some(Navigation::First));

        let horizontal = RovingPolicy {
            orientation: Orientation::Horizontal,
            ..RovingPolicy::default()
        };
        assert_eq!(horizontal.navigation_for(Key::ArrowRight), Some(Navigation::Next));
        assert_eq!(horizontal.navigation_for(Key::ArrowUp), None);
    }

    #[test]
    fn rtl_swaps_horizontal_arrows() {
        let policy = RovingPolicy {
            orientation: Orientation::Horizontal,
            direction: Direction::Rtl,
            ..RovingPolicy::default()
        };
        assert_eq!(policy.navigation_for(Key::ArrowLeft), Some(Navigation::Next));
        assert_eq!(policy.navigation_for(Key::ArrowRight), Some(Navigation::Prev));
    }

    #[test]
    fn next_for_key_combines_mapping_and_traversal() {
        let entries = vec![FocusEntry::new(1_u32), FocusEntry::new(2)];
        let space = FocusSpace { nodes: &entries };
        let policy = RovingPolicy::default();
        assert_eq!(policy.next_for_key(Some(1), Key::ArrowDown, &space), Some(2));
        assert_eq!(policy.next_for_key(Some(1), Key::Escape, &space), None);
    }
}
