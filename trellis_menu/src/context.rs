// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menus opened at the pointer.

use kurbo::{Point, Rect};
use trellis_event_state::Key;
use trellis_float::{Align, Placement, Side, anchor_for_point};

use crate::tree::{InitialFocus, MenuResponse, MenuTree};

/// A [`MenuTree`] anchored to the pointer position instead of a trigger.
///
/// The anchor is a zero-sized rectangle at the press point. Positioning uses it
/// in place of a trigger rectangle, with [`ContextMenu::placement`].
#[derive(Debug)]
pub struct ContextMenu {
    tree: MenuTree,
    anchor: Option<Rect>,
}

impl ContextMenu {
    /// Wrap a menu tree.
    pub fn new(tree: MenuTree) -> Self {
        Self { tree, anchor: None }
    }

    /// Placement used for context menus: to the right of the pointer, top-aligned.
    pub const fn placement() -> Placement {
        Placement::new(Side::Right, Align::Start).with_side_offset(2.0)
    }

    /// The menu.
    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// The menu, mutably (building, pointer routing).
    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    /// Anchor rectangle while open.
    pub fn anchor(&self) -> Option<Rect> {
        if self.tree.is_open() { self.anchor } else { None }
    }

    /// Secondary click at `point`. Re-opening while open moves the menu.
    ///
    /// Returns `false` if the menu is disabled.
    pub fn open_at(&mut self, point: Point) -> bool {
        if self.tree.is_disabled() {
            return false;
        }
        self.tree.close();
        self.anchor = Some(anchor_for_point(point));
        self.tree.open(InitialFocus::None);
        tracing::debug!(x = point.x, y = point.y, "context menu opened");
        true
    }

    /// Close the menu.
    pub fn close(&mut self) {
        self.tree.close();
        self.anchor = None;
    }

    /// An outside interaction dismissed the menu.
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// Route a key press to the open menu.
    pub fn handle_key(&mut self, key: Key, now: u64) -> MenuResponse {
        if !self.tree.is_open() {
            return MenuResponse::Ignored;
        }
        let response = self.tree.handle_key(key, now);
        if !self.tree.is_open() {
            self.anchor = None;
        }
        response
    }
}
