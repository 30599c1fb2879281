// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A horizontal bar of menus, at most one open.

use alloc::vec::Vec;

use trellis_event_state::Key;
use trellis_focus::{FocusEntry, FocusPolicy, FocusSpace, Orientation, RovingPolicy, WrapMode};

use crate::tree::{InitialFocus, MenuResponse, MenuTree};

/// A menubar: several top-level [`MenuTree`]s sharing one trigger row.
///
/// Once any menu is open, hovering another trigger switches to it, and
/// ArrowLeft/ArrowRight at a menu's root move to the neighboring menu.
#[derive(Debug)]
pub struct Menubar {
    menus: Vec<MenuTree>,
    focused: usize,
    policy: RovingPolicy,
}

impl Default for Menubar {
    fn default() -> Self {
        Self::new()
    }
}

impl Menubar {
    /// An empty menubar.
    pub fn new() -> Self {
        Self {
            menus: Vec::new(),
            focused: 0,
            policy: RovingPolicy {
                wrap: WrapMode::Loop,
                orientation: Orientation::Horizontal,
                ..RovingPolicy::default()
            },
        }
    }

    /// Append a menu; returns its index.
    pub fn push(&mut self, menu: MenuTree) -> usize {
        self.menus.push(menu);
        self.menus.len() - 1
    }

    /// Number of menus.
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    /// Returns `true` if the bar holds no menus.
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Menu at `index`.
    pub fn menu(&self, index: usize) -> Option<&MenuTree> {
        self.menus.get(index)
    }

    /// Menu at `index`, mutably.
    pub fn menu_mut(&mut self, index: usize) -> Option<&mut MenuTree> {
        self.menus.get_mut(index)
    }

    /// Index of the open menu.
    pub fn open_index(&self) -> Option<usize> {
        self.menus.iter().position(MenuTree::is_open)
    }

    /// Index of the trigger holding keyboard focus.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Open the menu at `index`, closing any other.
    pub fn open(&mut self, index: usize, focus: InitialFocus) {
        if index >= self.menus.len() {
            return;
        }
        for (i, menu) in self.menus.iter_mut().enumerate() {
            if i != index {
                menu.close();
            }
        }
        self.focused = index;
        self.menus[index].open(focus);
    }

    /// Close every menu.
    pub fn close(&mut self) {
        for menu in &mut self.menus {
            menu.close();
        }
    }

    /// Trigger at `index` clicked.
    pub fn trigger_click(&mut self, index: usize) {
        if self.open_index() == Some(index) {
            self.close();
        } else {
            self.open(index, InitialFocus::None);
        }
    }

    /// Pointer entered the trigger at `index`.
    pub fn pointer_enter_trigger(&mut self, index: usize) {
        match self.open_index() {
            Some(open) if open != index => self.open(index, InitialFocus::None),
            _ => {}
        }
    }

    /// Handle a key press on the bar or its open menu.
    pub fn handle_key(&mut self, key: Key, now: u64) -> MenuResponse {
        match self.open_index() {
            Some(open) => {
                let response = self.menus[open].handle_key(key, now);
                if response != MenuResponse::Ignored {
                    return response;
                }
                match self.neighbor(open, key) {
                    Some(next) if next != open => {
                        self.open(next, InitialFocus::First);
                        MenuResponse::Handled
                    }
                    _ => MenuResponse::Ignored,
                }
            }
            None => match key {
                Key::Enter | Key::Space | Key::ArrowDown => {
                    self.open(self.focused, InitialFocus::First);
                    MenuResponse::Handled
                }
                Key::ArrowUp => {
                    self.open(self.focused, InitialFocus::Last);
                    MenuResponse::Handled
                }
                _ => match self.neighbor(self.focused, key) {
                    Some(next) => {
                        self.focused = next;
                        MenuResponse::Handled
                    }
                    None => MenuResponse::Ignored,
                },
            },
        }
    }

    /// Trigger reached from `from` by a horizontal key.
    fn neighbor(&self, from: usize, key: Key) -> Option<usize> {
        let nav = self.policy.navigation_for(key)?;
        let entries: Vec<FocusEntry<usize>> = self
            .menus
            .iter()
            .enumerate()
            .map(|(i, menu)| FocusEntry::new(i).with_enabled(!menu.is_disabled()))
            .collect();
        self.policy.next(Some(from), nav, &FocusSpace { nodes: &entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{MenuId, MenuItem};

    fn menu(items: &[&str]) -> MenuTree {
        let mut tree = MenuTree::new();
        for text in items {
            tree.add_item(MenuId::ROOT, MenuItem::action(*text)).unwrap();
        }
        tree
    }

    fn bar() -> Menubar {
        let mut bar = Menubar::new();
        bar.push(menu(&["New", "Open"]));
        bar.push(menu(&["Undo", "Redo"]));
        bar.push(menu(&["Zoom"]));
        bar
    }

    #[test]
    fn only_one_menu_open() {
        let mut bar = bar();
        bar.trigger_click(0);
        assert_eq!(bar.open_index(), Some(0));
        bar.trigger_click(1);
        assert_eq!(bar.open_index(), Some(1));
        assert!(!bar.menu(0).unwrap().is_open());
        bar.trigger_click(1);
        assert_eq!(bar.open_index(), None);
    }

    #[test]
    fn hover_switches_only_while_open() {
        let mut bar = bar();
        bar.pointer_enter_trigger(2);
        assert_eq!(bar.open_index(), None);
        bar.trigger_click(0);
        bar.pointer_enter_trigger(2);
        assert_eq!(bar.open_index(), Some(2));
    }

    #[test]
    fn arrows_move_between_open_menus() {
        let mut bar = bar();
        bar.open(0, InitialFocus::First);
        assert_eq!(bar.handle_key(Key::ArrowRight, 0), MenuResponse::Handled);
        assert_eq!(bar.open_index(), Some(1));
        assert!(bar.menu(1).unwrap().highlighted().is_some());
        // Wraps from the first menu to the last.
        bar.handle_key(Key::ArrowLeft, 0);
        bar.handle_key(Key::ArrowLeft, 0);
        assert_eq!(bar.open_index(), Some(2));
    }

    #[test]
    fn closed_bar_moves_trigger_focus() {
        let mut bar = bar();
        bar.menu_mut(1).unwrap().set_disabled(true);
        assert_eq!(bar.handle_key(Key::ArrowRight, 0), MenuResponse::Handled);
        assert_eq!(bar.focused(), 2);
        assert_eq!(bar.handle_key(Key::ArrowDown, 0), MenuResponse::Handled);
        assert_eq!(bar.open_index(), Some(2));
        assert_eq!(bar.handle_key(Key::Escape, 0), MenuResponse::Handled);
        assert_eq!(bar.open_index(), None);
        assert_eq!(bar.focused(), 2);
    }
}
