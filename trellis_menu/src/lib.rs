// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Menu: state machines for menus, selects and selection groups.
//!
//! ## Menus
//!
//! A [`MenuTree`] is the explicit state container for one menu instance. It
//! owns the items of the root menu and every submenu, the open flag (through a
//! [`Controllable`](trellis_state::Controllable)), the open submenu chain and
//! the highlighted item. Widgets hold a `MenuTree` and pass it by reference to
//! whatever renders the menu's parts; there is no ambient lookup.
//!
//! - **Closed → Open** on trigger activation: a click, or Enter/Space/ArrowDown
//!   (first item highlighted) or ArrowUp (last item highlighted).
//! - **Open → Closed** on item selection, Escape, Tab, or dismissal.
//! - Submenus form a single chain ([`MenuTree::open_path`]); opening a sibling
//!   submenu closes the previously open one at that depth.
//! - Disabled items are skipped by arrow keys and typeahead and never select.
//!
//! Building a tree is where integration mistakes surface: an item added to a
//! menu that is not in the tree, or a submenu trigger added to the wrong
//! parent, fails immediately with a [`MenuError`].
//!
//! ```rust
//! use trellis_event_state::Key;
//! use trellis_menu::{MenuId, MenuItem, MenuResponse, MenuTree};
//!
//! # fn main() -> Result<(), trellis_menu::MenuError> {
//! let mut menu = MenuTree::new();
//! let copy = menu.add_item(MenuId::ROOT, MenuItem::action("Copy"))?;
//! let (_share, share_menu) = menu.add_submenu_with_trigger(MenuId::ROOT, "Share")?;
//! menu.add_item(share_menu, MenuItem::action("Email"))?;
//!
//! // Enter on the trigger opens the menu with the first item highlighted.
//! assert_eq!(menu.handle_key(Key::Enter, 0), MenuResponse::Handled);
//! assert_eq!(menu.highlighted(), Some(copy));
//!
//! // ArrowDown then ArrowRight walks into the submenu.
//! menu.handle_key(Key::ArrowDown, 0);
//! menu.handle_key(Key::ArrowRight, 0);
//! assert_eq!(menu.open_path(), &[MenuId::ROOT, share_menu]);
//!
//! // Escape closes the whole menu.
//! menu.handle_key(Key::Escape, 0);
//! assert!(!menu.is_open());
//! # Ok(())
//! # }
//! ```
//!
//! [`Menubar`] hosts several menus with at most one open, and [`ContextMenu`]
//! opens a menu at a pointer position.
//!
//! ## Selects and groups
//!
//! - [`Select`] keeps an open flag, a value and a live option list, and
//!   resolves the trigger's display label whenever either changes.
//! - [`RadioGroup`] is exclusive: selecting a value replaces the previous one.
//! - [`CheckboxGroup`] toggles ids independently.
//! - [`ToggleGroup`] is a row of toggle buttons in single or multiple mode.
//!
//! ## Features
//!
//! - `std` (default): forwarded to `trellis_float` (and through it `kurbo`).
//! - `libm`: `no_std` builds relying on `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod error;
mod group;
mod menubar;
mod select;
mod tree;

pub use context::ContextMenu;
pub use error::MenuError;
pub use group::{CheckboxGroup, GroupItem, RadioGroup, ToggleGroup, ToggleMode};
pub use menubar::Menubar;
pub use select::{Select, SelectItem};
pub use tree::{
    InitialFocus, ItemId, ItemKind, MenuId, MenuItem, MenuResponse, MenuTree, Selection,
    SelectionKind,
};
