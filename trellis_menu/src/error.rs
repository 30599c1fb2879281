// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building a menu tree.

use thiserror::Error;

use crate::tree::{ItemId, MenuId};

/// Integration mistakes when assembling a [`MenuTree`](crate::MenuTree).
///
/// These are programmer errors: an item placed in a menu that does not exist,
/// or a submenu trigger wired to the wrong menu. Callers are expected to `?`
/// them while building the tree rather than recover.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuError {
    /// The menu id does not belong to this tree.
    #[error("menu not found: {0}")]
    UnknownMenu(MenuId),

    /// The item id does not belong to this tree.
    #[error("menu item not found: {0}")]
    UnknownItem(ItemId),

    /// A submenu trigger was added to a menu other than the submenu's parent.
    #[error("submenu {submenu} is not a child of menu {menu}")]
    ForeignSubmenu {
        /// The submenu the trigger points at.
        submenu: MenuId,
        /// The menu the trigger was added to.
        menu: MenuId,
    },

    /// The submenu already has a trigger item.
    #[error("submenu {0} already has a trigger")]
    DuplicateTrigger(MenuId),
}
