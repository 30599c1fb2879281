// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open state, submenu chain and highlight of one menu instance.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;
use trellis_event_state::{Key, Typeahead, TypeaheadConfig};
use trellis_focus::{FocusEntry, FocusPolicy, FocusSpace, Navigation, RovingPolicy, WrapMode};
use trellis_state::Controllable;

use crate::error::MenuError;

/// Identifier of a menu (the root or a submenu) within a [`MenuTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MenuId(usize);

impl MenuId {
    /// The root menu every tree starts with.
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of an item within a [`MenuTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an item does when selected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Plain command.
    Action,
    /// Independent on/off toggle.
    Checkbox,
    /// Exclusive choice within `group` of the same menu.
    Radio {
        /// Group tag; radio items sharing a menu and a tag exclude each other.
        group: u32,
    },
    /// Opens the given submenu.
    SubTrigger(MenuId),
    /// Visual divider; never highlighted.
    Separator,
    /// Non-interactive heading; never highlighted.
    Label,
}

impl ItemKind {
    /// Returns `true` for kinds that can be highlighted.
    pub const fn is_focusable(self) -> bool {
        !matches!(self, Self::Separator | Self::Label)
    }
}

/// One entry of a menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    /// Behavior on selection.
    pub kind: ItemKind,
    /// Text used for typeahead (usually the visible label).
    pub text: String,
    /// Disabled items never highlight or select.
    pub disabled: bool,
    /// Checked state for checkbox and radio items.
    pub checked: bool,
}

impl MenuItem {
    fn of(kind: ItemKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            disabled: false,
            checked: false,
        }
    }

    /// A plain command.
    pub fn action(text: impl Into<String>) -> Self {
        Self::of(ItemKind::Action, text)
    }

    /// A checkbox item.
    pub fn checkbox(text: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::of(ItemKind::Checkbox, text)
        }
    }

    /// A radio item in `group`.
    pub fn radio(group: u32, text: impl Into<String>) -> Self {
        Self::of(ItemKind::Radio { group }, text)
    }

    /// A trigger for `submenu`.
    pub fn sub_trigger(submenu: MenuId, text: impl Into<String>) -> Self {
        Self::of(ItemKind::SubTrigger(submenu), text)
    }

    /// A separator.
    pub fn separator() -> Self {
        Self::of(ItemKind::Separator, "")
    }

    /// A group label.
    pub fn label(text: impl Into<String>) -> Self {
        Self::of(ItemKind::Label, text)
    }

    /// Mark the item disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Mark a radio item as the initially checked one.
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }
}

/// What a selection did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// A command ran.
    Action,
    /// A checkbox flipped to `checked`.
    Checkbox {
        /// New checked state.
        checked: bool,
    },
    /// A radio item became the checked one of `group`.
    Radio {
        /// Group tag.
        group: u32,
    },
}

/// A selected item, reported to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    /// The selected item.
    pub item: ItemId,
    /// What the selection did.
    pub kind: SelectionKind,
}

/// Result of a key press routed to a menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuResponse {
    /// The menu did not use the key.
    Ignored,
    /// The key changed menu state.
    Handled,
    /// The key selected an item (the menu has closed).
    Selected(Selection),
}

/// Which item to highlight when a menu opens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InitialFocus {
    /// Nothing (pointer open).
    #[default]
    None,
    /// First enabled item (Enter, Space, `ArrowDown`).
    First,
    /// Last enabled item (`ArrowUp`).
    Last,
}

#[derive(Clone, Debug)]
struct MenuData {
    parent: Option<MenuId>,
    trigger: Option<ItemId>,
    items: Vec<ItemId>,
}

#[derive(Clone, Debug)]
struct ItemData {
    menu: MenuId,
    item: MenuItem,
}

/// State container for one menu instance: its items, open state, submenu
/// chain and highlighted item.
///
/// At most one submenu chain is open: [`MenuTree::open_path`] always starts at
/// [`MenuId::ROOT`] and each following menu is a child of the previous one.
#[derive(Debug)]
pub struct MenuTree {
    menus: Vec<MenuData>,
    items: Vec<ItemData>,
    open: Controllable<bool>,
    path: SmallVec<[MenuId; 4]>,
    highlighted: Option<ItemId>,
    typeahead: Typeahead,
    policy: RovingPolicy,
    disabled: bool,
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuTree {
    /// An empty, uncontrolled, closed menu.
    pub fn new() -> Self {
        Self::with_open(Controllable::uncontrolled(false))
    }

    /// An empty menu with the given open flag (controlled or not).
    pub fn with_open(open: Controllable<bool>) -> Self {
        let mut tree = Self {
            menus: vec![MenuData {
                parent: None,
                trigger: None,
                items: Vec::new(),
            }],
            items: Vec::new(),
            open,
            path: SmallVec::new(),
            highlighted: None,
            typeahead: Typeahead::new(),
            policy: RovingPolicy::default(),
            disabled: false,
        };
        tree.apply_open_state();
        tree
    }

    /// Wrap highlight movement around the ends (builder form).
    #[must_use]
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.policy.wrap = if looping { WrapMode::Loop } else { WrapMode::Never };
        self
    }

    /// Typeahead timing (builder form).
    #[must_use]
    pub fn with_typeahead(mut self, config: TypeaheadConfig) -> Self {
        self.typeahead = Typeahead::with_config(config);
        self
    }

    /// Disable the trigger: the menu refuses to open. Disabling an open menu closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    /// Returns `true` if the trigger is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    // --- building ---

    /// Create an empty submenu below `parent`.
    ///
    /// The submenu is reachable once a [`MenuItem::sub_trigger`] for it is
    /// added to `parent`.
    pub fn add_submenu(&mut self, parent: MenuId) -> Result<MenuId, MenuError> {
        self.menu_data(parent)?;
        let id = MenuId(self.menus.len());
        self.menus.push(MenuData {
            parent: Some(parent),
            trigger: None,
            items: Vec::new(),
        });
        Ok(id)
    }

    /// Create a submenu below `parent` together with its trigger item.
    pub fn add_submenu_with_trigger(
        &mut self,
        parent: MenuId,
        text: impl Into<String>,
    ) -> Result<(ItemId, MenuId), MenuError> {
        let submenu = self.add_submenu(parent)?;
        let trigger = self.add_item(parent, MenuItem::sub_trigger(submenu, text))?;
        Ok((trigger, submenu))
    }

    /// Append `item` to `menu`.
    pub fn add_item(&mut self, menu: MenuId, item: MenuItem) -> Result<ItemId, MenuError> {
        self.menu_data(menu)?;
        let id = ItemId(self.items.len());
        if let ItemKind::SubTrigger(submenu) = item.kind {
            let data = self.menu_data(submenu)?;
            if data.parent != Some(menu) {
                return Err(MenuError::ForeignSubmenu { submenu, menu });
            }
            if data.trigger.is_some() {
                return Err(MenuError::DuplicateTrigger(submenu));
            }
            self.menus[submenu.0].trigger = Some(id);
        }
        self.items.push(ItemData { menu, item });
        self.menus[menu.0].items.push(id);
        Ok(id)
    }

    /// Enable or disable an item. A disabled item loses the highlight.
    pub fn set_item_disabled(&mut self, item: ItemId, disabled: bool) -> Result<(), MenuError> {
        self.item_data_mut(item)?.item.disabled = disabled;
        if disabled && self.highlighted == Some(item) {
            self.highlighted = None;
        }
        Ok(())
    }

    /// Set the checked state of an item directly (host-controlled items).
    pub fn set_checked(&mut self, item: ItemId, checked: bool) -> Result<(), MenuError> {
        self.item_data_mut(item)?.item.checked = checked;
        Ok(())
    }

    // --- queries ---

    /// The item, if it exists.
    pub fn item(&self, item: ItemId) -> Option<&MenuItem> {
        self.items.get(item.0).map(|d| &d.item)
    }

    /// The menu `item` belongs to.
    pub fn menu_of(&self, item: ItemId) -> Option<MenuId> {
        self.items.get(item.0).map(|d| d.menu)
    }

    /// Items of `menu`, in display order.
    pub fn items_of(&self, menu: MenuId) -> Result<&[ItemId], MenuError> {
        Ok(&self.menu_data(menu)?.items)
    }

    /// Parent of a submenu (`None` for the root).
    pub fn parent_of(&self, menu: MenuId) -> Option<MenuId> {
        self.menus.get(menu.0).and_then(|m| m.parent)
    }

    /// Trigger item of a submenu.
    pub fn trigger_of(&self, menu: MenuId) -> Option<ItemId> {
        self.menus.get(menu.0).and_then(|m| m.trigger)
    }

    /// Returns `true` if `item` is checked.
    pub fn is_checked(&self, item: ItemId) -> bool {
        self.item(item).is_some_and(|i| i.checked)
    }

    /// Returns `true` while the menu is open.
    pub fn is_open(&self) -> bool {
        !self.path.is_empty()
    }

    /// Returns `true` if the host owns the open flag.
    pub fn is_controlled(&self) -> bool {
        self.open.is_controlled()
    }

    /// Open menus from the root to the innermost submenu (empty while closed).
    pub fn open_path(&self) -> &[MenuId] {
        &self.path
    }

    /// Innermost open menu.
    pub fn innermost(&self) -> Option<MenuId> {
        self.path.last().copied()
    }

    /// Returns `true` if `menu` is part of the open chain.
    pub fn is_menu_open(&self, menu: MenuId) -> bool {
        self.path.contains(&menu)
    }

    /// Highlighted item.
    pub fn highlighted(&self) -> Option<ItemId> {
        self.highlighted
    }

    // --- open state ---

    /// Request opening, highlighting per `focus`.
    pub fn open(&mut self, focus: InitialFocus) {
        if self.disabled {
            return;
        }
        self.open.set(true);
        self.apply_open_state();
        if self.is_open() {
            self.highlighted = match focus {
                InitialFocus::None => None,
                InitialFocus::First => self.step(MenuId::ROOT, None, Navigation::First),
                InitialFocus::Last => self.step(MenuId::ROOT, None, Navigation::Last),
            };
        }
    }

    /// Request closing the whole menu.
    pub fn close(&mut self) {
        self.open.set(false);
        self.apply_open_state();
    }

    /// An outside interaction dismissed the menu.
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// Trigger clicked: toggle.
    pub fn trigger_click(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open(InitialFocus::None);
        }
    }

    /// Key pressed on the closed trigger. Returns `true` if it opened the menu.
    pub fn trigger_key(&mut self, key: Key) -> bool {
        if self.is_open() || self.disabled {
            return false;
        }
        let focus = match key {
            Key::Enter | Key::Space | Key::ArrowDown => InitialFocus::First,
            Key::ArrowUp => InitialFocus::Last,
            _ => return false,
        };
        self.open(focus);
        true
    }

    /// Feed the host-controlled open flag for this render.
    pub fn sync(&mut self, controlled: Option<bool>) {
        self.open.sync(controlled);
        self.apply_open_state();
    }

    fn apply_open_state(&mut self) {
        if *self.open.value() {
            if self.path.is_empty() {
                self.path.push(MenuId::ROOT);
                tracing::debug!("menu opened");
            }
        } else if !self.path.is_empty() {
            self.path.clear();
            self.highlighted = None;
            self.typeahead.reset();
            tracing::debug!("menu closed");
        }
    }

    // --- submenus ---

    /// Open `menu`, closing any sibling chain at the same depth.
    ///
    /// Returns `Ok(false)` if the menu cannot open right now: its parent is not
    /// open, it has no trigger, or its trigger is disabled.
    pub fn open_submenu(&mut self, menu: MenuId) -> Result<bool, MenuError> {
        let data = self.menu_data(menu)?;
        let Some(parent) = data.parent else {
            return Ok(false);
        };
        let Some(trigger) = data.trigger else {
            return Ok(false);
        };
        if self.items[trigger.0].item.disabled {
            return Ok(false);
        }
        let Some(at) = self.path.iter().position(|m| *m == parent) else {
            return Ok(false);
        };
        self.path.truncate(at + 1);
        self.path.push(menu);
        tracing::debug!(%menu, depth = self.path.len(), "submenu opened");
        Ok(true)
    }

    /// Close the innermost submenu and highlight its trigger.
    ///
    /// The root is never closed this way.
    pub fn close_submenu(&mut self) -> Option<MenuId> {
        if self.path.len() <= 1 {
            return None;
        }
        let closed = self.path.pop()?;
        self.highlighted = self.menus[closed.0].trigger;
        tracing::debug!(menu = %closed, "submenu closed");
        Some(closed)
    }

    // --- highlight and selection ---

    /// The pointer moved onto `item`.
    ///
    /// Highlights it, closes submenus deeper than its menu, and opens its
    /// submenu if it is a submenu trigger. Returns `false` if the item cannot
    /// be highlighted.
    pub fn pointer_enter(&mut self, item: ItemId) -> bool {
        let Some(data) = self.items.get(item.0) else {
            return false;
        };
        if data.item.disabled || !data.item.kind.is_focusable() {
            return false;
        }
        let Some(at) = self.path.iter().position(|m| *m == data.menu) else {
            return false;
        };
        let submenu = match data.item.kind {
            ItemKind::SubTrigger(submenu) => Some(submenu),
            _ => None,
        };
        self.path.truncate(at + 1);
        self.highlighted = Some(item);
        if let Some(submenu) = submenu {
            self.path.push(submenu);
        }
        true
    }

    /// Select `item`.
    ///
    /// Checkbox items flip, radio items become the checked one of their group,
    /// and the whole menu closes. Selecting a submenu trigger opens the
    /// submenu instead. Disabled or non-interactive items, and items of menus
    /// that are not open, select nothing.
    pub fn select(&mut self, item: ItemId) -> Option<Selection> {
        let data = self.items.get(item.0)?;
        let (menu, kind, checked) = (data.menu, data.item.kind, data.item.checked);
        if data.item.disabled || !self.path.contains(&menu) {
            return None;
        }
        let kind = match kind {
            ItemKind::Separator | ItemKind::Label => return None,
            ItemKind::SubTrigger(submenu) => {
                if self.open_submenu(submenu).ok()? {
                    self.highlighted = self.step(submenu, None, Navigation::First);
                }
                return None;
            }
            ItemKind::Action => SelectionKind::Action,
            ItemKind::Checkbox => {
                let checked = !checked;
                self.items[item.0].item.checked = checked;
                SelectionKind::Checkbox { checked }
            }
            ItemKind::Radio { group } => {
                for &sibling in &self.menus[menu.0].items {
                    let sibling = &mut self.items[sibling.0].item;
                    if sibling.kind == (ItemKind::Radio { group }) {
                        sibling.checked = false;
                    }
                }
                self.items[item.0].item.checked = true;
                SelectionKind::Radio { group }
            }
        };
        tracing::debug!(%item, ?kind, "menu item selected");
        self.close();
        Some(Selection { item, kind })
    }

    /// Handle a key press while the trigger or menu has focus.
    ///
    /// `now` is the event timestamp in milliseconds, used by typeahead.
    pub fn handle_key(&mut self, key: Key, now: u64) -> MenuResponse {
        if !self.is_open() {
            return if self.trigger_key(key) {
                MenuResponse::Handled
            } else {
                MenuResponse::Ignored
            };
        }
        let Some(menu) = self.innermost() else {
            return MenuResponse::Ignored;
        };
        match key {
            // Space continues a typeahead word ("new file").
            Key::Space if self.typeahead.is_active(now) => self.typeahead_key(menu, ' ', now),
            Key::Escape | Key::Tab => {
                self.close();
                MenuResponse::Handled
            }
            Key::Enter | Key::Space => match self.highlighted {
                Some(item) => match self.select(item) {
                    Some(selection) => MenuResponse::Selected(selection),
                    None => MenuResponse::Handled,
                },
                None => MenuResponse::Ignored,
            },
            Key::ArrowRight => {
                let submenu = self.highlighted.and_then(|h| match self.items[h.0].item.kind {
                    ItemKind::SubTrigger(submenu) => Some(submenu),
                    _ => None,
                });
                let Some(submenu) = submenu else {
                    return MenuResponse::Ignored;
                };
                if self.open_submenu(submenu) != Ok(true) {
                    return MenuResponse::Ignored;
                }
                self.highlighted = self.step(submenu, None, Navigation::First);
                MenuResponse::Handled
            }
            Key::ArrowLeft => match self.close_submenu() {
                Some(_) => MenuResponse::Handled,
                None => MenuResponse::Ignored,
            },
            Key::Character(ch) => self.typeahead_key(menu, ch, now),
            _ => match self.policy.navigation_for(key) {
                Some(nav) => {
                    let origin = self.highlighted.filter(|h| self.items[h.0].menu == menu);
                    if let Some(next) = self.step(menu, origin, nav) {
                        self.highlighted = Some(next);
                    }
                    MenuResponse::Handled
                }
                None => MenuResponse::Ignored,
            },
        }
    }

    fn typeahead_key(&mut self, menu: MenuId, ch: char, now: u64) -> MenuResponse {
        let candidates: Vec<(ItemId, &str)> = self.menus[menu.0]
            .items
            .iter()
            .filter_map(|&id| {
                let item = &self.items[id.0].item;
                (item.kind.is_focusable() && !item.disabled).then_some((id, item.text.as_str()))
            })
            .collect();
        let origin = self.highlighted;
        if let Some(found) = self.typeahead.search(ch, now, &candidates, origin) {
            self.highlighted = Some(found);
        }
        MenuResponse::Handled
    }

    /// Next highlight target within `menu`.
    fn step(&self, menu: MenuId, origin: Option<ItemId>, nav: Navigation) -> Option<ItemId> {
        let entries: Vec<FocusEntry<ItemId>> = self.menus[menu.0]
            .items
            .iter()
            .filter_map(|&id| {
                let item = &self.items[id.0].item;
                item.kind
                    .is_focusable()
                    .then(|| FocusEntry::new(id).with_enabled(!item.disabled))
            })
            .collect();
        self.policy.next(origin, nav, &FocusSpace { nodes: &entries })
    }

    fn menu_data(&self, menu: MenuId) -> Result<&MenuData, MenuError> {
        self.menus.get(menu.0).ok_or(MenuError::UnknownMenu(menu))
    }

    fn item_data_mut(&mut self, item: ItemId) -> Result<&mut ItemData, MenuError> {
        self.items.get_mut(item.0).ok_or(MenuError::UnknownItem(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        tree: MenuTree,
        new_file: ItemId,
        open_file: ItemId,
        disabled: ItemId,
        share: ItemId,
        share_menu: MenuId,
        email: ItemId,
        export: ItemId,
        export_menu: MenuId,
    }

    // File
    // ├─ New File
    // ├─ Open File
    // ├─ Print (disabled)
    // ├─ ──────
    // ├─ Share ▸ ── Email, Link
    // └─ Export ▸ ── PDF
    fn fixture() -> Fixture {
        let mut tree = MenuTree::new();
        let root = MenuId::ROOT;
        let new_file = tree.add_item(root, MenuItem::action("New File")).unwrap();
        let open_file = tree.add_item(root, MenuItem::action("Open File")).unwrap();
        let disabled = tree.add_item(root, MenuItem::action("Print").disabled()).unwrap();
        tree.add_item(root, MenuItem::separator()).unwrap();
        let (share, share_menu) = tree.add_submenu_with_trigger(root, "Share").unwrap();
        let email = tree.add_item(share_menu, MenuItem::action("Email")).unwrap();
        tree.add_item(share_menu, MenuItem::action("Link")).unwrap();
        let (export, export_menu) = tree.add_submenu_with_trigger(root, "Export").unwrap();
        tree.add_item(export_menu, MenuItem::action("PDF")).unwrap();
        Fixture {
            tree,
            new_file,
            open_file,
            disabled,
            share,
            share_menu,
            email,
            export,
            export_menu,
        }
    }

    #[test]
    fn building_outside_the_tree_fails_fast() {
        let mut tree = MenuTree::new();
        let stray = MenuId(42);
        assert_eq!(
            tree.add_item(stray, MenuItem::action("x")),
            Err(MenuError::UnknownMenu(stray))
        );
        assert_eq!(
            tree.add_item(MenuId::ROOT, MenuItem::sub_trigger(stray, "x")),
            Err(MenuError::UnknownMenu(stray))
        );

        let a = tree.add_submenu(MenuId::ROOT).unwrap();
        let b = tree.add_submenu(a).unwrap();
        assert_eq!(
            tree.add_item(MenuId::ROOT, MenuItem::sub_trigger(b, "b")),
            Err(MenuError::ForeignSubmenu {
                submenu: b,
                menu: MenuId::ROOT
            })
        );
        tree.add_item(MenuId::ROOT, MenuItem::sub_trigger(a, "a")).unwrap();
        assert_eq!(
            tree.add_item(MenuId::ROOT, MenuItem::sub_trigger(a, "again")),
            Err(MenuError::DuplicateTrigger(a))
        );
        assert_eq!(
            tree.set_checked(ItemId(99), true),
            Err(MenuError::UnknownItem(ItemId(99)))
        );
    }

    #[test]
    fn error_messages_name_the_ids() {
        use alloc::string::ToString;
        assert_eq!(MenuError::UnknownMenu(MenuId(3)).to_string(), "menu not found: #3");
    }

    #[test]
    fn trigger_keys_open_with_initial_highlight() {
        let mut f = fixture();
        assert!(!f.tree.trigger_key(Key::Escape));
        assert!(f.tree.trigger_key(Key::ArrowDown));
        assert_eq!(f.tree.open_path(), &[MenuId::ROOT]);
        assert_eq!(f.tree.highlighted(), Some(f.new_file));

        f.tree.close();
        assert!(f.tree.trigger_key(Key::ArrowUp));
        assert_eq!(f.tree.highlighted(), Some(f.export));

        f.tree.close();
        f.tree.trigger_click();
        assert!(f.tree.is_open());
        assert_eq!(f.tree.highlighted(), None);
        f.tree.trigger_click();
        assert!(!f.tree.is_open());
    }

    #[test]
    fn arrows_skip_disabled_and_separators() {
        let mut f = fixture();
        f.tree.open(InitialFocus::First);
        f.tree.handle_key(Key::ArrowDown, 0);
        assert_eq!(f.tree.highlighted(), Some(f.open_file));
        f.tree.handle_key(Key::ArrowDown, 0);
        assert_eq!(f.tree.highlighted(), Some(f.share));
        f.tree.handle_key(Key::End, 0);
        assert_eq!(f.tree.highlighted(), Some(f.export));
        // No wrap by default.
        f.tree.handle_key(Key::ArrowDown, 0);
        assert_eq!(f.tree.highlighted(), Some(f.export));
        f.tree.handle_key(Key::Home, 0);
        assert_eq!(f.tree.highlighted(), Some(f.new_file));
    }

    #[test]
    fn looping_wraps() {
        let mut f = fixture();
        f.tree = core::mem::take(&mut f.tree).with_loop(true);
        f.tree.open(InitialFocus::Last);
        f.tree.handle_key(Key::ArrowDown, 0);
        assert_eq!(f.tree.highlighted(), Some(f.new_file));
    }

    #[test]
    fn sibling_submenu_replaces_previous_chain() {
        let mut f = fixture();
        f.tree.open(InitialFocus::None);
        assert_eq!(f.tree.open_submenu(f.share_menu), Ok(true));
        assert_eq!(f.tree.open_path(), &[MenuId::ROOT, f.share_menu]);

        assert_eq!(f.tree.open_submenu(f.export_menu), Ok(true));
        assert_eq!(f.tree.open_path(), &[MenuId::ROOT, f.export_menu]);
        assert!(!f.tree.is_menu_open(f.share_menu));
    }

    #[test]
    fn submenu_needs_open_parent() {
        let mut f = fixture();
        assert_eq!(f.tree.open_submenu(f.share_menu), Ok(false));
        assert_eq!(f.tree.open_submenu(MenuId::ROOT), Ok(false));
    }

    #[test]
    fn arrow_right_and_left_walk_submenus() {
        let mut f = fixture();
        f.tree.open(InitialFocus::None);
        f.tree.pointer_enter(f.open_file);
        assert_eq!(f.tree.handle_key(Key::ArrowRight, 0), MenuResponse::Ignored);

        f.tree.handle_key(Key::ArrowDown, 0);
        assert_eq!(f.tree.highlighted(), Some(f.share));
        assert_eq!(f.tree.handle_key(Key::ArrowRight, 0), MenuResponse::Handled);
        assert_eq!(f.tree.innermost(), Some(f.share_menu));
        assert_eq!(f.tree.highlighted(), Some(f.email));

        assert_eq!(f.tree.handle_key(Key::ArrowLeft, 0), MenuResponse::Handled);
        assert_eq!(f.tree.open_path(), &[MenuId::ROOT]);
        assert_eq!(f.tree.highlighted(), Some(f.share));
        // At the root ArrowLeft is left for a surrounding menubar.
        assert_eq!(f.tree.handle_key(Key::ArrowLeft, 0), MenuResponse::Ignored);
    }

    #[test]
    fn pointer_enter_opens_and_prunes_submenus() {
        let mut f = fixture();
        f.tree.open(InitialFocus::None);
        assert!(f.tree.pointer_enter(f.share));
        assert_eq!(f.tree.open_path(), &[MenuId::ROOT, f.share_menu]);
        assert!(f.tree.pointer_enter(f.email));
        assert_eq!(f.tree.open_path(), &[MenuId::ROOT, f.share_menu]);

        assert!(f.tree.pointer_enter(f.new_file));
        assert_eq!(f.tree.open_path(), &[MenuId::ROOT]);
        assert!(!f.tree.pointer_enter(f.disabled));
        assert_eq!(f.tree.highlighted(), Some(f.new_file));
    }

    #[test]
    fn selecting_an_item_closes_everything() {
        let mut f = fixture();
        f.tree.open(InitialFocus::None);
        f.tree.pointer_enter(f.share);
        f.tree.pointer_enter(f.email);
        let response = f.tree.handle_key(Key::Enter, 0);
        assert_eq!(
            response,
            MenuResponse::Selected(Selection {
                item: f.email,
                kind: SelectionKind::Action
            })
        );
        assert!(!f.tree.is_open());
        assert_eq!(f.tree.open_path(), &[] as &[MenuId]);
        assert_eq!(f.tree.highlighted(), None);
    }

    #[test]
    fn disabled_items_never_select() {
        let mut f = fixture();
        f.tree.open(InitialFocus::None);
        assert_eq!(f.tree.select(f.disabled), None);
        assert!(f.tree.is_open());
    }

    #[test]
    fn escape_closes_whole_menu() {
        let mut f = fixture();
        f.tree.open(InitialFocus::None);
        f.tree.pointer_enter(f.share);
        assert_eq!(f.tree.handle_key(Key::Escape, 0), MenuResponse::Handled);
        assert!(!f.tree.is_open());
    }

    #[test]
    fn checkbox_and_radio_items() {
        let mut tree = MenuTree::new();
        let root = MenuId::ROOT;
        let bar = tree.add_item(root, MenuItem::checkbox("Status bar", true)).unwrap();
        let small = tree.add_item(root, MenuItem::radio(1, "Small").checked()).unwrap();
        let large = tree.add_item(root, MenuItem::radio(1, "Large")).unwrap();
        let other = tree.add_item(root, MenuItem::radio(2, "Other").checked()).unwrap();

        tree.open(InitialFocus::None);
        assert_eq!(
            tree.select(bar),
            Some(Selection {
                item: bar,
                kind: SelectionKind::Checkbox { checked: false }
            })
        );
        assert!(!tree.is_checked(bar));

        tree.open(InitialFocus::None);
        tree.select(large);
        assert!(tree.is_checked(large));
        assert!(!tree.is_checked(small));
        // Different group untouched.
        assert!(tree.is_checked(other));
    }

    #[test]
    fn typeahead_highlights_by_prefix() {
        let mut f = fixture();
        f.tree.open(InitialFocus::None);
        f.tree.handle_key(Key::Character('o'), 0);
        assert_eq!(f.tree.highlighted(), Some(f.open_file));
        f.tree.handle_key(Key::Character('e'), 5000);
        assert_eq!(f.tree.highlighted(), Some(f.export));
        // Disabled "Print" is never matched.
        f.tree.handle_key(Key::Character('p'), 10_000);
        assert_eq!(f.tree.highlighted(), Some(f.export));
    }

    #[test]
    fn space_extends_active_typeahead() {
        let mut tree = MenuTree::new();
        let root = MenuId::ROOT;
        let new_tab = tree.add_item(root, MenuItem::action("New tab")).unwrap();
        let new_window = tree.add_item(root, MenuItem::action("New window")).unwrap();
        tree.open(InitialFocus::None);
        for (i, ch) in "new".chars().enumerate() {
            tree.handle_key(Key::Character(ch), i as u64);
        }
        assert_eq!(tree.highlighted(), Some(new_tab));
        assert_eq!(tree.handle_key(Key::Space, 4), MenuResponse::Handled);
        tree.handle_key(Key::Character('w'), 5);
        assert_eq!(tree.highlighted(), Some(new_window));
        assert!(tree.is_open());
    }

    #[test]
    fn controlled_menu_follows_host() {
        let mut tree = MenuTree::with_open(Controllable::controlled(false));
        tree.add_item(MenuId::ROOT, MenuItem::action("a")).unwrap();
        tree.trigger_click();
        assert!(!tree.is_open());
        tree.sync(Some(true));
        assert!(tree.is_open());
        tree.dismiss();
        assert!(tree.is_open());
        tree.sync(Some(false));
        assert!(!tree.is_open());
    }

    #[test]
    fn disabled_trigger_refuses_to_open() {
        let mut f = fixture();
        f.tree.open(InitialFocus::None);
        f.tree.set_disabled(true);
        assert!(!f.tree.is_open());
        assert!(!f.tree.trigger_key(Key::Enter));
        f.tree.trigger_click();
        assert!(!f.tree.is_open());
    }
}
