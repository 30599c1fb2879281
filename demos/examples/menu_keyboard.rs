// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard-driven menus: a menu with a submenu, a menubar and a select.
//!
//! Run:
//! - `cargo run -p trellis_demos --example menu_keyboard`

use trellis_event_state::Key;
use trellis_menu::{
    MenuError, MenuId, MenuItem, MenuResponse, MenuTree, Menubar, Select, SelectItem,
};
use trellis_state::Controllable;

fn describe(tree: &MenuTree) -> String {
    let highlighted = tree
        .highlighted()
        .and_then(|id| tree.item(id))
        .map_or("-", |item| item.text.as_str());
    format!(
        "open={} path={:?} highlighted={highlighted}",
        tree.is_open(),
        tree.open_path()
    )
}

fn edit_menu() -> Result<MenuTree, MenuError> {
    let mut tree = MenuTree::new().with_loop(true);
    tree.add_item(MenuId::ROOT, MenuItem::action("Undo"))?;
    tree.add_item(MenuId::ROOT, MenuItem::action("Redo").disabled())?;
    tree.add_item(MenuId::ROOT, MenuItem::separator())?;
    let (_, find) = tree.add_submenu_with_trigger(MenuId::ROOT, "Find")?;
    tree.add_item(find, MenuItem::action("Find..."))?;
    tree.add_item(find, MenuItem::action("Replace..."))?;
    tree.add_item(MenuId::ROOT, MenuItem::checkbox("Word wrap", false))?;
    Ok(tree)
}

fn main() -> Result<(), MenuError> {
    println!("== menu ==");
    let mut tree = edit_menu()?;
    let mut now = 0;
    for key in [
        Key::ArrowDown,
        Key::ArrowDown,
        Key::ArrowRight,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowDown,
        Key::Enter,
    ] {
        now += 50;
        let response = tree.handle_key(key, now);
        println!("{key:?} -> {response:?}; {}", describe(&tree));
    }

    // Typeahead: "w" jumps to "Word wrap".
    tree.handle_key(Key::Enter, now + 1_000);
    tree.handle_key(Key::Character('w'), now + 1_050);
    println!("after 'w': {}", describe(&tree));
    if let MenuResponse::Selected(selection) = tree.handle_key(Key::Space, now + 2_000) {
        println!("selected {:?}", selection.kind);
    }

    println!("\n== menubar ==");
    let mut bar = Menubar::new();
    bar.push(edit_menu()?);
    bar.push(edit_menu()?);
    bar.trigger_click(0);
    bar.handle_key(Key::ArrowRight, now);
    println!("open menu after ArrowRight: {:?}", bar.open_index());
    bar.handle_key(Key::Escape, now);
    println!("open menu after Escape: {:?}", bar.open_index());

    println!("\n== select ==");
    let mut select = Select::new(
        Controllable::uncontrolled(false),
        Controllable::uncontrolled(Some("pear")),
    )
    .with_placeholder("Pick a fruit");
    println!("label before items register: {}", select.display_label());
    select.register(SelectItem::new("apple", "Apple"));
    select.register(SelectItem::new("pear", "Pear"));
    select.register(SelectItem::new("plum", "Plum").disabled());
    println!("label after items register: {}", select.display_label());
    select.handle_key(Key::Character('a'), now);
    println!("typeahead on the closed trigger selects: {:?}", select.value());
    Ok(())
}
