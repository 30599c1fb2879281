// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A menu tree floating under its trigger.

use kurbo::Point;
use trellis_dismiss::{DismissReason, DocumentEvent, Listeners, ParentLookup};
use trellis_event_state::Key;
use trellis_float::{Align, Measure, Placement, Side};
use trellis_layer::{PortalHandle, Tier};
use trellis_menu::{InitialFocus, ItemId, MenuResponse, MenuTree, Selection};

use crate::env::{OverlayEnv, OverlayId};
use crate::layer::FloatingLayer;

/// A dropdown menu: a [`MenuTree`] whose open state drives a floating layer.
///
/// Every operation that may open or close the menu reconciles the layer
/// afterwards, so listeners and the portal are held exactly while the tree is
/// open.
#[derive(Debug)]
pub struct DropdownMenu<N> {
    tree: MenuTree,
    layer: FloatingLayer<N>,
}

impl<N: Clone + PartialEq> DropdownMenu<N> {
    /// Below the trigger, leading edges aligned, 4px gap.
    pub const fn default_placement() -> Placement {
        Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0)
    }

    /// Host `tree` in a floating layer.
    pub fn new<H>(
        tree: MenuTree,
        placement: Placement,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Self {
        let layer = FloatingLayer::new(env, placement, Tier::Floating, Listeners::all());
        let mut menu = Self { tree, layer };
        menu.reconcile(env, measure);
        menu
    }

    /// Identity in the environment's dismissal registry.
    pub fn id(&self) -> OverlayId {
        self.layer.id()
    }

    /// The menu.
    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// Edit the menu (items, disabled flags) and reconcile afterwards.
    pub fn edit<H, R>(
        &mut self,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
        f: impl FnOnce(&mut MenuTree) -> R,
    ) -> R {
        let result = f(&mut self.tree);
        self.reconcile(env, measure);
        result
    }

    /// Returns `true` while the menu is open.
    pub fn is_open(&self) -> bool {
        self.tree.is_open()
    }

    /// Resources held while open.
    pub fn layer(&self) -> &FloatingLayer<N> {
        &self.layer
    }

    /// Content position while open and measurable.
    pub fn position(&self) -> Option<Point> {
        self.layer.position()
    }

    /// Portal held while open.
    pub fn portal(&self) -> Option<PortalHandle> {
        self.layer.portal()
    }

    /// Set the trigger node.
    pub fn set_trigger<H>(&mut self, trigger: Option<N>, env: &mut OverlayEnv<N, H>) {
        self.layer.set_trigger(trigger, env);
    }

    /// Set the content node.
    pub fn set_content<H>(
        &mut self,
        content: Option<N>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Point> {
        self.layer.set_content(content, env, measure)
    }

    /// Trigger clicked.
    pub fn trigger_click<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.tree.trigger_click();
        self.reconcile(env, measure);
    }

    /// Open with the given initial highlight.
    pub fn open<H>(&mut self, focus: InitialFocus, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.tree.open(focus);
        self.reconcile(env, measure);
    }

    /// Close the menu.
    pub fn close<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.tree.close();
        self.reconcile(env, measure);
    }

    /// A key was pressed on the trigger or inside the menu.
    pub fn handle_key<H>(
        &mut self,
        key: Key,
        now: u64,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> MenuResponse {
        let response = self.tree.handle_key(key, now);
        self.reconcile(env, measure);
        response
    }

    /// The pointer moved onto `item`.
    pub fn pointer_enter(&mut self, item: ItemId) -> bool {
        self.tree.pointer_enter(item)
    }

    /// `item` was clicked.
    pub fn select<H>(
        &mut self,
        item: ItemId,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Selection> {
        let selection = self.tree.select(item);
        self.reconcile(env, measure);
        selection
    }

    /// Feed the host-controlled open flag for this render.
    pub fn sync<H>(
        &mut self,
        controlled: Option<bool>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.tree.sync(controlled);
        self.reconcile(env, measure);
    }

    /// Route a document event; outside presses, Escape, scroll and resize close the menu.
    pub fn handle_event<H>(
        &mut self,
        event: &DocumentEvent<N>,
        env: &mut OverlayEnv<N, H>,
        lookup: &impl ParentLookup<N>,
        measure: &impl Measure<N>,
    ) -> Option<DismissReason> {
        if !self.layer.is_active() {
            return None;
        }
        match env.dismissal_of(self.id(), event, lookup) {
            Some(reason) => {
                self.apply_dismissal(reason, env, measure);
                Some(reason)
            }
            None => {
                self.layer.reposition(event, env, measure);
                None
            }
        }
    }

    /// Close in response to a dismissal computed elsewhere.
    pub fn apply_dismissal<H>(
        &mut self,
        reason: DismissReason,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        tracing::debug!(id = %self.id(), ?reason, "dropdown menu dismissed");
        self.tree.dismiss();
        self.reconcile(env, measure);
    }

    /// Release listeners and the portal.
    pub fn unmount<H>(&mut self, env: &mut OverlayEnv<N, H>) {
        self.layer.release(env);
    }

    fn reconcile<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.layer.reconcile(self.tree.is_open(), env, measure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};
    use trellis_layer::PortalHost;
    use trellis_menu::{MenuId, MenuItem, SelectionKind};

    fn parent(n: &u32) -> Option<u32> {
        if *n == 0 { None } else { Some(0) }
    }

    fn measure(n: &u32) -> Option<Rect> {
        match n {
            1 => Some(Rect::new(20.0, 20.0, 100.0, 50.0)),
            2 => Some(Rect::new(0.0, 0.0, 160.0, 120.0)),
            _ => None,
        }
    }

    fn setup() -> (OverlayEnv<u32>, DropdownMenu<u32>, ItemId) {
        let mut env = OverlayEnv::new(PortalHost::with_host(()), Size::new(800.0, 600.0));
        let mut tree = MenuTree::new();
        let profile = tree.add_item(MenuId::ROOT, MenuItem::action("Profile")).unwrap();
        tree.add_item(MenuId::ROOT, MenuItem::action("Sign out")).unwrap();
        let mut menu = DropdownMenu::new(tree, DropdownMenu::<u32>::default_placement(), &mut env, &measure);
        menu.set_trigger(Some(1), &mut env);
        menu.set_content(Some(2), &mut env, &measure);
        (env, menu, profile)
    }

    #[test]
    fn keyboard_open_and_select() {
        let (mut env, mut menu, profile) = setup();
        assert_eq!(menu.handle_key(Key::Enter, 0, &mut env, &measure), MenuResponse::Handled);
        assert!(menu.is_open());
        assert_eq!(menu.tree().highlighted(), Some(profile));
        assert_eq!(menu.position(), Some(Point::new(20.0, 54.0)));
        assert_eq!(env.listener_count(), 4);

        let response = menu.handle_key(Key::Enter, 10, &mut env, &measure);
        assert_eq!(
            response,
            MenuResponse::Selected(Selection {
                item: profile,
                kind: SelectionKind::Action
            })
        );
        assert!(!menu.is_open());
        assert_eq!(env.listener_count(), 0);
        assert!(env.portals().is_empty());
    }

    #[test]
    fn click_select_closes() {
        let (mut env, mut menu, profile) = setup();
        menu.trigger_click(&mut env, &measure);
        assert!(menu.pointer_enter(profile));
        assert!(menu.select(profile, &mut env, &measure).is_some());
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn outside_press_dismisses() {
        let (mut env, mut menu, _) = setup();
        menu.open(InitialFocus::First, &mut env, &measure);
        let press = DocumentEvent::PointerDown { target: Some(7) };
        assert_eq!(
            menu.handle_event(&press, &mut env, &parent, &measure),
            Some(DismissReason::PointerDownOutside)
        );
        assert!(!menu.is_open());
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn disabling_while_open_keeps_layer_consistent() {
        let (mut env, mut menu, _) = setup();
        menu.trigger_click(&mut env, &measure);
        menu.edit(&mut env, &measure, |tree| tree.close());
        assert!(!menu.layer().is_active());
        menu.edit(&mut env, &measure, |tree| tree.set_disabled(true));
        menu.trigger_click(&mut env, &measure);
        assert!(!menu.is_open());
        assert_eq!(env.listener_count(), 0);
    }
}
