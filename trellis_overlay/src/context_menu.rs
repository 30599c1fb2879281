// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A context menu floating at the pointer.

use kurbo::Point;
use trellis_dismiss::{DismissReason, DocumentEvent, Listeners, ParentLookup};
use trellis_event_state::Key;
use trellis_float::Measure;
use trellis_layer::{PortalHandle, Tier};
use trellis_menu::{ContextMenu, ItemId, MenuResponse, Selection};

use crate::env::{OverlayEnv, OverlayId};
use crate::layer::FloatingLayer;

/// A [`ContextMenu`] positioned against its pointer anchor.
///
/// There is no trigger node: the anchor rectangle from
/// [`ContextMenu::open_at`] replaces it, so every press outside the content
/// counts as outside.
#[derive(Debug)]
pub struct ContextMenuOverlay<N> {
    menu: ContextMenu,
    layer: FloatingLayer<N>,
}

impl<N: Clone + PartialEq> ContextMenuOverlay<N> {
    /// Host `menu` in a floating layer placed with [`ContextMenu::placement`].
    pub fn new<H>(menu: ContextMenu, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) -> Self {
        let layer = FloatingLayer::new(env, ContextMenu::placement(), Tier::Floating, Listeners::all());
        let mut overlay = Self { menu, layer };
        overlay.reconcile(env, measure);
        overlay
    }

    /// Identity in the environment's dismissal registry.
    pub fn id(&self) -> OverlayId {
        self.layer.id()
    }

    /// The menu.
    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    /// Edit the menu and reconcile afterwards.
    pub fn edit<H, R>(
        &mut self,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
        f: impl FnOnce(&mut ContextMenu) -> R,
    ) -> R {
        let result = f(&mut self.menu);
        self.reconcile(env, measure);
        result
    }

    /// Returns `true` while the menu is open.
    pub fn is_open(&self) -> bool {
        self.menu.tree().is_open()
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

    /// Set the content node.
    pub fn set_content<H>(
        &mut self,
        content: Option<N>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Point> {
        self.layer.set_content(content, env, measure)
    }

    /// Secondary click at `point`. Re-opening while open moves the menu.
    ///
    /// Returns `false` if the menu is disabled.
    pub fn open_at<H>(
        &mut self,
        point: Point,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        if !self.menu.open_at(point) {
            return false;
        }
        self.layer.set_virtual_anchor(self.menu.anchor(), env, measure);
        self.reconcile(env, measure);
        true
    }

    /// Close the menu.
    pub fn close<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.menu.close();
        self.reconcile(env, measure);
    }

    /// A key was pressed inside the open menu.
    pub fn handle_key<H>(
        &mut self,
        key: Key,
        now: u64,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> MenuResponse {
        let response = self.menu.handle_key(key, now);
        self.reconcile(env, measure);
        response
    }

    /// The pointer moved onto `item`.
    pub fn pointer_enter(&mut self, item: ItemId) -> bool {
        self.menu.tree_mut().pointer_enter(item)
    }

    /// `item` was clicked.
    pub fn select<H>(
        &mut self,
        item: ItemId,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Selection> {
        let selection = self.menu.tree_mut().select(item);
        self.reconcile(env, measure);
        selection
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
        tracing::debug!(id = %self.id(), ?reason, "context menu dismissed");
        self.menu.dismiss();
        self.reconcile(env, measure);
    }

    /// Release listeners and the portal.
    pub fn unmount<H>(&mut self, env: &mut OverlayEnv<N, H>) {
        self.layer.release(env);
    }

    fn reconcile<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.layer.reconcile(self.is_open(), env, measure);
    }
}
