// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A select whose option list floats under its trigger.

use kurbo::Point;
use trellis_dismiss::{DismissReason, DocumentEvent, Listeners, ParentLookup};
use trellis_event_state::Key;
use trellis_float::{Align, Measure, Placement, Side};
use trellis_layer::{PortalHandle, Tier};
use trellis_menu::Select;

use crate::env::{OverlayEnv, OverlayId};
use crate::layer::FloatingLayer;

/// A [`Select`] whose open flag drives a floating layer.
///
/// The option list holds listeners and a portal exactly while the select is
/// open. A controlled select keeps them until the host syncs the close.
#[derive(Debug)]
pub struct SelectMenu<V, N> {
    state: Select<V>,
    layer: FloatingLayer<N>,
}

impl<V: Clone + PartialEq, N: Clone + PartialEq> SelectMenu<V, N> {
    /// Below the trigger, leading edges aligned, 4px gap.
    pub const fn default_placement() -> Placement {
        Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0)
    }

    /// Host `state` in a floating layer.
    pub fn new<H>(
        state: Select<V>,
        placement: Placement,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Self {
        let layer = FloatingLayer::new(env, placement, Tier::Floating, Listeners::all());
        let mut menu = Self { state, layer };
        menu.reconcile(env, measure);
        menu
    }

    /// Identity in the environment's dismissal registry.
    pub fn id(&self) -> OverlayId {
        self.layer.id()
    }

    /// Value, options and label.
    pub fn state(&self) -> &Select<V> {
        &self.state
    }

    /// Edit the select (options, disabled flag) and reconcile afterwards.
    pub fn edit<H, R>(
        &mut self,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
        f: impl FnOnce(&mut Select<V>) -> R,
    ) -> R {
        let result = f(&mut self.state);
        self.reconcile(env, measure);
        result
    }

    /// Returns `true` while the option list is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Resources held while open.
    pub fn layer(&self) -> &FloatingLayer<N> {
        &self.layer
    }

    /// Option list position while open and measurable.
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

    /// Set the option list node.
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
        self.state.trigger_click();
        self.reconcile(env, measure);
    }

    /// Open the option list.
    pub fn open<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.state.open();
        self.reconcile(env, measure);
    }

    /// Close the option list.
    pub fn close<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.state.close();
        self.reconcile(env, measure);
    }

    /// A key was pressed on the trigger or inside the list.
    pub fn handle_key<H>(
        &mut self,
        key: Key,
        now: u64,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        let consumed = self.state.handle_key(key, now);
        self.reconcile(env, measure);
        consumed
    }

    /// The pointer moved onto the option holding `value`.
    pub fn highlight(&mut self, value: &V) -> bool {
        self.state.highlight(value)
    }

    /// The option holding `value` was clicked.
    pub fn select<H>(
        &mut self,
        value: &V,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        let chosen = self.state.select(value);
        self.reconcile(env, measure);
        chosen
    }

    /// Feed host-controlled open flag and value for this render.
    pub fn sync<H>(
        &mut self,
        open: Option<bool>,
        value: Option<Option<V>>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.state.sync(open, value);
        self.reconcile(env, measure);
    }

    /// Route a document event; outside presses, Escape, scroll and resize close the list.
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
        tracing::debug!(id = %self.id(), ?reason, "select dismissed");
        self.state.dismiss();
        self.reconcile(env, measure);
    }

    /// Release listeners and the portal.
    pub fn unmount<H>(&mut self, env: &mut OverlayEnv<N, H>) {
        self.layer.release(env);
    }

    fn reconcile<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.layer.reconcile(self.state.is_open(), env, measure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};
    use trellis_layer::PortalHost;
    use trellis_menu::SelectItem;
    use trellis_state::Controllable;

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

    fn setup(open: Controllable<bool>) -> (OverlayEnv<u32>, SelectMenu<&'static str, u32>) {
        let mut env = OverlayEnv::new(PortalHost::with_host(()), Size::new(800.0, 600.0));
        let mut state = Select::new(open, Controllable::uncontrolled(None)).with_placeholder("Fruit");
        state.register(SelectItem::new("apple", "Apple"));
        state.register(SelectItem::new("pear", "Pear"));
        let mut menu = SelectMenu::new(state, SelectMenu::<&str, u32>::default_placement(), &mut env, &measure);
        menu.set_trigger(Some(1), &mut env);
        menu.set_content(Some(2), &mut env, &measure);
        (env, menu)
    }

    #[test]
    fn outside_press_closes_and_releases() {
        let (mut env, mut menu) = setup(Controllable::uncontrolled(false));
        menu.trigger_click(&mut env, &measure);
        assert!(menu.is_open());
        assert_eq!(menu.position(), Some(Point::new(20.0, 54.0)));
        assert_eq!(env.listener_count(), 4);
        assert_eq!(env.portals().len(), 1);

        let press = DocumentEvent::PointerDown { target: Some(7) };
        assert_eq!(
            menu.handle_event(&press, &mut env, &parent, &measure),
            Some(DismissReason::PointerDownOutside)
        );
        assert!(!menu.is_open());
        assert_eq!(env.listener_count(), 0);
        assert!(env.portals().is_empty());
    }

    #[test]
    fn choosing_an_option_closes() {
        let (mut env, mut menu) = setup(Controllable::uncontrolled(false));
        assert!(menu.handle_key(Key::ArrowDown, 0, &mut env, &measure));
        assert_eq!(menu.state().highlighted(), Some(&"apple"));
        assert!(menu.select(&"pear", &mut env, &measure));
        assert_eq!(menu.state().display_label(), "Pear");
        assert!(!menu.is_open());
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn press_inside_list_keeps_it_open() {
        let (mut env, mut menu) = setup(Controllable::uncontrolled(false));
        menu.open(&mut env, &measure);
        let press = DocumentEvent::PointerDown { target: Some(2) };
        assert_eq!(menu.handle_event(&press, &mut env, &parent, &measure), None);
        assert!(menu.is_open());
    }

    #[test]
    fn controlled_close_waits_for_host() {
        let (mut env, mut menu) = setup(Controllable::controlled(true));
        menu.sync(Some(true), None, &mut env, &measure);
        assert_eq!(env.listener_count(), 4);

        menu.apply_dismissal(DismissReason::PointerDownOutside, &mut env, &measure);
        assert!(menu.is_open());
        assert_eq!(env.listener_count(), 4);

        menu.sync(Some(false), None, &mut env, &measure);
        assert_eq!(env.listener_count(), 0);
        assert!(env.portals().is_empty());
    }
}
