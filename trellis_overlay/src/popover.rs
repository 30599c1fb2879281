// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-triggered floating content.

use kurbo::{Point, Rect};
use trellis_dismiss::{DismissReason, DocumentEvent, Listeners, ParentLookup};
use trellis_float::{Measure, Placement};
use trellis_layer::{PortalHandle, Tier};
use trellis_state::Controllable;

use crate::env::{OverlayEnv, OverlayId};
use crate::layer::FloatingLayer;

/// A popover: a trigger toggling floating content.
///
/// The open flag is a [`Controllable`]. Dismissals only request a close; a
/// controlled popover keeps its listeners and portal until the host feeds the
/// new value back through [`Popover::sync`].
#[derive(Debug)]
pub struct Popover<N> {
    open: Controllable<bool>,
    layer: FloatingLayer<N>,
}

impl<N: Clone + PartialEq> Popover<N> {
    /// Create a popover. If `open` already holds `true`, resources are acquired now.
    pub fn new<H>(
        open: Controllable<bool>,
        placement: Placement,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Self {
        let layer = FloatingLayer::new(env, placement, Tier::Floating, Listeners::all());
        let mut popover = Self { open, layer };
        popover.reconcile(env, measure);
        popover
    }

    /// Identity in the environment's dismissal registry.
    pub fn id(&self) -> OverlayId {
        self.layer.id()
    }

    /// Current open flag.
    pub fn is_open(&self) -> bool {
        *self.open.value()
    }

    /// Returns `true` if the host owns the open flag.
    pub fn is_controlled(&self) -> bool {
        self.open.is_controlled()
    }

    /// Resources held while open.
    pub fn layer(&self) -> &FloatingLayer<N> {
        &self.layer
    }

    /// Content position while open and measurable.
    pub fn position(&self) -> Option<Point> {
        self.layer.position()
    }

    /// Content rectangle while open and measurable.
    pub fn content_rect(&self) -> Option<Rect> {
        self.layer.content_rect()
    }

    /// Portal held while open.
    pub fn portal(&self) -> Option<PortalHandle> {
        self.layer.portal()
    }

    /// Set the trigger node.
    pub fn set_trigger<H>(&mut self, trigger: Option<N>, env: &mut OverlayEnv<N, H>) {
        self.layer.set_trigger(trigger, env);
    }

    /// Set the content node (typically once it mounts after opening).
    pub fn set_content<H>(
        &mut self,
        content: Option<N>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Point> {
        self.layer.set_content(content, env, measure)
    }

    /// Replace the placement.
    pub fn set_placement<H>(
        &mut self,
        placement: Placement,
        env: &OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.layer.set_placement(placement, env, measure);
    }

    /// Request a new open state.
    pub fn set_open<H>(&mut self, open: bool, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.open.set(open);
        self.reconcile(env, measure);
    }

    /// Trigger activated: flip the open state.
    pub fn toggle<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        let next = !self.is_open();
        self.set_open(next, env, measure);
    }

    /// Feed the host-controlled open flag for this render.
    pub fn sync<H>(
        &mut self,
        controlled: Option<bool>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.open.sync(controlled);
        self.reconcile(env, measure);
    }

    /// Route a document event.
    ///
    /// Returns the reason if the event dismissed this popover. Events that do
    /// not dismiss it still reposition it (a scroll inside the content, for
    /// example). With several overlays open, prefer one
    /// [`OverlayEnv::dispatch`] per event plus [`Popover::apply_dismissal`].
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
        tracing::debug!(id = %self.id(), ?reason, "popover dismissed");
        self.set_open(false, env, measure);
    }

    /// Release listeners and the portal. Call when the popover goes away.
    pub fn unmount<H>(&mut self, env: &mut OverlayEnv<N, H>) {
        self.layer.release(env);
    }

    fn reconcile<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.layer.reconcile(*self.open.value(), env, measure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Size;
    use trellis_event_state::Key;
    use trellis_float::{Align, Side};
    use trellis_layer::PortalHost;

    // 0 is the root; 1 trigger; 2 content with child 5; 9 elsewhere.
    fn parent(n: &u32) -> Option<u32> {
        match n {
            5 => Some(2),
            0 => None,
            _ => Some(0),
        }
    }

    fn measure(n: &u32) -> Option<Rect> {
        match n {
            1 => Some(Rect::new(100.0, 100.0, 160.0, 130.0)),
            2 => Some(Rect::new(0.0, 0.0, 200.0, 80.0)),
            _ => None,
        }
    }

    fn env() -> OverlayEnv<u32> {
        OverlayEnv::new(PortalHost::with_host(()), Size::new(800.0, 600.0))
    }

    fn popover(env: &mut OverlayEnv<u32>, open: Controllable<bool>) -> Popover<u32> {
        let placement = Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0);
        let mut popover = Popover::new(open, placement, env, &measure);
        popover.set_trigger(Some(1), env);
        popover.set_content(Some(2), env, &measure);
        popover
    }

    #[test]
    fn toggle_positions_and_releases() {
        let mut env = env();
        let mut p = popover(&mut env, Controllable::uncontrolled(false));
        assert_eq!(env.listener_count(), 0);

        p.toggle(&mut env, &measure);
        assert!(p.is_open());
        assert_eq!(p.position(), Some(Point::new(100.0, 134.0)));
        assert_eq!(env.listener_count(), 4);
        assert_eq!(p.portal().map(PortalHandle::tier), Some(Tier::Floating));

        p.toggle(&mut env, &measure);
        assert_eq!(env.listener_count(), 0);
        assert!(env.portals().is_empty());
        assert_eq!(p.position(), None);
    }

    #[test]
    fn every_close_path_releases_listeners() {
        let events = [
            DocumentEvent::PointerDown { target: Some(9) },
            DocumentEvent::KeyDown {
                key: Key::Escape,
                focused: Some(5),
            },
            DocumentEvent::Scroll { source: None },
            DocumentEvent::Resize,
        ];
        for event in &events {
            let mut env = env();
            let mut p = popover(&mut env, Controllable::uncontrolled(true));
            assert!(p.handle_event(event, &mut env, &parent, &measure).is_some());
            assert!(!p.is_open());
            assert_eq!(env.listener_count(), 0);
        }

        let mut env = env();
        let mut p = popover(&mut env, Controllable::uncontrolled(true));
        p.unmount(&mut env);
        assert_eq!(env.listener_count(), 0);
        assert!(env.portals().is_empty());
    }

    #[test]
    fn inside_interactions_keep_it_open() {
        let mut env = env();
        let mut p = popover(&mut env, Controllable::uncontrolled(true));
        let inside = [
            DocumentEvent::PointerDown { target: Some(5) },
            DocumentEvent::PointerDown { target: Some(1) },
            DocumentEvent::Scroll { source: Some(5) },
            DocumentEvent::KeyDown {
                key: Key::Tab,
                focused: Some(5),
            },
        ];
        for event in &inside {
            assert_eq!(p.handle_event(event, &mut env, &parent, &measure), None);
        }
        assert!(p.is_open());
        assert_eq!(env.listener_count(), 4);
    }

    #[test]
    fn controlled_dismissal_waits_for_host() {
        let requests = Rc::new(RefCell::new(Vec::new()));
        let sink = requests.clone();
        let mut env = env();
        let open = Controllable::controlled(true).with_on_change(move |v: &bool| sink.borrow_mut().push(*v));
        let mut p = popover(&mut env, open);

        let reason = p.handle_event(&DocumentEvent::Resize, &mut env, &parent, &measure);
        assert_eq!(reason, Some(DismissReason::Resize));
        assert_eq!(*requests.borrow(), [false]);
        assert!(p.is_open());
        assert_eq!(env.listener_count(), 4);

        p.sync(Some(false), &mut env, &measure);
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn closed_popover_ignores_events() {
        let mut env = env();
        let mut p = popover(&mut env, Controllable::uncontrolled(false));
        assert_eq!(p.handle_event(&DocumentEvent::Resize, &mut env, &parent, &measure), None);
    }

    #[test]
    fn independent_popovers_close_independently() {
        let mut env = env();
        let mut a = popover(&mut env, Controllable::uncontrolled(true));
        let mut b = Popover::new(Controllable::uncontrolled(true), Placement::default(), &mut env, &measure);
        b.set_trigger(Some(9), &mut env);

        // Pressing b's trigger is outside a only.
        let press = DocumentEvent::PointerDown { target: Some(9) };
        for dismissal in env.dispatch(&press, &parent) {
            if dismissal.key == a.id() {
                a.apply_dismissal(dismissal.reason, &mut env, &measure);
            } else if dismissal.key == b.id() {
                b.apply_dismissal(dismissal.reason, &mut env, &measure);
            }
        }
        assert!(!a.is_open());
        assert!(b.is_open());
        assert_eq!(env.listener_count(), 4);
    }
}
