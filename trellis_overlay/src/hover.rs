// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover-triggered overlays: hover cards and tooltips.

use kurbo::Point;
use trellis_dismiss::{DismissReason, DocumentEvent, Listeners, ParentLookup};
use trellis_event_state::hover::{HoverDelays, HoverIntent, HoverTransition};
use trellis_float::{Measure, Placement};
use trellis_layer::Tier;
use trellis_state::Controllable;

use crate::env::{OverlayEnv, OverlayId};
use crate::layer::FloatingLayer;

/// Open flag, hover timers and floating resources shared by both overlays.
#[derive(Debug)]
struct HoverLayer<N> {
    open: Controllable<bool>,
    intent: HoverIntent,
    layer: FloatingLayer<N>,
}

impl<N: Clone + PartialEq> HoverLayer<N> {
    fn new<H>(
        open: Controllable<bool>,
        delays: HoverDelays,
        placement: Placement,
        listeners: Listeners,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Self {
        let mut intent = HoverIntent::with_delays(delays);
        if *open.value() {
            intent.force_open();
        }
        let layer = FloatingLayer::new(env, placement, Tier::Floating, listeners);
        let mut this = Self { open, intent, layer };
        this.reconcile(env, measure);
        this
    }

    fn is_open(&self) -> bool {
        *self.open.value()
    }

    fn apply<H>(
        &mut self,
        transition: Option<HoverTransition>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        let Some(transition) = transition else {
            return false;
        };
        let was_open = self.is_open();
        // A controlled flag only reports the request; it changes on sync.
        self.open.set(transition == HoverTransition::Open);
        self.reconcile(env, measure);
        was_open != self.is_open()
    }

    fn set_open<H>(&mut self, open: bool, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        if open {
            self.intent.force_open();
        } else {
            self.intent.force_close();
        }
        self.open.set(open);
        self.reconcile(env, measure);
    }

    fn sync<H>(
        &mut self,
        controlled: Option<bool>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.open.sync(controlled);
        // The host has the last word; timers restart from its state.
        match (self.is_open(), self.intent.is_open()) {
            (true, false) => self.intent.force_open(),
            (false, true) => self.intent.force_close(),
            _ => {}
        }
        self.reconcile(env, measure);
    }

    fn handle_event<H>(
        &mut self,
        event: &DocumentEvent<N>,
        env: &mut OverlayEnv<N, H>,
        lookup: &impl ParentLookup<N>,
        measure: &impl Measure<N>,
    ) -> Option<DismissReason> {
        if !self.layer.is_active() {
            return None;
        }
        match env.dismissal_of(self.layer.id(), event, lookup) {
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

    fn apply_dismissal<H>(
        &mut self,
        reason: DismissReason,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        tracing::debug!(id = %self.layer.id(), ?reason, "hover overlay dismissed");
        self.set_open(false, env, measure);
    }

    fn reconcile<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.layer.reconcile(*self.open.value(), env, measure);
    }
}

/// Hover card: rich preview content shown after the pointer rests on a trigger.
///
/// Opens after [`HoverDelays::open_delay`] of hovering and closes
/// [`HoverDelays::close_delay`] after the pointer leaves both trigger and
/// content. Moving from the trigger to the content (or back) within the close
/// delay keeps the card open. The card schedules nothing; the host calls
/// [`HoverCard::tick`] at [`HoverCard::next_deadline`].
#[derive(Debug)]
pub struct HoverCard<N> {
    inner: HoverLayer<N>,
}

impl<N: Clone + PartialEq> HoverCard<N> {
    /// Create a hover card with the default 700 ms / 300 ms delays.
    pub fn new<H>(
        open: Controllable<bool>,
        placement: Placement,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Self {
        Self::with_delays(open, HoverDelays::HOVER_CARD, placement, env, measure)
    }

    /// Create a hover card with custom delays.
    pub fn with_delays<H>(
        open: Controllable<bool>,
        delays: HoverDelays,
        placement: Placement,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Self {
        Self {
            inner: HoverLayer::new(open, delays, placement, Listeners::all(), env, measure),
        }
    }

    /// Identity in the environment's dismissal registry.
    pub fn id(&self) -> OverlayId {
        self.inner.layer.id()
    }

    /// Current open flag.
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Resources held while open.
    pub fn layer(&self) -> &FloatingLayer<N> {
        &self.inner.layer
    }

    /// Content position while open and measurable.
    pub fn position(&self) -> Option<Point> {
        self.inner.layer.position()
    }

    /// Set the trigger node.
    pub fn set_trigger<H>(&mut self, trigger: Option<N>, env: &mut OverlayEnv<N, H>) {
        self.inner.layer.set_trigger(trigger, env);
    }

    /// Set the content node.
    pub fn set_content<H>(
        &mut self,
        content: Option<N>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Point> {
        self.inner.layer.set_content(content, env, measure)
    }

    /// The pointer entered the trigger or the content.
    ///
    /// Returns `true` if the open state changed. A controlled overlay only
    /// requests the change and returns `false` until the host syncs.
    pub fn pointer_enter<H>(
        &mut self,
        now: u64,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        let transition = self.inner.intent.on_enter(now);
        self.inner.apply(transition, env, measure)
    }

    /// The pointer left the trigger or the content.
    pub fn pointer_leave<H>(
        &mut self,
        now: u64,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        let transition = self.inner.intent.on_leave(now);
        self.inner.apply(transition, env, measure)
    }

    /// Fire a due timer. Returns `true` if the open state changed.
    pub fn tick<H>(&mut self, now: u64, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) -> bool {
        let transition = self.inner.intent.tick(now);
        self.inner.apply(transition, env, measure)
    }

    /// When the host should next call [`HoverCard::tick`].
    pub fn next_deadline(&self) -> Option<u64> {
        self.inner.intent.next_deadline()
    }

    /// Request a new open state immediately, cancelling timers.
    pub fn set_open<H>(&mut self, open: bool, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.inner.set_open(open, env, measure);
    }

    /// Feed the host-controlled open flag for this render.
    pub fn sync<H>(
        &mut self,
        controlled: Option<bool>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.inner.sync(controlled, env, measure);
    }

    /// Route a document event; see [`Popover::handle_event`](crate::Popover::handle_event).
    pub fn handle_event<H>(
        &mut self,
        event: &DocumentEvent<N>,
        env: &mut OverlayEnv<N, H>,
        lookup: &impl ParentLookup<N>,
        measure: &impl Measure<N>,
    ) -> Option<DismissReason> {
        self.inner.handle_event(event, env, lookup, measure)
    }

    /// Close in response to a dismissal computed elsewhere.
    pub fn apply_dismissal<H>(
        &mut self,
        reason: DismissReason,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.inner.apply_dismissal(reason, env, measure);
    }

    /// Release listeners and the portal.
    pub fn unmount<H>(&mut self, env: &mut OverlayEnv<N, H>) {
        self.inner.intent.force_close();
        self.inner.layer.release(env);
    }
}

/// Tooltip options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TooltipConfig {
    /// Hover time before the tooltip shows, in milliseconds.
    pub delay_duration: u64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            delay_duration: HoverDelays::TOOLTIP.open_delay,
        }
    }
}

/// Tooltip: a short label shown on hover or keyboard focus.
///
/// Shows after `delay_duration` of hovering, or at once on focus. Hides as
/// soon as the pointer leaves, focus leaves, a pointer is pressed (on the
/// trigger too) or Escape is pressed.
#[derive(Debug)]
pub struct Tooltip<N> {
    inner: HoverLayer<N>,
}

impl<N: Clone + PartialEq> Tooltip<N> {
    /// Create a tooltip.
    pub fn new<H>(
        open: Controllable<bool>,
        config: TooltipConfig,
        placement: Placement,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Self {
        let delays = HoverDelays {
            open_delay: config.delay_duration,
            close_delay: 0,
        };
        let listeners = Listeners::POINTER_DOWN | Listeners::KEY_DOWN;
        Self {
            inner: HoverLayer::new(open, delays, placement, listeners, env, measure),
        }
    }

    /// Identity in the environment's dismissal registry.
    pub fn id(&self) -> OverlayId {
        self.inner.layer.id()
    }

    /// Current open flag.
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Resources held while open.
    pub fn layer(&self) -> &FloatingLayer<N> {
        &self.inner.layer
    }

    /// Content position while open and measurable.
    pub fn position(&self) -> Option<Point> {
        self.inner.layer.position()
    }

    /// Set the trigger node.
    pub fn set_trigger<H>(&mut self, trigger: Option<N>, env: &mut OverlayEnv<N, H>) {
        self.inner.layer.set_trigger(trigger, env);
    }

    /// Set the content node.
    pub fn set_content<H>(
        &mut self,
        content: Option<N>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Point> {
        self.inner.layer.set_content(content, env, measure)
    }

    /// The pointer entered the trigger.
    pub fn pointer_enter<H>(
        &mut self,
        now: u64,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        let transition = self.inner.intent.on_enter(now);
        self.inner.apply(transition, env, measure)
    }

    /// The pointer left the trigger.
    pub fn pointer_leave<H>(
        &mut self,
        now: u64,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        let transition = self.inner.intent.on_leave(now);
        self.inner.apply(transition, env, measure)
    }

    /// Fire a due timer. Returns `true` if the open state changed.
    pub fn tick<H>(&mut self, now: u64, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) -> bool {
        let transition = self.inner.intent.tick(now);
        self.inner.apply(transition, env, measure)
    }

    /// When the host should next call [`Tooltip::tick`].
    pub fn next_deadline(&self) -> Option<u64> {
        self.inner.intent.next_deadline()
    }

    /// The trigger received keyboard focus: show without delay.
    pub fn focus<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.inner.set_open(true, env, measure);
    }

    /// The trigger lost focus.
    pub fn blur<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.inner.set_open(false, env, measure);
    }

    /// A pointer was pressed on the trigger itself.
    pub fn trigger_pointer_down<H>(&mut self, env: &mut OverlayEnv<N, H>, measure: &impl Measure<N>) {
        self.inner.set_open(false, env, measure);
    }

    /// Feed the host-controlled open flag for this render.
    pub fn sync<H>(
        &mut self,
        controlled: Option<bool>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.inner.sync(controlled, env, measure);
    }

    /// Route a document event. Pointer presses outside and Escape close the tooltip.
    pub fn handle_event<H>(
        &mut self,
        event: &DocumentEvent<N>,
        env: &mut OverlayEnv<N, H>,
        lookup: &impl ParentLookup<N>,
        measure: &impl Measure<N>,
    ) -> Option<DismissReason> {
        self.inner.handle_event(event, env, lookup, measure)
    }

    /// Close in response to a dismissal computed elsewhere.
    pub fn apply_dismissal<H>(
        &mut self,
        reason: DismissReason,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.inner.apply_dismissal(reason, env, measure);
    }

    /// Release listeners and the portal.
    pub fn unmount<H>(&mut self, env: &mut OverlayEnv<N, H>) {
        self.inner.intent.force_close();
        self.inner.layer.release(env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::{Rect, Size};
    use trellis_event_state::Key;
    use trellis_layer::PortalHost;

    fn parent(n: &u32) -> Option<u32> {
        if *n == 0 { None } else { Some(0) }
    }

    fn measure(n: &u32) -> Option<Rect> {
        match n {
            1 => Some(Rect::new(100.0, 100.0, 160.0, 130.0)),
            2 => Some(Rect::new(0.0, 0.0, 120.0, 40.0)),
            _ => None,
        }
    }

    fn env() -> OverlayEnv<u32> {
        OverlayEnv::new(PortalHost::with_host(()), Size::new(800.0, 600.0))
    }

    fn card(env: &mut OverlayEnv<u32>) -> HoverCard<u32> {
        let mut card = HoverCard::new(Controllable::uncontrolled(false), Placement::default(), env, &measure);
        card.set_trigger(Some(1), env);
        card.set_content(Some(2), env, &measure);
        card
    }

    #[test]
    fn hover_card_opens_after_delay() {
        let mut env = env();
        let mut card = card(&mut env);
        assert!(!card.pointer_enter(1_000, &mut env, &measure));
        assert_eq!(card.next_deadline(), Some(1_700));
        assert!(!card.tick(1_699, &mut env, &measure));
        assert!(card.tick(1_700, &mut env, &measure));
        assert!(card.is_open());
        assert!(card.position().is_some());
        assert_eq!(env.listener_count(), 4);
    }

    #[test]
    fn hover_card_survives_crossing_the_gap() {
        let mut env = env();
        let mut card = card(&mut env);
        card.set_open(true, &mut env, &measure);

        // Leave the trigger, enter the content 200ms later.
        card.pointer_leave(5_000, &mut env, &measure);
        assert_eq!(card.next_deadline(), Some(5_300));
        card.pointer_enter(5_200, &mut env, &measure);
        assert!(!card.tick(5_300, &mut env, &measure));
        assert!(card.is_open());

        card.pointer_leave(6_000, &mut env, &measure);
        assert!(card.tick(6_300, &mut env, &measure));
        assert!(!card.is_open());
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn brief_hover_never_opens() {
        let mut env = env();
        let mut card = card(&mut env);
        card.pointer_enter(0, &mut env, &measure);
        card.pointer_leave(300, &mut env, &measure);
        assert_eq!(card.next_deadline(), None);
        assert!(!card.tick(1_000, &mut env, &measure));
        assert!(!card.is_open());
    }

    #[test]
    fn dismissal_cancels_timers() {
        let mut env = env();
        let mut card = card(&mut env);
        card.set_open(true, &mut env, &measure);
        card.pointer_leave(0, &mut env, &measure);
        let reason = card.handle_event(&DocumentEvent::Resize, &mut env, &parent, &measure);
        assert_eq!(reason, Some(DismissReason::Resize));
        assert_eq!(card.next_deadline(), None);
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn controlled_card_follows_host() {
        let mut env = env();
        let requests = Rc::new(RefCell::new(Vec::new()));
        let sink = requests.clone();
        let open = Controllable::controlled(false).with_on_change(move |v: &bool| sink.borrow_mut().push(*v));
        let mut card = HoverCard::new(open, Placement::default(), &mut env, &measure);
        assert!(!card.pointer_enter(0, &mut env, &measure));
        // Requested only: the flag is unchanged until the host syncs.
        assert!(!card.tick(700, &mut env, &measure));
        assert_eq!(*requests.borrow(), [true]);
        assert!(!card.is_open());
        assert_eq!(env.listener_count(), 0);
        card.sync(Some(true), &mut env, &measure);
        assert!(card.is_open());
        card.sync(Some(false), &mut env, &measure);
        assert_eq!(card.next_deadline(), None);
        assert_eq!(env.listener_count(), 0);
    }

    fn tooltip(env: &mut OverlayEnv<u32>) -> Tooltip<u32> {
        let mut tip = Tooltip::new(
            Controllable::uncontrolled(false),
            TooltipConfig::default(),
            Placement::default(),
            env,
            &measure,
        );
        tip.set_trigger(Some(1), env);
        tip.set_content(Some(2), env, &measure);
        tip
    }

    #[test]
    fn tooltip_shows_after_delay_and_hides_on_leave() {
        let mut env = env();
        let mut tip = tooltip(&mut env);
        tip.pointer_enter(0, &mut env, &measure);
        assert!(tip.tick(700, &mut env, &measure));
        assert!(tip.is_open());
        assert_eq!(env.listener_count(), 2);
        assert!(tip.pointer_leave(800, &mut env, &measure));
        assert!(!tip.is_open());
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn tooltip_focus_is_immediate() {
        let mut env = env();
        let mut tip = tooltip(&mut env);
        tip.focus(&mut env, &measure);
        assert!(tip.is_open());
        tip.blur(&mut env, &measure);
        assert!(!tip.is_open());
    }

    #[test]
    fn tooltip_closes_on_press_and_escape_not_scroll() {
        let mut env = env();
        let mut tip = tooltip(&mut env);
        tip.focus(&mut env, &measure);
        let scroll = DocumentEvent::Scroll { source: None };
        assert_eq!(tip.handle_event(&scroll, &mut env, &parent, &measure), None);
        assert!(tip.is_open());

        let escape = DocumentEvent::KeyDown {
            key: Key::Escape,
            focused: Some(1),
        };
        assert_eq!(
            tip.handle_event(&escape, &mut env, &parent, &measure),
            Some(DismissReason::Escape)
        );
        assert!(!tip.is_open());

        tip.focus(&mut env, &measure);
        tip.trigger_pointer_down(&mut env, &measure);
        assert!(!tip.is_open());
        assert_eq!(env.listener_count(), 0);
    }
}
