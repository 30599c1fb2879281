// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resources held by one floating overlay while it is open.

use kurbo::{Point, Rect};
use trellis_dismiss::{DocumentEvent, Listeners};
use trellis_float::{FloatingState, Measure, Placement};
use trellis_layer::{PortalHandle, Tier};

use crate::env::{OverlayEnv, OverlayId};

/// Everything a floating overlay acquires on open and must give back on close:
/// its dismissal listeners, its portal and its positioning state.
///
/// Owners call [`FloatingLayer::reconcile`] after every change of their open
/// flag. The layer compares the flag with what it currently holds and acquires
/// or releases accordingly, so every close path (explicit, dismissal, host
/// sync) ends with nothing held.
#[derive(Debug)]
pub struct FloatingLayer<N> {
    id: OverlayId,
    tier: Tier,
    listeners: Listeners,
    floating: FloatingState<N>,
    portal: Option<PortalHandle>,
    active: bool,
}

impl<N: Clone + PartialEq> FloatingLayer<N> {
    /// A closed layer registered under a fresh id of `env`.
    pub fn new<H>(
        env: &mut OverlayEnv<N, H>,
        placement: Placement,
        tier: Tier,
        listeners: Listeners,
    ) -> Self {
        Self {
            id: env.allocate_id(),
            tier,
            listeners,
            floating: FloatingState::new(placement),
            portal: None,
            active: false,
        }
    }

    /// Identity in the environment's dismissal registry.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Portal tier mounted while open.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Listeners attached while open.
    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Returns `true` while resources are held.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Portal held while open, if the host exists.
    pub fn portal(&self) -> Option<PortalHandle> {
        self.portal
    }

    /// Positioning state.
    pub fn floating(&self) -> &FloatingState<N> {
        &self.floating
    }

    /// Content position while open and measurable.
    pub fn position(&self) -> Option<Point> {
        self.floating.position()
    }

    /// Content rectangle while open and measurable.
    pub fn content_rect(&self) -> Option<Rect> {
        self.floating.content_rect()
    }

    /// Set the trigger node.
    pub fn set_trigger<H>(&mut self, trigger: Option<N>, env: &mut OverlayEnv<N, H>) {
        self.floating.set_trigger(trigger);
        self.refresh_nodes(env);
    }

    /// Set the content node and, if open, compute a position.
    pub fn set_content<H>(
        &mut self,
        content: Option<N>,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Point> {
        self.floating.set_content(content);
        self.refresh_nodes(env);
        self.floating.update(measure, &env.config())
    }

    /// Anchor to a fixed rectangle instead of the trigger (context menus).
    ///
    /// Repositions immediately if open.
    pub fn set_virtual_anchor<H>(
        &mut self,
        anchor: Option<Rect>,
        env: &OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Point> {
        self.floating.set_virtual_anchor(anchor);
        self.floating.update(measure, &env.config())
    }

    /// Replace the placement, repositioning if open.
    pub fn set_placement<H>(
        &mut self,
        placement: Placement,
        env: &OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) {
        self.floating.set_placement(placement, measure, &env.config());
    }

    /// Acquire or release resources to match `open`.
    ///
    /// Returns `true` if the layer changed between open and closed. A missing
    /// portal host, or a portal dropped along with a removed host, is retried
    /// on every call while open.
    pub fn reconcile<H>(
        &mut self,
        open: bool,
        env: &mut OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> bool {
        if !open {
            return self.release(env);
        }
        if self.portal.is_none_or(|p| !env.portals().is_mounted(p)) {
            self.portal = env.portals_mut().mount(self.tier);
        }
        if self.active {
            return false;
        }
        self.active = true;
        env.dismiss_mut().attach_with(
            self.id,
            self.floating.trigger().cloned(),
            self.floating.content().cloned(),
            self.listeners,
        );
        self.floating.open(env.viewport(), measure, &env.config());
        tracing::debug!(id = %self.id, tier = ?self.tier, "overlay opened");
        true
    }

    /// Release every held resource regardless of the owner's open flag.
    ///
    /// Returns `true` if the layer was open.
    pub fn release<H>(&mut self, env: &mut OverlayEnv<N, H>) -> bool {
        if let Some(portal) = self.portal.take() {
            env.portals_mut().unmount(portal);
        }
        if !self.active {
            return false;
        }
        self.active = false;
        env.dismiss_mut().detach(&self.id);
        self.floating.close();
        tracing::debug!(id = %self.id, "overlay closed");
        true
    }

    /// Keep position current for events that did not dismiss the overlay.
    pub fn reposition<H>(
        &mut self,
        event: &DocumentEvent<N>,
        env: &OverlayEnv<N, H>,
        measure: &impl Measure<N>,
    ) -> Option<Point> {
        if !self.active {
            return None;
        }
        match event {
            DocumentEvent::Resize => self.floating.on_resize(env.viewport(), measure, &env.config()),
            DocumentEvent::Scroll { .. } => self.floating.on_scroll(measure, &env.config()),
            DocumentEvent::PointerDown { .. } | DocumentEvent::KeyDown { .. } => {
                self.floating.position()
            }
        }
    }

    fn refresh_nodes<H>(&self, env: &mut OverlayEnv<N, H>) {
        if self.active {
            env.dismiss_mut().set_nodes(
                &self.id,
                self.floating.trigger().cloned(),
                self.floating.content().cloned(),
            );
        }
    }
}
