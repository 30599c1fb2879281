// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dialog, sheet and drawer state on top of a host modal primitive.

use trellis_event_state::Key;
use trellis_float::Side;
use trellis_state::Controllable;

use crate::portal::{PortalHandle, PortalHost, Tier};

/// Host capability: a modal surface that traps focus.
///
/// Implementations wrap whatever the platform offers (a native dialog element,
/// a window-level focus scope, ...).
pub trait ModalPrimitive {
    /// Show the surface modally and move focus inside it.
    fn show_modal(&mut self);
    /// Hide the surface and release the focus trap.
    fn close(&mut self);
    /// Returns `true` if focus currently lies inside the surface.
    fn contains_focus(&self) -> bool;
}

/// Signals raised by a [`ModalPrimitive`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModalEvent {
    /// The primitive asked to close (Escape, backdrop press, platform gesture).
    CloseRequested,
}

/// Presentation of a modal surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DialogKind {
    /// Centered dialog.
    #[default]
    Dialog,
    /// Panel sliding in from one edge of the viewport.
    Sheet(Side),
    /// Panel anchored to the bottom edge, typically with a drag handle.
    Drawer,
}

impl DialogKind {
    /// Edge the surface is attached to, if any.
    pub const fn edge(self) -> Option<Side> {
        match self {
            Self::Dialog => None,
            Self::Sheet(side) => Some(side),
            Self::Drawer => Some(Side::Bottom),
        }
    }
}

/// State of one dialog, sheet or drawer.
///
/// While open, the dialog holds a portal in the [`Tier::Modal`] tier and its
/// primitive is shown. Every path that closes the dialog (explicit close,
/// close request, host sync, [`Dialog::unmount`]) releases both.
pub struct Dialog<M> {
    primitive: M,
    kind: DialogKind,
    open: Controllable<bool>,
    dismissable: bool,
    portal: Option<PortalHandle>,
    shown: bool,
}

impl<M: core::fmt::Debug> core::fmt::Debug for Dialog<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dialog")
            .field("primitive", &self.primitive)
            .field("kind", &self.kind)
            .field("open", &self.open)
            .field("dismissable", &self.dismissable)
            .field("portal", &self.portal)
            .field("shown", &self.shown)
            .finish()
    }
}

impl<M: ModalPrimitive> Dialog<M> {
    /// Create a dialog. If `open` already holds `true` it is shown immediately.
    pub fn new<H>(
        primitive: M,
        kind: DialogKind,
        open: Controllable<bool>,
        host: &mut PortalHost<H>,
    ) -> Self {
        let mut dialog = Self {
            primitive,
            kind,
            open,
            dismissable: true,
            portal: None,
            shown: false,
        };
        dialog.reconcile(host);
        dialog
    }

    /// Whether close requests from the primitive are honored (builder form).
    #[must_use]
    pub fn with_dismissable(mut self, dismissable: bool) -> Self {
        self.dismissable = dismissable;
        self
    }

    /// Whether close requests from the primitive are honored.
    pub fn set_dismissable(&mut self, dismissable: bool) {
        self.dismissable = dismissable;
    }

    /// Returns `true` if close requests are honored.
    pub fn is_dismissable(&self) -> bool {
        self.dismissable
    }

    /// Presentation kind.
    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    /// Current open flag.
    pub fn is_open(&self) -> bool {
        *self.open.value()
    }

    /// Portal held while open, or `None` (also while the host is absent).
    pub fn portal(&self) -> Option<PortalHandle> {
        self.portal
    }

    /// The host primitive.
    pub fn primitive(&self) -> &M {
        &self.primitive
    }

    /// The host primitive, mutably.
    pub fn primitive_mut(&mut self) -> &mut M {
        &mut self.primitive
    }

    /// Returns `true` if focus lies inside the open surface.
    pub fn contains_focus(&self) -> bool {
        self.shown && self.primitive.contains_focus()
    }

    /// Request a new open state.
    pub fn set_open<H>(&mut self, open: bool, host: &mut PortalHost<H>) {
        self.open.set(open);
        self.reconcile(host);
    }

    /// Request opening.
    pub fn show<H>(&mut self, host: &mut PortalHost<H>) {
        self.set_open(true, host);
    }

    /// Request closing.
    pub fn hide<H>(&mut self, host: &mut PortalHost<H>) {
        self.set_open(false, host);
    }

    /// Flip the open state.
    pub fn toggle<H>(&mut self, host: &mut PortalHost<H>) {
        let next = !self.is_open();
        self.set_open(next, host);
    }

    /// Feed the host-controlled open flag for this render.
    pub fn sync<H>(&mut self, controlled: Option<bool>, host: &mut PortalHost<H>) {
        self.open.sync(controlled);
        self.reconcile(host);
    }

    /// Route a signal from the primitive.
    pub fn handle_modal_event<H>(&mut self, event: ModalEvent, host: &mut PortalHost<H>) {
        match event {
            ModalEvent::CloseRequested if self.dismissable && self.is_open() => {
                tracing::debug!(kind = ?self.kind, "dialog close requested");
                self.hide(host);
            }
            ModalEvent::CloseRequested => {}
        }
    }

    /// Handle a key press. Escape with focus inside acts as a close request.
    ///
    /// Returns `true` if the key was consumed.
    pub fn handle_key<H>(&mut self, key: Key, host: &mut PortalHost<H>) -> bool {
        if key == Key::Escape && self.contains_focus() {
            self.handle_modal_event(ModalEvent::CloseRequested, host);
            return true;
        }
        false
    }

    /// Release the primitive and the portal regardless of the open flag.
    ///
    /// Call when the owning widget goes away.
    pub fn unmount<H>(&mut self, host: &mut PortalHost<H>) {
        self.release(host);
    }

    /// Bring the primitive and portal in line with the open flag.
    fn reconcile<H>(&mut self, host: &mut PortalHost<H>) {
        if self.is_open() {
            if self.portal.is_none_or(|p| !host.is_mounted(p)) {
                self.portal = host.mount(Tier::Modal);
            }
            if !self.shown {
                self.primitive.show_modal();
                self.shown = true;
                tracing::debug!(kind = ?self.kind, "dialog shown");
            }
        } else {
            self.release(host);
        }
    }

    fn release<H>(&mut self, host: &mut PortalHost<H>) {
        if self.shown {
            self.primitive.close();
            self.shown = false;
            tracing::debug!(kind = ?self.kind, "dialog hidden");
        }
        if let Some(portal) = self.portal.take() {
            host.unmount(portal);
        }
    }
}
