// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The explicit environment shared by every overlay of one host surface.

use core::fmt;

use kurbo::Size;
use trellis_dismiss::{DismissReason, DismissRegistry, Dismissals, DocumentEvent, ParentLookup};
use trellis_float::FloatingConfig;
use trellis_layer::PortalHost;

/// Identity of one overlay instance within an [`OverlayEnv`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Shared state every overlay reads and writes: dismissal listeners, the
/// portal host, the viewport size and positioning configuration.
///
/// Overlays never reach for this implicitly; every operation that may attach
/// listeners, mount a portal or compute a position takes it by reference.
#[derive(Debug)]
pub struct OverlayEnv<N, H = ()> {
    dismiss: DismissRegistry<OverlayId, N>,
    portals: PortalHost<H>,
    viewport: Size,
    config: FloatingConfig,
    next_id: u64,
}

impl<N: Clone + PartialEq, H> OverlayEnv<N, H> {
    /// An environment over `portals` with the given viewport size.
    pub fn new(portals: PortalHost<H>, viewport: Size) -> Self {
        Self {
            dismiss: DismissRegistry::new(),
            portals,
            viewport,
            config: FloatingConfig::default(),
            next_id: 0,
        }
    }

    /// Replace the positioning configuration (builder form).
    #[must_use]
    pub fn with_config(mut self, config: FloatingConfig) -> Self {
        self.config = config;
        self
    }

    /// Positioning configuration.
    pub fn config(&self) -> FloatingConfig {
        self.config
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Record a new viewport size. Forward the resize event to overlays afterwards.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Dismissal registry.
    pub fn dismiss(&self) -> &DismissRegistry<OverlayId, N> {
        &self.dismiss
    }

    /// Dismissal registry, mutably.
    pub fn dismiss_mut(&mut self) -> &mut DismissRegistry<OverlayId, N> {
        &mut self.dismiss
    }

    /// Portal host.
    pub fn portals(&self) -> &PortalHost<H> {
        &self.portals
    }

    /// Portal host, mutably (for example to install the host once it exists).
    pub fn portals_mut(&mut self) -> &mut PortalHost<H> {
        &mut self.portals
    }

    /// Total number of document listeners held by overlays in this environment.
    pub fn listener_count(&self) -> usize {
        self.dismiss.listener_count()
    }

    /// Evaluate a document event against every open overlay.
    ///
    /// Hosts with several overlays call this once per event and hand each
    /// [`Dismissal`](trellis_dismiss::Dismissal) to its overlay's
    /// `apply_dismissal`.
    pub fn dispatch(
        &mut self,
        event: &DocumentEvent<N>,
        lookup: &impl ParentLookup<N>,
    ) -> Dismissals<OverlayId> {
        self.dismiss.dispatch(event, lookup)
    }

    /// Evaluate a document event and return the reason `id` must close, if any.
    pub(crate) fn dismissal_of(
        &mut self,
        id: OverlayId,
        event: &DocumentEvent<N>,
        lookup: &impl ParentLookup<N>,
    ) -> Option<DismissReason> {
        self.dispatch(event, lookup)
            .into_iter()
            .find(|d| d.key == id)
            .map(|d| d.reason)
    }

    pub(crate) fn allocate_id(&mut self) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        id
    }
}
