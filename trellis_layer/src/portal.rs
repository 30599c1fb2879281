// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared portal host and its z-order tiers.

use alloc::vec::Vec;

/// Fixed stacking class of a portal.
///
/// Tiers are ordered: every `Floating` portal stacks below every `Modal`
/// portal, which stacks below every `Toast`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Menus, popovers, hover cards, tooltips, selects.
    Floating,
    /// Dialogs, sheets, drawers.
    Modal,
    /// Toast notifications.
    Toast,
}

impl Tier {
    /// Stable z-index for hosts that express stacking numerically.
    pub const fn z_index(self) -> i32 {
        match self {
            Self::Floating => 50,
            Self::Modal => 100,
            Self::Toast => 200,
        }
    }
}

/// A mounted portal.
///
/// Handles order by tier first, then by mount sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortalHandle {
    tier: Tier,
    seq: u64,
}

impl PortalHandle {
    /// Tier the portal was mounted in.
    pub const fn tier(self) -> Tier {
        self.tier
    }

    /// Mount sequence number (monotonic per host).
    pub const fn seq(self) -> u64 {
        self.seq
    }

    /// Z-index of this portal's tier.
    pub const fn z_index(self) -> i32 {
        self.tier.z_index()
    }
}

/// The single top-level mount point overlays render into.
///
/// Before the host node exists ([`PortalHost::set_host`] not called yet),
/// [`PortalHost::mount`] returns `None` and callers render nothing.
#[derive(Clone, Debug)]
pub struct PortalHost<H> {
    host: Option<H>,
    /// Kept sorted by `(tier, seq)`.
    mounted: Vec<PortalHandle>,
    next_seq: u64,
}

impl<H> Default for PortalHost<H> {
    fn default() -> Self {
        Self {
            host: None,
            mounted: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<H> PortalHost<H> {
    /// A portal host whose node does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A portal host with its node already available.
    pub fn with_host(host: H) -> Self {
        Self {
            host: Some(host),
            ..Self::default()
        }
    }

    /// Provide (or remove) the host node.
    ///
    /// Removing the host drops every mounted portal; their handles become stale.
    pub fn set_host(&mut self, host: Option<H>) {
        if host.is_none() && !self.mounted.is_empty() {
            tracing::debug!(dropped = self.mounted.len(), "portal host removed");
            self.mounted.clear();
        }
        self.host = host;
    }

    /// The host node, if it exists.
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Mount a new portal in `tier`.
    ///
    /// Returns `None` (render nothing) while the host node is absent.
    pub fn mount(&mut self, tier: Tier) -> Option<PortalHandle> {
        self.host.as_ref()?;
        let handle = PortalHandle {
            tier,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let at = self.mounted.partition_point(|h| *h < handle);
        self.mounted.insert(at, handle);
        tracing::debug!(?tier, seq = handle.seq, "portal mounted");
        Some(handle)
    }

    /// Remove a mounted portal. Returns `false` for stale handles.
    pub fn unmount(&mut self, handle: PortalHandle) -> bool {
        match self.mounted.binary_search(&handle) {
            Ok(at) => {
                self.mounted.remove(at);
                tracing::debug!(tier = ?handle.tier, seq = handle.seq, "portal unmounted");
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if `handle` is currently mounted.
    pub fn is_mounted(&self, handle: PortalHandle) -> bool {
        self.mounted.binary_search(&handle).is_ok()
    }

    /// Mounted portals, bottom to top.
    pub fn stack(&self) -> &[PortalHandle] {
        &self.mounted
    }

    /// Topmost mounted portal.
    pub fn top(&self) -> Option<PortalHandle> {
        self.mounted.last().copied()
    }

    /// Number of mounted portals.
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    /// Returns `true` if nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_without_host_renders_nothing() {
        let mut host: PortalHost<u32> = PortalHost::new();
        assert_eq!(host.mount(Tier::Floating), None);
        assert!(host.is_empty());

        host.set_host(Some(1));
        assert!(host.mount(Tier::Floating).is_some());
    }

    #[test]
    fn stack_orders_by_tier_then_mount_order() {
        let mut host = PortalHost::with_host(());
        let toast = host.mount(Tier::Toast).unwrap();
        let dialog = host.mount(Tier::Modal).unwrap();
        let menu = host.mount(Tier::Floating).unwrap();
        let tooltip = host.mount(Tier::Floating).unwrap();

        assert_eq!(host.stack(), &[menu, tooltip, dialog, toast]);
        assert_eq!(host.top(), Some(toast));
        assert!(menu.z_index() < dialog.z_index());
        assert!(dialog.z_index() < toast.z_index());
    }

    #[test]
    fn unmount_removes_one_portal() {
        let mut host = PortalHost::with_host(());
        let a = host.mount(Tier::Floating).unwrap();
        let b = host.mount(Tier::Floating).unwrap();
        assert!(host.unmount(a));
        assert!(!host.unmount(a));
        assert!(!host.is_mounted(a));
        assert!(host.is_mounted(b));
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn sequence_is_monotonic_across_unmounts() {
        let mut host = PortalHost::with_host(());
        let a = host.mount(Tier::Modal).unwrap();
        host.unmount(a);
        let b = host.mount(Tier::Modal).unwrap();
        assert!(b.seq() > a.seq());
    }

    #[test]
    fn removing_host_drops_portals() {
        let mut host = PortalHost::with_host(7_u8);
        let a = host.mount(Tier::Floating).unwrap();
        host.set_host(None);
        assert!(!host.is_mounted(a));
        assert_eq!(host.host(), None);
    }
}
