// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Layer: rendering overlays above the page.
//!
//! Overlay content escapes its logical parent's clipping and stacking context
//! by rendering into a single shared [`PortalHost`]. Each mounted portal gets a
//! [`PortalHandle`] carrying its [`Tier`] and a mount sequence number; the host
//! keeps portals ordered by `(tier, sequence)`, so stacking is deterministic no
//! matter where the owning widget sits in the source tree.
//!
//! ```rust
//! use trellis_layer::{PortalHost, Tier};
//!
//! let mut host = PortalHost::new();
//! // Initial render: the host node does not exist yet, so nothing mounts.
//! assert_eq!(host.mount(Tier::Floating), None);
//!
//! host.set_host(Some("overlay-root"));
//! let dialog = host.mount(Tier::Modal).unwrap();
//! let menu = host.mount(Tier::Floating).unwrap();
//! // The menu mounted later but still stacks below the dialog.
//! assert_eq!(host.stack(), &[menu, dialog]);
//! ```
//!
//! Modal surfaces (dialogs, sheets, drawers) lean on a host-provided
//! [`ModalPrimitive`] for focus trapping. [`Dialog`] ties that primitive and a
//! [`Tier::Modal`] portal to a controllable open flag.
//!
//! ## Features
//!
//! - `std` (default): forwarded to `trellis_float`.
//! - `libm`: `no_std` builds relying on `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod modal;
mod portal;

pub use modal::{Dialog, DialogKind, ModalEvent, ModalPrimitive};
pub use portal::{PortalHandle, PortalHost, Tier};
