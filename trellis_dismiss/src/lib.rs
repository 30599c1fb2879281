// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Dismiss: closing open overlays on outside interaction.
//!
//! ## Overview
//!
//! An open popover, menu, hover card or select closes when the user
//! - presses a pointer outside both its trigger and its content,
//! - presses Escape,
//! - scrolls anything other than the content itself,
//! - or resizes the viewport.
//!
//! Instead of every overlay instance hooking document-level listeners on its
//! own, instances register with a [`DismissRegistry`] keyed by instance id.
//! Registration ([`DismissRegistry::attach`]) and teardown
//! ([`DismissRegistry::detach`]) are paired and tied to the instance's
//! open-state transition, which makes leak-freedom checkable per instance via
//! [`DismissRegistry::is_attached`] and [`DismissRegistry::listener_count`].
//!
//! ## Dispatch
//!
//! The host forwards document events as [`DocumentEvent`]s to
//! [`DismissRegistry::dispatch`], which returns the instances that must close
//! and why. The registry never changes open state itself: widgets route each
//! [`Dismissal`] into their own controlled/uncontrolled open flag and detach
//! once they actually close.
//!
//! Each instance is judged only against its own trigger/content pair, so
//! independently open overlays never interfere with one another. Escape is the
//! exception that picks a single instance: the most recently interacted
//! instance containing focus, or else the most recently interacted instance.
//!
//! ```
//! use trellis_dismiss::{DismissReason, DismissRegistry, DocumentEvent};
//! use trellis_event_state::Key;
//!
//! // Host tree: 0 is the root; 1/2 are popover A's trigger/content; 3/4 are B's.
//! let parent = |n: &u32| if *n == 0 { None } else { Some(0) };
//!
//! let mut registry: DismissRegistry<&str, u32> = DismissRegistry::new();
//! registry.attach("a", Some(1), Some(2));
//! registry.attach("b", Some(3), Some(4));
//!
//! // Focus sits in A's content: Escape closes A only.
//! let closed = registry.dispatch(&DocumentEvent::KeyDown { key: Key::Escape, focused: Some(2) }, &parent);
//! assert_eq!(closed.len(), 1);
//! assert_eq!(closed[0].key, "a");
//! assert_eq!(closed[0].reason, DismissReason::Escape);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod registry;
mod types;

pub use registry::{DismissRegistry, Dismissal, Dismissals};
pub use types::{DismissReason, DocumentEvent, Listeners, ParentLookup, contains};
