// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Overlay: popovers, hover cards, tooltips, dropdown and context
//! menus, and select lists.
//!
//! Each overlay composes the lower crates the same way:
//!
//! - a [`Controllable`](trellis_state::Controllable) open flag (or a
//!   [`MenuTree`](trellis_menu::MenuTree), [`Select`](trellis_menu::Select) or
//!   [`ContextMenu`](trellis_menu::ContextMenu) for the menu-like overlays);
//! - a [`FloatingLayer`] that, while open, holds dismissal listeners in the
//!   [`OverlayEnv`]'s registry, a portal in the floating tier and the
//!   positioning state.
//!
//! The environment is explicit. Anything that may open, close or reposition an
//! overlay takes `&mut OverlayEnv` plus the host's measuring capability, and
//! events additionally take the host's parent lookup.
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use trellis_dismiss::DocumentEvent;
//! use trellis_float::Placement;
//! use trellis_layer::PortalHost;
//! use trellis_overlay::{OverlayEnv, Popover};
//! use trellis_state::Controllable;
//!
//! // Node 1 is the trigger, node 2 the content, node 9 something else.
//! let measure = |n: &u32| match n {
//!     1 => Some(Rect::new(40.0, 40.0, 120.0, 70.0)),
//!     2 => Some(Rect::new(0.0, 0.0, 200.0, 100.0)),
//!     _ => None,
//! };
//! let parent = |n: &u32| if *n == 0 { None } else { Some(0) };
//!
//! let mut env = OverlayEnv::new(PortalHost::with_host(()), Size::new(800.0, 600.0));
//! let mut popover = Popover::new(Controllable::uncontrolled(false), Placement::default(), &mut env, &measure);
//! popover.set_trigger(Some(1), &mut env);
//! popover.set_content(Some(2), &mut env, &measure);
//!
//! popover.toggle(&mut env, &measure);
//! assert_eq!(popover.position(), Some(Point::new(10.0, 70.0)));
//!
//! // A press elsewhere closes it and gives back every listener.
//! popover.handle_event(&DocumentEvent::PointerDown { target: Some(9) }, &mut env, &parent, &measure);
//! assert!(!popover.is_open());
//! assert_eq!(env.listener_count(), 0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwarded to the geometry-carrying dependencies.
//! - `libm`: `no_std` builds relying on `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context_menu;
mod dropdown;
mod env;
mod hover;
mod layer;
mod popover;
mod select_menu;

pub use context_menu::ContextMenuOverlay;
pub use dropdown::DropdownMenu;
pub use env::{OverlayEnv, OverlayId};
pub use hover::{HoverCard, Tooltip, TooltipConfig};
pub use layer::FloatingLayer;
pub use popover::Popover;
pub use select_menu::SelectMenu;
