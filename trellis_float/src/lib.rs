// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Float: placement of floating overlay content next to a trigger.
//!
//! Popovers, menus, selects, hover cards and tooltips all float their content
//! next to a trigger element. Placement is described by a [`Placement`]: which
//! [`Side`] of the trigger the content sits on, how it [`Align`]s along that
//! side, and the pixel gap (`side_offset`).
//!
//! [`compute_position`] turns an anchor rectangle, the measured content size,
//! a placement and the viewport size into the content's top-left corner:
//!
//! 1. The primary axis comes from `side` and `side_offset`
//!    (for example `Side::Bottom` puts the content's top at `anchor.y1 + side_offset`).
//! 2. The cross axis comes from `align`: `Start` aligns leading edges, `Center`
//!    centres the content on the anchor, `End` aligns trailing edges.
//! 3. Both axes are clamped into `[padding, viewport - content - padding]`.
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use trellis_float::{Align, Placement, Side, compute_position};
//!
//! // A trigger near the right edge of a 1000px-wide viewport.
//! let anchor = Rect::new(950.0, 100.0, 990.0, 130.0);
//! let placement = Placement { side: Side::Bottom, align: Align::Start, ..Placement::default() };
//! let pos = compute_position(anchor, Size::new(300.0, 200.0), &placement, Size::new(1000.0, 800.0), 10.0);
//! // Naively the content would start at x = 950; it is clamped to 1000 - 300 - 10.
//! assert_eq!(pos, Point::new(690.0, 130.0));
//! ```
//!
//! Content is never flipped to the opposite side when it overflows; it is only
//! clamped, which may overlap the trigger near viewport edges.
//!
//! [`FloatingState`] wraps this in the lifecycle of one overlay: measure on
//! open, re-measure on resize and scroll while open, forget on close. Nodes are
//! measured through the host's [`Measure`] implementation; if the trigger or
//! content is not mounted yet, the update is skipped and retried on the next
//! trigger.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds relying on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

mod placement;
mod state;

pub use placement::{
    Align, FloatingConfig, Placement, Side, anchor_for_point, available_size, compute_position,
};
pub use state::{FloatingState, Measure};
