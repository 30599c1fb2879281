// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Carousel: bounded slide navigation with scroll targets.
//!
//! A [`Carousel`] keeps the current slide index (possibly host-controlled), a
//! registry of slides and a [`SlideTrack`] describing slide extents along the
//! scroll axis. Every change of the current slide yields a [`ScrollRequest`]
//! carrying the offset the host should scroll its viewport to; the carousel
//! never scrolls anything itself.
//!
//! Navigation is bounded: there is no looping, [`Carousel::go_to_slide`]
//! ignores out-of-range indices, and removing slides pulls the current index
//! back in range.
//!
//! ```rust
//! use trellis_carousel::{Carousel, CarouselConfig, ScrollRequest};
//! use trellis_event_state::Key;
//! use trellis_state::Controllable;
//!
//! let mut carousel = Carousel::new(Controllable::uncontrolled(0), 320.0, CarouselConfig::default());
//! carousel.set_slide_count(3);
//!
//! assert!(!carousel.can_scroll_prev());
//! assert_eq!(
//!     carousel.handle_key(Key::ArrowRight),
//!     Some(ScrollRequest { index: 1, offset: 320.0 })
//! );
//! assert_eq!(carousel.go_to_slide(7), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod carousel;
mod track;

pub use carousel::{Carousel, CarouselConfig, Orientation, ScrollRequest, SlideId};
pub use track::{ScrollAlign, SlideTrack};
