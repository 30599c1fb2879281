// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Event State: small input state machines shared by Trellis widgets.
//!
//! - [`keyboard`]: the [`Key`](keyboard::Key) vocabulary every widget's
//!   keyboard handler speaks.
//! - [`hover`]: delayed open/close for hover-triggered overlays (hover cards,
//!   tooltips), with cancel-and-restart semantics on re-entry.
//! - [`typeahead`]: incremental "type to highlight" search over item labels.
//!
//! None of these schedule anything. Time is passed in explicitly as
//! millisecond timestamps, and the host is expected to call `tick` around the
//! deadlines the state machines report.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod hover;
pub mod keyboard;
pub mod typeahead;

pub use hover::{HoverDelays, HoverIntent, HoverPhase, HoverTransition};
pub use keyboard::Key;
pub use typeahead::{Typeahead, TypeaheadConfig};
