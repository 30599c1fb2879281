// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use trellis_event_state::Key;
use trellis_state::Controllable;

use crate::track::{ScrollAlign, SlideTrack};

/// Scroll axis of a carousel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Slides run left to right; ArrowLeft/ArrowRight navigate.
    #[default]
    Horizontal,
    /// Slides run top to bottom; ArrowUp/ArrowDown navigate.
    Vertical,
}

/// Carousel options.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Scroll axis.
    pub orientation: Orientation,
    /// How the current slide is aligned in the viewport.
    pub align: ScrollAlign,
    /// Space between slides along the axis.
    pub gap: f64,
}

/// Identifier handed out by [`Carousel::register_slide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideId(u64);

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slide#{}", self.0)
    }
}

/// Instruction for the host to scroll its viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Slide that became current.
    pub index: usize,
    /// Target scroll offset along the carousel axis.
    pub offset: f64,
}

type SelectFn = Box<dyn FnMut(usize)>;

/// State machine for a carousel.
///
/// The current index is a [`Controllable`]: hosts may own it and feed it back
/// through [`Carousel::sync`]. Whatever the stored value, the effective index
/// reported by [`Carousel::current_index`] always lies within the registered
/// slides.
pub struct Carousel {
    index: Controllable<usize>,
    reported: usize,
    slides: Vec<SlideId>,
    next_slide: u64,
    track: SlideTrack,
    config: CarouselConfig,
    disabled: bool,
    on_select: Option<SelectFn>,
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("index", &self.index)
            .field("reported", &self.reported)
            .field("slides", &self.slides)
            .field("next_slide", &self.next_slide)
            .field("track", &self.track)
            .field("config", &self.config)
            .field("disabled", &self.disabled)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl Carousel {
    /// A carousel with no slides and the given viewport extent.
    pub fn new(index: Controllable<usize>, viewport_extent: f64, config: CarouselConfig) -> Self {
        let reported = *index.value();
        Self {
            index,
            reported,
            slides: Vec::new(),
            next_slide: 0,
            track: SlideTrack::new(viewport_extent).with_gap(config.gap),
            config,
            disabled: false,
            on_select: None,
        }
    }

    /// Report changes of the current slide (builder form).
    #[must_use]
    pub fn with_on_select(mut self, on_select: impl FnMut(usize) + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }

    /// Options this carousel was built with.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Disable or re-enable navigation.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Returns `true` if navigation is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Registered slides in order.
    pub fn slides(&self) -> &[SlideId] {
        &self.slides
    }

    /// The extent model, for reading offsets.
    pub fn track(&self) -> &SlideTrack {
        &self.track
    }

    /// The extent model, for feeding measured slide and viewport extents.
    pub fn track_mut(&mut self) -> &mut SlideTrack {
        &mut self.track
    }

    /// Index of the current slide, clamped to the registered slides.
    pub fn current_index(&self) -> usize {
        (*self.index.value()).min(self.slides.len().saturating_sub(1))
    }

    /// Returns `true` if there is a slide before the current one.
    pub fn can_scroll_prev(&self) -> bool {
        self.current_index() > 0
    }

    /// Returns `true` if there is a slide after the current one.
    pub fn can_scroll_next(&self) -> bool {
        self.current_index() + 1 < self.slides.len()
    }

    /// Append a slide.
    pub fn register_slide(&mut self) -> (SlideId, Option<ScrollRequest>) {
        let id = SlideId(self.next_slide);
        self.next_slide += 1;
        self.slides.push(id);
        self.track.set_len(self.slides.len());
        (id, self.settle())
    }

    /// Remove a slide. Unknown ids are ignored.
    pub fn unregister_slide(&mut self, id: SlideId) -> Option<ScrollRequest> {
        let position = self.slides.iter().position(|s| *s == id)?;
        self.slides.remove(position);
        self.track.remove(position);
        self.clamp_stored();
        self.settle()
    }

    /// Replace the slide registry with `count` anonymous slides.
    ///
    /// Existing slides beyond `count` are dropped and new ones appended.
    pub fn set_slide_count(&mut self, count: usize) -> Option<ScrollRequest> {
        while self.slides.len() > count {
            self.slides.pop();
        }
        while self.slides.len() < count {
            self.slides.push(SlideId(self.next_slide));
            self.next_slide += 1;
        }
        self.track.set_len(count);
        self.clamp_stored();
        self.settle()
    }

    /// Record the measured extent of a slide along the axis.
    pub fn set_slide_extent(&mut self, id: SlideId, extent: f64) {
        if let Some(position) = self.slides.iter().position(|s| *s == id) {
            self.track.set_extent(position, extent);
        }
    }

    /// Move to the previous slide. No-op at the first slide.
    pub fn scroll_prev(&mut self) -> Option<ScrollRequest> {
        if !self.can_scroll_prev() {
            return None;
        }
        self.go_to_slide(self.current_index() - 1)
    }

    /// Move to the next slide. No-op at the last slide.
    pub fn scroll_next(&mut self) -> Option<ScrollRequest> {
        if !self.can_scroll_next() {
            return None;
        }
        self.go_to_slide(self.current_index() + 1)
    }

    /// Move to slide `index`.
    ///
    /// Out-of-range indices and disabled carousels are ignored. In controlled
    /// mode the change is only requested; the scroll request follows the
    /// host's [`Carousel::sync`].
    pub fn go_to_slide(&mut self, index: usize) -> Option<ScrollRequest> {
        if self.disabled || index >= self.slides.len() {
            return None;
        }
        self.index.set(index);
        self.settle()
    }

    /// Handle a key press on the carousel region.
    pub fn handle_key(&mut self, key: Key) -> Option<ScrollRequest> {
        if self.disabled {
            return None;
        }
        match (self.config.orientation, key) {
            (Orientation::Horizontal, Key::ArrowLeft) | (Orientation::Vertical, Key::ArrowUp) => {
                self.scroll_prev()
            }
            (Orientation::Horizontal, Key::ArrowRight)
            | (Orientation::Vertical, Key::ArrowDown) => self.scroll_next(),
            _ => None,
        }
    }

    /// A user scroll (drag, wheel, swipe) came to rest at `offset`.
    ///
    /// Snaps to the nearest slide and makes it current.
    pub fn on_scroll_settled(&mut self, offset: f64) -> Option<ScrollRequest> {
        self.track.set_scroll_offset(offset);
        let nearest = self.track.nearest_index(self.track.scroll_offset())?;
        if self.disabled {
            return None;
        }
        if nearest == self.current_index() {
            return Some(self.request(nearest));
        }
        self.go_to_slide(nearest)
    }

    /// Feed the host-owned index for this render.
    pub fn sync(&mut self, index: Option<usize>) -> Option<ScrollRequest> {
        self.index.sync(index);
        self.settle()
    }

    /// Pull an out-of-range stored index back in bounds.
    fn clamp_stored(&mut self) {
        let current = self.current_index();
        if *self.index.value() != current {
            self.index.set(current);
        }
    }

    /// Emit a request and notify if the effective index moved.
    fn settle(&mut self) -> Option<ScrollRequest> {
        if self.slides.is_empty() {
            return None;
        }
        let current = self.current_index();
        if current == self.reported {
            return None;
        }
        tracing::debug!(from = self.reported, to = current, "carousel slide changed");
        self.reported = current;
        if let Some(on_select) = self.on_select.as_mut() {
            on_select(current);
        }
        Some(self.request(current))
    }

    fn request(&mut self, index: usize) -> ScrollRequest {
        let offset = self.track.scroll_to_index(index, self.config.align);
        ScrollRequest { index, offset }
    }
}
