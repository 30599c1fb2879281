// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide extents along the scroll axis and index-aligned scrolling.

use alloc::vec::Vec;

/// Alignment mode when scrolling a slide into view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Align the leading edge of the slide with the viewport.
    #[default]
    Start,
    /// Center the slide within the viewport.
    Center,
    /// Align the trailing edge of the slide with the viewport.
    End,
    /// Move just enough to make the slide fully visible, preferring the
    /// smallest change from the current scroll offset.
    Nearest,
}

/// Extents of the slides in a carousel track and the track's scroll offset.
///
/// A slide without a measured extent spans the full viewport, which is the
/// common one-slide-per-view layout. Slide offsets are kept in a lazily
/// maintained prefix-sum cache so that resizing one slide only invalidates the
/// offsets after it.
#[derive(Clone, Debug, Default)]
pub struct SlideTrack {
    /// `None` means "as wide as the viewport".
    extents: Vec<Option<f64>>,
    prefix_starts: Vec<f64>,
    dirty_from: Option<usize>,
    gap: f64,
    viewport_extent: f64,
    scroll_offset: f64,
}

impl SlideTrack {
    /// An empty track with the given viewport extent.
    pub fn new(viewport_extent: f64) -> Self {
        Self {
            viewport_extent: viewport_extent.max(0.0),
            ..Self::default()
        }
    }

    /// Space between consecutive slides (builder form).
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap.max(0.0);
        self.dirty_from = Some(0);
        self
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// Returns `true` if the track has no slides.
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Resize to `len` slides. New slides span the viewport until measured.
    pub fn set_len(&mut self, len: usize) {
        let old_len = self.extents.len();
        self.extents.resize(len, None);
        self.prefix_starts.resize(len, 0.0);
        self.mark_dirty(old_len.min(len));
    }

    /// Remove slide `index`; later slides shift down by one.
    pub fn remove(&mut self, index: usize) {
        if index < self.extents.len() {
            self.extents.remove(index);
            self.prefix_starts.pop();
            self.mark_dirty(index);
        }
    }

    /// Record the measured extent of slide `index`, growing the track if needed.
    pub fn set_extent(&mut self, index: usize, extent: f64) {
        debug_assert!(
            extent.is_finite(),
            "slide extents must be finite; got {extent:?}"
        );
        if index >= self.extents.len() {
            self.set_len(index + 1);
        }
        self.extents[index] = Some(extent.max(0.0));
        self.mark_dirty(index);
    }

    /// Forget the measured extent of slide `index`; it spans the viewport again.
    pub fn clear_extent(&mut self, index: usize) {
        if let Some(slot) = self.extents.get_mut(index) {
            *slot = None;
            self.mark_dirty(index);
        }
    }

    /// Extent of slide `index` (zero if out of range).
    pub fn extent_of(&self, index: usize) -> f64 {
        match self.extents.get(index) {
            Some(Some(extent)) => *extent,
            Some(None) => self.viewport_extent,
            None => 0.0,
        }
    }

    /// Offset of slide `index` from the start of the track.
    pub fn offset_of(&mut self, index: usize) -> f64 {
        if index == 0 || self.extents.is_empty() {
            return 0.0;
        }
        let i = index.min(self.extents.len() - 1);
        self.ensure_prefix_through(i);
        self.prefix_starts[i]
    }

    /// Total extent of all slides and gaps.
    pub fn content_extent(&mut self) -> f64 {
        let len = self.extents.len();
        if len == 0 {
            return 0.0;
        }
        self.offset_of(len - 1) + self.extent_of(len - 1)
    }

    /// Current viewport extent.
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Set the viewport extent. Unmeasured slides follow it.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        let extent = extent.max(0.0);
        if extent != self.viewport_extent {
            self.viewport_extent = extent;
            if self.extents.iter().any(Option::is_none) {
                self.mark_dirty(0);
            }
        }
    }

    /// Largest scroll offset that keeps the viewport within the content.
    pub fn max_scroll(&mut self) -> f64 {
        (self.content_extent() - self.viewport_extent).max(0.0)
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Set the scroll offset, clamped into `[0, max_scroll]`.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let max = self.max_scroll();
        self.scroll_offset = offset.min(max).max(0.0);
    }

    /// Offset that brings slide `index` into view with `align`, without scrolling.
    pub fn offset_for(&mut self, index: usize, align: ScrollAlign) -> f64 {
        let len = self.extents.len();
        if len == 0 {
            return 0.0;
        }
        let idx = index.min(len - 1);
        let item_start = self.offset_of(idx);
        let item_end = item_start + self.extent_of(idx);
        let viewport = self.viewport_extent;

        let target = match align {
            ScrollAlign::Start => item_start,
            ScrollAlign::End => item_end - viewport,
            ScrollAlign::Center => (item_start + item_end) / 2.0 - viewport / 2.0,
            ScrollAlign::Nearest => {
                let view_start = self.scroll_offset;
                let view_end = view_start + viewport;
                if item_start >= view_start && item_end <= view_end {
                    view_start
                } else if item_start < view_start {
                    item_start
                } else {
                    item_end - viewport
                }
            }
        };
        target.min(self.max_scroll()).max(0.0)
    }

    /// Scroll so that slide `index` is in view; returns the new offset.
    pub fn scroll_to_index(&mut self, index: usize, align: ScrollAlign) -> f64 {
        let offset = self.offset_for(index, align);
        self.scroll_offset = offset;
        offset
    }

    /// Slide whose start lies closest to `offset` (for settling after a swipe).
    pub fn nearest_index(&mut self, offset: f64) -> Option<usize> {
        let len = self.extents.len();
        if len == 0 {
            return None;
        }
        self.ensure_prefix_through(len - 1);
        let target = offset.max(0.0);
        let slice = &self.prefix_starts[..len];
        let after = slice.partition_point(|start| *start <= target);
        let before = after.saturating_sub(1);
        if after < len && slice[after] - target < target - slice[before] {
            Some(after)
        } else {
            Some(before)
        }
    }

    fn mark_dirty(&mut self, from: usize) {
        self.dirty_from = Some(self.dirty_from.unwrap_or(from).min(from));
    }

    fn ensure_prefix_through(&mut self, through: usize) {
        let len = self.extents.len();
        if len == 0 || through >= len {
            return;
        }
        let dirty_from = match self.dirty_from {
            Some(d) if d <= through => d,
            _ => return,
        };
        let mut pos = if dirty_from == 0 {
            0.0
        } else {
            self.prefix_starts[dirty_from - 1] + self.extent_of(dirty_from - 1) + self.gap
        };
        for i in dirty_from..len {
            self.prefix_starts[i] = pos;
            pos += self.extent_of(i) + self.gap;
        }
        self.dirty_from = None;
    }
}
