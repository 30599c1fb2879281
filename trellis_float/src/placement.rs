// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement types and the position computation.

use kurbo::{Point, Rect, Size};

/// Edge of the trigger the content is anchored to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the trigger.
    Top,
    /// Right of the trigger.
    Right,
    /// Below the trigger.
    #[default]
    Bottom,
    /// Left of the trigger.
    Left,
}

impl Side {
    /// The side facing this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Returns `true` for `Top` and `Bottom`, whose primary axis is vertical.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the content along the anchored edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Leading edges line up.
    Start,
    /// Content is centred on the trigger.
    #[default]
    Center,
    /// Trailing edges line up.
    End,
}

/// Requested placement of floating content relative to its trigger.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Edge of the trigger to anchor to.
    pub side: Side,
    /// Alignment along that edge.
    pub align: Align,
    /// Gap between the trigger and the content, in pixels.
    pub side_offset: f64,
    /// Shift along the cross axis after alignment, in pixels.
    pub align_offset: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Center,
            side_offset: 0.0,
            align_offset: 0.0,
        }
    }
}

impl Placement {
    /// A placement on `side` with the given alignment and no offsets.
    pub const fn new(side: Side, align: Align) -> Self {
        Self {
            side,
            align,
            side_offset: 0.0,
            align_offset: 0.0,
        }
    }

    /// Set the gap between trigger and content.
    #[must_use]
    pub const fn with_side_offset(mut self, side_offset: f64) -> Self {
        self.side_offset = side_offset;
        self
    }

    /// Set the cross-axis shift.
    #[must_use]
    pub const fn with_align_offset(mut self, align_offset: f64) -> Self {
        self.align_offset = align_offset;
        self
    }
}

/// Positioning configuration shared by every floating overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatingConfig {
    /// Minimum distance kept between content and the viewport edges.
    pub padding: f64,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self { padding: 10.0 }
    }
}

/// Compute the top-left corner of floating content.
///
/// `anchor` is the trigger's rectangle and the result's coordinates are in the
/// same viewport space (`x` is `left`, `y` is `top`). When the content fits,
/// both coordinates satisfy `padding <= v <= viewport - content - padding`.
/// When the content is larger than the viewport minus both paddings, the
/// coordinate pins to `padding` so the leading edge stays visible.
pub fn compute_position(
    anchor: Rect,
    content: Size,
    placement: &Placement,
    viewport: Size,
    padding: f64,
) -> Point {
    let offset = placement.side_offset;
    let (left, top) = match placement.side {
        Side::Bottom => (
            cross_axis(anchor.x0, anchor.x1, content.width, placement),
            anchor.y1 + offset,
        ),
        Side::Top => (
            cross_axis(anchor.x0, anchor.x1, content.width, placement),
            anchor.y0 - content.height - offset,
        ),
        Side::Right => (
            anchor.x1 + offset,
            cross_axis(anchor.y0, anchor.y1, content.height, placement),
        ),
        Side::Left => (
            anchor.x0 - content.width - offset,
            cross_axis(anchor.y0, anchor.y1, content.height, placement),
        ),
    };
    let position = Point::new(
        clamp_axis(left, content.width, viewport.width, padding),
        clamp_axis(top, content.height, viewport.height, padding),
    );
    tracing::trace!(
        ?anchor,
        ?content,
        side = ?placement.side,
        align = ?placement.align,
        x = position.x,
        y = position.y,
        "computed floating position"
    );
    position
}

fn cross_axis(start: f64, end: f64, size: f64, placement: &Placement) -> f64 {
    let aligned = match placement.align {
        Align::Start => start,
        Align::Center => (start + end) / 2.0 - size / 2.0,
        Align::End => end - size,
    };
    aligned + placement.align_offset
}

fn clamp_axis(value: f64, content: f64, viewport: f64, padding: f64) -> f64 {
    // Not `f64::clamp`: the range is empty when content overflows the viewport.
    value.min(viewport - content - padding).max(padding)
}

/// A zero-sized anchor at `point`, for overlays opened at a pointer position.
pub fn anchor_for_point(point: Point) -> Rect {
    Rect::from_origin_size(point, Size::ZERO)
}

/// Space available for content on `placement.side` of `anchor`.
///
/// Hosts use this to cap content size (for example a select's list height)
/// before measuring, so the clamped position does not cover the trigger.
pub fn available_size(anchor: Rect, placement: &Placement, viewport: Size, padding: f64) -> Size {
    let offset = placement.side_offset;
    let (width, height) = match placement.side {
        Side::Bottom => (
            viewport.width - 2.0 * padding,
            viewport.height - anchor.y1 - offset - padding,
        ),
        Side::Top => (viewport.width - 2.0 * padding, anchor.y0 - offset - padding),
        Side::Right => (
            viewport.width - anchor.x1 - offset - padding,
            viewport.height - 2.0 * padding,
        ),
        Side::Left => (anchor.x0 - offset - padding, viewport.height - 2.0 * padding),
    };
    Size::new(width.max(0.0), height.max(0.0))
}
