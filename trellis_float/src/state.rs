// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning lifecycle of a single floating overlay.

use kurbo::{Point, Rect, Size};

use crate::placement::{FloatingConfig, Placement, compute_position};

/// Host capability: read a mounted node's on-screen rectangle.
///
/// Rectangles are in viewport coordinates. Returning `None` means the node is
/// not mounted or has not been laid out yet.
pub trait Measure<N> {
    /// Current bounding rectangle of `node`.
    fn rect_of(&self, node: &N) -> Option<Rect>;
}

impl<N, F: Fn(&N) -> Option<Rect>> Measure<N> for F {
    fn rect_of(&self, node: &N) -> Option<Rect> {
        self(node)
    }
}

/// Tracks where one overlay's content should be drawn while it is open.
///
/// The anchor is read lazily: on [`FloatingState::open`] and again on every
/// resize or scroll while open. Between those triggers the last snapshot is
/// kept. Reposition listeners (resize and scroll) are considered registered
/// exactly while the state is open; [`FloatingState::is_listening`] exposes
/// that so hosts can mirror it.
#[derive(Clone, Debug)]
pub struct FloatingState<N> {
    trigger: Option<N>,
    content: Option<N>,
    virtual_anchor: Option<Rect>,
    placement: Placement,
    viewport: Size,
    anchor: Option<Rect>,
    content_size: Option<Size>,
    position: Option<Point>,
    open: bool,
}

impl<N> FloatingState<N> {
    /// Create a closed state with the given placement.
    pub fn new(placement: Placement) -> Self {
        Self {
            trigger: None,
            content: None,
            virtual_anchor: None,
            placement,
            viewport: Size::ZERO,
            anchor: None,
            content_size: None,
            position: None,
            open: false,
        }
    }

    /// Set (or clear) the trigger node.
    pub fn set_trigger(&mut self, trigger: Option<N>) {
        self.trigger = trigger;
    }

    /// Set (or clear) the content node.
    pub fn set_content(&mut self, content: Option<N>) {
        self.content = content;
    }

    /// The trigger node, if set.
    pub fn trigger(&self) -> Option<&N> {
        self.trigger.as_ref()
    }

    /// The content node, if set.
    pub fn content(&self) -> Option<&N> {
        self.content.as_ref()
    }

    /// Anchor to a fixed rectangle instead of measuring the trigger.
    ///
    /// Context menus use this with a zero-sized rectangle at the pointer.
    pub fn set_virtual_anchor(&mut self, anchor: Option<Rect>) {
        self.virtual_anchor = anchor;
    }

    /// Current placement.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Replace the placement (props may change per render).
    pub fn set_placement(&mut self, placement: Placement, measure: &impl Measure<N>, config: &FloatingConfig) {
        if placement != self.placement {
            self.placement = placement;
            if self.open {
                self.update(measure, config);
            }
        }
    }

    /// Returns `true` while open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns `true` while resize/scroll reposition listeners should be registered.
    pub fn is_listening(&self) -> bool {
        self.open
    }

    /// Last anchor snapshot.
    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    /// Last computed position, or `None` if nothing could be measured yet.
    pub fn position(&self) -> Option<Point> {
        if self.open { self.position } else { None }
    }

    /// Content rectangle at the last computed position.
    pub fn content_rect(&self) -> Option<Rect> {
        Some(Rect::from_origin_size(self.position()?, self.content_size?))
    }

    /// Mark open and compute the first position.
    pub fn open(
        &mut self,
        viewport: Size,
        measure: &impl Measure<N>,
        config: &FloatingConfig,
    ) -> Option<Point> {
        self.open = true;
        self.viewport = viewport;
        self.update(measure, config)
    }

    /// The viewport was resized.
    pub fn on_resize(
        &mut self,
        viewport: Size,
        measure: &impl Measure<N>,
        config: &FloatingConfig,
    ) -> Option<Point> {
        if !self.open {
            return None;
        }
        self.viewport = viewport;
        self.update(measure, config)
    }

    /// Something in the document scrolled.
    pub fn on_scroll(&mut self, measure: &impl Measure<N>, config: &FloatingConfig) -> Option<Point> {
        if !self.open {
            return None;
        }
        self.update(measure, config)
    }

    /// Mark closed and forget the measured geometry.
    pub fn close(&mut self) {
        self.open = false;
        self.anchor = None;
        self.content_size = None;
        self.position = None;
    }

    /// Re-measure and recompute.
    ///
    /// If the anchor or content cannot be measured, the previous position is
    /// kept (or stays `None`) and the next trigger retries.
    pub fn update(&mut self, measure: &impl Measure<N>, config: &FloatingConfig) -> Option<Point> {
        if !self.open {
            return None;
        }
        let anchor = match self.virtual_anchor {
            Some(rect) => Some(rect),
            None => self.trigger.as_ref().and_then(|t| measure.rect_of(t)),
        };
        let content = self.content.as_ref().and_then(|c| measure.rect_of(c));
        let (Some(anchor), Some(content)) = (anchor, content) else {
            tracing::trace!("floating content or anchor not measurable yet; skipping");
            return self.position;
        };
        let size = content.size();
        self.anchor = Some(anchor);
        self.content_size = Some(size);
        let position = compute_position(anchor, size, &self.placement, self.viewport, config.padding);
        self.position = Some(position);
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{Align, Side};
    use core::cell::Cell;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Node {
        Trigger,
        Content,
    }

    struct Layout {
        trigger: Cell<Option<Rect>>,
        content: Cell<Option<Rect>>,
    }

    impl Measure<Node> for Layout {
        fn rect_of(&self, node: &Node) -> Option<Rect> {
            match node {
                Node::Trigger => self.trigger.get(),
                Node::Content => self.content.get(),
            }
        }
    }

    fn layout() -> Layout {
        Layout {
            trigger: Cell::new(Some(Rect::new(100.0, 100.0, 160.0, 130.0))),
            content: Cell::new(Some(Rect::new(0.0, 0.0, 200.0, 80.0))),
        }
    }

    fn state() -> FloatingState<Node> {
        let mut s = FloatingState::new(Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0));
        s.set_trigger(Some(Node::Trigger));
        s.set_content(Some(Node::Content));
        s
    }

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    #[test]
    fn open_measures_and_positions() {
        let layout = layout();
        let config = FloatingConfig::default();
        let mut s = state();
        assert_eq!(s.position(), None);
        assert!(!s.is_listening());

        let pos = s.open(VIEWPORT, &layout, &config);
        assert_eq!(pos, Some(Point::new(100.0, 134.0)));
        assert!(s.is_listening());
        assert_eq!(s.content_rect(), Some(Rect::new(100.0, 134.0, 300.0, 214.0)));
    }

    #[test]
    fn scroll_re_reads_anchor() {
        let layout = layout();
        let config = FloatingConfig::default();
        let mut s = state();
        s.open(VIEWPORT, &layout, &config);

        layout.trigger.set(Some(Rect::new(100.0, 50.0, 160.0, 80.0)));
        assert_eq!(s.on_scroll(&layout, &config), Some(Point::new(100.0, 84.0)));
    }

    #[test]
    fn resize_reclamps() {
        let layout = layout();
        let config = FloatingConfig::default();
        let mut s = state();
        s.open(VIEWPORT, &layout, &config);

        let pos = s.on_resize(Size::new(250.0, 800.0), &layout, &config);
        assert_eq!(pos, Some(Point::new(40.0, 134.0)));
    }

    #[test]
    fn unmounted_nodes_skip_and_retry() {
        let layout = layout();
        layout.content.set(None);
        let config = FloatingConfig::default();
        let mut s = state();

        assert_eq!(s.open(VIEWPORT, &layout, &config), None);
        layout.content.set(Some(Rect::new(0.0, 0.0, 200.0, 80.0)));
        assert_eq!(s.on_scroll(&layout, &config), Some(Point::new(100.0, 134.0)));
    }

    #[test]
    fn closed_state_ignores_triggers() {
        let layout = layout();
        let config = FloatingConfig::default();
        let mut s = state();
        assert_eq!(s.on_scroll(&layout, &config), None);
        assert_eq!(s.on_resize(VIEWPORT, &layout, &config), None);

        s.open(VIEWPORT, &layout, &config);
        s.close();
        assert_eq!(s.position(), None);
        assert_eq!(s.anchor(), None);
        assert!(!s.is_listening());
    }

    #[test]
    fn virtual_anchor_overrides_trigger() {
        let layout = layout();
        let config = FloatingConfig::default();
        let mut s = state();
        s.set_virtual_anchor(Some(Rect::new(500.0, 400.0, 500.0, 400.0)));
        assert_eq!(s.open(VIEWPORT, &layout, &config), Some(Point::new(500.0, 404.0)));
    }

    #[test]
    fn placement_change_recomputes_while_open() {
        let layout = layout();
        let config = FloatingConfig::default();
        let mut s = state();
        s.open(VIEWPORT, &layout, &config);
        s.set_placement(Placement::new(Side::Top, Align::Start), &layout, &config);
        assert_eq!(s.position(), Some(Point::new(100.0, 20.0)));
    }

    #[test]
    fn closure_measure() {
        let config = FloatingConfig::default();
        let mut s: FloatingState<u8> = FloatingState::new(Placement::default());
        s.set_trigger(Some(1));
        s.set_content(Some(2));
        let measure = |n: &u8| match n {
            1 => Some(Rect::new(100.0, 100.0, 200.0, 120.0)),
            _ => Some(Rect::new(0.0, 0.0, 50.0, 10.0)),
        };
        assert_eq!(s.open(VIEWPORT, &measure, &config), Some(Point::new(125.0, 120.0)));
    }
}
