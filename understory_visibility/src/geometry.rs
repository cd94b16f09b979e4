// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rect-vs-viewport visibility predicate.
//!
//! All rectangles are in viewport coordinates: the origin is the top-left
//! corner of the viewport, `x0`/`y0` are the left/top edges and `x1`/`y1` the
//! right/bottom edges. This matches what platform layout queries such as
//! `getBoundingClientRect` report.

use kurbo::{Insets, Rect, Size};

use crate::options::VisibilityOptions;

/// Pixel margins applied to the viewport before comparing.
///
/// Positive values grow the viewport so nodes count as visible before they
/// scroll into view (useful for lazy loading). Negative values shrink it so a
/// node has to scroll further in.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Offset {
    /// Margin above the top edge of the viewport.
    pub top: f64,
    /// Margin past the right edge of the viewport.
    pub right: f64,
    /// Margin below the bottom edge of the viewport.
    pub bottom: f64,
    /// Margin before the left edge of the viewport.
    pub left: f64,
}

impl Offset {
    /// No offset.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Creates an offset from explicit edge margins.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same margin on every edge.
    #[must_use]
    pub const fn uniform(px: f64) -> Self {
        Self::new(px, px, px, px)
    }

    /// `vertical` on the top and bottom edges, `horizontal` on the left and right.
    #[must_use]
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<Insets> for Offset {
    fn from(insets: Insets) -> Self {
        Self::new(insets.y0, insets.x1, insets.y1, insets.x0)
    }
}

/// One edge of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The top edge (`y0`).
    Top,
    /// The right edge (`x1`).
    Right,
    /// The bottom edge (`y1`).
    Bottom,
    /// The left edge (`x0`).
    Left,
}

/// How much of a node must be inside the viewport to count as visible.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisibilityMode {
    /// The whole node must be inside.
    #[default]
    Full,
    /// Any overlap counts, including a shared boundary.
    Partial,
    /// The given edge of the node must be inside on its axis, and the node
    /// must overlap the viewport on the other axis.
    Edge(Edge),
}

/// Which axes take part in the comparison.
///
/// Restricting the axes also applies to [`VisibilityMode::Edge`]: the edge
/// test belongs to the edge's own axis, so `Edge(Edge::Left)` with
/// [`Axes::Vertical`] only checks vertical overlap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axes {
    /// Test both axes.
    #[default]
    Both,
    /// Only test top/bottom; horizontal position is ignored.
    Vertical,
    /// Only test left/right; vertical position is ignored.
    Horizontal,
}

impl Axes {
    fn vertical(self) -> bool {
        matches!(self, Self::Both | Self::Vertical)
    }

    fn horizontal(self) -> bool {
        matches!(self, Self::Both | Self::Horizontal)
    }
}

/// Returns the bounds a node is compared against: the viewport grown by `offset`.
#[must_use]
pub fn offset_viewport(viewport: Size, offset: Offset) -> Rect {
    Rect::new(
        -offset.left,
        -offset.top,
        viewport.width + offset.right,
        viewport.height + offset.bottom,
    )
}

/// Picks the viewport size per axis: the inner size, or the client size where
/// the inner size is unavailable (zero).
#[must_use]
pub fn resolve_viewport_size(inner: Size, client: Size) -> Size {
    let pick = |inner: f64, client: f64| if inner > 0.0 { inner } else { client };
    Size::new(
        pick(inner.width, client.width),
        pick(inner.height, client.height),
    )
}

/// Returns `true` if `rect` counts as visible in a viewport of size `viewport`.
///
/// A rect equal to [`Rect::ZERO`] is what layout queries report for nodes that
/// are detached or not rendered; it is never visible. Rects with non-finite
/// coordinates are never visible either.
#[must_use]
pub fn is_visible(rect: Rect, viewport: Size, options: &VisibilityOptions) -> bool {
    if rect == Rect::ZERO || !is_finite(rect) {
        return false;
    }
    let rect = rect.abs();
    let bounds = offset_viewport(viewport, options.offset);
    let axes = options.axes;

    let contained_v = rect.y0 >= bounds.y0 && rect.y1 <= bounds.y1;
    let contained_h = rect.x0 >= bounds.x0 && rect.x1 <= bounds.x1;
    let overlap_v = rect.y1 >= bounds.y0 && rect.y0 <= bounds.y1;
    let overlap_h = rect.x1 >= bounds.x0 && rect.x0 <= bounds.x1;

    let (vertical, horizontal) = match options.mode {
        VisibilityMode::Full => (contained_v, contained_h),
        VisibilityMode::Partial => (overlap_v, overlap_h),
        VisibilityMode::Edge(edge) => {
            let within = |v: f64, lo: f64, hi: f64| v >= lo && v <= hi;
            match edge {
                Edge::Top => (within(rect.y0, bounds.y0, bounds.y1), overlap_h),
                Edge::Bottom => (within(rect.y1, bounds.y0, bounds.y1), overlap_h),
                Edge::Left => (overlap_v, within(rect.x0, bounds.x0, bounds.x1)),
                Edge::Right => (overlap_v, within(rect.x1, bounds.x0, bounds.x1)),
            }
        }
    };

    (!axes.vertical() || vertical) && (!axes.horizontal() || horizontal)
}

fn is_finite(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Rect, Size};

    use super::{Axes, Edge, Offset, VisibilityMode, is_visible, offset_viewport, resolve_viewport_size};
    use crate::options::VisibilityOptions;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    fn full() -> VisibilityOptions {
        VisibilityOptions::default()
    }

    fn partial() -> VisibilityOptions {
        VisibilityOptions::default().with_partial(true)
    }

    #[test]
    fn fully_inside_is_visible() {
        let rect = Rect::new(10.0, 10.0, 110.0, 60.0);
        assert!(is_visible(rect, VIEWPORT, &full()));
        assert!(is_visible(rect, VIEWPORT, &partial()));
    }

    #[test]
    fn filling_viewport_exactly_is_visible() {
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert!(is_visible(rect, VIEWPORT, &full()));
    }

    #[test]
    fn straddling_bottom_is_partial_only() {
        let rect = Rect::new(10.0, 550.0, 110.0, 650.0);
        assert!(!is_visible(rect, VIEWPORT, &full()));
        assert!(is_visible(rect, VIEWPORT, &partial()));
    }

    #[test]
    fn straddling_top_is_partial_only() {
        let rect = Rect::new(10.0, -50.0, 110.0, 50.0);
        assert!(!is_visible(rect, VIEWPORT, &full()));
        assert!(is_visible(rect, VIEWPORT, &partial()));
    }

    #[test]
    fn below_viewport_is_hidden() {
        let rect = Rect::new(10.0, 700.0, 110.0, 800.0);
        assert!(!is_visible(rect, VIEWPORT, &full()));
        assert!(!is_visible(rect, VIEWPORT, &partial()));
    }

    #[test]
    fn right_of_viewport_is_hidden() {
        let rect = Rect::new(900.0, 10.0, 1000.0, 60.0);
        assert!(!is_visible(rect, VIEWPORT, &partial()));
    }

    #[test]
    fn touching_boundary_counts_as_partial() {
        let rect = Rect::new(10.0, 600.0, 110.0, 700.0);
        assert!(is_visible(rect, VIEWPORT, &partial()));
        let rect = Rect::new(10.0, 600.5, 110.0, 700.0);
        assert!(!is_visible(rect, VIEWPORT, &partial()));
    }

    #[test]
    fn zero_rect_is_never_visible() {
        assert!(!is_visible(Rect::ZERO, VIEWPORT, &full()));
        assert!(!is_visible(Rect::ZERO, VIEWPORT, &partial()));
    }

    #[test]
    fn non_finite_rect_is_never_visible() {
        let rect = Rect::new(0.0, f64::NAN, 10.0, 10.0);
        assert!(!is_visible(rect, VIEWPORT, &partial()));
        let rect = Rect::new(0.0, 0.0, f64::INFINITY, 10.0);
        assert!(!is_visible(rect, VIEWPORT, &partial()));
    }

    #[test]
    fn positive_offset_triggers_early() {
        let rect = Rect::new(10.0, 650.0, 110.0, 700.0);
        assert!(!is_visible(rect, VIEWPORT, &full()));
        let opts = full().with_offset(Offset::uniform(100.0));
        assert!(is_visible(rect, VIEWPORT, &opts));
    }

    #[test]
    fn negative_offset_triggers_late() {
        let rect = Rect::new(10.0, 520.0, 110.0, 580.0);
        assert!(is_visible(rect, VIEWPORT, &full()));
        let opts = full().with_offset(Offset::uniform(-50.0));
        assert!(!is_visible(rect, VIEWPORT, &opts));
    }

    #[test]
    fn per_edge_offset_only_affects_its_edge() {
        let below = Rect::new(10.0, 620.0, 110.0, 680.0);
        let above = Rect::new(10.0, -80.0, 110.0, -20.0);
        let opts = partial().with_offset(Offset::new(0.0, 0.0, 100.0, 0.0));
        assert!(is_visible(below, VIEWPORT, &opts));
        assert!(!is_visible(above, VIEWPORT, &opts));
    }

    #[test]
    fn vertical_axis_ignores_horizontal_position() {
        let rect = Rect::new(2_000.0, 10.0, 2_100.0, 60.0);
        assert!(!is_visible(rect, VIEWPORT, &full()));
        let opts = full().with_axes(Axes::Vertical);
        assert!(is_visible(rect, VIEWPORT, &opts));
    }

    #[test]
    fn horizontal_axis_ignores_vertical_position() {
        let rect = Rect::new(10.0, 2_000.0, 110.0, 2_100.0);
        let opts = full().with_axes(Axes::Horizontal);
        assert!(is_visible(rect, VIEWPORT, &opts));
        let offscreen = Rect::new(-300.0, 10.0, -200.0, 60.0);
        assert!(!is_visible(offscreen, VIEWPORT, &opts));
    }

    #[test]
    fn edge_mode_requires_that_edge_inside() {
        // Top edge visible, bottom hanging off the viewport.
        let rect = Rect::new(10.0, 500.0, 110.0, 900.0);
        let top = full().with_mode(VisibilityMode::Edge(Edge::Top));
        let bottom = full().with_mode(VisibilityMode::Edge(Edge::Bottom));
        assert!(is_visible(rect, VIEWPORT, &top));
        assert!(!is_visible(rect, VIEWPORT, &bottom));
    }

    #[test]
    fn edge_mode_requires_overlap_on_other_axis() {
        let rect = Rect::new(900.0, 100.0, 1_000.0, 200.0);
        let top = full().with_mode(VisibilityMode::Edge(Edge::Top));
        assert!(!is_visible(rect, VIEWPORT, &top));
        let left = Rect::new(700.0, 100.0, 900.0, 200.0);
        let opts = full().with_mode(VisibilityMode::Edge(Edge::Left));
        assert!(is_visible(left, VIEWPORT, &opts));
        let opts = full().with_mode(VisibilityMode::Edge(Edge::Right));
        assert!(!is_visible(left, VIEWPORT, &opts));
    }

    #[test]
    fn edge_mode_follows_axis_restriction() {
        // Left edge off screen, but the node overlaps vertically.
        let rect = Rect::new(-300.0, 100.0, -200.0, 200.0);
        let left = full().with_mode(VisibilityMode::Edge(Edge::Left));
        assert!(!is_visible(rect, VIEWPORT, &left));
        assert!(is_visible(rect, VIEWPORT, &left.clone().with_axes(Axes::Vertical)));
        assert!(!is_visible(rect, VIEWPORT, &left.with_axes(Axes::Horizontal)));

        // Top edge inside, horizontally off screen.
        let rect = Rect::new(900.0, 100.0, 1_000.0, 200.0);
        let top = full()
            .with_mode(VisibilityMode::Edge(Edge::Top))
            .with_axes(Axes::Vertical);
        assert!(is_visible(rect, VIEWPORT, &top));
    }

    #[test]
    fn flipped_rect_is_normalized() {
        let rect = Rect::new(110.0, 60.0, 10.0, 10.0);
        assert!(is_visible(rect, VIEWPORT, &full()));
    }

    #[test]
    fn offset_viewport_grows_bounds() {
        let bounds = offset_viewport(VIEWPORT, Offset::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(bounds, Rect::new(-4.0, -1.0, 802.0, 603.0));
        assert_eq!(
            offset_viewport(VIEWPORT, Offset::ZERO),
            Rect::new(0.0, 0.0, 800.0, 600.0)
        );
    }

    #[test]
    fn offset_constructors() {
        assert_eq!(Offset::symmetric(5.0, 7.0), Offset::new(5.0, 7.0, 5.0, 7.0));
        let from_insets = Offset::from(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(from_insets, Offset::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn viewport_size_falls_back_per_axis() {
        let inner = Size::new(0.0, 700.0);
        let client = Size::new(1024.0, 680.0);
        assert_eq!(resolve_viewport_size(inner, client), Size::new(1024.0, 700.0));
        assert_eq!(resolve_viewport_size(Size::ZERO, client), client);
    }
}
