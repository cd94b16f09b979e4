// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout queries: where the host's geometry comes from.

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Rect, Size, Vec2};

/// Source of node geometry and viewport size.
///
/// Implemented by the host on top of its layout engine or platform APIs.
pub trait LayoutQuery<N: ?Sized> {
    /// Returns the node's bounding rect in viewport coordinates.
    ///
    /// `None` means the node is not in the layout (detached, not yet
    /// rendered, or already dropped).
    fn bounding_rect(&self, node: &N) -> Option<Rect>;

    /// Returns the size of the viewport.
    fn viewport_size(&self) -> Size;
}

impl<N: ?Sized, L: LayoutQuery<N> + ?Sized> LayoutQuery<N> for &L {
    fn bounding_rect(&self, node: &N) -> Option<Rect> {
        (**self).bounding_rect(node)
    }

    fn viewport_size(&self) -> Size {
        (**self).viewport_size()
    }
}

/// A map-backed [`LayoutQuery`] with a fixed viewport.
///
/// Useful for tests and for hosts that already hold a snapshot of layout.
/// Rects are stored in viewport coordinates; [`StaticLayout::scroll_by`]
/// shifts them all the way a scroll of the viewport would.
#[derive(Clone, Debug)]
pub struct StaticLayout<N> {
    viewport: Size,
    rects: HashMap<N, Rect>,
}

impl<N: Eq + Hash> StaticLayout<N> {
    /// Creates an empty layout with the given viewport size.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            rects: HashMap::new(),
        }
    }

    /// Sets the viewport size.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Sets a node's rect, returning the previous one.
    pub fn set_rect(&mut self, node: N, rect: Rect) -> Option<Rect> {
        self.rects.insert(node, rect)
    }

    /// Removes a node from the layout.
    pub fn remove(&mut self, node: &N) -> Option<Rect> {
        self.rects.remove(node)
    }

    /// Scrolls the viewport by `delta`; every node moves by `-delta`.
    pub fn scroll_by(&mut self, delta: Vec2) {
        for rect in self.rects.values_mut() {
            *rect = *rect - delta;
        }
    }
}

impl<N: Eq + Hash> LayoutQuery<N> for StaticLayout<N> {
    fn bounding_rect(&self, node: &N) -> Option<Rect> {
        self.rects.get(node).copied()
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}
