// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the Understory demos.

use kurbo::{Rect, Size};
use understory_visibility::StaticLayout;

/// Lays out `cards` equally sized cards in a single column, `gap` pixels apart.
///
/// Card ids are their row index.
pub fn card_column(viewport: Size, cards: u32, card_height: f64, gap: f64) -> StaticLayout<u32> {
    let mut layout = StaticLayout::new(viewport);
    let margin = 20.0_f64.min(viewport.width / 4.0);
    for card in 0..cards {
        let top = f64::from(card) * (card_height + gap);
        layout.set_rect(
            card,
            Rect::new(margin, top, viewport.width - margin, top + card_height),
        );
    }
    layout
}
