//! Row-wise flow with line wrapping.

use flowpack_core::{Rect, Size};

/// Result of a row-wise flow.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapResult {
    /// One rectangle per item, in sequence order
    pub placements: Vec<Rect>,
    /// Height from the top of the area to the bottom of the last line
    pub height: f32,
    /// Number of lines used
    pub lines: usize,
}

/// Flow items left to right inside `area`, starting a new line whenever an
/// item would cross the right edge of a line that already holds something.
///
/// Items keep their preferred size; an item wider than the area sits alone
/// on its line and overhangs the edge.
#[must_use]
pub fn wrap(
    sizes: &[Size],
    area: Rect,
    horizontal_spacing: f32,
    vertical_spacing: f32,
) -> WrapResult {
    let mut placements = Vec::with_capacity(sizes.len());
    let mut x = area.x;
    let mut y = area.y;
    let mut line_height = 0.0_f32;
    let mut line_has_items = false;
    let mut lines = usize::from(!sizes.is_empty());

    for size in sizes {
        if line_has_items && x + size.width > area.right() {
            x = area.x;
            y += line_height + vertical_spacing;
            line_height = 0.0;
            lines += 1;
        }

        placements.push(Rect::new(x, y, size.width, size.height));
        x += size.width + horizontal_spacing;
        line_height = line_height.max(size.height);
        line_has_items = true;
    }

    WrapResult {
        placements,
        height: y + line_height - area.y,
        lines,
    }
}
