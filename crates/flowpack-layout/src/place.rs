//! Geometry assignment for column partitions.

use crate::pack::ColumnPartition;
use flowpack_core::{Margins, Rect, Size};

/// Concrete positions for a column partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// One rectangle per item, in sequence order
    pub rects: Vec<Rect>,
    /// Extra gap added before each column, left of the first and between the rest
    pub alignment_spacing: f32,
    /// Height required including the top and bottom margins
    pub height: f32,
}

/// Project `partition` onto `rect`.
///
/// Items are stacked from the top of each column and pushed against the
/// column's right edge. Width left over after the columns and margins is
/// shared out evenly as padding before, between and after the columns.
#[must_use]
pub fn place(
    partition: &ColumnPartition,
    sizes: &[Size],
    rect: Rect,
    margins: Margins,
    horizontal_spacing: f32,
    vertical_spacing: f32,
) -> Placement {
    let total_width = partition.total_width() + margins.horizontal();
    let alignment_spacing = if rect.width > total_width {
        (rect.width - total_width) / (1 + partition.column_count()) as f32
    } else {
        0.0
    };

    let mut rects = vec![Rect::default(); sizes.len()];
    let mut x = rect.x + margins.left;
    for (index, column) in partition.columns().iter().enumerate() {
        let padding = alignment_spacing * (index + 1) as f32;
        let mut y = rect.y + margins.top;
        for &item in &column.items {
            let size = sizes[item];
            debug_assert!(column.width >= size.width, "item wider than its column");
            rects[item] = Rect::new(
                x + column.width - size.width + padding,
                y,
                size.width,
                size.height,
            );
            y += size.height + vertical_spacing;
        }
        x += column.width + horizontal_spacing;
    }

    Placement {
        rects,
        alignment_spacing,
        height: partition.max_height() + margins.vertical(),
    }
}
