//! Column statistics.

use flowpack_core::Size;

/// Width and stacked height of a group of items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    /// Widest preferred width in the group
    pub width: f32,
    /// Sum of preferred heights plus the spacing between them
    pub height: f32,
}

/// Measure a group of items stacked top to bottom.
///
/// An empty group reports zero width and a height of `-vertical_spacing`, so
/// that adding one item yields exactly that item's height.
#[must_use]
pub fn column_stats<I>(sizes: I, vertical_spacing: f32) -> ColumnStats
where
    I: IntoIterator<Item = Size>,
{
    sizes.into_iter().fold(
        ColumnStats {
            width: 0.0,
            height: -vertical_spacing,
        },
        |acc, size| ColumnStats {
            width: acc.width.max(size.width),
            height: acc.height + size.height + vertical_spacing,
        },
    )
}

/// Measure the items at `members` within `sizes`.
#[must_use]
pub(crate) fn stats_of(sizes: &[Size], members: &[usize], vertical_spacing: f32) -> ColumnStats {
    column_stats(members.iter().map(|&i| sizes[i]), vertical_spacing)
}
