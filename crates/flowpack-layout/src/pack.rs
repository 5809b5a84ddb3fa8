//! Column-wise packing.
//!
//! Items are split into contiguous columns, left to right, so that the
//! tallest column is as short as possible while the columns still fit the
//! allocated width. The search is a greedy local descent:
//!
//! 1. Start with a single column holding every item.
//! 2. Take the tallest column and push its last item to the front of the
//!    next column (opening a new column at the right edge if needed).
//! 3. Keep shifting items right until the pair fits the width left over by
//!    the other columns. A destination that grows taller than the current
//!    best hands its overflow on to the column after it.
//! 4. Keep the candidate only if its tallest column got strictly shorter;
//!    stop at the first candidate that does not improve or cannot be made
//!    to fit.
//!
//! The best height strictly decreases, so the search always terminates.
//! An equal-height plateau ends it even when more columns would fit. The result
//! is deterministic and never reorders items, but it is a local optimum, not
//! a global one.

use crate::stats::{stats_of, ColumnStats};
use flowpack_core::Size;
use serde::Serialize;

/// Slack allowed when comparing summed widths against the budget.
const WIDTH_TOLERANCE: f32 = 1e-3;

/// One column of a partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Indices into the item sequence, in order
    pub items: Vec<usize>,
    /// Widest member
    pub width: f32,
    /// Stacked height including spacing
    pub height: f32,
}

/// An ordered split of the item sequence into columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnPartition {
    columns: Vec<Column>,
    total_width: f32,
    max_height: f32,
}

impl ColumnPartition {
    /// Partition with no columns, used for an empty item sequence.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            total_width: 0.0,
            max_height: 0.0,
        }
    }

    /// Build a partition from index groups.
    ///
    /// # Panics
    ///
    /// Panics if a group is empty or the groups do not list `0..sizes.len()`
    /// exactly once and in order. Both indicate a bug in the search.
    #[must_use]
    pub(crate) fn from_groups(
        sizes: &[Size],
        groups: Vec<Vec<usize>>,
        horizontal_spacing: f32,
        vertical_spacing: f32,
    ) -> Self {
        assert!(
            groups.iter().flatten().copied().eq(0..sizes.len()),
            "column partition does not reproduce the item sequence: {groups:?}"
        );

        let mut total_width = -horizontal_spacing;
        let mut max_height = 0.0_f32;
        let columns: Vec<Column> = groups
            .into_iter()
            .map(|items| {
                assert!(!items.is_empty(), "column partition contains an empty column");
                let ColumnStats { width, height } = stats_of(sizes, &items, vertical_spacing);
                total_width += width + horizontal_spacing;
                max_height = max_height.max(height);
                Column {
                    items,
                    width,
                    height,
                }
            })
            .collect();

        if columns.is_empty() {
            return Self::empty();
        }

        Self {
            columns,
            total_width,
            max_height,
        }
    }

    /// Columns from left to right.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Sum of column widths plus the spacing between them.
    #[must_use]
    pub const fn total_width(&self) -> f32 {
        self.total_width
    }

    /// Height of the tallest column.
    #[must_use]
    pub const fn max_height(&self) -> f32 {
        self.max_height
    }

    /// True when the partition holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Item indices in column order.
    pub fn item_order(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().flat_map(|c| c.items.iter().copied())
    }
}

/// Pack items into balanced columns that fit `allocated_width`.
///
/// A single item wider than the allocation still gets a column of its own,
/// so `total_width` can exceed the allocation in that case.
#[must_use]
pub fn pack(
    sizes: &[Size],
    allocated_width: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
) -> ColumnPartition {
    if sizes.is_empty() {
        return ColumnPartition::empty();
    }

    let search = Search {
        sizes,
        allocated_width,
        horizontal_spacing,
        vertical_spacing,
    };

    let mut current: Vec<Vec<usize>> = vec![(0..sizes.len()).collect()];
    let mut best = search.height(&current[0]);
    let mut iterations = 0_usize;

    loop {
        iterations += 1;
        let mut candidate = current.clone();
        let Some(height) = search.step(&mut candidate, best) else {
            tracing::trace!(iterations, "source column cannot be split further");
            break;
        };
        tracing::trace!(iterations, height, columns = candidate.len(), "candidate");
        if height < best {
            best = height;
            current = candidate;
        } else {
            break;
        }
    }

    let partition =
        ColumnPartition::from_groups(sizes, current, horizontal_spacing, vertical_spacing);
    tracing::debug!(
        items = sizes.len(),
        allocated_width,
        columns = partition.column_count(),
        total_width = partition.total_width(),
        max_height = partition.max_height(),
        iterations,
        "packed columns"
    );
    partition
}

/// Fixed inputs of one packing search.
struct Search<'a> {
    sizes: &'a [Size],
    allocated_width: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl Search<'_> {
    fn height(&self, column: &[usize]) -> f32 {
        stats_of(self.sizes, column, self.vertical_spacing).height
    }

    fn width(&self, column: &[usize]) -> f32 {
        stats_of(self.sizes, column, self.vertical_spacing).width
    }

    /// First tallest column.
    fn bottleneck(&self, columns: &[Vec<usize>]) -> usize {
        let mut index = 0;
        let mut tallest = f32::NEG_INFINITY;
        for (i, column) in columns.iter().enumerate() {
            let height = self.height(column);
            if height > tallest {
                tallest = height;
                index = i;
            }
        }
        index
    }

    /// Index of the column right of `from`, opening one if `from` is last.
    fn next_column(columns: &mut Vec<Vec<usize>>, from: usize) -> usize {
        if from + 1 == columns.len() {
            columns.push(Vec::new());
        }
        from + 1
    }

    /// Whether `from` and `to` fit next to every other column.
    fn fits(&self, columns: &[Vec<usize>], from: usize, to: usize) -> bool {
        let others: f32 = columns
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != from && i != to)
            .map(|(_, column)| self.width(column))
            .sum();
        let gaps = columns.len().saturating_sub(1) as f32 * self.horizontal_spacing;
        let budget = self.allocated_width - others - gaps;
        self.width(&columns[from]) + self.width(&columns[to]) <= budget + WIDTH_TOLERANCE
    }

    /// Run one move of the search on `columns`.
    ///
    /// Returns the height of the candidate's tallest column, or `None` when
    /// a source column would have to give up its last item.
    fn step(&self, columns: &mut Vec<Vec<usize>>, best: f32) -> Option<f32> {
        let mut from = self.bottleneck(columns);
        let mut to = Self::next_column(columns, from);
        // A freshly targeted column must receive at least one item.
        let mut must_move = true;

        loop {
            if !must_move && self.fits(columns, from, to) {
                break;
            }
            if columns[from].len() <= 1 {
                return None;
            }
            let item = columns[from].pop()?;
            columns[to].insert(0, item);
            must_move = false;

            if self.height(&columns[to]) > best {
                from = to;
                to = Self::next_column(columns, from);
                must_move = true;
            }
        }

        Some(
            columns
                .iter()
                .map(|column| self.height(column))
                .fold(f32::NEG_INFINITY, f32::max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn groups(partition: &ColumnPartition) -> Vec<Vec<usize>> {
        partition
            .columns()
            .iter()
            .map(|c| c.items.clone())
            .collect()
    }

    #[test]
    fn test_six_equal_items_make_two_columns() {
        let sizes = vec![Size::new(100.0, 20.0); 6];
        let partition = pack(&sizes, 220.0, 20.0, 3.0);

        assert_eq!(groups(&partition), vec![vec![0, 1, 2], vec![3, 4, 5]]);
        assert_eq!(partition.columns()[0].height, 66.0);
        assert_eq!(partition.columns()[1].height, 66.0);
        assert_eq!(partition.total_width(), 220.0);
        assert_eq!(partition.max_height(), 66.0);
    }

    #[test]
    fn test_wide_item_is_not_clipped() {
        let sizes = vec![Size::new(50.0, 30.0)];
        let partition = pack(&sizes, 10.0, 20.0, 3.0);

        assert_eq!(partition.column_count(), 1);
        assert_eq!(partition.total_width(), 50.0);
        assert_eq!(partition.max_height(), 30.0);
    }

    #[test]
    fn test_empty_sequence() {
        let partition = pack(&[], 200.0, 20.0, 3.0);
        assert!(partition.is_empty());
        assert_eq!(partition.total_width(), 0.0);
        assert_eq!(partition.max_height(), 0.0);
    }

    #[test]
    fn test_narrow_width_keeps_single_column() {
        let sizes = vec![Size::new(100.0, 20.0); 4];
        let partition = pack(&sizes, 150.0, 20.0, 3.0);
        assert_eq!(groups(&partition), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_wide_allocation_stops_at_plateau() {
        let sizes = vec![Size::new(50.0, 10.0); 4];
        // Four side by side would fit (230), but the three-column candidate
        // is no shorter than two columns of two
        let partition = pack(&sizes, 1000.0, 10.0, 0.0);
        assert_eq!(groups(&partition), vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(partition.max_height(), 20.0);
    }

    #[test]
    fn test_equal_height_candidate_ends_search() {
        let sizes = vec![Size::new(100.0, 20.0); 6];
        // Three columns of two fit in 340, but the next candidate keeps a
        // 66-high column, so the two-column split is final
        let partition = pack(&sizes, 340.0, 20.0, 3.0);
        assert_eq!(groups(&partition), vec![vec![0, 1, 2], vec![3, 4, 5]]);
        assert_eq!(partition.total_width(), 220.0);
        assert_eq!(partition.max_height(), 66.0);
    }

    #[test]
    fn test_zero_spacing() {
        let sizes = vec![Size::new(10.0, 10.0); 2];
        let partition = pack(&sizes, 20.0, 0.0, 0.0);
        assert_eq!(groups(&partition), vec![vec![0], vec![1]]);
        assert_eq!(partition.total_width(), 20.0);
    }

    #[test]
    fn test_item_order_is_sequence_order() {
        let sizes: Vec<Size> = (1..=9)
            .map(|i| Size::new(10.0 * i as f32, 5.0 * i as f32))
            .collect();
        let partition = pack(&sizes, 300.0, 5.0, 2.0);
        assert!(partition.item_order().eq(0..sizes.len()));
    }

    #[test]
    #[should_panic(expected = "empty column")]
    fn test_from_groups_rejects_empty_column() {
        let sizes = vec![Size::new(1.0, 1.0); 2];
        let _ = ColumnPartition::from_groups(&sizes, vec![vec![0, 1], vec![]], 0.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "does not reproduce")]
    fn test_from_groups_rejects_reordering() {
        let sizes = vec![Size::new(1.0, 1.0); 2];
        let _ = ColumnPartition::from_groups(&sizes, vec![vec![1], vec![0]], 0.0, 0.0);
    }

    fn sizes_strategy() -> impl Strategy<Value = Vec<Size>> {
        prop::collection::vec(
            (1u16..200, 1u16..100).prop_map(|(w, h)| Size::new(f32::from(w), f32::from(h))),
            0..30,
        )
    }

    proptest! {
        #[test]
        fn prop_order_preserved(sizes in sizes_strategy(), width in 0u16..1500) {
            let partition = pack(&sizes, f32::from(width), 20.0, 3.0);
            prop_assert!(partition.item_order().eq(0..sizes.len()));
            prop_assert!(partition.columns().iter().all(|c| !c.items.is_empty()));
        }

        #[test]
        fn prop_never_taller_than_single_column(sizes in sizes_strategy(), width in 0u16..1500) {
            let partition = pack(&sizes, f32::from(width), 20.0, 3.0);
            let baseline = crate::column_stats(sizes.iter().copied(), 3.0).height.max(0.0);
            prop_assert!(partition.max_height() <= baseline);
        }

        #[test]
        fn prop_multi_column_fits_width(sizes in sizes_strategy(), width in 0u16..1500) {
            let partition = pack(&sizes, f32::from(width), 20.0, 3.0);
            if partition.column_count() > 1 {
                prop_assert!(partition.total_width() <= f32::from(width) + 0.01);
            }
        }

        #[test]
        fn prop_deterministic(sizes in sizes_strategy(), width in 0u16..1500) {
            let a = pack(&sizes, f32::from(width), 20.0, 3.0);
            let b = pack(&sizes, f32::from(width), 20.0, 3.0);
            prop_assert_eq!(a, b);
        }
    }
}
