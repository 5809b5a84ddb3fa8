//! Flow layout facade.

use crate::cache::{CacheStats, WidthCache};
use crate::config::{FillMode, LayoutConfig, StackingAxis};
use crate::error::{LayoutError, Result};
use crate::pack::{pack, ColumnPartition};
use crate::place::place;
use crate::wrap::wrap;
use flowpack_core::{LayoutItem, Rect, Size};

/// Placement strategy with its per-strategy state.
#[derive(Debug)]
enum Fill {
    /// Balanced columns, memoized per allocated width
    ColumnWise { cache: WidthCache },
    /// Wrapped rows, recomputed on every call
    RowWise,
}

impl Fill {
    fn new(config: &LayoutConfig) -> Self {
        match config.fill_mode {
            FillMode::ColumnWise => Self::ColumnWise {
                cache: WidthCache::new(config.cache_capacity),
            },
            FillMode::RowWise => Self::RowWise,
        }
    }
}

/// Arranges an ordered sequence of items to fit a given width.
///
/// The layout grows vertically: the host offers a width and gets back the
/// height needed, optionally with every item positioned.
///
/// # Examples
///
/// ```
/// use flowpack_core::{Block, Rect, Size};
/// use flowpack_layout::{FlowLayout, LayoutConfig};
///
/// let mut layout = FlowLayout::new(LayoutConfig::default()).unwrap();
/// for _ in 0..6 {
///     layout.add_item(Block::new(Size::new(100.0, 20.0)));
/// }
///
/// assert_eq!(layout.measure(220.0), 66.0);
/// assert_eq!(layout.layout(Rect::from_width(220.0)), 66.0);
/// assert_eq!(layout.item_at(3).unwrap().geometry(), Some(Rect::new(120.0, 0.0, 100.0, 20.0)));
/// ```
#[derive(Debug)]
pub struct FlowLayout<I> {
    items: Vec<I>,
    config: LayoutConfig,
    fill: Fill,
}

impl<I: LayoutItem> FlowLayout<I> {
    /// Create an empty layout.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if `config` does not validate, for
    /// example when it asks for horizontal stacking.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            items: Vec::new(),
            fill: Fill::new(&config),
            config,
        })
    }

    /// Layout configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Configured fill mode.
    #[must_use]
    pub const fn fill_mode(&self) -> FillMode {
        self.config.fill_mode
    }

    /// Axis the layout grows along.
    #[must_use]
    pub const fn expanding_directions(&self) -> StackingAxis {
        self.config.stacking_axis
    }

    /// The required height always depends on the offered width.
    #[must_use]
    pub const fn has_height_for_width(&self) -> bool {
        true
    }

    /// Append an item.
    pub fn add_item(&mut self, item: I) {
        self.items.push(item);
        self.invalidate();
    }

    /// Insert an item before `index`; `index == count()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotFound`] if `index` is past the end.
    pub fn insert_item(&mut self, index: usize, item: I) -> Result<()> {
        if index > self.items.len() {
            return Err(LayoutError::NotFound {
                index,
                count: self.items.len(),
            });
        }
        self.items.insert(index, item);
        self.invalidate();
        Ok(())
    }

    /// Remove and return the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotFound`] if `index` is out of bounds; the
    /// layout is left untouched.
    pub fn remove_item_at(&mut self, index: usize) -> Result<I> {
        if index >= self.items.len() {
            return Err(LayoutError::NotFound {
                index,
                count: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        self.invalidate();
        Ok(item)
    }

    /// Remove every item, returning them in order.
    pub fn take_all(&mut self) -> Vec<I> {
        let items = std::mem::take(&mut self.items);
        self.invalidate();
        items
    }

    /// Item at `index`, if any.
    #[must_use]
    pub fn item_at(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    /// Mutable item at `index`, if any.
    ///
    /// Call [`invalidate`](Self::invalidate) after changing its size.
    pub fn item_at_mut(&mut self, index: usize) -> Option<&mut I> {
        self.items.get_mut(index)
    }

    /// All items in layout order.
    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// True when there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every memoized result.
    pub fn invalidate(&mut self) {
        if let Fill::ColumnWise { cache } = &mut self.fill {
            cache.clear();
        }
    }

    /// Cache counters, for column-wise layouts.
    #[must_use]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        match &self.fill {
            Fill::ColumnWise { cache } => Some(cache.stats()),
            Fill::RowWise => None,
        }
    }

    /// Height needed to lay everything out in `width`, without moving items.
    ///
    /// The height includes the top and bottom margins in both fill modes.
    /// Row-wise flow also wraps inside the width left after the left and
    /// right margins.
    #[tracing::instrument(level = "debug", skip(self), fields(items = self.items.len()))]
    pub fn measure(&mut self, width: f32) -> f32 {
        let sizes = self.preferred_sizes();
        let margins = self.config.margins;
        match &mut self.fill {
            Fill::ColumnWise { cache } => {
                column_partition(cache, &sizes, width, &self.config).max_height()
                    + margins.vertical()
            }
            Fill::RowWise => {
                let area = Rect::from_width(width).shrunk_by(margins);
                let flow = wrap(
                    &sizes,
                    area,
                    self.config.horizontal_spacing(),
                    self.config.vertical_spacing(),
                );
                flow.height + margins.vertical()
            }
        }
    }

    /// Same as [`measure`](Self::measure).
    pub fn height_for_width(&mut self, width: f32) -> f32 {
        self.measure(width)
    }

    /// Position every item inside `rect` and return the height needed.
    #[tracing::instrument(level = "debug", skip(self), fields(items = self.items.len()))]
    pub fn layout(&mut self, rect: Rect) -> f32 {
        let sizes = self.preferred_sizes();
        let margins = self.config.margins;
        let h_spacing = self.config.horizontal_spacing();
        let v_spacing = self.config.vertical_spacing();

        let (rects, height) = match &mut self.fill {
            Fill::ColumnWise { cache } => {
                let partition = column_partition(cache, &sizes, rect.width, &self.config);
                let placement = place(&partition, &sizes, rect, margins, h_spacing, v_spacing);
                (placement.rects, placement.height)
            }
            Fill::RowWise => {
                let flow = wrap(&sizes, rect.shrunk_by(margins), h_spacing, v_spacing);
                (flow.placements, flow.height + margins.vertical())
            }
        };

        for (item, geometry) in self.items.iter_mut().zip(rects) {
            item.set_geometry(geometry);
        }
        height
    }

    /// Smallest size that holds the largest single item plus the margins.
    #[must_use]
    pub fn minimum_size(&self) -> Size {
        self.items
            .iter()
            .map(LayoutItem::minimum_size)
            .fold(Size::ZERO, |acc, size| acc.expanded_to(size))
            .grown_by(self.config.margins)
    }

    /// Same as [`minimum_size`](Self::minimum_size).
    #[must_use]
    pub fn size_hint(&self) -> Size {
        self.minimum_size()
    }

    /// Column partition for `width`, from the cache when possible.
    ///
    /// Returns `None` for row-wise layouts.
    pub fn partition(&mut self, width: f32) -> Option<ColumnPartition> {
        let sizes = self.preferred_sizes();
        match &mut self.fill {
            Fill::ColumnWise { cache } => {
                Some(column_partition(cache, &sizes, width, &self.config))
            }
            Fill::RowWise => None,
        }
    }

    fn preferred_sizes(&self) -> Vec<Size> {
        self.items.iter().map(LayoutItem::preferred_size).collect()
    }
}

/// Look up or compute the partition for an allocated width.
///
/// The search runs on the width left after the horizontal margins; the cache
/// is keyed by the full allocated width.
fn column_partition(
    cache: &mut WidthCache,
    sizes: &[Size],
    width: f32,
    config: &LayoutConfig,
) -> ColumnPartition {
    if let Some(partition) = cache.get(width) {
        tracing::debug!(width, "cached partition");
        return partition.clone();
    }
    tracing::debug!(width, "partition cache miss");
    let partition = pack(
        sizes,
        width - config.margins.horizontal(),
        config.horizontal_spacing(),
        config.vertical_spacing(),
    );
    cache.insert(width, partition.clone());
    partition
}
