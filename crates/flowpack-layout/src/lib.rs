#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
//! Width-adaptive flow layout for flowpack.
//!
//! Lays out an ordered sequence of items inside a width that may change at
//! any time, growing downwards as needed.
//!
//! # Column-wise packing
//!
//! The default mode splits items into contiguous columns and searches for
//! the split with the shortest tallest column that still fits the width:
//!
//! - **Packing**: [`pack`] runs the search and returns a [`ColumnPartition`]
//! - **Memoization**: [`WidthCache`] keeps the last few partitions by width
//! - **Placement**: [`place`] right-aligns items in their columns and spreads
//!   spare width between columns
//!
//! # Row-wise flow
//!
//! [`wrap`] places items left to right and starts a new line when the next
//! item would cross the right edge.
//!
//! [`FlowLayout`] ties these together behind a measure/layout interface.

mod cache;
mod config;
mod engine;
mod error;
mod pack;
mod place;
mod stats;
mod wrap;

pub use cache::{CacheStats, WidthCache, WidthKey};
pub use config::{
    FillMode, LayoutConfig, StackingAxis, DEFAULT_CACHE_CAPACITY, DEFAULT_HORIZONTAL_SPACING,
    DEFAULT_VERTICAL_SPACING,
};
pub use engine::FlowLayout;
pub use error::{LayoutError, Result};
pub use pack::{pack, Column, ColumnPartition};
pub use place::{place, Placement};
pub use stats::{column_stats, ColumnStats};
pub use wrap::{wrap, WrapResult};
