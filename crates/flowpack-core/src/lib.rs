//! Core types for the flowpack layout engine.
//!
//! This crate provides the types shared between a host container and the engine:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Margins`]
//! - The item contract: [`LayoutItem`], with [`Block`] as a plain implementation

mod geometry;
mod item;

pub use geometry::{Margins, Point, Rect, Size};
pub use item::{Block, LayoutItem};
