//! The item contract between a host container and the layout engine.
//!
//! A host hands the engine items that can report their sizes and accept the
//! geometry the engine assigns. The engine never inspects anything else.
//!
//! # Examples
//!
//! ```
//! use flowpack_core::{Block, LayoutItem, Rect, Size};
//!
//! let mut block = Block::new(Size::new(100.0, 20.0));
//! assert_eq!(block.preferred_size(), Size::new(100.0, 20.0));
//!
//! block.set_geometry(Rect::new(5.0, 5.0, 100.0, 20.0));
//! assert_eq!(block.geometry(), Some(Rect::new(5.0, 5.0, 100.0, 20.0)));
//! ```

use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// An item that can be arranged by the layout engine.
///
/// Sizes are queried on demand and are expected to be non-negative. A host
/// may change what an item reports, but must invalidate the layout when it
/// does so.
pub trait LayoutItem {
    /// Intrinsic desired size.
    fn preferred_size(&self) -> Size;

    /// Smallest size the item can still render at.
    fn minimum_size(&self) -> Size;

    /// Receive the rectangle assigned by a layout pass.
    fn set_geometry(&mut self, rect: Rect);
}

impl<T: LayoutItem + ?Sized> LayoutItem for Box<T> {
    fn preferred_size(&self) -> Size {
        (**self).preferred_size()
    }

    fn minimum_size(&self) -> Size {
        (**self).minimum_size()
    }

    fn set_geometry(&mut self, rect: Rect) {
        (**self).set_geometry(rect);
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for &mut T {
    fn preferred_size(&self) -> Size {
        (**self).preferred_size()
    }

    fn minimum_size(&self) -> Size {
        (**self).minimum_size()
    }

    fn set_geometry(&mut self, rect: Rect) {
        (**self).set_geometry(rect);
    }
}

/// A fixed-size item that records the geometry it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Optional label, carried through for reporting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Preferred size
    pub preferred: Size,
    /// Minimum size (defaults to the preferred size)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Size>,
    /// Geometry from the last layout pass
    #[serde(skip)]
    geometry: Option<Rect>,
}

impl Block {
    /// Create a block whose minimum size equals its preferred size.
    #[must_use]
    pub const fn new(preferred: Size) -> Self {
        Self {
            label: None,
            preferred,
            minimum: None,
            geometry: None,
        }
    }

    /// Set a separate minimum size.
    #[must_use]
    pub const fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Geometry assigned by the most recent layout pass, if any.
    #[must_use]
    pub const fn geometry(&self) -> Option<Rect> {
        self.geometry
    }
}

impl LayoutItem for Block {
    fn preferred_size(&self) -> Size {
        self.preferred
    }

    fn minimum_size(&self) -> Size {
        self.minimum.unwrap_or(self.preferred)
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.geometry = Some(rect);
    }
}
