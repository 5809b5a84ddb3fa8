//! Layout configuration.
//!
//! Configuration is fixed when a [`FlowLayout`](crate::FlowLayout) is built.
//! It can be written by hand or loaded from TOML:
//!
//! ```toml
//! stacking_axis = "vertical"
//! fill_mode = "column_wise"
//! horizontal_spacing = 20.0
//! vertical_spacing = 3.0
//!
//! [margins]
//! left = 4.0
//! top = 4.0
//! right = 4.0
//! bottom = 4.0
//! ```

use crate::error::{LayoutError, Result};
use flowpack_core::Margins;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spacing between columns when none is configured.
pub const DEFAULT_HORIZONTAL_SPACING: f32 = 20.0;

/// Spacing between stacked items when none is configured.
pub const DEFAULT_VERTICAL_SPACING: f32 = 3.0;

/// Number of widths remembered by the column-wise cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 5;

/// Axis along which the layout grows when content does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackingAxis {
    /// Grow downwards; width is given, height is computed
    #[default]
    Vertical,
    /// Grow sideways (not implemented)
    Horizontal,
}

impl FromStr for StackingAxis {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(LayoutError::Parse(format!("unknown stacking axis '{other}'"))),
        }
    }
}

/// Placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Pack items into balanced columns, top to bottom then left to right
    #[default]
    ColumnWise,
    /// Flow items left to right, wrapping onto new rows
    RowWise,
}

impl FromStr for FillMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "column_wise" | "column-wise" | "columns" => Ok(Self::ColumnWise),
            "row_wise" | "row-wise" | "rows" => Ok(Self::RowWise),
            other => Err(LayoutError::UnsupportedFillMode(other.to_string())),
        }
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnWise => write!(f, "column_wise"),
            Self::RowWise => write!(f, "row_wise"),
        }
    }
}

/// Configuration for a flow layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Expansion axis
    pub stacking_axis: StackingAxis,
    /// Placement strategy
    pub fill_mode: FillMode,
    /// Gap between columns (row-wise: between items on a line); `None` uses the default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_spacing: Option<f32>,
    /// Gap between stacked items (row-wise: between lines); `None` uses the default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_spacing: Option<f32>,
    /// Number of widths the column-wise cache remembers
    pub cache_capacity: usize,
    /// Content margins
    pub margins: Margins,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            stacking_axis: StackingAxis::Vertical,
            fill_mode: FillMode::ColumnWise,
            horizontal_spacing: None,
            vertical_spacing: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            margins: Margins::ZERO,
        }
    }
}

impl LayoutConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stacking axis.
    #[must_use]
    pub const fn with_stacking_axis(mut self, axis: StackingAxis) -> Self {
        self.stacking_axis = axis;
        self
    }

    /// Set the fill mode.
    #[must_use]
    pub const fn with_fill_mode(mut self, mode: FillMode) -> Self {
        self.fill_mode = mode;
        self
    }

    /// Set the content margins.
    #[must_use]
    pub const fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set both spacings.
    #[must_use]
    pub const fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = Some(horizontal);
        self.vertical_spacing = Some(vertical);
        self
    }

    /// Set the cache capacity.
    #[must_use]
    pub const fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Horizontal spacing with the default applied.
    #[must_use]
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing.unwrap_or(DEFAULT_HORIZONTAL_SPACING)
    }

    /// Vertical spacing with the default applied.
    #[must_use]
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing.unwrap_or(DEFAULT_VERTICAL_SPACING)
    }

    /// Check that the configuration can drive a layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnsupportedAxis`] for anything but vertical
    /// stacking and [`LayoutError::InvalidConfig`] for negative margins or
    /// spacing and a zero cache capacity.
    pub fn validate(&self) -> Result<()> {
        if self.stacking_axis != StackingAxis::Vertical {
            return Err(LayoutError::UnsupportedAxis(self.stacking_axis));
        }
        if !self.margins.is_valid() {
            return Err(LayoutError::InvalidConfig(format!(
                "margins must be non-negative, got {:?}",
                self.margins
            )));
        }
        let h = self.horizontal_spacing();
        if !(h >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "horizontal spacing must be non-negative, got {h}"
            )));
        }
        let v = self.vertical_spacing();
        if !(v >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "vertical spacing must be non-negative, got {v}"
            )));
        }
        if self.cache_capacity == 0 {
            return Err(LayoutError::InvalidConfig(
                "cache capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is invalid or names an unknown mode.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| LayoutError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LayoutError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }
}
