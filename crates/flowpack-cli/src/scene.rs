//! Scene files: a layout configuration plus the items to arrange.
//!
//! ```toml
//! [layout]
//! fill_mode = "column_wise"
//! horizontal_spacing = 20.0
//!
//! [[items]]
//! label = "search"
//! preferred = { width = 100.0, height = 20.0 }
//!
//! [[items]]
//! preferred = { width = 60.0, height = 40.0 }
//! minimum = { width = 30.0, height = 40.0 }
//! ```

use flowpack_core::{Block, Rect};
use flowpack_layout::{FlowLayout, LayoutConfig, LayoutError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Layout or configuration failure.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Scene file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Scene file is not valid TOML for a scene.
    #[error("invalid scene: {0}")]
    Scene(#[from] toml::de::Error),

    /// JSON report could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A scene with nothing to lay out.
    #[error("scene has no items")]
    EmptyScene,
}

/// A parsed scene file.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Scene {
    /// Layout configuration
    #[serde(default)]
    pub(crate) layout: LayoutConfig,
    /// Items in layout order
    #[serde(default)]
    pub(crate) items: Vec<Block>,
}

impl Scene {
    /// Parse a scene from TOML text.
    pub(crate) fn from_toml(text: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a scene file.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Build a layout holding the scene's items.
    pub(crate) fn into_layout(self) -> Result<FlowLayout<Block>, CliError> {
        let mut layout = FlowLayout::new(self.layout)?;
        for item in self.items {
            layout.add_item(item);
        }
        Ok(layout)
    }
}

/// Geometry of one item in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ItemReport {
    /// Position in the scene
    pub(crate) index: usize,
    /// Label from the scene, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) label: Option<String>,
    /// Assigned rectangle
    pub(crate) rect: Rect,
}

/// Result of laying out a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct LayoutReport {
    /// Target rectangle
    pub(crate) area: Rect,
    /// Required height
    pub(crate) height: f32,
    /// Number of columns (column-wise mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) columns: Option<usize>,
    /// Per-item geometry
    pub(crate) items: Vec<ItemReport>,
}

/// Lay out every item of `layout` in `area` and collect the result.
pub(crate) fn run_layout(layout: &mut FlowLayout<Block>, area: Rect) -> LayoutReport {
    let height = layout.layout(area);
    let columns = layout.partition(area.width).map(|p| p.column_count());
    let items = layout
        .items()
        .iter()
        .enumerate()
        .map(|(index, block)| ItemReport {
            index,
            label: block.label.clone(),
            rect: block.geometry().unwrap_or_default(),
        })
        .collect();

    LayoutReport {
        area,
        height,
        columns,
        items,
    }
}
