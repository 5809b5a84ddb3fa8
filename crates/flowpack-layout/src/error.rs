//! Error types for flowpack-layout.

use crate::config::StackingAxis;
use thiserror::Error;

/// Errors reported by the layout engine and its configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Stacking axis the engine cannot expand along.
    #[error("stacking axis {0:?} is not supported (only vertical)")]
    UnsupportedAxis(StackingAxis),

    /// Fill mode name that matches no known mode.
    #[error("fill mode '{0}' is not supported")]
    UnsupportedFillMode(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Item index past the end of the sequence.
    #[error("no item at index {index} (count {count})")]
    NotFound {
        /// Requested index
        index: usize,
        /// Item count at the time of the call
        count: usize,
    },
}

impl LayoutError {
    /// True for errors caused by configuration rather than runtime state.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAxis(_)
                | Self::UnsupportedFillMode(_)
                | Self::InvalidConfig(_)
                | Self::Parse(_)
        )
    }
}

/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
