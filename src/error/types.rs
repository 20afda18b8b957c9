use thiserror::Error;

use crate::geometry::GeometryError;

/// Unified result type for the layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by layout, drag and host operations.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("rail extent {rail} leaves no room to lay out children")]
    InsufficientRail { rail: i32 },
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("invalid cast: {0}")]
    InvalidCast(String),
    #[error("grab border must be at least 2, got {0}")]
    InvalidBorder(i32),
    #[error("relayout requested while a drag session is live")]
    DragInProgress,
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    /// Failures a layout pass reports as `false` instead of propagating.
    pub fn is_layout_failure(&self) -> bool {
        matches!(
            self,
            LayoutError::InsufficientRail { .. }
                | LayoutError::IndexOutOfRange { .. }
                | LayoutError::InvalidOperation(_)
                | LayoutError::InvalidCast(_)
                | LayoutError::Geometry(_)
        )
    }
}
