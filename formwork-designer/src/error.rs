//! Error types for the layout designer

use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised at the save boundary.
///
/// Placement and removal commands never error — conflicts are silent
/// no-ops. Only saving a layout can fail.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Column count outside the supported set
    #[error("invalid column count: {columns} (expected 2, 3, or 4)")]
    InvalidColumnCount { columns: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LayoutError::InvalidColumnCount { columns: 7 };
        assert_eq!(err.to_string(), "invalid column count: 7 (expected 2, 3, or 4)");
    }
}
