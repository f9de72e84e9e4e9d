use thiserror::Error;

/// Errors constructing column-aligned frames
#[derive(Debug, Error)]
pub enum FrameError {
    /// Column length differs from the frame's row count
    #[error("Column '{column}' has {actual} rows, frame expects {expected}")]
    LengthMismatch {
        /// Name of the offending column
        column: String,
        /// Row count of the frame
        expected: usize,
        /// Row count of the column
        actual: usize,
    },
}
