//! Percolation error types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PercolationError>;

/// Errors raised by grid construction, site access, and estimation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercolationError {
    /// Grid dimension is negative.
    #[error("invalid grid size {size}: must be >= 0")]
    InvalidSize { size: i64 },

    /// Estimator parameters are unusable.
    #[error("invalid estimator parameters (n = {grid_size}, trials = {trials}): {reason}")]
    InvalidParameters {
        grid_size: i64,
        trials: i64,
        reason: &'static str,
    },

    /// Row or column outside `[1, size]`.
    #[error("site ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// Configuration document could not be parsed.
    #[error("invalid estimator config: {0}")]
    InvalidConfig(String),
}

impl PercolationError {
    /// Create an InvalidParameters error.
    pub fn invalid_parameters(grid_size: i64, trials: i64, reason: &'static str) -> Self {
        Self::InvalidParameters {
            grid_size,
            trials,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_out_of_bounds() {
        let err = PercolationError::OutOfBounds {
            row: 0,
            col: 3,
            size: 4,
        };
        assert_eq!(err.to_string(), "site (0, 3) is outside the 4x4 grid");
    }

    #[test]
    fn test_display_invalid_parameters() {
        let err = PercolationError::invalid_parameters(5, -1, "trials must be >= 0");
        assert_eq!(
            err.to_string(),
            "invalid estimator parameters (n = 5, trials = -1): trials must be >= 0"
        );
    }
}
