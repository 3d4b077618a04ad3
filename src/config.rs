//! Estimator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PercolationError, Result};

/// Parameters for a [`ThresholdEstimator`](crate::ThresholdEstimator) run.
///
/// Serializes to and from JSON; omitted fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Side length of each trial grid.
    pub grid_size: i64,
    /// Number of independent trials.
    pub trials: i64,
    /// Base seed. `None` draws one from system entropy.
    pub seed: Option<u64>,
    /// Run trials on the rayon pool when the `parallel` feature is built.
    pub parallel: bool,
}

impl EstimatorConfig {
    /// Config for `trials` runs on a `grid_size`×`grid_size` grid, with the
    /// remaining fields at their defaults.
    pub fn new(grid_size: i64, trials: i64) -> Self {
        Self {
            grid_size,
            trials,
            ..Self::default()
        }
    }

    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PercolationError::InvalidConfig(e.to_string()))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.grid_size, self.trials).map(|_| ())
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            trials: 50,
            seed: None,
            parallel: true,
        }
    }
}

/// Checks estimator parameters and converts them to unsigned counts.
///
/// A zero-sized grid is only accepted with zero trials: an empty grid has
/// no site to open and never percolates.
pub(crate) fn validate_parameters(grid_size: i64, trials: i64) -> Result<(usize, usize)> {
    let invalid = |reason| PercolationError::invalid_parameters(grid_size, trials, reason);

    let n = usize::try_from(grid_size).map_err(|_| invalid("grid size must be >= 0"))?;
    let count = usize::try_from(trials).map_err(|_| invalid("trials must be >= 0"))?;
    if n == 0 && count > 0 {
        return Err(invalid("an empty grid never percolates"));
    }
    if n.checked_mul(n).and_then(|sq| sq.checked_add(2)).is_none() {
        return Err(invalid("grid size overflows the site index range"));
    }
    Ok((n, count))
}
