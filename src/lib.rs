//! # percolation
//!
//! Site percolation on n×n grids and Monte Carlo estimation of the
//! percolation threshold.
//!
//! ## Modules
//!
//! - [`grid`] — the grid model: open sites, fullness, percolation
//! - [`estimator`] — repeated random trials reduced to mean, standard
//!   deviation, and a 95% confidence interval
//! - [`collections`] — disjoint-set structures behind grid connectivity
//! - [`stats`] — descriptive statistics over threshold samples
//! - [`random`] — seeded generators and the uniform-draw capability
//! - [`config`] — estimator run configuration
//!
//! ## Example
//!
//! ```
//! use percolation::{EstimatorConfig, ThresholdEstimator};
//!
//! let config = EstimatorConfig { seed: Some(42), ..EstimatorConfig::new(16, 40) };
//! let est = ThresholdEstimator::with_config(&config)?;
//! assert!(est.confidence_lo() <= est.mean() && est.mean() <= est.confidence_hi());
//! # Ok::<(), percolation::PercolationError>(())
//! ```

pub mod collections;
pub mod config;
pub mod error;
pub mod estimator;
pub mod grid;
pub mod random;
pub mod stats;

pub use config::EstimatorConfig;
pub use error::{PercolationError, Result};
pub use estimator::{EstimateSummary, ThresholdEstimator};
pub use grid::{PercolationGrid, Site, SiteState};
