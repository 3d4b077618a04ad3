//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial opens uniformly random blocked sites on a fresh grid until it
//! percolates and records the open fraction at that moment. The sample of
//! per-trial fractions is then reduced to a mean, a sample standard
//! deviation, and a 95% normal-approximation confidence interval.
//!
//! Everything is computed eagerly at construction; the accessors only read
//! cached values.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use crate::config::{validate_parameters, EstimatorConfig};
use crate::error::{PercolationError, Result};
use crate::grid::PercolationGrid;
use crate::random::{create_rng, derive_seed, entropy_seed, UniformSource};
use crate::stats;

/// Runs one trial on an `n`×`n` grid and returns the open fraction at
/// which it first percolated.
///
/// Draws that land on an already-open site are discarded and redrawn.
///
/// # Errors
/// [`InvalidParameters`](crate::PercolationError::InvalidParameters) if
/// `n == 0`, since an empty grid never percolates.
///
/// # Examples
/// ```
/// use percolation::estimator::run_trial;
/// use percolation::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let threshold = run_trial(8, &mut rng)?;
/// assert!(threshold > 0.0 && threshold <= 1.0);
/// # Ok::<(), percolation::PercolationError>(())
/// ```
pub fn run_trial<R: UniformSource + ?Sized>(n: usize, rng: &mut R) -> Result<f64> {
    if n == 0 {
        return Err(PercolationError::invalid_parameters(
            0,
            1,
            "an empty grid never percolates",
        ));
    }
    let mut grid: PercolationGrid = PercolationGrid::from_size(n)?;
    let mut rejected: u64 = 0;

    loop {
        let r = rng.uniform(n);
        let c = rng.uniform(n);
        if grid.is_open_at(r, c) {
            rejected += 1;
            continue;
        }
        grid.open_at(r, c);
        if grid.percolates() {
            break;
        }
    }

    trace!(
        n,
        open_sites = grid.open_site_count(),
        rejected,
        "trial percolated"
    );
    Ok(grid.open_fraction())
}

/// Serializable snapshot of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub grid_size: usize,
    pub trials: usize,
    pub mean: f64,
    pub stddev: f64,
    pub confidence_lo: f64,
    pub confidence_hi: f64,
}

/// Percolation threshold estimate from repeated independent trials.
///
/// # Examples
/// ```
/// use percolation::ThresholdEstimator;
/// use percolation::random::create_rng;
///
/// let mut rng = create_rng(2024);
/// let est = ThresholdEstimator::with_rng(20, 30, &mut rng)?;
/// assert!(est.mean() > 0.0 && est.mean() < 1.0);
/// assert!(est.confidence_lo() <= est.mean() && est.mean() <= est.confidence_hi());
/// # Ok::<(), percolation::PercolationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ThresholdEstimator {
    grid_size: usize,
    thresholds: Vec<f64>,
    mean: f64,
    stddev: f64,
    confidence_lo: f64,
    confidence_hi: f64,
}

impl ThresholdEstimator {
    /// Runs `trials` trials on `n`×`n` grids, seeded from system entropy.
    ///
    /// # Errors
    /// [`InvalidParameters`](crate::PercolationError::InvalidParameters) if
    /// `n < 0`, `trials < 0`, or `n == 0` with at least one trial.
    pub fn new(n: i64, trials: i64) -> Result<Self> {
        Self::with_config(&EstimatorConfig::new(n, trials))
    }

    /// Runs the trials described by `config`.
    ///
    /// Trial `i` draws from a generator seeded with
    /// `derive_seed(base, i)`, so a fixed `config.seed` reproduces the same
    /// sample in sequential and parallel mode.
    #[instrument(skip_all, fields(n = config.grid_size, trials = config.trials))]
    pub fn with_config(config: &EstimatorConfig) -> Result<Self> {
        let (n, trials) = validate_parameters(config.grid_size, config.trials)?;
        let base = config.seed.unwrap_or_else(entropy_seed);
        debug!(base_seed = base, parallel = config.parallel, "starting trials");

        let thresholds = seeded_thresholds(n, trials, base, config.parallel)?;
        Ok(Self::from_thresholds(n, thresholds))
    }

    /// Runs the trials sequentially, drawing every site from `rng`.
    #[instrument(skip(rng))]
    pub fn with_rng<R: UniformSource + ?Sized>(n: i64, trials: i64, rng: &mut R) -> Result<Self> {
        let (n, trials) = validate_parameters(n, trials)?;
        let mut thresholds = Vec::with_capacity(trials);
        for trial in 0..trials {
            let threshold = run_trial(n, rng)?;
            debug!(trial, threshold, "trial complete");
            thresholds.push(threshold);
        }
        Ok(Self::from_thresholds(n, thresholds))
    }

    /// Aggregates an already collected sample.
    ///
    /// Mean, standard deviation, and bounds are NaN when the sample is too
    /// small to define them (no trials for the mean, fewer than two for
    /// the standard deviation).
    pub fn from_thresholds(grid_size: usize, thresholds: Vec<f64>) -> Self {
        let mean = stats::mean(&thresholds).unwrap_or(f64::NAN);
        let stddev = stats::std_dev(&thresholds).unwrap_or(f64::NAN);
        let (confidence_lo, confidence_hi) =
            stats::confidence_interval(mean, stddev, thresholds.len(), stats::Z_95);

        info!(
            grid_size,
            trials = thresholds.len(),
            mean,
            stddev,
            confidence_lo,
            confidence_hi,
            "threshold estimate ready"
        );

        Self {
            grid_size,
            thresholds,
            mean,
            stddev,
            confidence_lo,
            confidence_hi,
        }
    }

    /// Sample mean of the per-trial thresholds.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation; NaN with a single trial.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Lower bound of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.confidence_lo
    }

    /// Upper bound of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.confidence_hi
    }

    /// Per-trial thresholds in trial order.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of completed trials, i.e. the sample size.
    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// Side length of the grids the sample was drawn on.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Serializable snapshot of the cached scalars.
    pub fn summary(&self) -> EstimateSummary {
        EstimateSummary {
            grid_size: self.grid_size,
            trials: self.trials(),
            mean: self.mean,
            stddev: self.stddev,
            confidence_lo: self.confidence_lo,
            confidence_hi: self.confidence_hi,
        }
    }
}

fn seeded_thresholds(n: usize, trials: usize, base: u64, parallel: bool) -> Result<Vec<f64>> {
    // Rayon workers do not inherit the caller's span; carry it in.
    let span = tracing::Span::current();
    let trial = move |index: usize| -> Result<f64> {
        let _entered = span.enter();
        let mut rng = create_rng(derive_seed(base, index as u64));
        let threshold = run_trial(n, &mut rng)?;
        debug!(trial = index, threshold, "trial complete");
        Ok(threshold)
    };

    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            return (0..trials).into_par_iter().map(&trial).collect();
        }
        #[cfg(not(feature = "parallel"))]
        tracing::warn!("built without the `parallel` feature, running trials sequentially");
    }

    (0..trials).map(&trial).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of draws, then panics if asked for more.
    struct Scripted(std::vec::IntoIter<usize>);

    impl UniformSource for Scripted {
        fn uniform(&mut self, bound: usize) -> usize {
            let v = self.0.next().expect("script exhausted");
            assert!(v < bound);
            v
        }
    }

    fn seeded(n: i64, trials: i64, seed: u64, parallel: bool) -> ThresholdEstimator {
        ThresholdEstimator::with_config(&EstimatorConfig {
            grid_size: n,
            trials,
            seed: Some(seed),
            parallel,
        })
        .unwrap()
    }

    #[test]
    fn test_negative_parameters() {
        assert!(matches!(
            ThresholdEstimator::new(5, -1),
            Err(PercolationError::InvalidParameters { .. })
        ));
        assert!(matches!(
            ThresholdEstimator::new(-1, 5),
            Err(PercolationError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_empty_grid_with_trials_rejected() {
        assert!(ThresholdEstimator::new(0, 3).is_err());
        let mut rng = create_rng(0);
        assert!(run_trial(0, &mut rng).is_err());
    }

    #[test]
    fn test_single_site_threshold_is_one() {
        let est = seeded(1, 4, 9, false);
        assert_eq!(est.thresholds(), &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(est.mean(), 1.0);
        assert_eq!(est.stddev(), 0.0);
        assert_eq!(est.confidence_lo(), 1.0);
    }

    #[test]
    fn test_scripted_trial_skips_open_sites() {
        // 2x2: open (0,0), redraw (0,0), open (1,1), then (1,0) percolates.
        let mut rng = Scripted(vec![0, 0, 0, 0, 1, 1, 1, 0].into_iter());
        let threshold = run_trial(2, &mut rng).unwrap();
        assert!((threshold - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_single_trial_stddev_is_nan() {
        let est = seeded(5, 1, 3, false);
        assert_eq!(est.trials(), 1);
        assert_eq!(est.mean(), est.thresholds()[0]);
        assert!(est.stddev().is_nan());
        assert!(est.confidence_lo().is_nan());
        assert!(est.confidence_hi().is_nan());
    }

    #[test]
    fn test_zero_trials() {
        let est = seeded(5, 0, 3, false);
        assert_eq!(est.trials(), 0);
        assert!(est.mean().is_nan());
        assert!(est.stddev().is_nan());
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let a = seeded(12, 20, 77, false);
        let b = seeded(12, 20, 77, false);
        assert_eq!(a.thresholds(), b.thresholds());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let seq = seeded(12, 40, 5, false);
        let par = seeded(12, 40, 5, true);
        assert_eq!(seq.thresholds(), par.thresholds());
        assert_eq!(seq.mean(), par.mean());
    }

    #[test]
    fn test_confidence_interval_formula() {
        let est = ThresholdEstimator::from_thresholds(10, vec![0.5, 0.6, 0.7, 0.6]);
        let half = 1.96 * est.stddev() / 2.0;
        assert!((est.mean() - 0.6).abs() < 1e-12);
        assert!((est.confidence_lo() - (0.6 - half)).abs() < 1e-12);
        assert!((est.confidence_hi() - (0.6 + half)).abs() < 1e-12);
    }

    #[test]
    fn test_summary_mirrors_accessors() {
        let est = seeded(8, 10, 1, false);
        let summary = est.summary();
        assert_eq!(summary.grid_size, 8);
        assert_eq!(summary.trials, 10);
        assert_eq!(summary.mean, est.mean());
        assert_eq!(summary.confidence_hi, est.confidence_hi());
    }

    #[test]
    fn test_threshold_near_known_value() {
        // Site percolation threshold on the square lattice is ~0.5927.
        let est = seeded(30, 60, 2718, false);
        assert!(
            (est.mean() - 0.5927).abs() < 0.05,
            "mean {} too far from 0.5927",
            est.mean()
        );
    }
}
