//! Descriptive statistics over threshold samples.
//!
//! Functions return `None` instead of a garbage value when the input is
//! too short or contains NaN/Inf, leaving the caller to decide what a
//! missing statistic means.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier-compensated summation, O(ε) error independent of n.
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Confidence interval**: normal approximation, `x̄ ± z·s/√n`.

/// Two-sided 95% critical value of the standard normal distribution,
/// rounded the way textbook threshold estimates quote it.
pub const Z_95: f64 = 1.96;

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::mean;
/// let v = [0.55, 0.60, 0.65];
/// assert!((mean(&v).unwrap() - 0.60).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Computes the sample variance (denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = WelfordAccumulator::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Normal-approximation confidence interval for a mean.
///
/// Returns `(mean − z·s/√n, mean + z·s/√n)`. NaN inputs propagate, and
/// `n == 0` yields NaN bounds.
///
/// # Examples
/// ```
/// use percolation::stats::{confidence_interval, Z_95};
/// let (lo, hi) = confidence_interval(0.59, 0.01, 100, Z_95);
/// assert!((lo - 0.58804).abs() < 1e-12);
/// assert!((hi - 0.59196).abs() < 1e-12);
/// ```
pub fn confidence_interval(mean: f64, std_dev: f64, n: usize, z: f64) -> (f64, f64) {
    let half_width = z * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

/// Neumaier's improved Kahan summation.
///
/// Keeps a running compensation term that recovers low-order bits lost
/// in each addition, including the case where the addend is larger in
/// magnitude than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Streaming mean/variance accumulator (Welford).
///
/// # Examples
/// ```
/// use percolation::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Returns the number of samples seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the running mean, or `None` if no samples have been added.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Returns the sample variance (n − 1 denominator), or `None` if fewer
    /// than 2 samples have been added.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Returns the sample standard deviation, or `None` if fewer than 2
    /// samples have been added.
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- mean ---

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
    }

    #[test]
    fn test_mean_single() {
        assert_eq!(mean(&[0.5]), Some(0.5));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_nan() {
        assert_eq!(mean(&[0.5, f64::NAN]), None);
    }

    // --- variance / std_dev ---

    #[test]
    fn test_variance_basic() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
    }

    #[test]
    fn test_variance_single_is_undefined() {
        assert_eq!(variance(&[0.59]), None);
        assert_eq!(std_dev(&[0.59]), None);
    }

    #[test]
    fn test_variance_constant() {
        assert!(variance(&[0.6; 50]).unwrap().abs() < 1e-15);
    }

    #[test]
    fn test_std_dev() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = 4.571428571428571_f64.sqrt();
        assert!((std_dev(&v).unwrap() - expected).abs() < 1e-10);
    }

    // --- confidence_interval ---

    #[test]
    fn test_confidence_interval_symmetric() {
        let (lo, hi) = confidence_interval(0.6, 0.02, 25, Z_95);
        assert!((lo - (0.6 - 1.96 * 0.02 / 5.0)).abs() < 1e-15);
        assert!((hi - (0.6 + 1.96 * 0.02 / 5.0)).abs() < 1e-15);
    }

    #[test]
    fn test_confidence_interval_nan_std_dev() {
        let (lo, hi) = confidence_interval(0.6, f64::NAN, 1, Z_95);
        assert!(lo.is_nan());
        assert!(hi.is_nan());
    }

    // --- kahan_sum ---

    #[test]
    fn test_kahan_sum_precision() {
        // Naive summation loses the 1.0.
        let result = kahan_sum(&[1e16, 1.0, -1e16]);
        assert!(
            (result - 1.0).abs() < 1e-10,
            "compensated sum should preserve the 1.0: got {result}"
        );
    }

    // --- WelfordAccumulator ---

    #[test]
    fn test_welford_empty() {
        let acc = WelfordAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.sample_variance(), None);
    }

    #[test]
    fn test_welford_large_offset() {
        // Thresholds cluster tightly; a naive E[X²] − E[X]² would cancel badly.
        let v: Vec<f64> = (0..10).map(|i| 1e9 + i as f64).collect();
        let var = variance(&v).unwrap();
        assert!((var - 55.0 / 6.0).abs() < 1e-6, "got {var}");
    }
}
