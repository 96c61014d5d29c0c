//! Sufficient statistics and moment-matching starting values for the Beta fit.

use crate::error::{BetaFitError, Result};

/// Largest p-value used in the log-space accumulation. Entries equal to 1.0 are
/// replaced by this value so that `log(1 - p)` stays finite.
pub const P_VALUE_CEILING: f64 = 0.999_999_99;

/// Sufficient statistics of a permutation p-value sample.
///
/// The Beta log-likelihood depends on the sample only through `Σ log p`,
/// `Σ log(1 - p)` and the count, so these are accumulated once per fit and the
/// raw sample is never rescanned during the search. The caller's slice is left
/// untouched; the 1.0 clamp applies to the accumulation only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleStatistics {
    sum_log_p: f64,
    sum_log_one_minus_p: f64,
    count: usize,
}

impl SampleStatistics {
    /// Accumulates statistics from a p-value sample.
    ///
    /// Every entry must be finite and lie in `(0, 1]`; an entry of exactly 1.0
    /// is clamped to [`P_VALUE_CEILING`] before accumulation.
    pub fn from_pvalues(pvalues: &[f64]) -> Result<Self> {
        if pvalues.is_empty() {
            return Err(BetaFitError::EmptySample);
        }

        let mut sum_log_p = 0.0;
        let mut sum_log_one_minus_p = 0.0;
        for (index, &value) in pvalues.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(BetaFitError::invalid_pvalue(index, value));
            }
            let p = if value == 1.0 { P_VALUE_CEILING } else { value };
            sum_log_p += p.ln();
            sum_log_one_minus_p += (1.0 - p).ln();
        }

        Ok(Self {
            sum_log_p,
            sum_log_one_minus_p,
            count: pvalues.len(),
        })
    }

    /// Accumulated `Σ log p`.
    pub fn sum_log_p(&self) -> f64 {
        self.sum_log_p
    }

    /// Accumulated `Σ log(1 - p)`.
    pub fn sum_log_one_minus_p(&self) -> f64 {
        self.sum_log_one_minus_p
    }

    /// Number of p-values in the sample.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Moment-matching estimate of the Beta shape parameters.
///
/// Matches the sample mean and variance to the Beta mean `α/(α+β)` and
/// variance, yielding the customary starting point for the maximum-likelihood
/// search. The fit routine never calls this implicitly; callers decide how to
/// seed the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentEstimate {
    /// Moment-matched first shape parameter (α).
    pub shape1: f64,
    /// Moment-matched second shape parameter (β).
    pub shape2: f64,
}

impl MomentEstimate {
    /// Derives moment-matched shapes from a p-value sample.
    ///
    /// Fails with [`BetaFitError::DegenerateMoments`] when the sample mean sits
    /// on the boundary of the unit interval or the variance does not identify
    /// positive shapes.
    pub fn from_pvalues(pvalues: &[f64]) -> Result<Self> {
        if pvalues.is_empty() {
            return Err(BetaFitError::EmptySample);
        }

        let n = pvalues.len() as f64;
        let mean = pvalues.iter().sum::<f64>() / n;
        let variance = if pvalues.len() > 1 {
            pvalues.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };

        if mean <= 0.0 || mean >= 1.0 || variance <= 0.0 {
            return Err(BetaFitError::DegenerateMoments { mean, variance });
        }

        let shape1 = mean * (mean * (1.0 - mean) / variance - 1.0);
        let shape2 = shape1 * (1.0 / mean - 1.0);
        if shape1 <= 0.0 || shape2 <= 0.0 {
            return Err(BetaFitError::DegenerateMoments { mean, variance });
        }

        Ok(Self { shape1, shape2 })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn accumulates_sufficient_statistics() {
        let stats = SampleStatistics::from_pvalues(&[0.5, 0.25]).unwrap();
        assert_eq!(stats.count(), 2);
        assert_relative_eq!(stats.sum_log_p(), 0.5f64.ln() + 0.25f64.ln(), epsilon = 1e-15);
        assert_relative_eq!(
            stats.sum_log_one_minus_p(),
            0.5f64.ln() + 0.75f64.ln(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn clamps_unit_pvalues_without_mutating_input() {
        let pvalues = vec![0.5, 1.0];
        let stats = SampleStatistics::from_pvalues(&pvalues).unwrap();
        let clamped = SampleStatistics::from_pvalues(&[0.5, P_VALUE_CEILING]).unwrap();
        assert_eq!(stats, clamped);
        assert!(stats.sum_log_one_minus_p().is_finite());
        assert_eq!(pvalues[1], 1.0);
    }

    #[test]
    fn rejects_empty_and_out_of_range_samples() {
        assert!(matches!(
            SampleStatistics::from_pvalues(&[]),
            Err(BetaFitError::EmptySample)
        ));
        assert!(matches!(
            SampleStatistics::from_pvalues(&[0.5, 0.0]),
            Err(BetaFitError::InvalidPValue { index: 1, .. })
        ));
        assert!(matches!(
            SampleStatistics::from_pvalues(&[1.5]),
            Err(BetaFitError::InvalidPValue { index: 0, .. })
        ));
        assert!(matches!(
            SampleStatistics::from_pvalues(&[f64::NAN]),
            Err(BetaFitError::InvalidPValue { index: 0, .. })
        ));
    }

    #[test]
    fn moment_estimate_recovers_uniform_shapes() {
        // Evenly spread sample: mean 0.5, variance close to 1/12, shapes near (1, 1).
        let pvalues: Vec<f64> = (1..=999).map(|i| i as f64 / 1000.0).collect();
        let estimate = MomentEstimate::from_pvalues(&pvalues).unwrap();
        assert_relative_eq!(estimate.shape1, 1.0, epsilon = 0.05);
        assert_relative_eq!(estimate.shape2, 1.0, epsilon = 0.05);
    }

    #[test]
    fn moment_estimate_rejects_constant_samples() {
        assert!(matches!(
            MomentEstimate::from_pvalues(&[0.3, 0.3, 0.3]),
            Err(BetaFitError::DegenerateMoments { .. })
        ));
    }
}
