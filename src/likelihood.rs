//! Negative Beta log-likelihood with bounds gating and infeasibility signaling.

use nalgebra::Vector2;
use statrs::function::beta::ln_beta;

use crate::statistics::SampleStatistics;

/// Lower bound of the admissible range for the first shape parameter (α).
pub const SHAPE1_MIN: f64 = 0.1;
/// Upper bound of the admissible range for the first shape parameter (α).
pub const SHAPE1_MAX: f64 = 10.0;
/// Lower bound of the admissible range for the second shape parameter (β).
pub const SHAPE2_MIN: f64 = 1.0;
/// Upper bound of the admissible range for the second shape parameter (β).
pub const SHAPE2_MAX: f64 = 1_000_000.0;

/// Sentinel cost handed to the simplex when a candidate is unusable.
pub const INFEASIBLE_COST: f64 = f64::MAX;

/// Outcome of one likelihood evaluation.
///
/// Infeasibility (out-of-bounds candidates, non-finite log-Beta) is a tagged
/// state rather than a magic number; it collapses to [`INFEASIBLE_COST`] only
/// at the boundary with the plain-valued objective the simplex consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Objective {
    /// The candidate is admissible and produced this negative log-likelihood.
    Feasible(f64),
    /// The candidate is out of bounds or numerically invalid.
    Infeasible,
}

impl Objective {
    /// Collapses to the scalar cost the direct search minimizes.
    pub fn cost(self) -> f64 {
        match self {
            Self::Feasible(value) => value,
            Self::Infeasible => INFEASIBLE_COST,
        }
    }

    /// Whether the evaluation produced a usable likelihood value.
    pub fn is_feasible(self) -> bool {
        matches!(self, Self::Feasible(_))
    }
}

/// Returns whether `(shape1, shape2)` lies inside the admissible rectangle.
/// Both ends of each range are inclusive.
pub fn in_bounds(params: &Vector2<f64>) -> bool {
    let (shape1, shape2) = (params[0], params[1]);
    (SHAPE1_MIN..=SHAPE1_MAX).contains(&shape1) && (SHAPE2_MIN..=SHAPE2_MAX).contains(&shape2)
}

/// Evaluates the negative Beta log-likelihood at a candidate parameter vector.
///
/// Candidates outside the admissible rectangle are reported as
/// [`Objective::Infeasible`] without touching the likelihood formula. The
/// log-Beta term is computed in log-space via `statrs`' log-gamma based
/// `ln_beta`; the bounds gate guarantees strictly positive arguments, so the
/// special function cannot be driven into its panicking domain. A non-finite
/// log-Beta is reported as infeasible as well.
pub fn neg_log_likelihood(params: &Vector2<f64>, stats: &SampleStatistics) -> Objective {
    if !in_bounds(params) {
        return Objective::Infeasible;
    }

    let (shape1, shape2) = (params[0], params[1]);
    let log_beta = ln_beta(shape1, shape2);
    if !log_beta.is_finite() {
        return Objective::Infeasible;
    }

    let n = stats.count() as f64;
    let log_likelihood = (shape1 - 1.0) * stats.sum_log_p()
        + (shape2 - 1.0) * stats.sum_log_one_minus_p()
        - n * log_beta;
    Objective::Feasible(-log_likelihood)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn uniform_stats() -> SampleStatistics {
        SampleStatistics::from_pvalues(&[0.2, 0.4, 0.6, 0.8]).unwrap()
    }

    #[test]
    fn out_of_bounds_candidates_are_infeasible() {
        let stats = uniform_stats();
        for params in [
            Vector2::new(0.09, 5.0),
            Vector2::new(10.1, 5.0),
            Vector2::new(2.0, 0.99),
            Vector2::new(2.0, SHAPE2_MAX * (1.0 + 1e-9)),
        ] {
            assert_eq!(neg_log_likelihood(&params, &stats), Objective::Infeasible);
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let stats = uniform_stats();
        for params in [
            Vector2::new(SHAPE1_MIN, SHAPE2_MIN),
            Vector2::new(SHAPE1_MAX, SHAPE2_MAX),
            Vector2::new(2.0, SHAPE2_MAX),
        ] {
            assert!(neg_log_likelihood(&params, &stats).is_feasible());
        }
    }

    #[test]
    fn matches_direct_formula_for_interior_point() {
        let stats = uniform_stats();
        let params = Vector2::new(2.0, 5.0);
        // ln B(2, 5) = ln(Γ(2)Γ(5)/Γ(7)) = ln(1 * 24 / 720) = ln(1/30).
        let log_beta = (1.0f64 / 30.0).ln();
        let expected = -((2.0 - 1.0) * stats.sum_log_p()
            + (5.0 - 1.0) * stats.sum_log_one_minus_p()
            - 4.0 * log_beta);
        match neg_log_likelihood(&params, &stats) {
            Objective::Feasible(value) => assert_relative_eq!(value, expected, epsilon = 1e-10),
            Objective::Infeasible => panic!("interior point must be feasible"),
        }
    }

    #[test]
    fn infeasible_collapses_to_sentinel_cost() {
        assert_eq!(Objective::Infeasible.cost(), INFEASIBLE_COST);
        assert_eq!(Objective::Feasible(1.5).cost(), 1.5);
    }
}
