//! Maximum-likelihood fit of Beta shape parameters to a permutation p-value sample.

use log::{debug, trace};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{BetaFitError, Result};
use crate::likelihood::neg_log_likelihood;
use crate::simplex::{Simplex, StepOutcome};
use crate::statistics::SampleStatistics;

/// Configuration for the simplex search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FitOptions {
    /// Simplex-size threshold below which the search is declared converged.
    pub size_tolerance: f64,
    /// Maximum number of simplex iterations before aborting.
    pub max_iterations: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            size_tolerance: 0.01,
            max_iterations: 1_000,
        }
    }
}

impl FitOptions {
    /// Overrides the convergence tolerance while keeping other defaults.
    pub fn with_size_tolerance(mut self, size_tolerance: f64) -> Self {
        self.size_tolerance = size_tolerance;
        self
    }

    /// Overrides the iteration cap while keeping other defaults.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Terminal state of one fit. Only [`Converged`](FitStatus::Converged) counts
/// as success; the other states all surface as a non-converged result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitStatus {
    /// The simplex size dropped below the tolerance.
    Converged,
    /// The iteration cap was reached before the tolerance was met.
    IterationLimit,
    /// The best vertex carried the infeasibility sentinel: the search started
    /// in, or wandered into, a region where no improvement is possible.
    InfeasibleRegion,
    /// The simplex degenerated and the search step could not proceed.
    Stalled,
}

/// Result of a fit: the best shapes found plus termination diagnostics.
///
/// The shapes are reported for every terminal status; a non-converged caller
/// typically falls back to its moment-matching estimates instead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FitOutcome {
    /// Fitted first shape parameter (α).
    pub shape1: f64,
    /// Fitted second shape parameter (β).
    pub shape2: f64,
    /// How the search terminated.
    pub status: FitStatus,
    /// Number of simplex iterations performed.
    pub iterations: usize,
    /// Simplex size at termination.
    pub simplex_size: f64,
}

impl FitOutcome {
    /// Whether the search met the convergence tolerance.
    pub fn converged(&self) -> bool {
        self.status == FitStatus::Converged
    }
}

/// Fits Beta shape parameters by maximum likelihood, reporting convergence as
/// a plain boolean.
///
/// `shape1` and `shape2` carry the caller's starting values (typically the
/// [`MomentEstimate`](crate::MomentEstimate) shapes) and are overwritten with
/// the best values found, whether or not the search converged. Every failure
/// mode is absorbed into the `false` return: non-convergence, an infeasible
/// starting region, and rejected input (in which case the shapes are left
/// untouched). This routine never panics on any sample.
pub fn fit(pvalues: &[f64], shape1: &mut f64, shape2: &mut f64) -> bool {
    match fit_with_options(pvalues, (*shape1, *shape2), &FitOptions::default()) {
        Ok(outcome) => {
            *shape1 = outcome.shape1;
            *shape2 = outcome.shape2;
            outcome.converged()
        }
        Err(error) => {
            debug!("beta fit rejected its input: {error}");
            false
        }
    }
}

/// Fits Beta shape parameters with explicit options, returning the full
/// outcome with termination diagnostics.
///
/// The search is deterministic: the same sample, starting point and options
/// always produce bit-identical outcomes. Errors are limited to input
/// validation; once the search starts, every termination is reported through
/// [`FitStatus`].
pub fn fit_with_options(
    pvalues: &[f64],
    start: (f64, f64),
    options: &FitOptions,
) -> Result<FitOutcome> {
    let (shape1, shape2) = start;
    if !shape1.is_finite() || shape1 <= 0.0 {
        return Err(BetaFitError::invalid_initial_shape("shape1", shape1));
    }
    if !shape2.is_finite() || shape2 <= 0.0 {
        return Err(BetaFitError::invalid_initial_shape("shape2", shape2));
    }

    let stats = SampleStatistics::from_pvalues(pvalues)?;
    let mut objective = |params: &Vector2<f64>| neg_log_likelihood(params, &stats).cost();

    // Seed the simplex at the starting point with steps of a tenth of each
    // coordinate, matching the scale of the caller's guess.
    let start = Vector2::new(shape1, shape2);
    let steps = start / 10.0;
    let mut simplex = Simplex::initialize(&mut objective, start, steps);

    let mut status = FitStatus::IterationLimit;
    let mut iterations = 0;
    while iterations < options.max_iterations {
        iterations += 1;
        let outcome = simplex.step(&mut objective);

        let (best, best_value) = simplex.best();
        if !neg_log_likelihood(&best, &stats).is_feasible() {
            status = FitStatus::InfeasibleRegion;
            break;
        }
        if outcome == StepOutcome::Stalled {
            status = FitStatus::Stalled;
            break;
        }

        let size = simplex.size();
        trace!("iteration {iterations}: best value {best_value}, simplex size {size}");
        if size < options.size_tolerance {
            status = FitStatus::Converged;
            break;
        }
    }

    let (best, best_value) = simplex.best();
    let outcome = FitOutcome {
        shape1: best[0],
        shape2: best[1],
        status,
        iterations,
        simplex_size: simplex.size(),
    };
    debug!(
        "beta fit terminated with {:?} after {} iterations: shape1 {}, shape2 {}, nll {}",
        outcome.status, outcome.iterations, outcome.shape1, outcome.shape2, best_value
    );
    Ok(outcome)
}
