//! Maximum-likelihood Beta distribution fitting for permutation p-values.
//!
//! Large-scale association studies approximate the null distribution of their
//! test statistic with a modest number of permutations, then fit a Beta(α, β)
//! distribution to the resulting p-values so that a calibrated, continuous
//! significance measure can be computed without running an intractable number
//! of permutations. This crate provides that fitting step:
//!
//! - accumulate the sufficient statistics of a p-value sample
//!   (`statistics` module),
//! - evaluate the negative Beta log-likelihood with bounds gating
//!   (`likelihood` module),
//! - minimize it with a derivative-free Nelder–Mead search
//!   (`simplex` module), and
//! - drive the search with a fixed convergence and failure contract
//!   (`fit` module).
//!
//! The search is local and deterministic: it refines a caller-supplied
//! starting point (typically the moment-matching estimates) within fixed
//! parameter bounds and reports non-convergence as a plain status, never as a
//! panic. Each fit owns all of its state, so independent fits can run
//! concurrently on the caller's side.
//!
//! # Quick start
//!
//! ```
//! use betaperm::{fit, MomentEstimate};
//!
//! // Permutation p-values; here an evenly spread toy sample.
//! let pvalues: Vec<f64> = (1..=500).map(|i| i as f64 / 501.0).collect();
//!
//! // Seed the search with moment-matching estimates, then refine by MLE.
//! let start = MomentEstimate::from_pvalues(&pvalues).expect("usable moments");
//! let (mut shape1, mut shape2) = (start.shape1, start.shape2);
//! let converged = fit(&pvalues, &mut shape1, &mut shape2);
//!
//! assert!(converged);
//! println!("Fitted Beta({shape1}, {shape2})");
//! ```
//!
//! Generating the permutation sample and consuming the fitted shapes (for
//! example through the Beta CDF) are the surrounding pipeline's business; this
//! crate is the computational primitive in between.

pub mod error;
pub mod fit;
pub mod likelihood;
pub mod simplex;
pub mod statistics;

pub use error::{BetaFitError, Result};
pub use fit::{fit, fit_with_options, FitOptions, FitOutcome, FitStatus};
pub use likelihood::{neg_log_likelihood, Objective};
pub use statistics::{MomentEstimate, SampleStatistics};
