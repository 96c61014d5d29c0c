use thiserror::Error;

/// Unified error type for `betaperm` operations.
#[derive(Debug, Error)]
pub enum BetaFitError {
    /// Raised when a p-value sample contains no entries.
    #[error("the p-value sample must contain at least one entry")]
    EmptySample,

    /// Raised when a p-value is non-finite or falls outside `(0, 1]`.
    #[error("p-value at index {index} must lie in (0, 1], found {value}")]
    InvalidPValue { index: usize, value: f64 },

    /// Raised when an initial shape guess is non-finite or non-positive.
    #[error("initial {name} must be finite and positive, found {value}")]
    InvalidInitialShape { name: &'static str, value: f64 },

    /// Raised when the sample is too degenerate for moment matching
    /// (zero variance or a mean on the boundary of the unit interval).
    #[error("moment matching failed: sample mean {mean} and variance {variance} do not identify positive shapes")]
    DegenerateMoments { mean: f64, variance: f64 },
}

impl BetaFitError {
    /// Helper to format an [`InvalidPValue`](BetaFitError::InvalidPValue) error.
    pub fn invalid_pvalue(index: usize, value: f64) -> Self {
        Self::InvalidPValue { index, value }
    }

    /// Helper to raise when a caller-supplied starting shape is unusable.
    pub fn invalid_initial_shape(name: &'static str, value: f64) -> Self {
        Self::InvalidInitialShape { name, value }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, BetaFitError>;
