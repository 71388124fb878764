//! Error types for the Artificial Bee Colony optimizer.
//!
//! Configuration and bounds problems are reported when the optimizer is
//! built; objective failures and degenerate selection are reported by
//! [`ArtificialBeeColony::optimize`](crate::ArtificialBeeColony::optimize)
//! and abort the run.

use thiserror::Error;

/// Errors that can occur while configuring or running the bee colony.
#[derive(Debug, Error)]
pub enum ABCError {
    /// Colony size is zero or odd.
    #[error("colony size ({colony_size}) must be an even number >= 2")]
    InvalidColonySize {
        /// The invalid colony size
        colony_size: usize,
    },

    /// Iteration budget is zero.
    #[error("iteration budget must be >= 1, got {maxiter}")]
    InvalidIterationBudget {
        /// The invalid iteration budget
        maxiter: usize,
    },

    /// Perturbation coefficient range is empty or not finite.
    #[error("invalid perturbation range: [{min}, {max}]")]
    InvalidPerturbation {
        /// Lower end of the coefficient range
        min: f64,
        /// Upper end of the coefficient range
        max: f64,
    },

    /// The objective model declares zero decision variables.
    #[error("objective dimension must be >= 1")]
    ZeroDimension,

    /// Number of bound pairs differs from the objective dimension.
    #[error("bounds mismatch: dimension is {expected}, got {got} bound pairs")]
    BoundsMismatch {
        /// Dimension declared by the objective
        expected: usize,
        /// Number of bound pairs provided
        got: usize,
    },

    /// A lower bound exceeds its upper bound, or a bound is not finite.
    #[error("invalid bounds at index {index}: lower ({lower}) > upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// A position produced by the objective model has the wrong length.
    #[error("position dimension mismatch: expected {expected}, got {got}")]
    PositionDimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual length of the position
        got: usize,
    },

    /// The objective model failed to sample or evaluate a position.
    #[error("objective failure: {0}")]
    Objective(String),

    /// Selection probabilities cannot produce a non-empty set of food sources.
    #[error("degenerate selection probabilities (fitness sum = {sum})")]
    DegenerateSelection {
        /// Sum of the fitness values of the employed sources
        sum: f64,
    },

    /// The best-source filter stayed empty for the maximum number of rounds.
    #[error("no food source selected after {rounds} rounds")]
    SelectionExhausted {
        /// Number of redraw rounds performed
        rounds: usize,
    },
}

/// A specialized `Result` type for bee colony operations.
pub type Result<T> = std::result::Result<T, ABCError>;

impl ABCError {
    /// Builds an [`ABCError::Objective`] from any message.
    pub fn objective(message: impl Into<String>) -> Self {
        ABCError::Objective(message.into())
    }

    /// Returns `true` if this is a bounds-related error.
    pub fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            ABCError::BoundsMismatch { .. } | ABCError::InvalidBounds { .. }
        )
    }

    /// Returns `true` if the error was raised while validating the configuration
    /// or the objective model, i.e. before any iteration ran.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ABCError::InvalidColonySize { .. }
                | ABCError::InvalidIterationBudget { .. }
                | ABCError::InvalidPerturbation { .. }
                | ABCError::ZeroDimension
        ) || self.is_bounds_error()
    }

    /// Returns `true` if the objective model misbehaved during a run.
    pub fn is_objective_error(&self) -> bool {
        matches!(
            self,
            ABCError::Objective(_) | ABCError::PositionDimensionMismatch { .. }
        )
    }

    /// Returns `true` if onlooker selection could not proceed.
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            ABCError::DegenerateSelection { .. } | ABCError::SelectionExhausted { .. }
        )
    }
}
