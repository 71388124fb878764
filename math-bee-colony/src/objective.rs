use crate::init_random::sample_uniform;
use crate::{ABCError, Result};
use ndarray::Array1;
use rand::Rng;

/// Value returned by an objective evaluation.
///
/// Only `value` takes part in acceptance and best-tracking comparisons;
/// `auxiliary` carries diagnostics (spread statistics, derived quantities)
/// that are reported alongside the best solution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fitness {
    /// Scalar fitness, higher is better.
    pub value: f64,
    /// Reporting-only diagnostic values.
    pub auxiliary: Vec<f64>,
}

impl Fitness {
    /// Fitness without auxiliary values.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            auxiliary: Vec::new(),
        }
    }

    /// Fitness carrying auxiliary diagnostic values.
    pub fn with_auxiliary(value: f64, auxiliary: Vec<f64>) -> Self {
        Self { value, auxiliary }
    }
}

impl From<f64> for Fitness {
    fn from(value: f64) -> Self {
        Fitness::new(value)
    }
}

/// Problem definition consumed by the bee colony.
///
/// Implementors describe a bounded search space and a fitness to maximize.
/// The colony never evaluates a position that has not been passed through
/// box clamping and [`repair`](ObjectiveModel::repair) first.
///
/// # Example
///
/// ```rust
/// use math_bee_colony::{Fitness, ObjectiveModel, Result};
/// use ndarray::Array1;
///
/// struct Paraboloid {
///     bounds: Vec<(f64, f64)>,
/// }
///
/// impl ObjectiveModel for Paraboloid {
///     fn dimension(&self) -> usize {
///         self.bounds.len()
///     }
///     fn bounds(&self) -> &[(f64, f64)] {
///         &self.bounds
///     }
///     fn evaluate(&self, x: &Array1<f64>) -> Result<Fitness> {
///         Ok(Fitness::new(-x.iter().map(|&xi| xi * xi).sum::<f64>()))
///     }
///     fn stagnation_patience(&self) -> usize {
///         200
///     }
/// }
/// ```
pub trait ObjectiveModel {
    /// Number of decision variables.
    fn dimension(&self) -> usize;

    /// Per-dimension `(lower, upper)` bounds, `dimension()` entries long.
    fn bounds(&self) -> &[(f64, f64)];

    /// Draws a fresh feasible position.
    ///
    /// The default draws uniformly inside the bounds. Models with a
    /// feasibility predicate may reject-sample, but must always terminate.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array1<f64>> {
        Ok(sample_uniform(self.bounds(), rng))
    }

    /// Evaluates a position. Must be deterministic for a given position.
    fn evaluate(&self, x: &Array1<f64>) -> Result<Fitness>;

    /// Domain-specific constraint projection applied after box clamping.
    ///
    /// The default does nothing, leaving box clamping as the only repair.
    fn repair(&self, _x: &mut Array1<f64>) {}

    /// Number of best-update calls after which the colony is reset.
    ///
    /// Every best update counts, improving or not, and only a reset clears
    /// the counter. Return `usize::MAX` to disable resets.
    fn stagnation_patience(&self) -> usize;
}

/// Checks the dimension and bounds declared by a model.
pub(crate) fn validate_model<M: ObjectiveModel>(model: &M) -> Result<()> {
    let n = model.dimension();
    if n == 0 {
        return Err(ABCError::ZeroDimension);
    }
    let bounds = model.bounds();
    if bounds.len() != n {
        return Err(ABCError::BoundsMismatch {
            expected: n,
            got: bounds.len(),
        });
    }
    for (i, &(lower, upper)) in bounds.iter().enumerate() {
        if !(lower.is_finite() && upper.is_finite()) || lower > upper {
            return Err(ABCError::InvalidBounds {
                index: i,
                lower,
                upper,
            });
        }
    }
    Ok(())
}
