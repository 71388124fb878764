use crate::{ABCConfig, ABCReport, ArtificialBeeColony, BoxObjective, Result};
use ndarray::Array1;

/// Runs the Artificial Bee Colony optimizer on a plain function.
///
/// This is a convenience function that wraps `func` and `bounds` into a
/// [`BoxObjective`] (uniform sampling, box clamping, no colony resets) and
/// maximizes it with the given configuration.
///
/// # Arguments
///
/// * `func` - The fitness to maximize, mapping `&Array1<f64>` to `f64`
/// * `bounds` - Vector of (lower, upper) bound pairs for each dimension
/// * `config` - ABC configuration (use `ABCConfigBuilder` to construct)
///
/// # Errors
///
/// Returns `ABCError::ZeroDimension` for empty bounds and
/// `ABCError::InvalidBounds` if any bound pair has upper < lower.
///
/// # Example
///
/// ```rust
/// use math_bee_colony::{artificial_bee_colony, ABCConfigBuilder};
///
/// let result = artificial_bee_colony(
///     |x| -(x[0] - 1.0).powi(2) - (x[1] + 2.0).powi(2),
///     &[(-5.0, 5.0), (-5.0, 5.0)],
///     ABCConfigBuilder::new().maxiter(300).seed(42).build().unwrap(),
/// ).expect("optimization failed");
///
/// assert!(result.fun > -0.05);
/// ```
pub fn artificial_bee_colony<F>(func: F, bounds: &[(f64, f64)], config: ABCConfig) -> Result<ABCReport>
where
    F: Fn(&Array1<f64>) -> f64,
{
    let model = BoxObjective::new(bounds.to_vec(), func);
    let mut abc = ArtificialBeeColony::new(&model, config)?;
    abc.optimize()
}
