use crate::{Fitness, ObjectiveModel, Result};
use ndarray::Array1;

/// Box-bounded objective built from a plain closure.
///
/// Sampling is uniform inside the bounds and repair is box clamping only.
/// Diversification resets are disabled until a patience is set with
/// [`with_stagnation_patience`](BoxObjective::with_stagnation_patience).
pub struct BoxObjective<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    bounds: Vec<(f64, f64)>,
    func: F,
    patience: usize,
}

impl<F> BoxObjective<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Wraps `func` (to be maximized) over `bounds`.
    pub fn new(bounds: Vec<(f64, f64)>, func: F) -> Self {
        Self {
            bounds,
            func,
            patience: usize::MAX,
        }
    }

    /// Sets the stagnation patience that triggers diversification resets.
    pub fn with_stagnation_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }
}

impl<F> ObjectiveModel for BoxObjective<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    fn dimension(&self) -> usize {
        self.bounds.len()
    }

    fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<Fitness> {
        Ok(Fitness::new((self.func)(x)))
    }

    fn stagnation_patience(&self) -> usize {
        self.patience
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_box_objective_contract() {
        let model = BoxObjective::new(vec![(0.0, 10.0); 3], |x: &Array1<f64>| x.sum());
        assert_eq!(model.dimension(), 3);
        assert_eq!(model.stagnation_patience(), usize::MAX);
        let f = model.evaluate(&array![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(f.value, 6.0);

        let model = model.with_stagnation_patience(12);
        assert_eq!(model.stagnation_patience(), 12);
    }
}
