use crate::ObjectiveModel;
use ndarray::{Array1, Zip};

fn clamp_to_bounds(x: &mut Array1<f64>, bounds: &[(f64, f64)]) {
    Zip::from(x)
        .and(bounds)
        .for_each(|xi, &(lo, hi)| *xi = xi.clamp(lo, hi));
}

/// Projects a candidate onto the feasible region of `model`.
///
/// Box clamping runs before the model's own repair hook and again after it,
/// so a domain repair that derives one coordinate from others can never
/// leave the declared bounds.
pub(crate) fn repair_position<M: ObjectiveModel>(x: &mut Array1<f64>, model: &M) {
    let bounds = model.bounds();
    clamp_to_bounds(x, bounds);
    model.repair(x);
    clamp_to_bounds(x, bounds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_closure::BoxObjective;
    use crate::{Fitness, Result};
    use ndarray::array;

    struct CappedSecond;

    impl ObjectiveModel for CappedSecond {
        fn dimension(&self) -> usize {
            2
        }
        fn bounds(&self) -> &[(f64, f64)] {
            &[(0.0, 10.0), (0.0, 10.0)]
        }
        fn evaluate(&self, _x: &Array1<f64>) -> Result<Fitness> {
            Ok(Fitness::new(0.0))
        }
        fn repair(&self, x: &mut Array1<f64>) {
            // second coordinate derived from the first, may leave the box
            x[1] = x[0] - 4.0;
        }
        fn stagnation_patience(&self) -> usize {
            10
        }
    }

    #[test]
    fn test_box_clamp_only() {
        let model = BoxObjective::new(vec![(0.0, 1.0), (-1.0, 1.0)], |_: &Array1<f64>| 0.0);
        let mut x = array![1.5, -3.0];
        repair_position(&mut x, &model);
        assert_eq!(x, array![1.0, -1.0]);

        let mut inside = array![0.25, 0.5];
        repair_position(&mut inside, &model);
        assert_eq!(inside, array![0.25, 0.5]);
    }

    #[test]
    fn test_domain_repair_is_clamped_again() {
        let mut x = array![2.0, 7.0];
        repair_position(&mut x, &CappedSecond);
        // 2 - 4 = -2 is pulled back to the lower bound
        assert_eq!(x, array![2.0, 0.0]);

        let mut y = array![12.0, 1.0];
        repair_position(&mut y, &CappedSecond);
        assert_eq!(y, array![10.0, 6.0]);
    }
}
