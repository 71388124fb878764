use ndarray::{Array1, Zip};
use rand::Rng;

use crate::Perturbation;

/// Difference move around `base` using one of its own coordinates as reference.
///
/// `candidate[j] = base[j] + (base[j] - base[r]) * phi[j]` where `r` is drawn
/// uniformly from `0..base.len()` and one `phi[j]` is drawn per dimension.
/// The reference coordinate itself never moves.
pub(crate) fn mutant_self_reference<R: Rng + ?Sized>(
    base: &Array1<f64>,
    perturbation: &Perturbation,
    rng: &mut R,
) -> Array1<f64> {
    let reference = base[rng.random_range(0..base.len())];
    let phi: Array1<f64> = (0..base.len())
        .map(|_| perturbation.sample(rng))
        .collect();

    Zip::from(base)
        .and(&phi)
        .map_collect(|&x, &p| x + (x - reference) * p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_reference_comes_from_own_coordinates() {
        let mut rng = StdRng::seed_from_u64(3);
        let base = array![1.0, 4.0, 9.0];
        for _ in 0..100 {
            let trial = mutant_self_reference(&base, &Perturbation::Factor(1.0), &mut rng);
            // with phi = 1 each coordinate becomes 2 * x - ref, so ref is recoverable
            let refs: Vec<f64> = base
                .iter()
                .zip(trial.iter())
                .map(|(&x, &t)| 2.0 * x - t)
                .collect();
            assert!(refs.iter().all(|&r| r == refs[0]));
            assert!(base.iter().any(|&x| x == refs[0]));
        }
    }

    #[test]
    fn test_factor_minus_one_collapses_onto_reference() {
        let mut rng = StdRng::seed_from_u64(11);
        let base = array![2.0, 5.0, 8.0, 3.0];
        let trial = mutant_self_reference(&base, &Perturbation::Factor(-1.0), &mut rng);
        assert!(trial.iter().all(|&t| t == trial[0]));
        assert!(base.iter().any(|&x| x == trial[0]));
    }

    #[test]
    fn test_range_bounds_step_length() {
        let mut rng = StdRng::seed_from_u64(5);
        let base = array![0.0, 10.0];
        let perturbation = Perturbation::Range {
            min: -1.0,
            max: 1.0,
        };
        for _ in 0..200 {
            let trial = mutant_self_reference(&base, &perturbation, &mut rng);
            // each coordinate moves by at most |x - ref| <= 10
            for (x, t) in base.iter().zip(trial.iter()) {
                assert!((t - x).abs() <= 10.0 + 1e-12);
            }
        }
    }
}
