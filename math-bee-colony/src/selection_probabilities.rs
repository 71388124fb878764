use rand::Rng;

use crate::food_source::FoodSource;
use crate::{ABCError, Result};

/// Lower limit on the number of redraw rounds of the best-source filter.
pub(crate) const MAX_SELECTION_ROUNDS: usize = 10_000;

/// Sets `probability = fitness / sum(fitness)` on every forager.
///
/// A constant scale on the fitness cancels in the ratio, so none is applied.
/// A population
/// whose fitness sums to exactly zero (a flat landscape) gets uniform
/// probabilities. Returns the sum.
pub(crate) fn compute_probabilities(employed: &mut [FoodSource]) -> f64 {
    let sum: f64 = employed.iter().map(|s| s.fitness.value).sum();
    if sum == 0.0 {
        let uniform = 1.0 / employed.len() as f64;
        for source in employed.iter_mut() {
            source.probability = uniform;
        }
    } else {
        for source in employed.iter_mut() {
            source.probability = source.fitness.value / sum;
        }
    }
    sum
}

/// Indices of the foragers whose probability beats an independent uniform draw.
///
/// The whole population is redrawn until the set is non-empty. At least one
/// positive, finite probability is required up front, and the number of
/// rounds is capped so a degenerate population fails instead of spinning.
pub(crate) fn select_best_food_sources<R: Rng + ?Sized>(
    employed: &[FoodSource],
    rng: &mut R,
) -> Result<Vec<usize>> {
    let viable = employed
        .iter()
        .any(|s| s.probability.is_finite() && s.probability > 0.0);
    if !viable {
        let sum: f64 = employed.iter().map(|s| s.fitness.value).sum();
        return Err(ABCError::DegenerateSelection { sum });
    }

    let rounds = MAX_SELECTION_ROUNDS.max(100 * employed.len());
    for _ in 0..rounds {
        let selected: Vec<usize> = employed
            .iter()
            .enumerate()
            .filter(|(_, s)| s.probability > rng.random::<f64>())
            .map(|(i, _)| i)
            .collect();
        if !selected.is_empty() {
            return Ok(selected);
        }
    }
    Err(ABCError::SelectionExhausted { rounds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food_source::BeeRole;
    use crate::Fitness;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn source(value: f64) -> FoodSource {
        FoodSource {
            position: array![0.0],
            fitness: Fitness::new(value),
            trials: 0,
            probability: 0.0,
            role: BeeRole::Forager,
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let mut employed: Vec<FoodSource> = [0.5, 1.0, 2.5, 4.0].into_iter().map(source).collect();
        let sum = compute_probabilities(&mut employed);
        assert_relative_eq!(sum, 8.0);
        let total: f64 = employed.iter().map(|s| s.probability).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert_relative_eq!(employed[3].probability, 0.5);
    }

    #[test]
    fn test_negative_fitness_population() {
        // all-negative fitness still normalises to a distribution
        let mut employed: Vec<FoodSource> = [-1.0, -3.0].into_iter().map(source).collect();
        compute_probabilities(&mut employed);
        assert_relative_eq!(employed[0].probability, 0.25);
        assert_relative_eq!(employed[1].probability, 0.75);
    }

    #[test]
    fn test_flat_population_is_uniform() {
        let mut employed: Vec<FoodSource> = [0.0; 4].into_iter().map(source).collect();
        compute_probabilities(&mut employed);
        for s in &employed {
            assert_relative_eq!(s.probability, 0.25);
        }
        let mut rng = StdRng::seed_from_u64(1);
        let selected = select_best_food_sources(&employed, &mut rng).unwrap();
        assert!(!selected.is_empty());
        assert!(selected.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_selection_is_never_empty() {
        let mut employed: Vec<FoodSource> =
            [0.01, 0.02, 0.03, 0.04, 0.9].into_iter().map(source).collect();
        compute_probabilities(&mut employed);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let selected = select_best_food_sources(&employed, &mut rng).unwrap();
            assert!(!selected.is_empty());
            assert!(selected.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_sole_positive_probability_is_selected() {
        let mut employed: Vec<FoodSource> = [1.0, 1.0, 1.0].into_iter().map(source).collect();
        employed[0].probability = 1.0;
        employed[1].probability = 0.0;
        employed[2].probability = -0.5;
        let mut rng = StdRng::seed_from_u64(3);
        let selected = select_best_food_sources(&employed, &mut rng).unwrap();
        assert_eq!(selected, vec![0]);
    }

    #[test]
    fn test_huge_fitness_keeps_finite_probabilities() {
        let mut employed: Vec<FoodSource> = [1e306, 3e306].into_iter().map(source).collect();
        compute_probabilities(&mut employed);
        assert_relative_eq!(employed[0].probability, 0.25);
        assert_relative_eq!(employed[1].probability, 0.75);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(select_best_food_sources(&employed, &mut rng).is_ok());
    }

    #[test]
    fn test_degenerate_probabilities_fail_fast() {
        let mut employed: Vec<FoodSource> = [f64::NAN, 1.0].into_iter().map(source).collect();
        compute_probabilities(&mut employed);
        let mut rng = StdRng::seed_from_u64(4);
        let err = select_best_food_sources(&employed, &mut rng).unwrap_err();
        assert!(err.is_selection_error());
        assert!(matches!(err, ABCError::DegenerateSelection { .. }));
    }
}
