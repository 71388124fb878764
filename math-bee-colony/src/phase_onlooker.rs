use rand::Rng;

use crate::food_source::FoodSource;
use crate::mutant_self_reference::mutant_self_reference;
use crate::repair_bounds::repair_position;
use crate::{ObjectiveModel, Perturbation, Result};

/// Onlooker pass over the sources advertised in `best_sources`.
///
/// Each onlooker borrows one advertised forager at random, moves around the
/// forager's position and keeps the result in its own slot when it is at
/// least as fit as the borrowed source. Returns the number of evaluations.
pub(crate) fn onlooker_phase<M, R>(
    onlookers: &mut [FoodSource],
    employed: &[FoodSource],
    best_sources: &[usize],
    model: &M,
    max_trials: usize,
    perturbation: &Perturbation,
    rng: &mut R,
) -> Result<usize>
where
    M: ObjectiveModel,
    R: Rng + ?Sized,
{
    let mut nfev = 0;
    for bee in onlookers.iter_mut() {
        let chosen = &employed[best_sources[rng.random_range(0..best_sources.len())]];
        if bee.trials > max_trials {
            continue;
        }
        let mut candidate = mutant_self_reference(&chosen.position, perturbation, rng);
        repair_position(&mut candidate, model);
        let fitness = model.evaluate(&candidate)?;
        nfev += 1;
        bee.accept_if_at_least(candidate, fitness, chosen.fitness.value);
    }
    Ok(nfev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::Colony;
    use crate::model_closure::BoxObjective;
    use ndarray::Array1;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn neg_sphere(x: &Array1<f64>) -> f64 {
        -x.iter().map(|&xi| (xi - 5.0).powi(2)).sum::<f64>()
    }

    #[test]
    fn test_accepted_onlookers_match_or_beat_borrowed_source() {
        let model = BoxObjective::new(vec![(0.0, 10.0); 3], neg_sphere);
        let mut rng = StdRng::seed_from_u64(31);
        let mut colony = Colony::initialize(&model, 12, &mut rng).unwrap();
        let best_sources = vec![2];
        let benchmark = colony.employed[2].fitness.value;

        for _ in 0..30 {
            let before: Vec<usize> = colony.onlookers.iter().map(|b| b.trials).collect();
            let nfev = onlooker_phase(
                &mut colony.onlookers,
                &colony.employed,
                &best_sources,
                &model,
                100,
                &Perturbation::default(),
                &mut rng,
            )
            .unwrap();
            assert_eq!(nfev, 6);
            for (bee, t_before) in colony.onlookers.iter().zip(before) {
                if bee.trials == 0 {
                    assert!(bee.fitness.value >= benchmark);
                } else {
                    assert_eq!(bee.trials, t_before + 1);
                }
                assert_eq!(bee.fitness.value, neg_sphere(&bee.position));
            }
        }
    }

    #[test]
    fn test_onlooker_may_regress_below_its_own_fitness() {
        // the comparison is against the borrowed source, not the onlooker's past
        let model = BoxObjective::new(vec![(0.0, 10.0); 2], neg_sphere);
        let mut rng = StdRng::seed_from_u64(32);
        let mut colony = Colony::initialize(&model, 2, &mut rng).unwrap();
        colony.onlookers[0].position = ndarray::array![5.0, 5.0];
        colony.onlookers[0].fitness = crate::Fitness::new(0.0);
        colony.employed[0].position = ndarray::array![0.0, 10.0];
        colony.employed[0].fitness = crate::Fitness::new(neg_sphere(&colony.employed[0].position));

        // phi = -0.5 moves the off-reference coordinate halfway to the
        // reference, giving [0, 5] or [5, 10], both better than [0, 10]
        onlooker_phase(
            &mut colony.onlookers,
            &colony.employed,
            &[0],
            &model,
            10,
            &Perturbation::Factor(-0.5),
            &mut rng,
        )
        .unwrap();
        assert_eq!(colony.onlookers[0].trials, 0);
        assert!(colony.onlookers[0].fitness.value < 0.0);
    }
}
