use rand::Rng;

use crate::food_source::FoodSource;
use crate::mutant_self_reference::mutant_self_reference;
use crate::repair_bounds::repair_position;
use crate::{ObjectiveModel, Perturbation, Result};

/// Employed-bee pass: one repaired move per source, greedily accepted.
///
/// Sources whose trial counter already exceeds `max_trials` sit the pass
/// out. Returns the number of objective evaluations.
pub(crate) fn forager_phase<M, R>(
    employed: &mut [FoodSource],
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
    for source in employed.iter_mut() {
        if source.trials > max_trials {
            continue;
        }
        let mut candidate = mutant_self_reference(&source.position, perturbation, rng);
        repair_position(&mut candidate, model);
        let fitness = model.evaluate(&candidate)?;
        nfev += 1;
        source.accept_if_better(candidate, fitness);
    }
    Ok(nfev)
}
