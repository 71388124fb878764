use rand::Rng;

use crate::colony::Colony;
use crate::{ObjectiveModel, Result};

/// Abandons every source of the colony whose trial counter reached `max_trials`.
///
/// Returns the number of resampled sources, each costing one evaluation.
pub(crate) fn scout_phase<M, R>(
    colony: &mut Colony,
    model: &M,
    max_trials: usize,
    rng: &mut R,
) -> Result<usize>
where
    M: ObjectiveModel,
    R: Rng + ?Sized,
{
    let mut abandoned = 0;
    for source in colony.iter_mut() {
        if source.reset_if_stagnant(max_trials, model, rng)? {
            abandoned += 1;
        }
    }
    Ok(abandoned)
}
