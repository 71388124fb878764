use ndarray::Array1;
use rand::Rng;

use crate::repair_bounds::repair_position;
use crate::{ABCError, Fitness, ObjectiveModel, Result};

/// Role of the bee attached to a food source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeeRole {
    /// Employed bee exploring around its own source.
    Forager,
    /// Onlooker exploiting sources advertised by foragers.
    Onlooker,
}

/// A candidate solution together with its search bookkeeping.
#[derive(Debug, Clone)]
pub struct FoodSource {
    /// Current position, always inside the objective bounds.
    pub position: Array1<f64>,
    /// Evaluation of `position`.
    pub fitness: Fitness,
    /// Consecutive attempts that did not improve this source.
    pub trials: usize,
    /// Selection probability, meaningful for foragers only.
    pub probability: f64,
    /// Role of the bee working this source.
    pub role: BeeRole,
}

/// Samples, repairs and evaluates a fresh position.
pub(crate) fn fresh_position<M, R>(model: &M, rng: &mut R) -> Result<(Array1<f64>, Fitness)>
where
    M: ObjectiveModel,
    R: Rng + ?Sized,
{
    let mut x = model.sample(rng)?;
    if x.len() != model.dimension() {
        return Err(ABCError::PositionDimensionMismatch {
            expected: model.dimension(),
            got: x.len(),
        });
    }
    repair_position(&mut x, model);
    let fitness = model.evaluate(&x)?;
    Ok((x, fitness))
}

impl FoodSource {
    /// Creates a source at a freshly sampled position.
    pub fn initialize<M, R>(model: &M, role: BeeRole, rng: &mut R) -> Result<Self>
    where
        M: ObjectiveModel,
        R: Rng + ?Sized,
    {
        let (position, fitness) = fresh_position(model, rng)?;
        Ok(Self {
            position,
            fitness,
            trials: 0,
            probability: 0.0,
            role,
        })
    }

    /// Greedy acceptance against this source's own fitness.
    ///
    /// Ties go to the candidate. Returns `true` when the candidate was taken.
    pub fn accept_if_better(&mut self, candidate: Array1<f64>, fitness: Fitness) -> bool {
        let benchmark = self.fitness.value;
        self.accept_if_at_least(candidate, fitness, benchmark)
    }

    /// Greedy acceptance against an external `benchmark` fitness value.
    ///
    /// Onlookers compare against the source they borrowed from rather than
    /// their own prior state.
    pub fn accept_if_at_least(
        &mut self,
        candidate: Array1<f64>,
        fitness: Fitness,
        benchmark: f64,
    ) -> bool {
        if fitness.value >= benchmark {
            self.position = candidate;
            self.fitness = fitness;
            self.trials = 0;
            true
        } else {
            self.trials += 1;
            false
        }
    }

    /// Abandons the source once `trials` reached `max_trials`.
    ///
    /// Returns `true` when the source was resampled.
    pub fn reset_if_stagnant<M, R>(
        &mut self,
        max_trials: usize,
        model: &M,
        rng: &mut R,
    ) -> Result<bool>
    where
        M: ObjectiveModel,
        R: Rng + ?Sized,
    {
        if self.trials >= max_trials {
            self.force_reset(model, rng)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Unconditionally resamples the source.
    pub fn force_reset<M, R>(&mut self, model: &M, rng: &mut R) -> Result<()>
    where
        M: ObjectiveModel,
        R: Rng + ?Sized,
    {
        let (position, fitness) = fresh_position(model, rng)?;
        self.position = position;
        self.fitness = fitness;
        self.trials = 0;
        self.probability = 0.0;
        Ok(())
    }
}
