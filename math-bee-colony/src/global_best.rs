use ndarray::Array1;
use rand::Rng;

use crate::colony::Colony;
use crate::food_source::FoodSource;
use crate::{Fitness, ObjectiveModel, Result};

/// Value copy of a food source taken when it became the best one.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSnapshot {
    /// Position of the source at copy time.
    pub position: Array1<f64>,
    /// Fitness of the source at copy time.
    pub fitness: Fitness,
}

impl From<&FoodSource> for BestSnapshot {
    fn from(source: &FoodSource) -> Self {
        Self {
            position: source.position.clone(),
            fitness: source.fitness.clone(),
        }
    }
}

/// Best-solution bookkeeping of one optimization run.
#[derive(Debug, Clone, Default)]
pub(crate) struct GlobalBest {
    pub(crate) best: Option<BestSnapshot>,
    previous: Option<BestSnapshot>,
    pub(crate) stagnation: usize,
    pub(crate) history: Vec<f64>,
    pub(crate) resets: Vec<usize>,
}

impl GlobalBest {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Best-update step, run twice per iteration.
    ///
    /// The previous snapshot is refreshed after every call, so every call
    /// after the first increments the stagnation counter; only a colony reset
    /// clears it. Once the count reaches `patience` while more than 10% of
    /// the budget remains, the whole colony is resampled and an arbitrary
    /// fresh source becomes the best. Returns the evaluations spent on a reset.
    pub(crate) fn update<M, R>(
        &mut self,
        colony: &mut Colony,
        iter: usize,
        maxiter: usize,
        patience: usize,
        model: &M,
        rng: &mut R,
    ) -> Result<usize>
    where
        M: ObjectiveModel,
        R: Rng + ?Sized,
    {
        let found = colony.fittest().map(BestSnapshot::from);
        let Some(best_value) = self.best.as_ref().map(|b| b.fitness.value) else {
            self.best = found;
            self.previous = self.best.clone();
            return Ok(0);
        };

        let unchanged = match (&self.previous, &self.best) {
            (Some(prev), Some(best)) => prev.position == best.position,
            _ => false,
        };
        if unchanged {
            self.stagnation += 1;
        }

        let mut nfev = 0;
        let remaining = (maxiter - iter) as f64 / maxiter as f64;
        if self.stagnation >= patience && remaining > 0.1 {
            nfev = self.reset_colony(colony, iter, model, rng)?;
        } else if let Some(found) = found.filter(|f| f.fitness.value > best_value) {
            self.best = Some(found);
        }
        self.previous = self.best.clone();
        Ok(nfev)
    }

    fn reset_colony<M, R>(
        &mut self,
        colony: &mut Colony,
        iter: usize,
        model: &M,
        rng: &mut R,
    ) -> Result<usize>
    where
        M: ObjectiveModel,
        R: Rng + ?Sized,
    {
        self.stagnation = 0;
        for source in colony.iter_mut() {
            source.force_reset(model, rng)?;
        }
        let pick = rng.random_range(0..colony.len());
        self.best = colony.get(pick).map(BestSnapshot::from);
        self.resets.push(iter);
        log::debug!(
            "colony reset at iteration {}: new best {:.6e}",
            iter,
            self.best.as_ref().map_or(f64::NAN, |b| b.fitness.value)
        );
        Ok(colony.len())
    }

    /// Appends the current best fitness value to the convergence history.
    pub(crate) fn record_iteration(&mut self) {
        if let Some(best) = &self.best {
            self.history.push(best.fitness.value);
        }
    }
}
