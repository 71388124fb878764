use rand::Rng;

use crate::food_source::{BeeRole, FoodSource};
use crate::{ObjectiveModel, Result};

/// The two fixed-size groups of food sources worked by the colony.
///
/// Sizes are set once at construction and never change during a run.
#[derive(Debug, Clone)]
pub struct Colony {
    /// Sources worked by employed bees (foragers).
    pub employed: Vec<FoodSource>,
    /// Sources worked by onlookers.
    pub onlookers: Vec<FoodSource>,
}

impl Colony {
    /// Builds `colony_size / 2` foragers and as many onlookers at sampled positions.
    pub fn initialize<M, R>(model: &M, colony_size: usize, rng: &mut R) -> Result<Self>
    where
        M: ObjectiveModel,
        R: Rng + ?Sized,
    {
        let half = colony_size / 2;
        let mut employed = Vec::with_capacity(half);
        for _ in 0..half {
            employed.push(FoodSource::initialize(model, BeeRole::Forager, rng)?);
        }
        let mut onlookers = Vec::with_capacity(half);
        for _ in 0..half {
            onlookers.push(FoodSource::initialize(model, BeeRole::Onlooker, rng)?);
        }
        Ok(Self {
            employed,
            onlookers,
        })
    }

    /// Total number of food sources.
    pub fn len(&self) -> usize {
        self.employed.len() + self.onlookers.len()
    }

    /// Returns `true` if the colony holds no food source.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the full population, onlookers first.
    pub fn iter(&self) -> impl Iterator<Item = &FoodSource> {
        self.onlookers.iter().chain(self.employed.iter())
    }

    /// Mutable iteration over the full population, onlookers first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FoodSource> {
        self.onlookers.iter_mut().chain(self.employed.iter_mut())
    }

    /// Source at position `index` of [`iter`](Colony::iter) order.
    pub fn get(&self, index: usize) -> Option<&FoodSource> {
        if index < self.onlookers.len() {
            self.onlookers.get(index)
        } else {
            self.employed.get(index - self.onlookers.len())
        }
    }

    /// Highest-fitness source; the first one wins ties.
    pub fn fittest(&self) -> Option<&FoodSource> {
        let mut best: Option<&FoodSource> = None;
        for source in self.iter() {
            match best {
                Some(b) if source.fitness.value <= b.fitness.value => {}
                _ => best = Some(source),
            }
        }
        best
    }

    /// Trial counters of the full population in [`iter`](Colony::iter) order.
    pub fn trial_counts(&self) -> Vec<usize> {
        self.iter().map(|s| s.trials).collect()
    }
}
