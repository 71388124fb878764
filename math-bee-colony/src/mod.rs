//! Artificial Bee Colony optimization library.
//!
//! This crate provides a Rust implementation of the Artificial Bee Colony (ABC)
//! metaheuristic, a population-based stochastic optimizer that maximizes a
//! scalar fitness over a bounded continuous search space.
//!
//! # Features
//!
//! - Employed foragers, probabilistic onlookers and scout abandonment
//! - Pluggable objective models with domain-specific repair and sampling
//! - Global-best tracking with stagnation-driven colony resets
//! - Independent runs in parallel with averaged convergence histories
//!
//! # Example
//!
//! ```rust
//! use math_bee_colony::{artificial_bee_colony, ABCConfigBuilder};
//!
//! // Maximize f(x) = -sum(x_i^2), optimum at the origin
//! let bounds = vec![(-5.0, 5.0), (-5.0, 5.0)];
//! let config = ABCConfigBuilder::new()
//!     .colony_size(30)
//!     .maxiter(200)
//!     .seed(42)
//!     .build()
//!     .expect("invalid config");
//!
//! let result = artificial_bee_colony(
//!     |x| -x.iter().map(|&xi| xi * xi).sum::<f64>(),
//!     &bounds,
//!     config,
//! ).expect("optimization should succeed");
//!
//! assert!(result.fun > -1e-3);
//! assert_eq!(result.history.len(), 200);
//! ```
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod error;
pub use error::{ABCError, Result};

use std::fmt;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Objective model trait and fitness values.
pub mod objective;
pub use objective::{Fitness, ObjectiveModel};

/// Objective model wrapping a plain closure over box bounds.
pub mod model_closure;
/// Weekly time-allocation objective.
pub mod model_time_allocation;
pub use model_closure::BoxObjective;
pub use model_time_allocation::TimeAllocationObjective;

/// Food sources and bee roles.
pub mod food_source;
pub use food_source::{BeeRole, FoodSource};
/// Employed and onlooker groups of food sources.
pub mod colony;
pub use colony::Colony;
/// Best-solution tracking and colony resets.
pub mod global_best;
pub use global_best::BestSnapshot;

mod init_random;
mod mutant_self_reference;
mod phase_forager;
mod phase_onlooker;
mod phase_scout;
mod repair_bounds;
mod selection_probabilities;

/// Convenience entry point for closure objectives.
pub mod artificial_bee_colony;
/// Independent runs executed in parallel.
pub mod parallel_runs;
pub use artificial_bee_colony::artificial_bee_colony;
pub use parallel_runs::{ParallelConfig, RunPlan, RunSummary, mean_history, run_independent};

/// Callback function type
pub type CallbackFn = Box<dyn FnMut(&ABCIntermediate)>;

/// Perturbation coefficient `phi` used by the difference move.
///
/// One coefficient is drawn per dimension for every candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Perturbation {
    /// Fixed coefficient applied to every dimension.
    Factor(f64),
    /// Coefficient drawn uniformly from the closed range `[min, max]`.
    Range {
        /// Lower end of the range.
        min: f64,
        /// Upper end of the range.
        max: f64,
    },
}

impl Default for Perturbation {
    fn default() -> Self {
        Perturbation::Range {
            min: -1.0,
            max: 1.0,
        }
    }
}

impl Perturbation {
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Perturbation::Factor(phi) => phi,
            Perturbation::Range { min, max } if min == max => min,
            Perturbation::Range { min, max } => rng.random_range(min..=max),
        }
    }

    fn validate(&self) -> Result<()> {
        let (min, max) = match *self {
            Perturbation::Factor(phi) => (phi, phi),
            Perturbation::Range { min, max } => (min, max),
        };
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(ABCError::InvalidPerturbation { min, max });
        }
        Ok(())
    }
}

/// Configuration for the Artificial Bee Colony optimizer.
pub struct ABCConfig {
    /// Total number of food sources, split evenly into foragers and onlookers.
    pub colony_size: usize,
    /// Number of iterations; the run always executes all of them.
    pub maxiter: usize,
    /// Trial count at which scouts abandon a source.
    pub max_trials: usize,
    /// Perturbation used by employed foragers.
    pub forager_perturbation: Perturbation,
    /// Perturbation used by onlookers.
    pub onlooker_perturbation: Perturbation,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
    /// Log the initial colony and periodic progress at info level.
    pub disp: bool,
    /// Iterations between two progress lines when `disp` is set.
    pub progress_every: usize,
    /// Optional per-iteration observer.
    pub callback: Option<CallbackFn>,
}

impl Default for ABCConfig {
    fn default() -> Self {
        Self {
            colony_size: 30,
            maxiter: 5000,
            max_trials: 100,
            forager_perturbation: Perturbation::default(),
            onlooker_perturbation: Perturbation::default(),
            seed: None,
            disp: false,
            progress_every: 100,
            callback: None,
        }
    }
}

impl ABCConfig {
    /// Checks colony size, iteration budget and perturbation ranges.
    pub fn validate(&self) -> Result<()> {
        if self.colony_size < 2 || self.colony_size % 2 != 0 {
            return Err(ABCError::InvalidColonySize {
                colony_size: self.colony_size,
            });
        }
        if self.maxiter == 0 {
            return Err(ABCError::InvalidIterationBudget {
                maxiter: self.maxiter,
            });
        }
        self.forager_perturbation.validate()?;
        self.onlooker_perturbation.validate()?;
        Ok(())
    }
}

/// Fluent builder for `ABCConfig`.
///
/// # Example
///
/// ```rust
/// use math_bee_colony::{ABCConfigBuilder, Perturbation};
///
/// let config = ABCConfigBuilder::new()
///     .colony_size(20)
///     .maxiter(500)
///     .max_trials(50)
///     .onlooker_perturbation(Perturbation::Factor(-1.0))
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(config.colony_size, 20);
/// ```
pub struct ABCConfigBuilder {
    cfg: ABCConfig,
}

impl Default for ABCConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ABCConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: ABCConfig::default(),
        }
    }
    /// Sets the total colony size (even, at least 2).
    pub fn colony_size(mut self, v: usize) -> Self {
        self.cfg.colony_size = v;
        self
    }
    /// Sets the number of iterations.
    pub fn maxiter(mut self, v: usize) -> Self {
        self.cfg.maxiter = v;
        self
    }
    /// Sets the abandonment threshold of a food source.
    pub fn max_trials(mut self, v: usize) -> Self {
        self.cfg.max_trials = v;
        self
    }
    /// Sets the perturbation of employed foragers.
    pub fn forager_perturbation(mut self, v: Perturbation) -> Self {
        self.cfg.forager_perturbation = v;
        self
    }
    /// Sets the perturbation of onlookers.
    pub fn onlooker_perturbation(mut self, v: Perturbation) -> Self {
        self.cfg.onlooker_perturbation = v;
        self
    }
    /// Sets the random seed for reproducibility.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    /// Enables/disables progress logging.
    pub fn disp(mut self, v: bool) -> Self {
        self.cfg.disp = v;
        self
    }
    /// Sets the number of iterations between progress lines.
    pub fn progress_every(mut self, v: usize) -> Self {
        self.cfg.progress_every = v;
        self
    }
    /// Sets a per-iteration observer.
    pub fn callback(mut self, cb: Box<dyn FnMut(&ABCIntermediate)>) -> Self {
        self.cfg.callback = Some(cb);
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ABCError::InvalidColonySize` for a zero or odd colony size,
    /// `ABCError::InvalidIterationBudget` for `maxiter == 0` and
    /// `ABCError::InvalidPerturbation` for an empty or non-finite range.
    pub fn build(self) -> Result<ABCConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// Result/report of an ABC optimization run.
#[derive(Clone)]
pub struct ABCReport {
    /// Best position found.
    pub x: Array1<f64>,
    /// Fitness value at `x`.
    pub fun: f64,
    /// Auxiliary values reported by the objective at `x`.
    pub auxiliary: Vec<f64>,
    /// Best fitness value at the end of every iteration.
    pub history: Vec<f64>,
    /// Number of iterations performed.
    pub nit: usize,
    /// Number of objective evaluations performed.
    pub nfev: usize,
    /// Iterations at which the colony was reset.
    pub resets: Vec<usize>,
    /// Human-readable status message.
    pub message: String,
    /// Final colony.
    pub colony: Colony,
}

impl fmt::Debug for ABCReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ABCReport")
            .field("x", &format!("len={}", self.x.len()))
            .field("fun", &self.fun)
            .field("auxiliary", &self.auxiliary)
            .field("history", &format!("len={}", self.history.len()))
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .field("resets", &self.resets.len())
            .field("message", &self.message)
            .field("colony", &format!("len={}", self.colony.len()))
            .finish()
    }
}

/// Information passed to the observer after each iteration.
pub struct ABCIntermediate {
    /// Current iteration number, starting at 0.
    pub iter: usize,
    /// Current best fitness value.
    pub fun: f64,
    /// Current best position.
    pub x: Array1<f64>,
    /// Best updates since the last colony reset.
    pub stagnation: usize,
    /// Number of colony resets so far.
    pub resets: usize,
    /// Trial counters of the full population, onlookers first.
    pub trial_counts: Vec<usize>,
}

/// Artificial Bee Colony optimizer.
///
/// Use [`ArtificialBeeColony::new`] to validate a model and configuration,
/// then call [`optimize`](Self::optimize).
pub struct ArtificialBeeColony<'a, M>
where
    M: ObjectiveModel,
{
    model: &'a M,
    config: ABCConfig,
}

impl<'a, M> ArtificialBeeColony<'a, M>
where
    M: ObjectiveModel,
{
    /// Creates an optimizer for `model`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (see [`ABCError::is_config_error`]) when
    /// the model declares no dimension, inconsistent or inverted bounds, or
    /// when `config` is invalid.
    pub fn new(model: &'a M, config: ABCConfig) -> Result<Self> {
        objective::validate_model(model)?;
        config.validate()?;
        Ok(Self { model, config })
    }

    /// Read access to the configuration.
    pub fn config(&self) -> &ABCConfig {
        &self.config
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut ABCConfig {
        &mut self.config
    }

    /// Runs exactly `maxiter` iterations and returns a report.
    ///
    /// # Errors
    ///
    /// Objective failures abort the run and are returned unchanged, as are
    /// selection errors on a degenerate fitness landscape.
    pub fn optimize(&mut self) -> Result<ABCReport> {
        use global_best::GlobalBest;
        use phase_forager::forager_phase;
        use phase_onlooker::onlooker_phase;
        use phase_scout::scout_phase;
        use selection_probabilities::{compute_probabilities, select_best_food_sources};

        self.config.validate()?;
        let model = self.model;
        let ABCConfig {
            colony_size,
            maxiter,
            max_trials,
            forager_perturbation,
            onlooker_perturbation,
            seed,
            disp,
            progress_every,
            ..
        } = self.config;
        let patience = model.stagnation_patience();

        let mut rng: StdRng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        };

        let mut colony = Colony::initialize(model, colony_size, &mut rng)?;
        let mut nfev = colony.len();
        if disp {
            let initial_best = colony.fittest().map_or(f64::NAN, |s| s.fitness.value);
            log::info!(
                "ABC init: {} dimensions, colony={} ({} foragers), maxiter={}, max_trials={}, patience={}",
                model.dimension(),
                colony_size,
                colony.employed.len(),
                maxiter,
                max_trials,
                patience
            );
            log::info!("ABC init: best fitness={:.6e}", initial_best);
        }

        let mut tracker = GlobalBest::new();
        for iter in 0..maxiter {
            nfev += forager_phase(
                &mut colony.employed,
                model,
                max_trials,
                &forager_perturbation,
                &mut rng,
            )?;
            nfev += tracker.update(&mut colony, iter, maxiter, patience, model, &mut rng)?;

            compute_probabilities(&mut colony.employed);
            let best_sources = select_best_food_sources(&colony.employed, &mut rng)?;
            nfev += onlooker_phase(
                &mut colony.onlookers,
                &colony.employed,
                &best_sources,
                model,
                max_trials,
                &onlooker_perturbation,
                &mut rng,
            )?;

            nfev += scout_phase(&mut colony, model, max_trials, &mut rng)?;
            nfev += tracker.update(&mut colony, iter, maxiter, patience, model, &mut rng)?;
            tracker.record_iteration();

            let best = tracker.best.as_ref();
            if disp && progress_every > 0 && (iter + 1) % progress_every == 0 {
                log::info!(
                    "ABC iter {:5}  best={:.6e}  stagnation={}  resets={}  nfev={}",
                    iter,
                    best.map_or(f64::NAN, |b| b.fitness.value),
                    tracker.stagnation,
                    tracker.resets.len(),
                    nfev
                );
            }

            if let Some(ref mut cb) = self.config.callback {
                let intermediate = ABCIntermediate {
                    iter,
                    fun: best.map_or(f64::NAN, |b| b.fitness.value),
                    x: best.map(|b| b.position.clone()).unwrap_or_default(),
                    stagnation: tracker.stagnation,
                    resets: tracker.resets.len(),
                    trial_counts: colony.trial_counts(),
                };
                cb(&intermediate);
            }
        }

        let Some(best) = tracker.best.take() else {
            return Err(ABCError::InvalidIterationBudget { maxiter });
        };
        let message = if tracker.resets.is_empty() {
            format!("Maximum iterations reached: {}", maxiter)
        } else {
            format!(
                "Maximum iterations reached: {} ({} colony resets)",
                maxiter,
                tracker.resets.len()
            )
        };
        if disp {
            log::info!("ABC finished: {}, best={:.6e}", message, best.fitness.value);
        }

        Ok(ABCReport {
            x: best.position,
            fun: best.fitness.value,
            auxiliary: best.fitness.auxiliary,
            history: tracker.history,
            nit: maxiter,
            nfev,
            resets: tracker.resets,
            message,
            colony,
        })
    }
}
