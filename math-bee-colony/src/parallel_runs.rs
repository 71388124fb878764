use ndarray::Array1;
use rayon::prelude::*;

use crate::{
    ABCConfig, ABCConfigBuilder, ArtificialBeeColony, ObjectiveModel, Perturbation, Result,
};

/// Parallel execution configuration
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Enable parallel execution
    pub enabled: bool,
    /// Number of threads to use (None = use rayon default)
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_threads: None,
        }
    }
}

/// Shared settings of a batch of independent runs.
///
/// Each run gets its own configuration built from these settings, with the
/// seed `base_seed + run` when a base seed is set.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Number of independent runs.
    pub runs: usize,
    /// Colony size of every run.
    pub colony_size: usize,
    /// Iterations of every run.
    pub maxiter: usize,
    /// Abandonment threshold of every run.
    pub max_trials: usize,
    /// Forager perturbation of every run.
    pub forager_perturbation: Perturbation,
    /// Onlooker perturbation of every run.
    pub onlooker_perturbation: Perturbation,
    /// Seed of run 0; later runs add their index.
    pub base_seed: Option<u64>,
}

impl Default for RunPlan {
    fn default() -> Self {
        let cfg = ABCConfig::default();
        Self {
            runs: 30,
            colony_size: cfg.colony_size,
            maxiter: cfg.maxiter,
            max_trials: cfg.max_trials,
            forager_perturbation: cfg.forager_perturbation,
            onlooker_perturbation: cfg.onlooker_perturbation,
            base_seed: None,
        }
    }
}

impl RunPlan {
    /// Builds the validated configuration of run `run`.
    pub fn config_for(&self, run: usize) -> Result<ABCConfig> {
        let mut builder = ABCConfigBuilder::new()
            .colony_size(self.colony_size)
            .maxiter(self.maxiter)
            .max_trials(self.max_trials)
            .forager_perturbation(self.forager_perturbation)
            .onlooker_perturbation(self.onlooker_perturbation);
        if let Some(seed) = self.base_seed {
            builder = builder.seed(seed.wrapping_add(run as u64));
        }
        builder.build()
    }
}

/// Outcome of one independent run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Index of the run in the batch.
    pub run: usize,
    /// Best fitness value.
    pub fun: f64,
    /// Best position.
    pub x: Array1<f64>,
    /// Auxiliary values at the best position.
    pub auxiliary: Vec<f64>,
    /// Best fitness value per iteration.
    pub history: Vec<f64>,
    /// Number of colony resets.
    pub resets: usize,
    /// Number of objective evaluations.
    pub nfev: usize,
}

fn single_run<M, F>(make_model: &F, plan: &RunPlan, run: usize) -> Result<RunSummary>
where
    M: ObjectiveModel,
    F: Fn(usize) -> M,
{
    let model = make_model(run);
    let config = plan.config_for(run)?;
    let report = ArtificialBeeColony::new(&model, config)?.optimize()?;
    Ok(RunSummary {
        run,
        fun: report.fun,
        x: report.x,
        auxiliary: report.auxiliary,
        history: report.history,
        resets: report.resets.len(),
        nfev: report.nfev,
    })
}

/// Runs `plan.runs` independent optimizations of the models built by `make_model`.
///
/// Every run owns its model, configuration and random stream. Summaries are
/// returned in run order; the first failing run aborts the batch.
pub fn run_independent<M, F>(
    make_model: F,
    plan: &RunPlan,
    config: &ParallelConfig,
) -> Result<Vec<RunSummary>>
where
    M: ObjectiveModel,
    F: Fn(usize) -> M + Send + Sync,
{
    if !config.enabled || plan.runs < 2 {
        return (0..plan.runs)
            .map(|run| single_run(&make_model, plan, run))
            .collect();
    }

    if let Some(n) = config.num_threads {
        // Ignore error if global pool already set
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global();
    }

    (0..plan.runs)
        .into_par_iter()
        .map(|run| single_run(&make_model, plan, run))
        .collect()
}

/// Element-wise mean of the convergence histories of `summaries`.
///
/// Histories are truncated to the shortest one; an empty slice gives an
/// empty history.
pub fn mean_history(summaries: &[RunSummary]) -> Vec<f64> {
    let Some(len) = summaries.iter().map(|s| s.history.len()).min() else {
        return Vec::new();
    };
    let mut mean = Array1::<f64>::zeros(len);
    for summary in summaries {
        mean += &Array1::from_iter(summary.history[..len].iter().copied());
    }
    mean /= summaries.len() as f64;
    mean.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxObjective;
    use approx::assert_relative_eq;

    fn plan(runs: usize) -> RunPlan {
        RunPlan {
            runs,
            colony_size: 10,
            maxiter: 40,
            max_trials: 20,
            base_seed: Some(100),
            ..RunPlan::default()
        }
    }

    fn neg_sphere(x: &Array1<f64>) -> f64 {
        -x.iter().map(|&xi| (xi - 5.0).powi(2)).sum::<f64>()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let make = |_run: usize| BoxObjective::new(vec![(0.0, 10.0); 3], neg_sphere);
        let parallel = ParallelConfig {
            enabled: true,
            num_threads: Some(2),
        };
        let sequential = ParallelConfig {
            enabled: false,
            num_threads: None,
        };

        let a = run_independent(make, &plan(4), &parallel).unwrap();
        let b = run_independent(make, &plan(4), &sequential).unwrap();
        assert_eq!(a.len(), 4);
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.run, rb.run);
            assert_eq!(ra.history, rb.history);
            assert_eq!(ra.x, rb.x);
        }
        assert!(a.iter().enumerate().all(|(i, r)| r.run == i));
    }

    #[test]
    fn test_mean_history() {
        let summary = |history: Vec<f64>| RunSummary {
            run: 0,
            fun: 0.0,
            x: Array1::zeros(1),
            auxiliary: Vec::new(),
            history,
            resets: 0,
            nfev: 0,
        };
        let mean = mean_history(&[summary(vec![1.0, 2.0, 3.0]), summary(vec![3.0, 4.0, 5.0])]);
        assert_eq!(mean.len(), 3);
        assert_relative_eq!(mean[0], 2.0);
        assert_relative_eq!(mean[2], 4.0);
        assert!(mean_history(&[]).is_empty());
    }

    #[test]
    fn test_invalid_plan_is_reported() {
        let make = |_run: usize| BoxObjective::new(vec![(0.0, 1.0)], |x: &Array1<f64>| x[0]);
        let mut bad = plan(3);
        bad.colony_size = 5;
        let err = run_independent(make, &bad, &ParallelConfig::default()).unwrap_err();
        assert!(err.is_config_error());
    }
}
