use clap::{Parser, ValueEnum};
use math_bee_colony::{
    ParallelConfig, Perturbation, RunPlan, TimeAllocationObjective, mean_history,
    model_time_allocation::activity, run_independent,
};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "run_abc",
    about = "Optimize a weekly time allocation with the artificial bee colony"
)]
struct Cli {
    /// CSV file whose first row holds `avg_coeff,salary_coeff` (overrides the flags)
    #[arg(long)]
    coefficients: Option<PathBuf>,

    /// Weight of the grade average in the fitness
    #[arg(long, default_value_t = 1.0)]
    avg_coeff: f64,

    /// Weight of the income in the fitness
    #[arg(long, default_value_t = 0.1)]
    salary_coeff: f64,

    /// Lectures already missed this term
    #[arg(long, default_value_t = 0)]
    missed_lectures: u32,

    /// Total colony size (even)
    #[arg(long, default_value_t = 30)]
    colony_size: usize,

    /// Iterations per run
    #[arg(long, default_value_t = 100)]
    maxiter: usize,

    /// Trial count at which a food source is abandoned
    #[arg(long, default_value_t = 100)]
    max_trials: usize,

    /// Best updates without change before the colony is reset
    #[arg(long, default_value_t = 100)]
    patience: usize,

    /// Onlooker perturbation
    #[arg(long, value_enum, default_value_t = OnlookerChoice::Range)]
    onlooker: OnlookerChoice,

    /// Number of independent runs whose histories are averaged
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Seed of the first run; run i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Disable parallel execution of the runs
    #[arg(long)]
    no_parallel: bool,

    /// Number of threads for parallel runs (0 = use all available cores)
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OnlookerChoice {
    /// phi uniform in [-1, 1]
    Range,
    /// phi fixed at -1, candidates collapse onto one coordinate
    Collapse,
}

impl From<OnlookerChoice> for Perturbation {
    fn from(choice: OnlookerChoice) -> Self {
        match choice {
            OnlookerChoice::Range => Perturbation::default(),
            OnlookerChoice::Collapse => Perturbation::Factor(-1.0),
        }
    }
}

fn read_coefficients(path: &PathBuf) -> Result<(f64, f64), String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    let record = reader
        .records()
        .next()
        .ok_or_else(|| format!("'{}' is empty", path.display()))?
        .map_err(|e| format!("invalid CSV in '{}': {}", path.display(), e))?;
    let (Some(avg), Some(salary)) = (record.get(0), record.get(1)) else {
        return Err(format!(
            "expected 'avg,salary' in '{}', got {} field(s)",
            path.display(),
            record.len()
        ));
    };
    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| format!("invalid coefficient '{}': {}", s, e))
    };
    Ok((parse(avg)?, parse(salary)?))
}

fn main() {
    let args = Cli::parse();

    let (avg_coeff, salary_coeff) = match &args.coefficients {
        Some(path) => read_coefficients(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            process::exit(2);
        }),
        None => (args.avg_coeff, args.salary_coeff),
    };

    if args.runs == 0 {
        eprintln!("Error: --runs must be at least 1.");
        process::exit(2);
    }

    let plan = RunPlan {
        runs: args.runs,
        colony_size: args.colony_size,
        maxiter: args.maxiter,
        max_trials: args.max_trials,
        onlooker_perturbation: args.onlooker.into(),
        base_seed: args.seed,
        ..RunPlan::default()
    };
    let parallel = ParallelConfig {
        enabled: !args.no_parallel,
        num_threads: if args.threads == 0 {
            None
        } else {
            Some(args.threads)
        },
    };
    let missed = args.missed_lectures;
    let patience = args.patience;
    let make_model = move |_run: usize| {
        TimeAllocationObjective::new(avg_coeff, salary_coeff)
            .with_missed_lectures(missed)
            .with_stagnation_patience(patience)
    };

    println!(
        "Running {} run(s): colony={}, maxiter={}, max_trials={}, patience={}, avg_coeff={}, salary_coeff={}",
        plan.runs, plan.colony_size, plan.maxiter, plan.max_trials, patience, avg_coeff, salary_coeff
    );

    let start = Instant::now();
    let summaries = match run_independent(make_model, &plan, &parallel) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: optimization failed: {}", e);
            process::exit(if e.is_config_error() { 2 } else { 1 });
        }
    };
    let elapsed = start.elapsed();

    for s in &summaries {
        println!(
            "run {:3}: best={:.6e} resets={} nfev={}",
            s.run, s.fun, s.resets, s.nfev
        );
    }

    let Some(best) = summaries
        .iter()
        .max_by(|a, b| a.fun.total_cmp(&b.fun))
    else {
        eprintln!("Error: no run completed.");
        process::exit(1);
    };

    println!("\nOptimization completed in {:.2?}", elapsed);
    println!("Best fitness: {:.6e} (run {})", best.fun, best.run);
    println!(
        "Schedule [h/week]: study={:.2} lectures={:.2} work={:.2} social={:.2}",
        best.x[activity::STUDY],
        best.x[activity::LECTURES],
        best.x[activity::WORK],
        best.x[activity::SOCIAL]
    );
    if let [average, free_time] = best.auxiliary[..] {
        println!("Grade average: {:.4}, free time: {:.2} h", average, free_time);
    }

    println!("\niteration,mean_best");
    for (i, v) in mean_history(&summaries).iter().enumerate() {
        println!("{},{}", i, v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("run_abc_{}_{}", process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_quoted_coefficients() {
        let path = write_temp("quoted.csv", "\"1.0\",\"0.2\"\n");
        let coeffs = read_coefficients(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(coeffs, Ok((1.0, 0.2)));
    }

    #[test]
    fn test_read_plain_coefficients_with_spaces() {
        let path = write_temp("plain.csv", "0.8, 0.5\n0.1,0.1\n");
        let coeffs = read_coefficients(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(coeffs, Ok((0.8, 0.5)));
    }

    #[test]
    fn test_single_field_is_rejected() {
        let path = write_temp("short.csv", "1.0\n");
        let coeffs = read_coefficients(&path);
        fs::remove_file(&path).unwrap();
        assert!(coeffs.unwrap_err().contains("expected 'avg,salary'"));
    }
}
