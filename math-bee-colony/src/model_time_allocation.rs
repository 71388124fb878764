use ndarray::Array1;
use rand::Rng;

use crate::init_random::sample_uniform;
use crate::{ABCError, Fitness, ObjectiveModel, Result};

/// Hours available in a week.
pub const TOTAL_HOURS: f64 = 96.0;
/// Mandatory laboratory hours per week.
pub const LAB_HOURS: f64 = 11.5;
/// Hourly wage.
pub const HOURLY_SALARY: f64 = 25.0;
/// Minimum weekly income.
pub const MIN_INCOME: f64 = 500.0;
/// Cap on lecture hours.
pub const MAX_LECTURE_HOURS: f64 = 9.0;
/// Lower bound of every activity.
pub const MIN_HOURS: f64 = 0.0;
/// Upper bound of every activity.
pub const MAX_HOURS: f64 = 60.0;

const STUDY_REWARD: f64 = 0.1429;
const SATISFACTION: f64 = 0.008;
const MISSED_LECTURE_PENALTY: f64 = -0.083;
const DEFAULT_PATIENCE: usize = 100;
const MAX_SAMPLE_ATTEMPTS: usize = 1000;

/// Index of each activity in a schedule.
pub mod activity {
    /// Self-study hours.
    pub const STUDY: usize = 0;
    /// Lecture hours.
    pub const LECTURES: usize = 1;
    /// Paid work hours.
    pub const WORK: usize = 2;
    /// Social hours.
    pub const SOCIAL: usize = 3;
}

/// Weekly time budget of a student: study, lectures, work and social life.
///
/// The fitness trades the grade average against free time and income:
/// `avg_coeff * grade_average + free_time + salary_coeff * work * HOURLY_SALARY`.
/// Auxiliary values are `[grade_average, free_time]`.
#[derive(Debug, Clone)]
pub struct TimeAllocationObjective {
    avg_coeff: f64,
    salary_coeff: f64,
    missed_lectures: u32,
    patience: usize,
    max_sample_attempts: usize,
    bounds: Vec<(f64, f64)>,
}

impl TimeAllocationObjective {
    /// Creates the model with the given weights of the grade average and income.
    pub fn new(avg_coeff: f64, salary_coeff: f64) -> Self {
        Self {
            avg_coeff,
            salary_coeff,
            missed_lectures: 0,
            patience: DEFAULT_PATIENCE,
            max_sample_attempts: MAX_SAMPLE_ATTEMPTS,
            bounds: vec![(MIN_HOURS, MAX_HOURS); 4],
        }
    }

    /// Sets the number of lectures already missed this term.
    pub fn with_missed_lectures(mut self, missed: u32) -> Self {
        self.missed_lectures = missed;
        self
    }

    /// Sets the stagnation patience that triggers colony resets.
    pub fn with_stagnation_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Sets how many draws `sample` makes before using the fallback schedule.
    pub fn with_max_sample_attempts(mut self, attempts: usize) -> Self {
        self.max_sample_attempts = attempts;
        self
    }

    /// Hours left after every activity and the mandatory labs.
    pub fn free_time(x: &Array1<f64>) -> f64 {
        TOTAL_HOURS
            - (x[activity::LECTURES] + LAB_HOURS)
            - x[activity::STUDY]
            - x[activity::WORK]
            - x[activity::SOCIAL]
    }

    /// Expected grade average of a schedule.
    pub fn grade_average(&self, x: &Array1<f64>) -> f64 {
        let satisfaction = (Self::free_time(x) + 3.0 * x[activity::SOCIAL]) * SATISFACTION;
        let study_reward = STUDY_REWARD * 0.5 * satisfaction;
        let penalty = MISSED_LECTURE_PENALTY * 1.5_f64.powi(self.missed_lectures as i32);
        MIN_HOURS + penalty + study_reward
    }

    fn is_feasible(&self, x: &Array1<f64>) -> bool {
        Self::free_time(x) >= 0.0
            && x
                .iter()
                .zip(&self.bounds)
                .all(|(&v, &(lo, hi))| v >= lo && v <= hi)
    }
}

impl ObjectiveModel for TimeAllocationObjective {
    fn dimension(&self) -> usize {
        4
    }

    fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    /// Rejection-samples a schedule that leaves non-negative free time.
    ///
    /// Falls back to the minimum-income schedule `[0, 0, 20, 0]` when none of
    /// the `max_sample_attempts` draws succeeds.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array1<f64>> {
        for _ in 0..self.max_sample_attempts {
            let mut x = sample_uniform(&self.bounds, rng);
            self.repair(&mut x);
            if self.is_feasible(&x) {
                return Ok(x);
            }
        }
        let mut x = Array1::from_elem(4, MIN_HOURS);
        x[activity::WORK] = MIN_INCOME / HOURLY_SALARY;
        Ok(x)
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<Fitness> {
        if x.len() != 4 {
            return Err(ABCError::PositionDimensionMismatch {
                expected: 4,
                got: x.len(),
            });
        }
        let average = self.grade_average(x);
        let free = Self::free_time(x);
        let value =
            self.avg_coeff * average + free + self.salary_coeff * x[activity::WORK] * HOURLY_SALARY;
        if !value.is_finite() {
            return Err(ABCError::objective(format!(
                "non-finite time-allocation fitness at {:?}",
                x.to_vec()
            )));
        }
        Ok(Fitness::with_auxiliary(value, vec![average, free]))
    }

    /// Caps lecture hours, lifts work to the minimum income and caps social
    /// time at twice the work hours and at the time still unallocated.
    fn repair(&self, x: &mut Array1<f64>) {
        x[activity::LECTURES] = x[activity::LECTURES].min(MAX_LECTURE_HOURS);
        x[activity::WORK] = x[activity::WORK].max(MIN_INCOME / HOURLY_SALARY);
        let unallocated = TOTAL_HOURS
            - LAB_HOURS
            - x[activity::STUDY]
            - x[activity::LECTURES]
            - x[activity::WORK];
        let social_cap = (2.0 * x[activity::WORK]).min(unallocated);
        if x[activity::SOCIAL] > social_cap {
            x[activity::SOCIAL] = social_cap;
        }
    }

    fn stagnation_patience(&self) -> usize {
        self.patience
    }
}
