//! Synthetic student population and the per-student weekly motivation update.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;

use crate::constants::{
    BURNOUT_THRESHOLD, INITIAL_MOTIVATION_RANGE, INITIAL_MOTIVATION_STD_DEV,
    LEARNING_EFFICIENCY_DIST, STRESS_RESISTANCE_DIST, TRAIT_DAMPING, WEEKLY_FLUCTUATION_STD_DEV,
};
use crate::simulation::types::{BurnoutSummary, SimulationInput, Trajectory};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentState {
    pub motivation: f64,
    pub learning_efficiency: f64,
    pub stress_resistance: f64,
    pub is_burned_out: bool,
    pub burnout_week: Option<u32>,
}

impl StudentState {
    /// Weekly decay before fluctuation. Efficiency and resistance each damp up to half.
    pub fn decay(&self, base_decay: f64) -> f64 {
        let efficiency_factor = 1.0 - self.learning_efficiency * TRAIT_DAMPING;
        let resistance_factor = 1.0 - self.stress_resistance * TRAIT_DAMPING;
        base_decay * efficiency_factor * resistance_factor
    }

    /// Advances this student to `week` (1-based). A burned-out student is frozen:
    /// motivation is carried forward and no fluctuation is drawn.
    pub fn advance<R: Rng + ?Sized>(&mut self, week: u32, base_decay: f64, rng: &mut R) {
        if self.is_burned_out {
            return;
        }

        let fluctuation = sample_normal(rng, 0.0, WEEKLY_FLUCTUATION_STD_DEV);
        self.motivation = (self.motivation - self.decay(base_decay) + fluctuation).max(0.0);

        if self.motivation <= BURNOUT_THRESHOLD {
            self.is_burned_out = true;
            if self.burnout_week.is_none() {
                self.burnout_week = Some(week);
            }
        }
    }
}

/// Normal draw via the standard normal, so no fallible distribution construction.
pub(crate) fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Draws the whole population before the weekly loop: all initial motivations,
/// then all learning efficiencies, then all stress resistances.
pub fn draw_population<R: Rng + ?Sized>(
    size: usize,
    initial_motivation: f64,
    rng: &mut R,
) -> Vec<StudentState> {
    let (min_m, max_m) = INITIAL_MOTIVATION_RANGE;
    let motivations: Vec<f64> = (0..size)
        .map(|_| {
            sample_normal(rng, initial_motivation, INITIAL_MOTIVATION_STD_DEV).clamp(min_m, max_m)
        })
        .collect();
    let (eff_mean, eff_sd) = LEARNING_EFFICIENCY_DIST;
    let efficiencies: Vec<f64> = (0..size)
        .map(|_| sample_normal(rng, eff_mean, eff_sd).clamp(0.0, 1.0))
        .collect();
    let (res_mean, res_sd) = STRESS_RESISTANCE_DIST;
    let resistances: Vec<f64> = (0..size)
        .map(|_| sample_normal(rng, res_mean, res_sd).clamp(0.0, 1.0))
        .collect();

    motivations
        .into_iter()
        .zip(efficiencies)
        .zip(resistances)
        .map(|((motivation, learning_efficiency), stress_resistance)| StudentState {
            motivation,
            learning_efficiency,
            stress_resistance,
            is_burned_out: false,
            burnout_week: None,
        })
        .collect()
}

/// Full record of one run. Matrices are week-major: `motivation[w][s]` is student `s`
/// at the end of week `w + 1`.
#[derive(Debug, Clone)]
pub struct CohortHistory {
    motivation: Vec<Vec<f64>>,
    burned_out: Vec<Vec<bool>>,
    students: Vec<StudentState>,
}

impl CohortHistory {
    /// Runs the weekly loop over a freshly drawn population.
    pub fn run<R: Rng + ?Sized>(
        input: &SimulationInput,
        population: usize,
        weeks: usize,
        rng: &mut R,
    ) -> Self {
        let mut students = draw_population(population, input.initial_motivation(), rng);
        let base_decay = input.base_decay();

        let mut motivation = Vec::with_capacity(weeks);
        let mut burned_out = Vec::with_capacity(weeks);

        // Every student's week w depends only on its own week w-1 value.
        for week in 1..=weeks as u32 {
            for student in students.iter_mut() {
                student.advance(week, base_decay, rng);
            }
            motivation.push(students.iter().map(|s| s.motivation).collect());
            burned_out.push(students.iter().map(|s| s.is_burned_out).collect());
        }

        Self {
            motivation,
            burned_out,
            students,
        }
    }

    pub fn weeks(&self) -> usize {
        self.motivation.len()
    }

    pub fn population(&self) -> usize {
        self.students.len()
    }

    pub fn students(&self) -> &[StudentState] {
        &self.students
    }

    pub fn motivation_at(&self, week_idx: usize) -> &[f64] {
        &self.motivation[week_idx]
    }

    pub fn burned_out_at(&self, week_idx: usize) -> &[bool] {
        &self.burned_out[week_idx]
    }

    /// One student's motivation across all weeks.
    pub fn student_series(&self, student: usize) -> Vec<f64> {
        self.motivation.iter().map(|week| week[student]).collect()
    }

    pub fn student_burnout_flags(&self, student: usize) -> Vec<bool> {
        self.burned_out.iter().map(|week| week[student]).collect()
    }

    pub fn trajectory(&self) -> Trajectory {
        let values = self
            .motivation
            .iter()
            .map(|week| {
                if week.is_empty() {
                    0.0
                } else {
                    week.iter().sum::<f64>() / week.len() as f64
                }
            })
            .collect();
        Trajectory::new(values)
    }

    pub fn burnout_summary(&self) -> BurnoutSummary {
        let weeks: Vec<u32> = self.students.iter().filter_map(|s| s.burnout_week).collect();
        let population = self.students.len();
        let burned_out = weeks.len();

        BurnoutSummary {
            population,
            burned_out,
            burnout_rate: if population > 0 {
                burned_out as f64 / population as f64
            } else {
                0.0
            },
            earliest_week: weeks.iter().copied().min(),
            mean_week: if weeks.is_empty() {
                None
            } else {
                Some(weeks.iter().map(|&w| f64::from(w)).sum::<f64>() / burned_out as f64)
            },
        }
    }
}
