use rand::Rng;
use serde::Serialize;

use crate::constants::{
    BURNOUT_THRESHOLD, HORIZON_WEEKS, INITIAL_MOTIVATION_RANGE, INITIAL_MOTIVATION_STD_DEV,
    LEARNING_EFFICIENCY_DIST, MAX_STUDY_HOURS, POPULATION_SIZE, STRESS_RESISTANCE_DIST,
    WEEKLY_FLUCTUATION_STD_DEV,
};
use crate::simulation::cohort::CohortHistory;
use crate::simulation::types::{CrossingPoint, Gender, SimulationInput, Trajectory};

/// First week whose average moved from at/above `threshold` to at/below it.
/// Week numbers are 1-based and name the later of the two samples.
pub fn find_crossing(trajectory: &[f64], threshold: f64) -> Option<CrossingPoint> {
    (1..trajectory.len())
        .find(|&idx| trajectory[idx - 1] >= threshold && trajectory[idx] <= threshold)
        .map(|idx| CrossingPoint {
            week: (idx + 1) as u32,
            threshold,
        })
}

#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub input: SimulationInput,
    pub history: CohortHistory,
    pub trajectory: Trajectory,
    pub crossing: Option<CrossingPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderCoefficient {
    pub gender: Gender,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    pub population_size: usize,
    pub horizon_weeks: usize,
    pub burnout_threshold: f64,
    pub max_study_hours: i64,
    pub initial_motivation_std_dev: f64,
    pub initial_motivation_range: (f64, f64),
    pub learning_efficiency: (f64, f64),
    pub stress_resistance: (f64, f64),
    pub weekly_fluctuation_std_dev: f64,
    pub decay_coefficients: Vec<GenderCoefficient>,
}

/// Cohort motivation simulator. Holds no state between runs; every call draws a new
/// population.
#[derive(Debug, Clone, Copy)]
pub struct MotivationSimulator {
    population: usize,
    weeks: usize,
}

impl Default for MotivationSimulator {
    fn default() -> Self {
        Self {
            population: POPULATION_SIZE,
            weeks: HORIZON_WEEKS,
        }
    }
}

impl MotivationSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unseeded run. Out-of-range study hours are clamped and unknown genders
    /// should already have resolved to `Gender::Other`; nothing here can fail.
    pub fn simulate(
        &self,
        study_hours: i64,
        gender: Gender,
        initial_motivation: f64,
    ) -> (Trajectory, Option<CrossingPoint>) {
        let input = SimulationInput::new(study_hours, gender, initial_motivation);
        let run = self.run(&input, &mut rand::thread_rng());
        (run.trajectory, run.crossing)
    }

    pub fn simulate_with_rng<R: Rng + ?Sized>(
        &self,
        input: &SimulationInput,
        rng: &mut R,
    ) -> (Trajectory, Option<CrossingPoint>) {
        let run = self.run(input, rng);
        (run.trajectory, run.crossing)
    }

    pub fn simulate_cohort<R: Rng + ?Sized>(
        &self,
        input: &SimulationInput,
        rng: &mut R,
    ) -> CohortHistory {
        CohortHistory::run(input, self.population, self.weeks, rng)
    }

    pub fn run<R: Rng + ?Sized>(&self, input: &SimulationInput, rng: &mut R) -> SimulationRun {
        tracing::debug!(
            study_hours = input.study_hours(),
            gender = input.gender().as_str(),
            initial_motivation = input.initial_motivation(),
            "Simulating cohort"
        );

        let history = self.simulate_cohort(input, rng);
        let trajectory = history.trajectory();
        let crossing = find_crossing(trajectory.as_slice(), BURNOUT_THRESHOLD);

        SimulationRun {
            input: *input,
            history,
            trajectory,
            crossing,
        }
    }

    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            population_size: self.population,
            horizon_weeks: self.weeks,
            burnout_threshold: BURNOUT_THRESHOLD,
            max_study_hours: MAX_STUDY_HOURS,
            initial_motivation_std_dev: INITIAL_MOTIVATION_STD_DEV,
            initial_motivation_range: INITIAL_MOTIVATION_RANGE,
            learning_efficiency: LEARNING_EFFICIENCY_DIST,
            stress_resistance: STRESS_RESISTANCE_DIST,
            weekly_fluctuation_std_dev: WEEKLY_FLUCTUATION_STD_DEV,
            decay_coefficients: [Gender::Male, Gender::Female, Gender::Other]
                .into_iter()
                .map(|gender| GenderCoefficient {
                    gender,
                    coefficient: gender.decay_coefficient(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn crossing_requires_prior_sample_at_or_above() {
        assert_eq!(find_crossing(&[0.9, 0.8, 0.7], 1.0), None);
        assert_eq!(find_crossing(&[], 1.0), None);
        assert_eq!(find_crossing(&[1.5], 1.0), None);
    }

    #[test]
    fn crossing_reports_later_week_one_based() {
        let cp = find_crossing(&[2.0, 1.4, 0.9, 0.5], 1.0).unwrap();
        assert_eq!(cp.week, 3);
        assert_eq!(cp.threshold, 1.0);
    }

    #[test]
    fn touching_the_threshold_counts_both_ways() {
        // 1.0 >= 1.0 and then <= 1.0
        assert_eq!(find_crossing(&[1.2, 1.0, 0.8], 1.0).unwrap().week, 2);
        assert_eq!(find_crossing(&[1.0, 0.99], 1.0).unwrap().week, 2);
        assert_eq!(find_crossing(&[1.0, 1.0], 1.0).unwrap().week, 2);
    }

    #[test]
    fn only_first_crossing_is_reported() {
        let cp = find_crossing(&[1.5, 0.9, 1.3, 0.7], 1.0).unwrap();
        assert_eq!(cp.week, 2);
    }

    #[test]
    fn default_simulator_uses_fixed_shape() {
        let sim = MotivationSimulator::new();
        let mut rng = StdRng::seed_from_u64(1);
        let input = SimulationInput::new(20, Gender::Male, 3.0);
        let run = sim.run(&input, &mut rng);
        assert_eq!(run.trajectory.len(), HORIZON_WEEKS);
        assert_eq!(run.history.population(), POPULATION_SIZE);
    }

    #[test]
    fn unseeded_simulate_returns_full_trajectory() {
        let (trajectory, crossing) = MotivationSimulator::new().simulate(500, Gender::Female, 3.5);
        assert_eq!(trajectory.len(), 70);
        if let Some(cp) = crossing {
            assert_eq!(cp.threshold, 1.0);
            assert!((2..=70).contains(&cp.week));
        }
    }

    #[test]
    fn parameters_expose_coefficient_table() {
        let params = MotivationSimulator::new().parameters();
        assert_eq!(params.population_size, 1000);
        assert_eq!(params.horizon_weeks, 70);
        assert_eq!(params.decay_coefficients.len(), 3);
        assert_eq!(params.decay_coefficients[1].coefficient, 0.0051);
    }
}
