use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::simulation::engine::SimulationRun;
use crate::simulation::types::{
    starting_point, zone_bands, BurnoutSummary, CrossingPoint, Gender, MotivationZone,
    Trajectory, ZoneBand,
};

/// What the presentation layer needs to draw the trend chart and its annotation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub study_hours: u32,
    pub gender: Gender,
    pub decay_coefficient: f64,
    pub starting_point: f64,
    pub trajectory: Trajectory,
    pub crossing: Option<CrossingPoint>,
    pub final_zone: Option<MotivationZone>,
    pub burnout: BurnoutSummary,
    pub zones: Vec<ZoneBand>,
    pub generated_at: DateTime<Utc>,
}

impl From<&SimulationRun> for SimulationReport {
    fn from(run: &SimulationRun) -> Self {
        Self {
            study_hours: run.input.study_hours(),
            gender: run.input.gender(),
            decay_coefficient: run.input.gender().decay_coefficient(),
            starting_point: starting_point(run.input.initial_motivation()),
            trajectory: run.trajectory.clone(),
            crossing: run.crossing,
            final_zone: run.trajectory.last().map(MotivationZone::classify),
            burnout: run.history.burnout_summary(),
            zones: zone_bands().to_vec(),
            generated_at: Utc::now(),
        }
    }
}
