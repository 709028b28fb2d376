use serde::{Deserialize, Serialize};

use crate::constants::{
    BURNOUT_THRESHOLD, DECAY_COEFFICIENT_FEMALE, DECAY_COEFFICIENT_MALE, DECAY_COEFFICIENT_OTHER,
    LOW_MOTIVATION_UPPER, MAX_STUDY_HOURS, MOTIVATION_SCALE_MAX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    /// Class-wide calculation or unspecified gender. Unknown labels land here.
    #[default]
    #[serde(other)]
    Other,
}

impl Gender {
    /// Exact, case-sensitive labels, same as the serde form. Anything other than
    /// `"male"` or `"female"` is `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other,
        }
    }

    pub fn decay_coefficient(self) -> f64 {
        match self {
            Self::Male => DECAY_COEFFICIENT_MALE,
            Self::Female => DECAY_COEFFICIENT_FEMALE,
            Self::Other => DECAY_COEFFICIENT_OTHER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// One submission. Study hours are clamped into `[0, MAX_STUDY_HOURS]` on construction;
/// the initial motivation is kept as supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    study_hours: u32,
    gender: Gender,
    initial_motivation: f64,
}

impl SimulationInput {
    pub fn new(study_hours: i64, gender: Gender, initial_motivation: f64) -> Self {
        Self {
            study_hours: study_hours.clamp(0, MAX_STUDY_HOURS) as u32,
            gender,
            initial_motivation,
        }
    }

    pub fn study_hours(&self) -> u32 {
        self.study_hours
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn initial_motivation(&self) -> f64 {
        self.initial_motivation
    }

    /// Weekly decay before the per-student efficiency and resistance factors.
    pub fn base_decay(&self) -> f64 {
        self.gender.decay_coefficient() * f64::from(self.study_hours)
    }
}

/// Cohort mean motivation per week; index 0 is week 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory(Vec<f64>);

impl Trajectory {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Average for a 1-based week number.
    pub fn week(&self, week: usize) -> Option<f64> {
        week.checked_sub(1).and_then(|idx| self.0.get(idx).copied())
    }

    pub fn first(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Lowest average over the horizon.
    pub fn minimum(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossingPoint {
    pub week: u32,
    pub threshold: f64,
}

/// Chart bands of the 0-5 motivation scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationZone {
    Burnout,
    Low,
    High,
}

impl MotivationZone {
    /// Values at or below the burnout threshold count as burnout, matching the
    /// per-student burnout rule.
    pub fn classify(value: f64) -> Self {
        if value <= BURNOUT_THRESHOLD {
            Self::Burnout
        } else if value < LOW_MOTIVATION_UPPER {
            Self::Low
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneBand {
    pub zone: MotivationZone,
    pub lower: f64,
    pub upper: f64,
}

pub fn zone_bands() -> [ZoneBand; 3] {
    [
        ZoneBand {
            zone: MotivationZone::Burnout,
            lower: 0.0,
            upper: BURNOUT_THRESHOLD,
        },
        ZoneBand {
            zone: MotivationZone::Low,
            lower: BURNOUT_THRESHOLD,
            upper: LOW_MOTIVATION_UPPER,
        },
        ZoneBand {
            zone: MotivationZone::High,
            lower: LOW_MOTIVATION_UPPER,
            upper: MOTIVATION_SCALE_MAX,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnoutSummary {
    pub population: usize,
    pub burned_out: usize,
    pub burnout_rate: f64,
    pub earliest_week: Option<u32>,
    pub mean_week: Option<f64>,
}

/// Displayed starting point: the submitted motivation rounded to one decimal.
/// Rounds the exact binary value with ties to even, so `0.35` (stored just below)
/// gives `0.3` and `2.25` gives `2.2`.
pub fn starting_point(initial_motivation: f64) -> f64 {
    format!("{initial_motivation:.1}")
        .parse()
        .unwrap_or(initial_motivation)
}
