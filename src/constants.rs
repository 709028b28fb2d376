/// Simulated cohort size (students)
pub const POPULATION_SIZE: usize = 1000;

/// Simulation horizon (weeks)
pub const HORIZON_WEEKS: usize = 70;

/// Burnout threshold on the 0-5 motivation scale
pub const BURNOUT_THRESHOLD: f64 = 1.0;

/// Weekly study hours cap; larger submissions are treated as the cap
pub const MAX_STUDY_HOURS: i64 = 100;

/// Standard deviation of individual initial motivation
pub const INITIAL_MOTIVATION_STD_DEV: f64 = 0.5;

/// Truncation range of individual initial motivation
pub const INITIAL_MOTIVATION_RANGE: (f64, f64) = (1.0, 5.0);

/// Learning efficiency distribution (mean, std dev)
pub const LEARNING_EFFICIENCY_DIST: (f64, f64) = (0.5, 0.1);

/// Stress resistance distribution (mean, std dev)
pub const STRESS_RESISTANCE_DIST: (f64, f64) = (0.5, 0.1);

/// Standard deviation of the weekly random fluctuation
pub const WEEKLY_FLUCTUATION_STD_DEV: f64 = 0.08;

/// Weight with which efficiency and resistance damp the decay
pub const TRAIT_DAMPING: f64 = 0.5;

/// Motivation decay coefficient, male
pub const DECAY_COEFFICIENT_MALE: f64 = 0.0043;

/// Motivation decay coefficient, female
pub const DECAY_COEFFICIENT_FEMALE: f64 = 0.0051;

/// Decay coefficient for the whole class / unspecified gender
pub const DECAY_COEFFICIENT_OTHER: f64 = 0.0047;

/// Upper bound of the low-motivation zone (burnout threshold up to this value)
pub const LOW_MOTIVATION_UPPER: f64 = 2.5;

/// Top of the motivation scale
pub const MOTIVATION_SCALE_MAX: f64 = 5.0;
