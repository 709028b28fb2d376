pub mod cohort;
pub mod engine;
pub mod metrics;
pub mod report;
pub mod types;

pub use engine::{find_crossing, MotivationSimulator, SimulationParameters, SimulationRun};
pub use report::SimulationReport;
pub use types::{CrossingPoint, Gender, MotivationZone, SimulationInput, Trajectory};
