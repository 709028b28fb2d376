use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::SimulationEnvConfig;
use crate::simulation::metrics::SimulationMetrics;
use crate::simulation::{MotivationSimulator, SimulationInput, SimulationReport};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("simulation slots exhausted after waiting {waited_ms}ms")]
    Busy { waited_ms: u64 },
    #[error("simulation service is shutting down")]
    Unavailable,
    #[error("simulation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Runs the CPU-bound simulator on the blocking pool, bounded by a semaphore.
pub struct SimulationService {
    simulator: MotivationSimulator,
    permits: Arc<Semaphore>,
    queue_timeout: Duration,
    metrics: Arc<SimulationMetrics>,
}

impl SimulationService {
    pub fn new(simulator: MotivationSimulator, config: &SimulationEnvConfig) -> Self {
        Self {
            simulator,
            permits: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            queue_timeout: Duration::from_millis(config.queue_timeout_ms),
            metrics: Arc::new(SimulationMetrics::new()),
        }
    }

    pub fn simulator(&self) -> &MotivationSimulator {
        &self.simulator
    }

    pub fn metrics(&self) -> &Arc<SimulationMetrics> {
        &self.metrics
    }

    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }

    /// Stops handing out slots; waiting and future callers get `Unavailable`.
    pub fn close(&self) {
        self.permits.close();
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    pub async fn run(&self, input: SimulationInput) -> Result<SimulationReport, SimulationError> {
        let start = Instant::now();

        let permit = match tokio::time::timeout(
            self.queue_timeout,
            self.permits.clone().acquire_owned(),
        )
        .await
        {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => {
                self.metrics.record_error();
                return Err(SimulationError::Unavailable);
            }
            Err(_) => {
                self.metrics.record_error();
                let waited_ms = start.elapsed().as_millis() as u64;
                tracing::warn!(waited_ms, "No simulation slot available");
                return Err(SimulationError::Busy { waited_ms });
            }
        };

        let simulator = self.simulator;
        let joined = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let run = simulator.run(&input, &mut rand::thread_rng());
            SimulationReport::from(&run)
        })
        .await;

        let report = match joined {
            Ok(report) => report,
            Err(e) => {
                self.metrics.record_error();
                tracing::error!(error = %e, "Simulation task failed");
                return Err(e.into());
            }
        };

        let latency_us = start.elapsed().as_micros() as u64;
        self.metrics.record_run(latency_us, report.crossing.is_some());
        tracing::info!(
            study_hours = report.study_hours,
            gender = report.gender.as_str(),
            crossing_week = report.crossing.map(|c| c.week),
            burned_out = report.burnout.burned_out,
            latency_us,
            "Simulation completed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Gender;

    fn config(max_concurrent: usize, queue_timeout_ms: u64) -> SimulationEnvConfig {
        SimulationEnvConfig {
            max_concurrent,
            queue_timeout_ms,
        }
    }

    #[tokio::test]
    async fn run_records_metrics() {
        let service = SimulationService::new(MotivationSimulator::new(), &config(2, 5_000));
        let report = service
            .run(SimulationInput::new(40, Gender::Male, 3.0))
            .await
            .unwrap();
        assert_eq!(report.trajectory.len(), 70);
        assert_eq!(service.metrics().snapshot().run_count, 1);
        assert_eq!(service.available_slots(), 2);
    }

    #[tokio::test]
    async fn closed_service_is_unavailable() {
        let service = SimulationService::new(MotivationSimulator::new(), &config(1, 5_000));
        service.close();
        let err = service
            .run(SimulationInput::new(40, Gender::Male, 3.0))
            .await
            .unwrap_err();
        assert!(matches!(err, SimulationError::Unavailable));
        assert_eq!(service.metrics().snapshot().error_count, 1);
    }

    #[tokio::test]
    async fn exhausted_slots_time_out_as_busy() {
        let service = SimulationService::new(MotivationSimulator::new(), &config(1, 20));
        let _held = service.permits.clone().acquire_owned().await.unwrap();
        let err = service
            .run(SimulationInput::new(40, Gender::Male, 3.0))
            .await
            .unwrap_err();
        assert!(matches!(err, SimulationError::Busy { .. }));
    }
}
