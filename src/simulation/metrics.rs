use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

const LATENCY_BUCKETS: [u64; 6] = [1_000, 5_000, 20_000, 50_000, 200_000, u64::MAX];
const BUCKET_MIDPOINTS: [f64; 6] = [500.0, 3_000.0, 12_500.0, 35_000.0, 125_000.0, 400_000.0];

/// Process-wide simulation counters. Latencies are in microseconds and include
/// time spent waiting for a simulation slot.
pub struct SimulationMetrics {
    run_count: AtomicU64,
    crossing_count: AtomicU64,
    error_count: AtomicU64,
    total_latency_us: AtomicU64,
    last_run_at: AtomicI64,
    latency_buckets: [AtomicU64; 6],
}

impl Default for SimulationMetrics {
    fn default() -> Self {
        Self {
            run_count: AtomicU64::new(0),
            crossing_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
            last_run_at: AtomicI64::new(0),
            latency_buckets: [
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
            ],
        }
    }
}

impl SimulationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run(&self, latency_us: u64, crossed: bool) {
        self.run_count.fetch_add(1, Ordering::Relaxed);
        if crossed {
            self.crossing_count.fetch_add(1, Ordering::Relaxed);
        }
        self.total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
        self.record_latency_bucket(latency_us);
        self.last_run_at
            .store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    fn record_latency_bucket(&self, latency_us: u64) {
        for (i, &threshold) in LATENCY_BUCKETS.iter().enumerate() {
            if latency_us <= threshold {
                self.latency_buckets[i].fetch_add(1, Ordering::Relaxed);
                return;
            }
        }
    }

    /// Bucket-midpoint estimates of (p50, p95, p99).
    pub fn percentiles(&self) -> (f64, f64, f64) {
        let counts: Vec<u64> = self
            .latency_buckets
            .iter()
            .map(|b| b.load(Ordering::Relaxed))
            .collect();
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return (0.0, 0.0, 0.0);
        }

        let percentile = |pct: f64| -> f64 {
            let target = (pct / 100.0 * total as f64).ceil() as u64;
            let mut cumulative = 0u64;
            for (i, &count) in counts.iter().enumerate() {
                cumulative += count;
                if cumulative >= target {
                    return BUCKET_MIDPOINTS[i];
                }
            }
            BUCKET_MIDPOINTS[5]
        };

        (percentile(50.0), percentile(95.0), percentile(99.0))
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let run_count = self.run_count.load(Ordering::Relaxed);
        let total_latency_us = self.total_latency_us.load(Ordering::Relaxed);
        let (p50, p95, p99) = self.percentiles();
        let last_run_at = self.last_run_at.load(Ordering::Relaxed);

        MetricsSnapshot {
            run_count,
            crossing_count: self.crossing_count.load(Ordering::Relaxed),
            error_count: self.error_count.load(Ordering::Relaxed),
            total_latency_us,
            avg_latency_us: if run_count > 0 {
                total_latency_us as f64 / run_count as f64
            } else {
                0.0
            },
            p50_latency_us: p50,
            p95_latency_us: p95,
            p99_latency_us: p99,
            last_run_at_ms: (last_run_at > 0).then_some(last_run_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub run_count: u64,
    pub crossing_count: u64,
    pub error_count: u64,
    pub total_latency_us: u64,
    pub avg_latency_us: f64,
    pub p50_latency_us: f64,
    pub p95_latency_us: f64,
    pub p99_latency_us: f64,
    pub last_run_at_ms: Option<i64>,
}
