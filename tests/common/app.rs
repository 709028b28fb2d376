use axum::Router;
use tokio::sync::broadcast;

use motivation_backend::config::{Config, RateLimitConfig, SimulationEnvConfig};
use motivation_backend::routes::build_router;
use motivation_backend::state::AppState;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
}

/// Builds the config directly so tests never race on process environment variables.
pub fn test_config(api_limit: u64, max_concurrent: usize) -> Config {
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        trust_proxy: false,
        rate_limit: RateLimitConfig {
            window_secs: 60,
            max_requests: api_limit,
        },
        simulation: SimulationEnvConfig {
            max_concurrent,
            queue_timeout_ms: 5_000,
        },
    }
}

fn spawn_with_config(config: Config) -> TestApp {
    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let state = AppState::new(&config, shutdown_tx);
    let app = build_router(state.clone());

    TestApp { app, state, config }
}

pub async fn spawn_test_server() -> TestApp {
    spawn_with_config(test_config(100, 2))
}

pub async fn spawn_test_server_with_limits(api_limit: u64) -> TestApp {
    spawn_with_config(test_config(api_limit, 2))
}
