use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub cors_origin: String,
    pub trust_proxy: bool,
    pub rate_limit: RateLimitConfig,
    pub simulation: SimulationEnvConfig,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub max_requests: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 900,
            max_requests: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationEnvConfig {
    /// Simulations allowed to run on the blocking pool at once.
    pub max_concurrent: usize,
    /// How long a request may wait for a free simulation slot.
    pub queue_timeout_ms: u64,
}

impl Default for SimulationEnvConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            queue_timeout_ms: 5_000,
        }
    }
}

/// The values `from_env` falls back to when nothing is set.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3000,
            log_level: "info".to_string(),
            enable_file_logs: false,
            log_dir: "./logs".to_string(),
            cors_origin: "http://localhost:5173".to_string(),
            trust_proxy: false,
            rate_limit: RateLimitConfig::default(),
            simulation: SimulationEnvConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CORS_ORIGIN '{origin}': {reason}")]
    InvalidCorsOrigin { origin: String, reason: String },
    #[error("{key} must be greater than zero")]
    MustBePositive { key: &'static str },
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or_parse("HOST", defaults.host),
            port: env_or_parse("PORT", defaults.port),
            log_level: env_or("RUST_LOG", &defaults.log_level),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", defaults.enable_file_logs),
            log_dir: env_or("LOG_DIR", &defaults.log_dir),
            cors_origin: env_or("CORS_ORIGIN", &defaults.cors_origin),
            trust_proxy: env_or_bool("TRUST_PROXY", defaults.trust_proxy),
            rate_limit: RateLimitConfig {
                window_secs: env_or_parse(
                    "RATE_LIMIT_WINDOW_SECS",
                    defaults.rate_limit.window_secs,
                ),
                max_requests: env_or_parse("RATE_LIMIT_MAX", defaults.rate_limit.max_requests),
            },
            simulation: SimulationEnvConfig {
                max_concurrent: env_or_parse(
                    "SIM_MAX_CONCURRENT",
                    defaults.simulation.max_concurrent,
                ),
                queue_timeout_ms: env_or_parse(
                    "SIM_QUEUE_TIMEOUT_MS",
                    defaults.simulation.queue_timeout_ms,
                ),
            },
        }
    }

    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.max_concurrent == 0 {
            return Err(ConfigError::MustBePositive {
                key: "SIM_MAX_CONCURRENT",
            });
        }
        if self.rate_limit.window_secs == 0 {
            return Err(ConfigError::MustBePositive {
                key: "RATE_LIMIT_WINDOW_SECS",
            });
        }
        let origin = self.cors_origin.trim();
        if origin != "*" {
            if let Err(e) = origin.parse::<axum::http::HeaderValue>() {
                return Err(ConfigError::InvalidCorsOrigin {
                    origin: self.cors_origin.clone(),
                    reason: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn managed_keys() -> &'static [&'static str] {
        &[
            "HOST",
            "PORT",
            "RUST_LOG",
            "RATE_LIMIT_MAX",
            "ENABLE_FILE_LOGS",
            "SIM_MAX_CONCURRENT",
            "SIM_QUEUE_TIMEOUT_MS",
            "CORS_ORIGIN",
        ]
    }

    fn clear_keys(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.rate_limit.max_requests, 500);
        assert_eq!(cfg.simulation.max_concurrent, 4);
        assert_eq!(cfg.simulation.queue_timeout_ms, 5_000);
        assert!(cfg.validate().is_ok());

        let defaults = Config::default();
        assert_eq!(cfg.host, defaults.host);
        assert_eq!(cfg.cors_origin, defaults.cors_origin);
        assert_eq!(cfg.rate_limit.window_secs, defaults.rate_limit.window_secs);
    }

    #[test]
    fn default_config_is_valid_without_env() {
        let cfg = Config::default();
        assert_eq!(cfg.simulation.max_concurrent, 4);
        assert_eq!(cfg.rate_limit.max_requests, 500);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parses_numeric_values() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "4000");
        env::set_var("RATE_LIMIT_MAX", "100");
        env::set_var("SIM_MAX_CONCURRENT", "8");
        env::set_var("SIM_QUEUE_TIMEOUT_MS", "250");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.rate_limit.max_requests, 100);
        assert_eq!(cfg.simulation.max_concurrent, 8);
        assert_eq!(cfg.simulation.queue_timeout_ms, 250);
        clear_keys(managed_keys());
    }

    #[test]
    fn invalid_values_fall_back() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "bad");
        env::set_var("SIM_MAX_CONCURRENT", "-3");
        env::set_var("ENABLE_FILE_LOGS", "maybe");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.simulation.max_concurrent, 4);
        assert!(!cfg.enable_file_logs);
        clear_keys(managed_keys());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("SIM_MAX_CONCURRENT", "0");
        let cfg = Config::from_env();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MustBePositive {
                key: "SIM_MAX_CONCURRENT"
            })
        ));
        clear_keys(managed_keys());
    }

    #[test]
    fn bad_cors_origin_is_rejected() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("CORS_ORIGIN", "http://bad\norigin");
        let cfg = Config::from_env();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidCorsOrigin { .. })
        ));
        clear_keys(managed_keys());
    }
}
