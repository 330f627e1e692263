//! Daemon Configuration
//!
//! Every setting comes from an `ORDERFLOW_*` environment variable with
//! a documented default. An unset variable falls back silently; a set
//! but invalid value is a fatal startup error, never a silent default.

use orderflow_core::error::{AppError, Result};
use std::time::Duration;

const DEFAULT_QUEUE_DB_PATH: &str = "~/.orderflow/queue.db";
const DEFAULT_STORE_DB_PATH: &str = "~/.orderflow/orders.db";
const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 7140;
const DEFAULT_PROCESS_INTERVAL_MS: u64 = 2_000;
const DEFAULT_IDLE_INTERVAL_MS: u64 = 1_000;
const DEFAULT_RATE_LIMIT_BURST: u32 = 100;
const DEFAULT_RATE_LIMIT_RATE: f64 = 50.0;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Resolved daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub queue_db_path: String,
    pub store_db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub log_format: LogFormat,
    pub process_interval: Duration,
    pub idle_interval: Duration,
    pub rate_limit_burst: u32,
    pub rate_limit_rate: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from a variable lookup. Tests inject a closure
    /// instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let queue_db_path = path_var(&lookup, "ORDERFLOW_QUEUE_DB_PATH", DEFAULT_QUEUE_DB_PATH)?;
        let store_db_path = path_var(&lookup, "ORDERFLOW_STORE_DB_PATH", DEFAULT_STORE_DB_PATH)?;

        let rpc_host = match lookup("ORDERFLOW_RPC_HOST") {
            Some(host) if host.trim().is_empty() => {
                return Err(AppError::Config(
                    "ORDERFLOW_RPC_HOST must not be empty".to_string(),
                ));
            }
            Some(host) => host,
            None => DEFAULT_RPC_HOST.to_string(),
        };

        let rpc_port: u16 = parse_var(&lookup, "ORDERFLOW_RPC_PORT", DEFAULT_RPC_PORT)?;

        let log_format = match lookup("ORDERFLOW_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "ORDERFLOW_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                    other
                )));
            }
        };

        let process_interval_ms: u64 = parse_var(
            &lookup,
            "ORDERFLOW_PROCESS_INTERVAL_MS",
            DEFAULT_PROCESS_INTERVAL_MS,
        )?;
        if process_interval_ms == 0 {
            return Err(AppError::Config(
                "ORDERFLOW_PROCESS_INTERVAL_MS must be positive".to_string(),
            ));
        }

        let idle_interval_ms: u64 = parse_var(
            &lookup,
            "ORDERFLOW_IDLE_INTERVAL_MS",
            DEFAULT_IDLE_INTERVAL_MS,
        )?;
        if idle_interval_ms == 0 {
            return Err(AppError::Config(
                "ORDERFLOW_IDLE_INTERVAL_MS must be positive".to_string(),
            ));
        }

        let rate_limit_burst: u32 = parse_var(
            &lookup,
            "ORDERFLOW_RATE_LIMIT_BURST",
            DEFAULT_RATE_LIMIT_BURST,
        )?;
        if rate_limit_burst == 0 {
            return Err(AppError::Config(
                "ORDERFLOW_RATE_LIMIT_BURST must be positive".to_string(),
            ));
        }

        let rate_limit_rate: f64 = parse_var(
            &lookup,
            "ORDERFLOW_RATE_LIMIT_RATE",
            DEFAULT_RATE_LIMIT_RATE,
        )?;
        if !rate_limit_rate.is_finite() || rate_limit_rate <= 0.0 {
            return Err(AppError::Config(
                "ORDERFLOW_RATE_LIMIT_RATE must be a positive number".to_string(),
            ));
        }

        Ok(Self {
            queue_db_path,
            store_db_path,
            rpc_host,
            rpc_port,
            log_format,
            process_interval: Duration::from_millis(process_interval_ms),
            idle_interval: Duration::from_millis(idle_interval_ms),
            rate_limit_burst,
            rate_limit_rate,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, raw))),
    }
}

fn path_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String> {
    let raw = match lookup(key) {
        None => default.to_string(),
        Some(p) if p.trim().is_empty() => {
            return Err(AppError::Config(format!("{} must not be empty", key)));
        }
        Some(p) => p,
    };

    Ok(shellexpand::tilde(&raw).into_owned())
}
