//! Solver configuration.

#[cfg(test)]
#[path = "../tests/unit/config_test.rs"]
mod config_test;

extern crate serde_json;

use crate::format::solution::{InitialMode, InitialSettings};
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;
use vrp_seed_core::utils::{Environment, GenericResult, InfoLogger};

/// A default optimizer time budget in seconds.
pub const DEFAULT_TIME_LIMIT: f64 = 10.;

/// A solver configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Optimizer time budget in seconds.
    pub time_limit: Option<f64>,
    /// A seed of every random component.
    pub random_seed: Option<u64>,
    /// Seed solution configuration.
    pub initial: Option<InitialConfig>,
    /// Telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
}

/// A seed solution configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialConfig {
    /// Extra slots per vehicle path. Default is 10.
    pub path_margin: Option<usize>,
    /// Construction mode. Default is auto.
    pub mode: Option<InitialMode>,
}

/// A telemetry configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TelemetryConfig {
    /// Logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// A logging configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled.
    pub enabled: bool,
    /// A prefix of every log line.
    pub prefix: Option<String>,
}

impl Config {
    /// Returns optimizer time budget in seconds.
    pub fn time_limit(&self) -> f64 {
        self.time_limit.unwrap_or(DEFAULT_TIME_LIMIT)
    }

    /// Returns seed solution settings.
    pub fn initial_settings(&self) -> InitialSettings {
        let defaults = InitialSettings::default();

        self.initial.as_ref().map_or(defaults, |initial| InitialSettings {
            path_margin: initial.path_margin.unwrap_or(defaults.path_margin),
            mode: initial.mode.unwrap_or(defaults.mode),
        })
    }
}

/// Reads config from json.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    let config: Config =
        serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'"))?;

    match config.time_limit {
        Some(limit) if !limit.is_finite() || limit < 0. => {
            Err(format!("time limit must be a non-negative number, got {limit}").into())
        }
        _ => Ok(config),
    }
}

/// Creates environment with random and logger specified by config.
pub fn create_environment(config: &Config) -> Environment {
    let logging = config.telemetry.as_ref().and_then(|telemetry| telemetry.logging.as_ref());

    let logger: InfoLogger = match logging {
        Some(LoggingConfig { enabled: false, .. }) => Environment::silent_logger(),
        Some(LoggingConfig { enabled: true, prefix: Some(prefix) }) => {
            let prefix = prefix.clone();
            Arc::new(move |msg: &str| println!("{prefix}{msg}"))
        }
        _ => Arc::new(|msg: &str| println!("{msg}")),
    };

    Environment::new_with_seed(config.random_seed.unwrap_or(0), logger)
}
