use crate::driver::DriverConfig;
use crate::env::*;
use crate::record::DEFAULT_APPLICATION;
use crate::target::{parse_target, TargetError};
use crate::tcp::TcpSinkConfig;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Everything the binary needs to run, resolved from the environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub sink: TcpSinkConfig,
    pub driver: DriverConfig,
    pub application: String,
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sink: TcpSinkConfig::default(),
            driver: DriverConfig::default(),
            application: DEFAULT_APPLICATION.to_string(),
            seed: None,
            log_level: LevelFilter::INFO,
        }
    }
}

/// Error returned when an environment value cannot be used.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{key}: expected {expected}, got `{value}`")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("LOGSTASH_TARGET: {0}")]
    Target(#[from] TargetError),
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_opt)
    }

    /// Resolve configuration through an arbitrary key lookup. Keys that
    /// resolve to `None` keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut sink = TcpSinkConfig {
            host: lookup(LOGSTASH_HOST_ENV).unwrap_or(defaults.sink.host),
            port: parse_or(&lookup, LOGSTASH_PORT_ENV, defaults.sink.port, "a port number")?,
            connect_timeout: parse_millis(&lookup, LOGSTASH_CONNECT_TIMEOUT_MS_ENV)?,
            write_timeout: parse_millis(&lookup, LOGSTASH_WRITE_TIMEOUT_MS_ENV)?,
        };
        if let Some(target) = lookup(LOGSTASH_TARGET_ENV) {
            sink = parse_target(&target, sink)?;
        }

        let min_pause = parse_millis(&lookup, LOGSTASH_MIN_INTERVAL_MS_ENV)?
            .unwrap_or(defaults.driver.min_pause);
        let max_pause = parse_millis(&lookup, LOGSTASH_MAX_INTERVAL_MS_ENV)?
            .unwrap_or(defaults.driver.max_pause);

        let log_level = match lookup(LOGSTASH_LOG_LEVEL_ENV) {
            Some(raw) => raw.trim().parse::<LevelFilter>().map_err(|_| ConfigError::Invalid {
                key: LOGSTASH_LOG_LEVEL_ENV,
                value: raw,
                expected: "one of trace, debug, info, warn, error, off",
            })?,
            None => defaults.log_level,
        };

        Ok(Self {
            sink,
            driver: DriverConfig::new(min_pause, max_pause),
            application: lookup(LOGSTASH_APPLICATION_ENV).unwrap_or(defaults.application),
            seed: lookup(LOGSTASH_SEED_ENV)
                .map(|raw| parse_value(LOGSTASH_SEED_ENV, raw, "an unsigned integer"))
                .transpose()?,
            log_level,
        })
    }
}

fn parse_value<T: std::str::FromStr>(
    key: &'static str,
    raw: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw,
        expected,
    })
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => parse_value(key, raw, expected),
        None => Ok(default),
    }
}

fn parse_millis<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| parse_value::<u64>(key, raw, "milliseconds").map(Duration::from_millis))
        .transpose()
}
