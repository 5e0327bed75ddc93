/// Environment variable names read by the binary.
///
/// These are purely helpers; the library types take explicit values and
/// never touch the process environment themselves.

/// Collector host, e.g. `localhost`.
pub const LOGSTASH_HOST_ENV: &str = "LOGSTASH_HOST";

/// Collector TCP port.
pub const LOGSTASH_PORT_ENV: &str = "LOGSTASH_PORT";

/// Full target (`host:port` or `tcp://host:port`); wins over host/port.
pub const LOGSTASH_TARGET_ENV: &str = "LOGSTASH_TARGET";

/// Value of the `application` field.
pub const LOGSTASH_APPLICATION_ENV: &str = "LOGSTASH_APPLICATION";

/// Lower bound of the pause between events, in milliseconds.
pub const LOGSTASH_MIN_INTERVAL_MS_ENV: &str = "LOGSTASH_MIN_INTERVAL_MS";

/// Upper bound of the pause between events, in milliseconds.
pub const LOGSTASH_MAX_INTERVAL_MS_ENV: &str = "LOGSTASH_MAX_INTERVAL_MS";

/// Optional connect timeout in milliseconds.
pub const LOGSTASH_CONNECT_TIMEOUT_MS_ENV: &str = "LOGSTASH_CONNECT_TIMEOUT_MS";

/// Optional write timeout in milliseconds.
pub const LOGSTASH_WRITE_TIMEOUT_MS_ENV: &str = "LOGSTASH_WRITE_TIMEOUT_MS";

/// Optional fixed seed for the event generator.
pub const LOGSTASH_SEED_ENV: &str = "LOGSTASH_SEED";

/// Console verbosity: `trace`, `debug`, `info`, `warn`, `error` or `off`.
pub const LOGSTASH_LOG_LEVEL_ENV: &str = "LOGSTASH_LOG_LEVEL";

/// Read an environment variable, treating unset and blank alike.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
