use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Console logging configuration.
///
/// **Fields**
/// - `max_level`: most verbose level that is printed. Per-send progress
///   lines are `INFO`, failures `WARN`, socket details `DEBUG`.
/// - `ansi`: emit color escape codes. Defaults to whether stdout is a
///   terminal, so piped or redirected output stays plain.
/// - `with_target`: prefix each line with the emitting module path.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub max_level: LevelFilter,
    pub ansi: bool,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            max_level: LevelFilter::INFO,
            ansi: std::io::stdout().is_terminal(),
            with_target: false,
        }
    }
}

/// Install a global `tracing` subscriber that prints to stdout.
///
/// The subscriber is a [`Registry`] with a [`LevelFilter`] and a `fmt`
/// layer on top. Fails if another global subscriber is already set.
pub fn init_tracing_with_config(config: LoggingConfig) -> Result<(), SetGlobalDefaultError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(config.ansi)
        .with_target(config.with_target);

    let subscriber = Registry::default().with(config.max_level).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
}
