use std::sync::Arc;

use logstash_sample_sender::config::AppConfig;
use logstash_sample_sender::driver::Driver;
use logstash_sample_sender::generator::EventGenerator;
use logstash_sample_sender::init::{init_tracing_with_config, LoggingConfig};
use logstash_sample_sender::sink::LogSink;
use logstash_sample_sender::tcp::TcpSink;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    init_tracing_with_config(LoggingConfig {
        max_level: config.log_level,
        ..LoggingConfig::default()
    })?;

    let generator = match config.seed {
        Some(seed) => EventGenerator::seeded(seed),
        None => EventGenerator::from_entropy(),
    }
    .with_application(config.application.clone());

    let sink: Arc<dyn LogSink> = Arc::new(TcpSink::new(config.sink.clone()));
    let mut driver = Driver::new(generator, sink, config.driver.clone());

    println!("Sending sample logs to Logstash at {}", config.sink.address());
    println!("Press Ctrl+C to stop\n");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            shutdown.cancel();
        }
    });

    driver.run(shutdown).await;
    println!("\nStopped sending logs");
    Ok(())
}
