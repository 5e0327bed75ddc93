use crate::generator::EventGenerator;
use crate::record::LogRecord;
use crate::sink::LogSink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Pacing of the driver loop.
///
/// After every send the loop sleeps for a duration drawn uniformly from
/// `[min_pause, max_pause]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub min_pause: Duration,
    pub max_pause: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            min_pause: Duration::from_millis(500),
            max_pause: Duration::from_millis(2000),
        }
    }
}

impl DriverConfig {
    /// Bounds given in the wrong order are swapped.
    pub fn new(min_pause: Duration, max_pause: Duration) -> Self {
        if min_pause <= max_pause {
            Self { min_pause, max_pause }
        } else {
            Self {
                min_pause: max_pause,
                max_pause: min_pause,
            }
        }
    }

    fn next_pause<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min_pause >= self.max_pause {
            return self.min_pause;
        }
        let secs = rng.gen_range(self.min_pause.as_secs_f64()..=self.max_pause.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Totals reported once the loop has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub sent: u64,
    pub failed: u64,
}

/// Generate → send → pause loop feeding a [`LogSink`].
///
/// Send failures are logged and counted, never propagated; the only way
/// out of [`Driver::run`] is the cancellation token.
pub struct Driver {
    generator: EventGenerator<StdRng>,
    sink: Arc<dyn LogSink>,
    config: DriverConfig,
    pause_rng: StdRng,
    state: watch::Sender<DriverState>,
    /// Records accepted by the sink.
    pub sent_events: Arc<AtomicU64>,
    /// Records the sink failed to deliver.
    pub failed_events: Arc<AtomicU64>,
}

impl Driver {
    pub fn new(generator: EventGenerator<StdRng>, sink: Arc<dyn LogSink>, config: DriverConfig) -> Self {
        Self {
            generator,
            sink,
            config,
            pause_rng: StdRng::from_entropy(),
            state: watch::channel(DriverState::Stopped).0,
            sent_events: Arc::new(AtomicU64::new(0)),
            failed_events: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Use a fixed seed for the pause durations as well.
    pub fn with_pause_seed(mut self, seed: u64) -> Self {
        self.pause_rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> DriverState {
        *self.state.borrow()
    }

    /// Receiver that follows the loop state while `run` holds the driver.
    pub fn state_handle(&self) -> watch::Receiver<DriverState> {
        self.state.subscribe()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            sent: self.sent_events.load(Ordering::Relaxed),
            failed: self.failed_events.load(Ordering::Relaxed),
        }
    }

    /// Run until `shutdown` is cancelled.
    ///
    /// Cancellation interrupts both the pause and an in-flight send; an
    /// interrupted send is neither counted as sent nor as failed.
    pub async fn run(&mut self, shutdown: CancellationToken) -> RunSummary {
        self.state.send_replace(DriverState::Running);

        while !shutdown.is_cancelled() {
            let record = self.generator.next_record();

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = self.send_one(&record) => {}
            }

            let pause = self.config.next_pause(&mut self.pause_rng);
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = sleep(pause) => {}
            }
        }

        self.state.send_replace(DriverState::Stopped);
        let summary = self.summary();
        info!(sent = summary.sent, failed = summary.failed, "stopped sending logs");
        summary
    }

    /// Push one record through the sink and account for the outcome.
    pub async fn send_one(&self, record: &LogRecord) -> bool {
        match self.sink.send(record).await {
            Ok(()) => {
                self.sent_events.fetch_add(1, Ordering::Relaxed);
                info!("Sent: {}", record);
                true
            }
            Err(e) => {
                self.failed_events.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "Failed to send log");
                false
            }
        }
    }
}
