use crate::record::{LogLevel, LogRecord, DEFAULT_APPLICATION};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Actions a synthetic user can perform.
pub const ACTIONS: [&str; 5] = [
    "user_login",
    "api_call",
    "database_query",
    "file_upload",
    "email_sent",
];

pub const USER_ID_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;
pub const DURATION_MS_RANGE: std::ops::RangeInclusive<u32> = 10..=5000;
pub const IP_OCTET_RANGE: std::ops::RangeInclusive<u8> = 1..=255;

/// Produces random [`LogRecord`]s that look like application activity.
pub struct EventGenerator<R = StdRng> {
    rng: R,
    application: String,
}

impl EventGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator; the same seed yields the same sequence
    /// of levels and metadata.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> EventGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            application: DEFAULT_APPLICATION.to_string(),
        }
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn next_record(&mut self) -> LogRecord {
        let action = *ACTIONS.choose(&mut self.rng).unwrap_or(&ACTIONS[0]);
        let level = *LogLevel::ALL.choose(&mut self.rng).unwrap_or(&LogLevel::Info);

        let user_id = self.rng.gen_range(USER_ID_RANGE);
        let duration_ms = self.rng.gen_range(DURATION_MS_RANGE);
        let octet = self.rng.gen_range(IP_OCTET_RANGE);

        LogRecord::new(format!("User performed action: {}", action), level)
            .with_application(self.application.clone())
            .with_field("user_id", user_id)
            .with_field("action", action)
            .with_field("duration_ms", duration_ms)
            .with_field("ip_address", format!("192.168.1.{}", octet))
    }
}

impl<R: Rng> Iterator for EventGenerator<R> {
    type Item = LogRecord;

    fn next(&mut self) -> Option<LogRecord> {
        Some(self.next_record())
    }
}
