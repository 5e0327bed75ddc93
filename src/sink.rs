use crate::record::LogRecord;
use async_trait::async_trait;
use std::io;
use std::time::Duration;

/// Destination for [`LogRecord`]s produced by the driver loop.
///
/// Implementations own their transport configuration (address, timeouts)
/// and perform exactly one delivery attempt per call.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver a single record.
    ///
    /// **Returns**
    /// - `Ok(())` once the record has been handed to the transport.
    /// - `Err(SendError)` describing why it was not. The record is lost;
    ///   sinks never retry or queue on their own.
    async fn send(&self, record: &LogRecord) -> Result<(), SendError>;
}

/// Why a single send attempt failed.
#[derive(thiserror::Error, Debug)]
pub enum SendError {
    #[error("failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to {addr}: {source}")]
    Write {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to close connection to {addr}: {source}")]
    Close {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("{op} to {addr} timed out after {after:?}")]
    Timeout {
        op: &'static str,
        addr: String,
        after: Duration,
    },
}

impl SendError {
    /// `true` when the remote end actively refused the connection.
    pub fn is_connection_refused(&self) -> bool {
        matches!(
            self,
            SendError::Connect { source, .. } if source.kind() == io::ErrorKind::ConnectionRefused
        )
    }
}
