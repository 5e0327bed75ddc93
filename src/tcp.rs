use crate::record::LogRecord;
use crate::sink::{LogSink, SendError};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::debug;

/// Where and how [`TcpSink`] connects.
///
/// Both timeouts default to `None`, meaning a silent collector can block
/// a send indefinitely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TcpSinkConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl Default for TcpSinkConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5000,
            connect_timeout: None,
            write_timeout: None,
        }
    }
}

impl TcpSinkConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// `host:port` string handed to the resolver.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Serialize a record as one line of newline-delimited JSON.
///
/// The output is compact JSON followed by exactly one `\n`. String
/// values are escaped by `serde_json`, so the only raw newline is the
/// terminator.
pub fn encode_line(record: &LogRecord) -> Result<Vec<u8>, SendError> {
    let mut line = serde_json::to_vec(record)?;
    line.push(b'\n');
    Ok(line)
}

/// [`LogSink`] for a Logstash `tcp` input with the `json_lines` codec.
///
/// Every call opens a fresh connection, writes one line and closes it.
/// Connections are never reused and failed sends are not retried.
#[derive(Clone, Debug)]
pub struct TcpSink {
    config: TcpSinkConfig,
}

impl TcpSink {
    pub fn new(config: TcpSinkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TcpSinkConfig {
        &self.config
    }

    async fn write_line(&self, addr: &str, line: &[u8]) -> Result<(), SendError> {
        let mut stream = with_timeout(
            self.config.connect_timeout,
            "connect",
            addr,
            TcpStream::connect(addr),
        )
        .await?
        .map_err(|source| SendError::Connect {
            addr: addr.to_string(),
            source,
        })?;

        let written = with_timeout(self.config.write_timeout, "write", addr, stream.write_all(line))
            .await
            .and_then(|res| {
                res.map_err(|source| SendError::Write {
                    addr: addr.to_string(),
                    source,
                })
            });

        // Close regardless of how the write went; a write error takes
        // precedence over a close error.
        let closed = stream.shutdown().await.map_err(|source| SendError::Close {
            addr: addr.to_string(),
            source,
        });

        written.and(closed)
    }
}

async fn with_timeout<F: Future>(
    limit: Option<Duration>,
    op: &'static str,
    addr: &str,
    fut: F,
) -> Result<F::Output, SendError> {
    match limit {
        Some(after) => tokio::time::timeout(after, fut)
            .await
            .map_err(|_| SendError::Timeout {
                op,
                addr: addr.to_string(),
                after,
            }),
        None => Ok(fut.await),
    }
}

#[async_trait]
impl LogSink for TcpSink {
    async fn send(&self, record: &LogRecord) -> Result<(), SendError> {
        let line = encode_line(record)?;
        let addr = self.config.address();
        self.write_line(&addr, &line).await?;
        debug!(addr = %addr, bytes = line.len(), "log line written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LogLevel;

    #[test]
    fn line_has_single_trailing_newline() {
        let record = LogRecord::new("multi\nline\r\nmessage", LogLevel::Info)
            .with_field("note", "tab\there\nand newline");

        let line = encode_line(&record).unwrap();
        let text = std::str::from_utf8(&line).unwrap();

        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), 1);
        assert!(!text.trim_end_matches('\n').contains('\r'));

        let parsed: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(parsed["message"], "multi\nline\r\nmessage");
    }

    #[test]
    fn default_target_is_local_logstash() {
        let config = TcpSinkConfig::default();
        assert_eq!(config.address(), "localhost:5000");
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.write_timeout, None);
    }

    #[test]
    fn builders_set_timeouts() {
        let config = TcpSinkConfig::new("10.1.2.3", 5044)
            .with_connect_timeout(Duration::from_secs(1))
            .with_write_timeout(Duration::from_millis(500));
        assert_eq!(config.address(), "10.1.2.3:5044");
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(1)));
        assert_eq!(config.write_timeout, Some(Duration::from_millis(500)));
    }

    #[test]
    fn ipv6_hosts_are_bracketed() {
        assert_eq!(TcpSinkConfig::new("::1", 5000).address(), "[::1]:5000");
    }
}
