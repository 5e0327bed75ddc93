use std::collections::BTreeSet;
use std::time::Duration;

use logstash_sample_sender::record::{LogLevel, LogRecord};
use logstash_sample_sender::sink::LogSink;
use logstash_sample_sender::tcp::{TcpSink, TcpSinkConfig};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accept a single connection and return everything written to it.
fn accept_once(listener: TcpListener) -> JoinHandle<String> {
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let mut buf = String::new();
        stream.read_to_string(&mut buf).await.expect("read");
        buf
    })
}

fn seed_record() -> LogRecord {
    LogRecord::new("User performed action: api_call", LogLevel::Error)
        .with_field("action", "api_call")
        .with_field("user_id", 42)
        .with_field("duration_ms", 1200)
        .with_field("ip_address", "192.168.1.7")
}

#[tokio::test]
async fn collector_receives_exactly_one_json_line() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let received = accept_once(listener);

    let sink = TcpSink::new(TcpSinkConfig::new("127.0.0.1", port));
    sink.send(&seed_record()).await.expect("send should succeed");

    let payload = tokio::time::timeout(Duration::from_secs(5), received)
        .await
        .unwrap()
        .unwrap();

    assert!(payload.ends_with('\n'));
    let lines: Vec<&str> = payload.lines().collect();
    assert_eq!(lines.len(), 1);

    let value: Value = serde_json::from_str(lines[0]).unwrap();
    let obj = value.as_object().unwrap();

    let keys: BTreeSet<&str> = obj.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = [
        "message",
        "level",
        "timestamp",
        "application",
        "action",
        "user_id",
        "duration_ms",
        "ip_address",
    ]
    .into_iter()
    .collect();
    assert_eq!(keys, expected);

    assert_eq!(obj["message"], "User performed action: api_call");
    assert_eq!(obj["level"], "error");
    assert_eq!(obj["action"], "api_call");
    assert_eq!(obj["user_id"], 42);
    assert_eq!(obj["duration_ms"], 1200);
    assert_eq!(obj["ip_address"], "192.168.1.7");
    assert_eq!(obj["application"], "sample-python-app");

    let ts = obj["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "bad timestamp {}", ts);
}

#[tokio::test]
async fn each_send_uses_a_fresh_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let mut payloads = Vec::new();
        for _ in 0..3 {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut buf = String::new();
            stream.read_to_string(&mut buf).await.expect("read");
            payloads.push(buf);
        }
        payloads
    });

    let sink = TcpSink::new(TcpSinkConfig::new("127.0.0.1", port));
    for i in 0..3 {
        let record = LogRecord::new(format!("event {}", i), LogLevel::Info);
        sink.send(&record).await.unwrap();
    }

    let payloads = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payloads.len(), 3);
    for (i, payload) in payloads.iter().enumerate() {
        assert_eq!(payload.matches('\n').count(), 1);
        let value: Value = serde_json::from_str(payload.trim_end()).unwrap();
        assert_eq!(value["message"], format!("event {}", i));
    }
}

#[tokio::test]
async fn refused_connection_is_reported_not_raised() {
    // Grab a free port, then close the listener so nothing is there.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let sink = TcpSink::new(TcpSinkConfig::new("127.0.0.1", port));
    let err = sink.send(&seed_record()).await.unwrap_err();

    assert!(err.is_connection_refused(), "unexpected error: {}", err);
    assert!(err.to_string().contains(&format!("127.0.0.1:{}", port)));
}
