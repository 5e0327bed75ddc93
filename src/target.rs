use crate::tcp::TcpSinkConfig;

/// Parse a collector target and fill in host and port of `base`.
///
/// Accepted forms:
/// - "localhost:5000"
/// - "tcp://logstash.internal:5044"
/// - "tcp://[::1]:5000"
///
/// Timeouts on `base` are kept as they are.
pub fn parse_target(target: &str, base: TcpSinkConfig) -> Result<TcpSinkConfig, TargetError> {
    let trimmed = target.trim();
    let rest = match trimmed.split_once("://") {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("tcp") => rest,
        Some((scheme, _)) => return Err(TargetError::UnsupportedScheme(scheme.to_string())),
        None => trimmed,
    };
    let rest = rest.trim_end_matches('/');

    let (host, port) = rest
        .rsplit_once(':')
        .ok_or_else(|| TargetError::MissingPort(target.to_string()))?;

    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(TargetError::MissingHost(target.to_string()));
    }

    let port: u16 = port
        .parse()
        .map_err(|_| TargetError::InvalidPort(port.to_string()))?;

    Ok(TcpSinkConfig {
        host: host.to_string(),
        port,
        ..base
    })
}

/// Error type returned when parsing a target string.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TargetError {
    #[error("unsupported target scheme `{0}`, only tcp is supported")]
    UnsupportedScheme(String),

    #[error("target `{0}` has no port")]
    MissingPort(String),

    #[error("target `{0}` has no host")]
    MissingHost(String),

    #[error("invalid port `{0}`")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn plain_host_port() {
        let cfg = parse_target("localhost:5000", TcpSinkConfig::default()).unwrap();
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.port, 5000);
    }

    #[test]
    fn tcp_scheme_and_ipv6() {
        let cfg = parse_target("TCP://logstash.internal:5044/", TcpSinkConfig::default()).unwrap();
        assert_eq!(cfg.address(), "logstash.internal:5044");

        let cfg = parse_target("tcp://[::1]:5000", TcpSinkConfig::default()).unwrap();
        assert_eq!(cfg.host, "::1");
        assert_eq!(cfg.port, 5000);
    }

    #[test]
    fn keeps_base_timeouts() {
        let base = TcpSinkConfig::default().with_connect_timeout(Duration::from_secs(2));
        let cfg = parse_target("collector:6000", base).unwrap();
        assert_eq!(cfg.connect_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn rejects_bad_targets() {
        let base = TcpSinkConfig::default;
        assert_eq!(
            parse_target("udp://host:5000", base()),
            Err(TargetError::UnsupportedScheme("udp".into()))
        );
        assert_eq!(
            parse_target("localhost", base()),
            Err(TargetError::MissingPort("localhost".into()))
        );
        assert_eq!(
            parse_target(":5000", base()),
            Err(TargetError::MissingHost(":5000".into()))
        );
        assert_eq!(
            parse_target("host:99999", base()),
            Err(TargetError::InvalidPort("99999".into()))
        );
    }
}
