//! Translates the configuration file's `tcp://host:port` endpoint strings
//! (§4.3, §6) into addresses the standard socket APIs understand.

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::BrokerError;

/// `"tcp://*:5555"` or `"tcp://0.0.0.0:5555"` → `"0.0.0.0:5555"`, suitable
/// for `TcpListener::bind`.
pub fn to_bind_addr(endpoint: &str) -> Result<String, BrokerError> {
    let host_port = strip_scheme(endpoint)?;
    let (host, port) = host_port
        .rsplit_once(':')
        .ok_or_else(|| BrokerError::InvalidEndpoint(endpoint.to_string()))?;
    let host = if host == "*" { "0.0.0.0" } else { host };
    Ok(format!("{host}:{port}"))
}

/// `"tcp://localhost:5556"` → `"localhost:5556"`, suitable for
/// `TcpStream::connect`.
pub fn to_connect_addr(endpoint: &str) -> Result<String, BrokerError> {
    strip_scheme(endpoint).map(str::to_string)
}

fn strip_scheme(endpoint: &str) -> Result<&str, BrokerError> {
    endpoint
        .strip_prefix("tcp://")
        .ok_or_else(|| BrokerError::InvalidEndpoint(endpoint.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_replaces_wildcard_host() {
        assert_eq!(to_bind_addr("tcp://*:5555").unwrap(), "0.0.0.0:5555");
    }

    #[test]
    fn bind_addr_keeps_explicit_host() {
        assert_eq!(to_bind_addr("tcp://127.0.0.1:5555").unwrap(), "127.0.0.1:5555");
    }

    #[test]
    fn connect_addr_keeps_hostname() {
        assert_eq!(to_connect_addr("tcp://localhost:5556").unwrap(), "localhost:5556");
    }

    #[test]
    fn rejects_non_tcp_scheme() {
        assert!(to_bind_addr("ipc:///tmp/sock").is_err());
    }
}
