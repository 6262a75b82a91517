//! Listen address configuration.

use super::ConfigError;
use std::net::{SocketAddr, ToSocketAddrs};

/// Any interface, ephemeral port
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:0";

pub(super) fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

/// Resolve a `host:port` listen address.
///
/// Host names are resolved and the first address wins; port `0` asks the OS
/// for an ephemeral port. An empty address means [`DEFAULT_LISTEN_ADDR`].
pub fn resolve_listen_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    let addr = match addr.trim() {
        "" => DEFAULT_LISTEN_ADDR,
        trimmed => trimmed,
    };
    let invalid = |reason: String| ConfigError::InvalidListenAddr {
        addr: addr.to_string(),
        reason,
    };

    if let Ok(parsed) = addr.parse::<SocketAddr>() {
        return Ok(parsed);
    }
    addr.to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no addresses resolved".to_string()))
}
