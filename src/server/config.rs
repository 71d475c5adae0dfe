//! Server configuration

use std::net::SocketAddr;

/// Default port the viewer's WebSocket connects to
pub const DEFAULT_SOCKET_PORT: u16 = 4444;

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the viewer WebSocket listener binds to
    pub bind_addr: SocketAddr,

    /// Maximum lines forwarded per second (None = unlimited)
    pub rate: Option<u32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_SOCKET_PORT)),
            rate: None,
        }
    }
}

impl ServerConfig {
    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the forwarding rate; zero disables rate limiting
    pub fn rate(mut self, rate: u32) -> Self {
        self.rate = if rate > 0 { Some(rate) } else { None };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), DEFAULT_SOCKET_PORT);
        assert!(config.rate.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:5555".parse().unwrap();
        let config = ServerConfig::default().bind(addr).rate(30);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.rate, Some(30));
    }

    #[test]
    fn test_zero_rate_disables_limiting() {
        let config = ServerConfig::default().rate(0);

        assert!(config.rate.is_none());
    }
}
