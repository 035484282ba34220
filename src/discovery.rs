//! # Discovery Boundary
//!
//! The service-registry collaborator, specified only at its boundary. The
//! transport consumes `host:port` address strings produced by a registry
//! (lease-based registration, watch-based online/offline notification) and
//! depends on nothing about how registration or watching is implemented.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WireError};

/// A discovered service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub service: String,
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(service: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            service: service.into(),
            host: host.into(),
            port,
        }
    }

    /// The `host:port` form the transport's connect step consumes.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse a registry-produced `host:port` string for `service`.
    pub fn parse(service: &str, addr: &str) -> Result<Self> {
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| WireError::ConfigError(format!("invalid address: {addr:?}")))?;
        if host.is_empty() {
            return Err(WireError::ConfigError(format!("invalid address: {addr:?}")));
        }
        let port = port
            .parse()
            .map_err(|_| WireError::ConfigError(format!("invalid port in address: {addr:?}")))?;
        Ok(Self::new(service, host, port))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.service, self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = WireError;

    /// Parse `host:port` with an empty service name.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse("", s)
    }
}

/// Callback fired with `(service_name, address)` when an instance appears
/// or disappears.
pub type WatchCallback = Box<dyn Fn(&str, &str) + Send + Sync>;

/// Registers this node's address under a service name. Implementations
/// keep the registration alive (lease renewal, re-registration on renewal
/// failure) without involving the caller.
pub trait Registrar {
    fn register(&self, address: &str, service: &str) -> Result<()>;
}

/// Watches a service prefix. `on_online` is replayed immediately for every
/// currently-known instance, then both callbacks stream add/remove events.
pub trait Watch {
    fn watch(&self, prefix: &str, on_online: WatchCallback, on_offline: WatchCallback)
        -> Result<()>;
}
