//! Shared timeout constants used by configuration defaults.

use std::time::Duration;

/// Default timeout for connection attempts and single operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for graceful server shutdown.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);
