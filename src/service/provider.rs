//! # Provider
//!
//! Server-facing wrapper: register business handlers, then start a listener
//! routing every connection's frames through them.
//!
//! Registration happens strictly before `start()`; afterwards the registry
//! is shared read-only across all connection tasks.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::protocol::router::{Handler, Router};
use crate::transport::tcp::{Listener, ListenerHandle};
use crate::transport::OnMessageFactory;
use crate::utils::timeout::SHUTDOWN_TIMEOUT;

/// An RPC server: a [`Router`] plus the listener that feeds it.
pub struct Provider {
    addr: String,
    router: Router,
    shutdown_timeout: Duration,
}

impl Provider {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            router: Router::new(),
            shutdown_timeout: SHUTDOWN_TIMEOUT,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let mut provider = Self::new(config.address.clone());
        provider.shutdown_timeout = config.shutdown_timeout;
        provider
    }

    /// Register a handler for its tag.
    pub fn register<H: Handler + 'static>(&mut self, handler: H) {
        self.router.register(handler);
    }

    /// Register a binary-schema business function.
    pub fn register_binary<Req, Resp, F>(&mut self, func: F)
    where
        Req: DeserializeOwned + Serialize + 'static,
        Resp: Serialize + DeserializeOwned + 'static,
        F: Fn(Req) -> Result<Resp> + Send + Sync + 'static,
    {
        self.router.register_binary(func);
    }

    /// Register a structured (JSON) business function.
    pub fn register_structured<F>(&mut self, func: F)
    where
        F: Fn(serde_json::Value) -> Result<serde_json::Value> + Send + Sync + 'static,
    {
        self.router.register_structured(func);
    }

    /// Bind the listener and spawn the accept loop. The registry is frozen
    /// from here on.
    pub async fn start(self) -> Result<ProviderHandle> {
        let router = Arc::new(self.router);
        let factory: OnMessageFactory = Arc::new(move || router.session_callback());

        let (listener, handle) = Listener::bind(&self.addr, factory).await?;
        let join = tokio::spawn(listener.run());

        Ok(ProviderHandle {
            listener: handle,
            join,
            shutdown_timeout: self.shutdown_timeout,
        })
    }
}

/// Running server handle.
pub struct ProviderHandle {
    listener: ListenerHandle,
    join: JoinHandle<Result<()>>,
    shutdown_timeout: Duration,
}

impl ProviderHandle {
    /// The bound address, e.g. for port-0 binds.
    pub fn local_addr(&self) -> std::net::SocketAddr {
        self.listener.local_addr()
    }

    /// Stop accepting and wait for the accept loop to finish. Connections
    /// already accepted keep running.
    pub async fn stop(self) {
        self.listener.stop().await;
        if tokio::time::timeout(self.shutdown_timeout, self.join)
            .await
            .is_err()
        {
            warn!("accept loop did not stop within the shutdown timeout");
        }
    }
}
