//! # Consumer
//!
//! Client-facing wrapper: one outbound connection plus its own frame
//! accumulator. Sends packed frames and yields the peer's complete frames
//! in arrival order through an async queue, even when a response arrives
//! split across any number of reads.

use std::net::SocketAddr;

use tokio::sync::mpsc;
use tracing::warn;

use crate::config::ClientConfig;
use crate::core::accumulator::FrameAccumulator;
use crate::core::frame::{pack, Frame, Tag};
use crate::core::serialization::TagCodec;
use crate::discovery::Endpoint;
use crate::error::{Result, WireError};
use crate::transport::client::OutboundConnection;
use crate::transport::OnRecv;

/// An RPC client over one connection.
pub struct Consumer {
    conn: OutboundConnection,
    frames: mpsc::UnboundedReceiver<Frame>,
}

impl Consumer {
    /// Connect to `addr` ("host:port").
    pub async fn connect(addr: &str) -> Result<Self> {
        let (tx, frames) = mpsc::unbounded_channel();
        let mut acc = FrameAccumulator::new();

        let on_recv: OnRecv = Box::new(move |recv| {
            let bytes = recv.read_all();
            acc.append(&bytes);
            loop {
                match acc.next_frame() {
                    Ok(Some(frame)) => {
                        // Receiver dropped means the consumer is gone.
                        if tx.send(frame).is_err() {
                            return;
                        }
                    }
                    Ok(None) => return,
                    Err(e) => {
                        warn!(error = %e, discarded = acc.len(), "unparseable response stream, discarding");
                        acc.clear();
                        return;
                    }
                }
            }
        });

        let conn = OutboundConnection::connect(addr, on_recv).await?;
        Ok(Self { conn, frames })
    }

    /// Connect to an endpoint produced by the discovery collaborator.
    pub async fn connect_endpoint(endpoint: &Endpoint) -> Result<Self> {
        Self::connect(&endpoint.addr()).await
    }

    /// Connect per configuration, bounding the connection attempt.
    pub async fn from_config(config: &ClientConfig) -> Result<Self> {
        tokio::time::timeout(config.connect_timeout, Self::connect(&config.address))
            .await
            .map_err(|_| WireError::ConnectTimeout)?
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.conn.peer_addr()
    }

    /// Pack and queue one frame.
    pub fn send_frame(&self, tag: Tag, payload: &[u8]) -> Result<()> {
        self.conn.send(pack(tag, payload))
    }

    /// Encode a value with the tag's codec, then pack and queue it.
    pub fn send_value<T: TagCodec>(&self, tag: Tag, value: &T) -> Result<()> {
        let payload = value.encode_payload(tag)?;
        self.send_frame(tag, &payload)
    }

    /// Queue pre-packed wire bytes untouched (e.g. several frames at once).
    pub fn send_raw(&self, wire: Vec<u8>) -> Result<()> {
        self.conn.send(wire)
    }

    /// Next complete frame from the peer, in arrival order. `None` once the
    /// connection is gone and the queue is drained.
    pub async fn next_frame(&mut self) -> Option<Frame> {
        self.frames.recv().await
    }

    /// Cancel outstanding operations and release the socket.
    pub fn close(&self) {
        self.conn.close();
    }
}
