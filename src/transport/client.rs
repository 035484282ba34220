//! # Outbound Connection
//!
//! Client side of the transport: resolve, connect, then run a receive-only
//! read loop while writes go through a dedicated writer task.
//!
//! Reads and writes are independent directions on the same socket and may
//! overlap; each direction is itself single-flight (one task per
//! direction, sequential awaits).

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::core::buffer::ByteBuffer;
use crate::error::{Result, WireError};
use crate::transport::{OnRecv, INITIAL_RECV_BUFFER, READ_CHUNK};

/// Client connection to a remote endpoint.
///
/// There is no automatic write-back: received bytes only drive `on_recv`,
/// and outgoing data goes through [`send`](OutboundConnection::send).
pub struct OutboundConnection {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
    peer: SocketAddr,
}

impl OutboundConnection {
    /// Resolve `addr` ("host:port"), connect, and start the read loop.
    pub async fn connect(addr: &str, on_recv: OnRecv) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let peer = stream.peer_addr()?;
        info!(peer = %peer, "connected");

        let (read_half, write_half) = stream.into_split();
        let (tx, rx) = mpsc::unbounded_channel();

        let reader = tokio::spawn(read_loop(read_half, on_recv, peer));
        let writer = tokio::spawn(write_loop(write_half, rx, peer));

        Ok(Self {
            tx,
            reader,
            writer,
            peer,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Queue bytes for writing. Callable at any time after connect; the
    /// writer task serializes writes, and they may overlap an in-flight
    /// read.
    pub fn send(&self, data: Vec<u8>) -> Result<()> {
        self.tx.send(data).map_err(|_| WireError::ConnectionClosed)
    }

    /// Cancel outstanding operations and release the socket.
    pub fn close(&self) {
        self.reader.abort();
        self.writer.abort();
        debug!(peer = %self.peer, "outbound connection closed");
    }
}

impl Drop for OutboundConnection {
    fn drop(&mut self) {
        self.close();
    }
}

/// Single-flight read loop driving the receive callback.
async fn read_loop(mut half: OwnedReadHalf, mut on_recv: OnRecv, peer: SocketAddr) {
    let mut recv = ByteBuffer::with_capacity(INITIAL_RECV_BUFFER);
    loop {
        recv.ensure_capacity(READ_CHUNK);
        match half.read(recv.writable_mut()).await {
            Ok(0) => {
                debug!(peer = %peer, "server closed connection");
                return;
            }
            Ok(n) => {
                recv.advance_write(n);
                debug!(peer = %peer, bytes = n, "read completed");
                on_recv(&mut recv);
            }
            Err(e) => {
                error!(peer = %peer, error = %e, "read failed");
                return;
            }
        }
    }
}

/// Single-flight write loop; drains the send queue in order.
async fn write_loop(
    mut half: OwnedWriteHalf,
    mut rx: mpsc::UnboundedReceiver<Vec<u8>>,
    peer: SocketAddr,
) {
    while let Some(data) = rx.recv().await {
        if let Err(e) = half.write_all(&data).await {
            error!(peer = %peer, error = %e, "write failed");
            return;
        }
        debug!(peer = %peer, bytes = data.len(), "write completed");
    }
}
