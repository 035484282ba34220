//! # TCP Listener and Server Connection
//!
//! The [`Listener`] binds one port and runs an accept loop; every accepted
//! socket becomes a [`Connection`] task running the
//! `Reading -> Dispatching -> (Writing -> Reading) | Reading` cycle until
//! EOF, cancellation, or an I/O error.
//!
//! A single accept failure is logged and the loop re-arms; stopping the
//! listener closes the listening socket only, and in-flight connections run
//! to completion.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::core::buffer::ByteBuffer;
use crate::error::Result;
use crate::transport::{OnMessage, OnMessageFactory, INITIAL_RECV_BUFFER, READ_CHUNK};

/// Accepts connections on one port and spawns a [`Connection`] per socket.
pub struct Listener {
    listener: TcpListener,
    factory: OnMessageFactory,
    shutdown_rx: mpsc::Receiver<()>,
    local_addr: SocketAddr,
}

/// Handle for stopping a running [`Listener`].
#[derive(Clone)]
pub struct ListenerHandle {
    shutdown_tx: mpsc::Sender<()>,
    local_addr: SocketAddr,
}

impl ListenerHandle {
    /// The bound address (useful when binding port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Close the listening socket. Accepted connections are unaffected.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

impl Listener {
    /// Bind `addr` and prepare the accept loop. `factory` is invoked once
    /// per accepted connection to build its message callback.
    pub async fn bind(addr: &str, factory: OnMessageFactory) -> Result<(Self, ListenerHandle)> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let handle = ListenerHandle {
            shutdown_tx,
            local_addr,
        };
        Ok((
            Self {
                listener,
                factory,
                shutdown_rx,
                local_addr,
            },
            handle,
        ))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept until stopped. Accept failures are logged and the loop
    /// re-arms immediately.
    pub async fn run(mut self) -> Result<()> {
        info!(address = %self.local_addr, "listening");

        loop {
            tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!(address = %self.local_addr, "listener stopped");
                    return Ok(());
                }

                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer)) => {
                            debug!(peer = %peer, "accepted connection");
                            Connection::spawn(stream, peer, (self.factory)());
                        }
                        Err(e) => {
                            error!(error = %e, "accept failed");
                        }
                    }
                }
            }
        }
    }
}

/// Server side of one accepted socket.
///
/// The task owns the socket, the receive buffer, and the message callback;
/// its sequential awaits guarantee a single outstanding operation.
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    recv: ByteBuffer,
    on_message: OnMessage,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, on_message: OnMessage) -> Self {
        Self {
            stream,
            peer,
            recv: ByteBuffer::with_capacity(INITIAL_RECV_BUFFER),
            on_message,
        }
    }

    /// Hand the connection to the scheduler, which holds the one owning
    /// reference until the task finishes.
    pub fn spawn(stream: TcpStream, peer: SocketAddr, on_message: OnMessage) -> JoinHandle<()> {
        let conn = Self::new(stream, peer, on_message);
        tokio::spawn(conn.run())
    }

    /// Read cycle: read some bytes, dispatch once, write back whatever the
    /// callback produced, repeat. Returns on EOF, cancellation, or the
    /// first I/O error (reported once).
    async fn run(mut self) {
        loop {
            // Reading
            self.recv.ensure_capacity(READ_CHUNK);
            let n = match self.stream.read(self.recv.writable_mut()).await {
                Ok(0) => {
                    debug!(peer = %self.peer, "connection closed by peer");
                    return;
                }
                Ok(n) => n,
                Err(e) => {
                    error!(peer = %self.peer, error = %e, "read failed");
                    return;
                }
            };
            self.recv.advance_write(n);
            debug!(peer = %self.peer, bytes = n, "read completed");

            // Dispatching: full receive buffer in, fresh output buffer out.
            let mut send = ByteBuffer::new();
            (self.on_message)(&mut self.recv, &mut send);

            // Writing, skipped entirely for fire-and-forget flows.
            if !send.is_empty() {
                let data = send.read_all();
                if let Err(e) = self.stream.write_all(&data).await {
                    error!(peer = %self.peer, error = %e, "write failed");
                    return;
                }
                debug!(peer = %self.peer, bytes = data.len(), "write completed");
            }
        }
    }
}
