//! # Transport Layer
//!
//! Asynchronous TCP machinery: the accept loop ([`tcp::Listener`]), the
//! per-socket server state machine ([`tcp::Connection`]), and the client
//! side ([`client::OutboundConnection`]).
//!
//! The transport is codec-agnostic: it moves bytes between sockets and
//! [`ByteBuffer`]s and invokes a caller-supplied message callback. Framing
//! lives entirely behind that callback.
//!
//! ## Concurrency model
//! Each connection is one tokio task; its awaits are sequential, so at most
//! one operation is outstanding per direction and no per-connection locking
//! exists. The scheduler owns the single canonical reference to each
//! connection task; stopping a listener never touches accepted connections.

use std::sync::Arc;

use crate::core::buffer::ByteBuffer;

pub mod client;
pub mod tcp;

/// Per-connection message callback: receives the connection's receive
/// buffer (read side) and a fresh, empty output buffer. Whatever it appends
/// to the output buffer is written back before the next read; an empty
/// output buffer resumes reading immediately.
pub type OnMessage = Box<dyn FnMut(&mut ByteBuffer, &mut ByteBuffer) + Send>;

/// Produces one [`OnMessage`] per accepted connection, so per-connection
/// state (the frame accumulator above all) is never shared.
pub type OnMessageFactory = Arc<dyn Fn() -> OnMessage + Send + Sync>;

/// Receive-only callback driven by an outbound connection's read loop.
pub type OnRecv = Box<dyn FnMut(&mut ByteBuffer) + Send>;

/// Initial receive buffer size per connection (8 KB).
pub const INITIAL_RECV_BUFFER: usize = 8 * 1024;

/// Writable headroom requested before every read.
pub const READ_CHUNK: usize = 1024;
