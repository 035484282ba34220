//! # lvwire
//!
//! Minimal RPC transport: a length-value ("LV") frame protocol over
//! asynchronous TCP, with a codec-agnostic handler registry that turns
//! decoded request frames into response frames.
//!
//! ## Architecture
//! - [`core`]: byte buffering, the LV frame codec, the per-connection
//!   accumulator that resolves TCP stream fragmentation ("sticky packets"),
//!   and tag-keyed payload serialization
//! - [`transport`]: async TCP listener, server connections, and outbound
//!   connections: single-flight per direction, no per-connection locks
//! - [`protocol`]: the tag-keyed handler registry and dispatch path
//! - [`service`]: high-level [`Provider`](service::Provider) /
//!   [`Consumer`](service::Consumer) wrappers
//! - [`discovery`]: the consumed service-registry boundary
//!
//! ## Wire Format
//! ```text
//! [length (decimal)] [\r\n] [tag: "PB" | "JS"] [\r\n] [payload] [\r\n]
//! ```
//!
//! ## Example
//! ```no_run
//! use lvwire::core::frame::Tag;
//! use lvwire::error::Result;
//! use lvwire::service::{Consumer, Provider};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Add { a: i64, b: i64 }
//!
//! #[derive(Serialize, Deserialize)]
//! struct Sum { result: i64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut provider = Provider::new("127.0.0.1:9000");
//!     provider.register_binary(|req: Add| Ok(Sum { result: req.a + req.b }));
//!     let server = provider.start().await?;
//!
//!     let mut client = Consumer::connect("127.0.0.1:9000").await?;
//!     client.send_value(Tag::Binary, &Add { a: 1, b: 2 })?;
//!     let frame = client.next_frame().await.expect("response");
//!     assert_eq!(frame.tag, Tag::Binary);
//!
//!     server.stop().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod discovery;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod utils;

pub use config::NetworkConfig;
pub use core::accumulator::FrameAccumulator;
pub use core::buffer::ByteBuffer;
pub use core::frame::{pack, unpack_all, Frame, Tag};
pub use error::{Result, WireError};
pub use protocol::router::{Handler, Router};
pub use service::{Consumer, Provider};
