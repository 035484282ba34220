//! # Core Components
//!
//! Byte buffering, LV frame codec, and payload serialization.
//!
//! This module is the foundation of the transport: connections accumulate
//! socket bytes in a [`buffer::ByteBuffer`], the per-connection
//! [`accumulator::FrameAccumulator`] resolves TCP stream fragmentation into
//! complete frames, and [`serialization`] maps payload bytes to values.
//!
//! ## Wire Format
//! ```text
//! [length (decimal)] [\r\n] [tag (2)] [\r\n] [payload (length bytes)] [\r\n]
//! ```
//!
//! ## Security
//! - Maximum frame payload: 16 MB (prevents memory exhaustion)
//! - Length fields are validated before any allocation

pub mod accumulator;
pub mod buffer;
pub mod frame;
pub mod serialization;
