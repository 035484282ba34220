//! # Error Types
//!
//! Error handling for the LV transport.
//!
//! This module defines all error variants that can occur during transport
//! operations, from low-level I/O errors to frame-level protocol violations.
//!
//! ## Error Categories
//! - **I/O Errors**: socket connect/read/write failures
//! - **Frame Errors**: bad length fields, unknown tags, gap mismatches
//! - **Codec Errors**: payload serialization/deserialization failures
//! - **Dispatch Errors**: missing handlers, handler faults
//!
//! EOF and explicit cancellation are *not* represented here: the transport
//! treats both as expected terminal conditions, not failures.

use std::io;
use thiserror::Error;

/// Primary error type for all transport operations.
#[derive(Error, Debug)]
pub enum WireError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Deserialize error: {0}")]
    DeserializeError(String),

    #[error("Invalid frame length field: {0}")]
    InvalidLength(String),

    #[error("Frame too large: {0} bytes")]
    OversizedFrame(usize),

    #[error("Unknown frame tag: {0:?}")]
    UnknownTag(String),

    #[error("Frame gap mismatch")]
    GapMismatch,

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Connect timed out")]
    ConnectTimeout,

    #[error("Handler failed: {0}")]
    HandlerFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using WireError
pub type Result<T> = std::result::Result<T, WireError>;
