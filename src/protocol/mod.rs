//! # Protocol Layer
//!
//! Handler registry and frame dispatch, wired as the message callback each
//! connection invokes after a read completes.

pub mod router;

pub use router::{BinaryHandler, Handler, Router, StructuredHandler};
