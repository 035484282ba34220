//! # Utility Modules
//!
//! Supporting utilities: logging setup and shared timeout constants.

pub mod logging;
pub mod timeout;
