//! # Service Layer
//!
//! High-level wrappers over transport + protocol: [`provider::Provider`]
//! serves registered handlers, [`consumer::Consumer`] calls them.

pub mod consumer;
pub mod provider;

pub use consumer::Consumer;
pub use provider::{Provider, ProviderHandle};
