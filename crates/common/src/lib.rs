//! Multitouch Common Utilities
//!
//! Shared infrastructure for all multitouch crates:
//! - Error types and result aliases
//! - Input clock and sample-rate throttling
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
