//! Centralized error handling module
//!
//! All fallible operations in the crate return [`PushResult`]; the CLI wraps
//! these in `anyhow` at the binary boundary.

pub mod types;

pub use types::{PushError, PushResult};
