//! Shared types, errors, and configuration for sqlscope.
//!
//! Everything that crosses a crate boundary lives here: the message and
//! result models, the chart-type tag vocabulary, the top-level error type,
//! and the TOML configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::SqlscopeConfig;
pub use error::{Result, ScopeError};
pub use types::*;
