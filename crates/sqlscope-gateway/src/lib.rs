//! Query backend access for sqlscope.
//!
//! The gateway is the only part of the system that talks to the backend.
//! Both operations are single-shot requests: no retry, no timeout, no
//! caching, no deduplication of identical in-flight calls. A hung request
//! hangs indefinitely from the caller's perspective.

pub mod backend;
pub mod demo;
pub mod error;
pub mod http;
pub mod wire;

pub use backend::QueryBackend;
pub use demo::DemoGateway;
pub use error::GatewayError;
pub use http::HttpGateway;
