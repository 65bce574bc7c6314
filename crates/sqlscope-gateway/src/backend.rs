//! The backend seam: everything above the gateway depends on this trait.

use async_trait::async_trait;

use sqlscope_core::ExecutionResult;

use crate::error::GatewayError;

/// A natural-language-to-SQL backend.
///
/// Each call is independent; issuing a second call before the first settles
/// is allowed, and completions apply in arrival order. Correlating a
/// completion with the request that produced it is the caller's problem
/// (the session coordinator uses run tokens for this).
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Liveness probe.
    async fn health(&self) -> Result<(), GatewayError>;

    /// Translate a natural-language question into SQL text.
    async fn translate(&self, nl_query: &str) -> Result<String, GatewayError>;

    /// Run (possibly user-edited) SQL and return rows plus a chart tag.
    async fn execute(&self, query_text: &str) -> Result<ExecutionResult, GatewayError>;
}
