//! HTTP implementation of the backend protocol.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use sqlscope_core::ExecutionResult;

use crate::backend::QueryBackend;
use crate::error::GatewayError;
use crate::wire::{self, ExecuteRequest, TranslateRequest};

/// JSON-over-HTTP gateway to the query backend.
///
/// The base URL is fixed at construction. Requests carry no timeout by
/// contract: a hung backend hangs the call.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for the given base URL (trailing slash optional).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// POST a JSON body and return the parsed JSON response body.
    async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, GatewayError> {
        let response = self.http.post(self.endpoint(path)).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Server {
                status: status.as_u16(),
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|_| GatewayError::Malformed { field: "body" })
    }
}

#[async_trait]
impl QueryBackend for HttpGateway {
    async fn health(&self) -> Result<(), GatewayError> {
        let response = self.http.get(self.endpoint("health")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Server {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn translate(&self, nl_query: &str) -> Result<String, GatewayError> {
        debug!(len = nl_query.len(), "translate request");
        let body = self
            .post_json("process_query/", &TranslateRequest { nl_query })
            .await?;
        wire::parse_translate(&body)
    }

    async fn execute(&self, query_text: &str) -> Result<ExecutionResult, GatewayError> {
        debug!(len = query_text.len(), "execute request");
        let body = self
            .post_json(
                "process_sql/",
                &ExecuteRequest {
                    edited_sql: query_text,
                },
            )
            .await?;
        wire::parse_execute(&body)
    }
}
