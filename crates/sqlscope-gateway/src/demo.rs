//! Canned backend for demos and offline development.
//!
//! Fallback mode, not a second production contract: it answers every
//! question with the same SQL shape and sample rows after a fixed delay,
//! and tags every result as a line chart.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use sqlscope_core::{ChartType, ExecutionResult, Row};

use crate::backend::QueryBackend;
use crate::error::GatewayError;

/// In-process stand-in for the real backend.
pub struct DemoGateway {
    delay: Duration,
}

impl DemoGateway {
    /// Create a demo gateway with the given simulated latency.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    fn sample_rows() -> Vec<Row> {
        let rows = json!([
            {
                "id": 1,
                "name": "John Doe",
                "email": "john.doe@example.com",
                "created_at": "2023-01-01T10:00:00Z"
            },
            {
                "id": 2,
                "name": "Jane Smith",
                "email": "jane.smith@example.com",
                "created_at": "2023-01-02T11:30:00Z"
            },
            {
                "id": 3,
                "name": "Sam Lee",
                "email": "sam.lee@example.com",
                "created_at": "2023-01-03T09:15:00Z"
            }
        ]);
        rows.as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_object().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl QueryBackend for DemoGateway {
    async fn health(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn translate(&self, nl_query: &str) -> Result<String, GatewayError> {
        tokio::time::sleep(self.delay).await;
        let needle = nl_query.replace('\'', "''");
        Ok(format!(
            "SELECT id, name, email, created_at FROM users \
             WHERE name = '{}' ORDER BY created_at DESC LIMIT 10;",
            needle
        ))
    }

    async fn execute(&self, query_text: &str) -> Result<ExecutionResult, GatewayError> {
        tokio::time::sleep(self.delay).await;
        Ok(ExecutionResult {
            generated_sql: query_text.to_string(),
            rows: Self::sample_rows(),
            chart_type: ChartType::Line,
        })
    }
}
