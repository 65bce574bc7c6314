//! Request and response shapes for the backend's JSON protocol.
//!
//! Responses are pulled apart by hand from `serde_json::Value` so that a
//! missing field surfaces as [`GatewayError::Malformed`] naming exactly
//! that field, instead of a generic deserialize error.

use serde::Serialize;
use serde_json::Value;

use sqlscope_core::{ChartType, ExecutionResult, Row};

use crate::error::GatewayError;

/// Body of `POST /process_query/`.
#[derive(Debug, Serialize)]
pub struct TranslateRequest<'a> {
    pub nl_query: &'a str,
}

/// Body of `POST /process_sql/`.
#[derive(Debug, Serialize)]
pub struct ExecuteRequest<'a> {
    pub edited_sql: &'a str,
}

/// Extract the generated SQL from a translate response body.
pub fn parse_translate(body: &Value) -> Result<String, GatewayError> {
    field_str(body, "generated_sql")
}

/// Extract an [`ExecutionResult`] from an execute response body.
///
/// `generated_sql` and `query_result` are required. `chart_type` is
/// optional: a missing or unrecognized tag falls back to the line family
/// rather than failing.
pub fn parse_execute(body: &Value) -> Result<ExecutionResult, GatewayError> {
    let generated_sql = field_str(body, "generated_sql")?;

    let items = body
        .get("query_result")
        .and_then(Value::as_array)
        .ok_or(GatewayError::Malformed {
            field: "query_result",
        })?;
    let mut rows: Vec<Row> = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => rows.push(map.clone()),
            _ => {
                return Err(GatewayError::Malformed {
                    field: "query_result",
                })
            }
        }
    }

    let chart_type = body
        .get("chart_type")
        .and_then(Value::as_str)
        .map(ChartType::from_label)
        .unwrap_or_default();

    Ok(ExecutionResult {
        generated_sql,
        rows,
        chart_type,
    })
}

fn field_str(body: &Value, field: &'static str) -> Result<String, GatewayError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(GatewayError::Malformed { field })
}
