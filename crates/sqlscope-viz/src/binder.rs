//! Pure mapping from an execution result to a chart spec and table.
//!
//! Deterministic by construction: the same result always binds to the same
//! visualization. Nothing here touches shared state or the network.

use serde_json::Value;

use sqlscope_core::config::ChartConfig;
use sqlscope_core::{ExecutionResult, Row};

use crate::spec::{ChartSpec, Dataset, DatasetStyle, Point, TableProjection, Visualization};

/// Presentation knobs for the bound dataset.
#[derive(Clone, Debug)]
pub struct BindOptions {
    pub dataset_label: String,
    pub style: DatasetStyle,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            dataset_label: "User Data".to_string(),
            style: DatasetStyle::default(),
        }
    }
}

impl From<&ChartConfig> for BindOptions {
    fn from(config: &ChartConfig) -> Self {
        Self {
            dataset_label: config.dataset_label.clone(),
            style: DatasetStyle {
                border_color: config.border_color.clone(),
                background_color: config.background_color.clone(),
                tension: config.tension,
            },
        }
    }
}

/// Bind a result with default presentation options.
pub fn bind(result: &ExecutionResult) -> Visualization {
    bind_with(result, &BindOptions::default())
}

/// Bind a result into a chart spec and table projection.
///
/// The label axis is the first field of the first row holding a string
/// value (falling back to the first field); the value axis is the first
/// numeric field other than the label. A zero-row result yields an empty
/// chart spec and no table at all.
pub fn bind_with(result: &ExecutionResult, options: &BindOptions) -> Visualization {
    let family = result.chart_type.family();

    let Some(first) = result.rows.first() else {
        return Visualization {
            chart: ChartSpec::empty(family),
            table: None,
        };
    };

    let table = TableProjection {
        columns: first.keys().cloned().collect(),
        rows: result.rows.clone(),
    };

    let label_key = label_key(first);
    let labels: Vec<String> = result
        .rows
        .iter()
        .map(|row| scalar_label(row.get(label_key)))
        .collect();

    let datasets = match value_key(first, label_key) {
        Some(value_key) => {
            let values: Vec<f64> = result
                .rows
                .iter()
                .map(|row| row.get(value_key).and_then(Value::as_f64).unwrap_or(0.0))
                .collect();
            let points = if family == sqlscope_core::ChartFamily::Scatter {
                scatter_points(&labels, &values)
            } else {
                Vec::new()
            };
            vec![Dataset {
                label: options.dataset_label.clone(),
                values,
                points,
                style: options.style.clone(),
            }]
        }
        // No numeric measure: nothing to plot, table still shown.
        None => Vec::new(),
    };

    Visualization {
        chart: ChartSpec {
            family,
            labels,
            datasets,
        },
        table: Some(table),
    }
}

/// First string-valued field, else the first field.
fn label_key(row: &Row) -> &str {
    row.iter()
        .find(|(_, value)| value.is_string())
        .map(|(key, _)| key.as_str())
        .or_else(|| row.keys().next().map(String::as_str))
        .unwrap_or_default()
}

/// First numeric field other than the label axis.
fn value_key<'a>(row: &'a Row, label_key: &str) -> Option<&'a str> {
    row.iter()
        .find(|(key, value)| key.as_str() != label_key && value.is_number())
        .map(|(key, _)| key.as_str())
}

/// Render a scalar as an axis label.
fn scalar_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Pair up labels and values as points; a non-numeric label falls back to
/// the row index for x.
fn scatter_points(labels: &[String], values: &[f64]) -> Vec<Point> {
    labels
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (label, &y))| Point {
            x: label.parse::<f64>().unwrap_or(i as f64),
            y,
        })
        .collect()
}
