//! Renderer-independent chart and table shapes.

use serde::{Deserialize, Serialize};

use sqlscope_core::{ChartFamily, Row};

/// Text shown in the chart area when the spec carries no dataset.
pub const NO_DATA_PLACEHOLDER: &str = "No data available";

/// One scatter point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Style attributes applied to a bound dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetStyle {
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
}

impl Default for DatasetStyle {
    fn default() -> Self {
        Self {
            border_color: "rgb(75, 192, 192)".to_string(),
            background_color: "rgba(75, 192, 192, 0.2)".to_string(),
            tension: 0.1,
        }
    }
}

/// A labelled value series.
///
/// `values` is always populated; `points` only for the scatter family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    pub style: DatasetStyle,
}

/// Derived chart specification. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub family: ChartFamily,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    /// A spec with no dataset; presents as the "no data" placeholder.
    pub fn empty(family: ChartFamily) -> Self {
        Self {
            family,
            labels: Vec::new(),
            datasets: Vec::new(),
        }
    }

    /// Whether the chart area should render data or the placeholder.
    pub fn has_data(&self) -> bool {
        !self.datasets.is_empty()
    }
}

/// Tabular projection of a result: the first row's field names as columns,
/// in that row's own key order, plus the rows verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableProjection {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// What the binder hands back for one execution result.
///
/// `table` is `None` (omitted, not empty) for zero-row results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    pub chart: ChartSpec,
    pub table: Option<TableProjection>,
}
