//! Visualization layer for sqlscope.
//!
//! Maps execution results into renderer-independent chart specifications
//! and table projections, keeps the append-only history of past results,
//! and defines the capability seams for image/spreadsheet export and
//! clipboard access.

pub mod binder;
pub mod export;
pub mod history;
pub mod spec;

pub use binder::{bind, bind_with, BindOptions};
pub use export::{
    export_chart, export_table, ChartImageEncoder, ClipboardWrite, ExportError, WorkbookEncoder,
    CHART_FILE_NAME, TABLE_FILE_NAME,
};
pub use history::{HistoryArchive, HistoryEntry, HistoryPanel};
pub use spec::{
    ChartSpec, Dataset, DatasetStyle, Point, TableProjection, Visualization, NO_DATA_PLACEHOLDER,
};
