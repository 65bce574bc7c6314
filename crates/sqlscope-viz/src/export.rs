//! Export and clipboard capability seams.
//!
//! Rendering a chart to pixels and encoding a spreadsheet are jobs for
//! external collaborators; this module only defines the capability traits
//! and the file-naming conventions, and writes whatever bytes the encoder
//! produces.

use std::path::{Path, PathBuf};

use tracing::info;

use sqlscope_core::ScopeError;

use crate::spec::{ChartSpec, TableProjection};

/// File name for a chart image export.
pub const CHART_FILE_NAME: &str = "chart.png";
/// File name for a table spreadsheet export.
pub const TABLE_FILE_NAME: &str = "table_data.xlsx";

/// Errors from export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("encoder error: {0}")]
    Encoder(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("nothing to export")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ExportError> for ScopeError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Clipboard(msg) => ScopeError::Clipboard(msg),
            other => ScopeError::Export(other.to_string()),
        }
    }
}

/// Capability: produce raw PNG bytes for a chart spec.
pub trait ChartImageEncoder {
    fn encode_png(&self, spec: &ChartSpec) -> Result<Vec<u8>, ExportError>;
}

/// Capability: encode a table projection as a spreadsheet workbook,
/// one row per record, columns in first-row key order.
pub trait WorkbookEncoder {
    fn encode_workbook(&self, table: &TableProjection) -> Result<Vec<u8>, ExportError>;
}

/// Capability: place text on the system clipboard.
pub trait ClipboardWrite {
    fn write_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Render the chart through the encoder and write `chart.png` into `dir`.
pub fn export_chart(
    encoder: &dyn ChartImageEncoder,
    spec: &ChartSpec,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    if !spec.has_data() {
        return Err(ExportError::Empty);
    }
    let bytes = encoder.encode_png(spec)?;
    let path = dir.join(CHART_FILE_NAME);
    std::fs::write(&path, bytes)?;
    info!("Chart exported to {}", path.display());
    Ok(path)
}

/// Encode the table and write `table_data.xlsx` into `dir`.
pub fn export_table(
    encoder: &dyn WorkbookEncoder,
    table: &TableProjection,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = encoder.encode_workbook(table)?;
    let path = dir.join(TABLE_FILE_NAME);
    std::fs::write(&path, bytes)?;
    info!("Table exported to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Dataset, DatasetStyle};
    use sqlscope_core::ChartFamily;
    use std::cell::RefCell;

    struct StubImageEncoder {
        seen: RefCell<Option<ChartSpec>>,
    }

    impl ChartImageEncoder for StubImageEncoder {
        fn encode_png(&self, spec: &ChartSpec) -> Result<Vec<u8>, ExportError> {
            *self.seen.borrow_mut() = Some(spec.clone());
            Ok(b"\x89PNG fake".to_vec())
        }
    }

    struct StubWorkbookEncoder;

    impl WorkbookEncoder for StubWorkbookEncoder {
        fn encode_workbook(&self, table: &TableProjection) -> Result<Vec<u8>, ExportError> {
            Ok(table.columns.join(",").into_bytes())
        }
    }

    struct FailingEncoder;

    impl ChartImageEncoder for FailingEncoder {
        fn encode_png(&self, _spec: &ChartSpec) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Encoder("renderer offline".to_string()))
        }
    }

    fn spec_with_data() -> ChartSpec {
        ChartSpec {
            family: ChartFamily::Line,
            labels: vec!["a".to_string()],
            datasets: vec![Dataset {
                label: "User Data".to_string(),
                values: vec![1.0],
                points: Vec::new(),
                style: DatasetStyle::default(),
            }],
        }
    }

    #[test]
    fn test_export_chart_writes_mandated_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = StubImageEncoder {
            seen: RefCell::new(None),
        };
        let path = export_chart(&encoder, &spec_with_data(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "chart.png");
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");
    }

    #[test]
    fn test_export_chart_passes_spec_to_encoder() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = StubImageEncoder {
            seen: RefCell::new(None),
        };
        let spec = spec_with_data();
        export_chart(&encoder, &spec, dir.path()).unwrap();
        assert_eq!(encoder.seen.borrow().as_ref().unwrap(), &spec);
    }

    #[test]
    fn test_export_chart_without_data_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = StubImageEncoder {
            seen: RefCell::new(None),
        };
        let err = export_chart(&encoder, &ChartSpec::empty(ChartFamily::Bar), dir.path())
            .unwrap_err();
        assert!(matches!(err, ExportError::Empty));
        assert!(!dir.path().join(CHART_FILE_NAME).exists());
    }

    #[test]
    fn test_export_chart_encoder_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_chart(&FailingEncoder, &spec_with_data(), dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::Encoder(_)));
    }

    #[test]
    fn test_export_table_writes_mandated_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let table = TableProjection {
            columns: vec!["region".to_string(), "total".to_string()],
            rows: serde_json::from_str(r#"[{"region": "north", "total": 12}]"#).unwrap(),
        };
        let path = export_table(&StubWorkbookEncoder, &table, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "table_data.xlsx");
        assert_eq!(std::fs::read(&path).unwrap(), b"region,total");
    }

    #[test]
    fn test_export_error_conversion() {
        let err: ScopeError = ExportError::Encoder("bad".to_string()).into();
        assert!(matches!(err, ScopeError::Export(_)));
    }
}
