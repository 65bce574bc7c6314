use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Who produced a conversation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// The person asking questions.
    User,
    /// The translation backend, speaking SQL.
    Assistant,
}

/// Chart-type tag attached to an execution result by the backend.
///
/// The wire labels are the backend's exact strings; anything unrecognized
/// falls back to [`ChartType::Line`] rather than failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    #[serde(rename = "Line chart")]
    Line,
    #[serde(rename = "Bar chart")]
    Bar,
    #[serde(rename = "Histogram")]
    Histogram,
    #[serde(rename = "Scatter plot")]
    Scatter,
}

impl ChartType {
    /// Parse a backend label. Unknown labels map to `Line`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Bar chart" => ChartType::Bar,
            "Histogram" => ChartType::Histogram,
            "Scatter plot" => ChartType::Scatter,
            _ => ChartType::Line,
        }
    }

    /// The backend's wire label for this tag.
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line chart",
            ChartType::Bar => "Bar chart",
            ChartType::Histogram => "Histogram",
            ChartType::Scatter => "Scatter plot",
        }
    }

    /// Closed mapping from tag to rendering family.
    pub fn family(&self) -> ChartFamily {
        match self {
            ChartType::Bar | ChartType::Histogram => ChartFamily::Bar,
            ChartType::Scatter => ChartFamily::Scatter,
            ChartType::Line => ChartFamily::Line,
        }
    }
}

/// The shape a chart spec renders as. Strictly coarser than [`ChartType`]:
/// histograms share the bar family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartFamily {
    #[default]
    Line,
    Bar,
    Scatter,
}

// =============================================================================
// Identity
// =============================================================================

/// Unique, strictly increasing identifier for a conversation message.
///
/// Ordering by id is creation order; the store never reuses or reorders ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Entities
// =============================================================================

/// One record of an execution result: field name to scalar value, in the
/// backend's key order. All rows of one result share the same field set.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A single conversation message.
///
/// Created on submit (user) or translate success (assistant); only the text
/// of editable messages ever changes afterwards; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: Author,
    pub text: String,
    pub editable: bool,
    pub created_at: DateTime<Utc>,
}

/// The outcome of one successful execute call. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The SQL the backend reports having run.
    pub generated_sql: String,
    /// Result rows, uniform field schema, backend order.
    pub rows: Vec<Row>,
    /// Chart-type tag chosen by the backend.
    pub chart_type: ChartType,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_serialization() {
        assert_eq!(serde_json::to_string(&Author::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Author::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_chart_type_from_label_known() {
        assert_eq!(ChartType::from_label("Bar chart"), ChartType::Bar);
        assert_eq!(ChartType::from_label("Histogram"), ChartType::Histogram);
        assert_eq!(ChartType::from_label("Scatter plot"), ChartType::Scatter);
        assert_eq!(ChartType::from_label("Line chart"), ChartType::Line);
    }

    #[test]
    fn test_chart_type_from_label_unknown_falls_back_to_line() {
        assert_eq!(ChartType::from_label("Pie chart"), ChartType::Line);
        assert_eq!(ChartType::from_label(""), ChartType::Line);
        assert_eq!(ChartType::from_label("bar chart"), ChartType::Line);
    }

    #[test]
    fn test_chart_type_label_round_trip() {
        for ct in [
            ChartType::Line,
            ChartType::Bar,
            ChartType::Histogram,
            ChartType::Scatter,
        ] {
            assert_eq!(ChartType::from_label(ct.label()), ct);
        }
    }

    #[test]
    fn test_chart_type_family_mapping_is_total() {
        assert_eq!(ChartType::Bar.family(), ChartFamily::Bar);
        assert_eq!(ChartType::Histogram.family(), ChartFamily::Bar);
        assert_eq!(ChartType::Scatter.family(), ChartFamily::Scatter);
        assert_eq!(ChartType::Line.family(), ChartFamily::Line);
    }

    #[test]
    fn test_chart_type_wire_serialization() {
        let json = serde_json::to_string(&ChartType::Scatter).unwrap();
        assert_eq!(json, "\"Scatter plot\"");
        let back: ChartType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChartType::Scatter);
    }

    #[test]
    fn test_chart_type_default_is_line() {
        assert_eq!(ChartType::default(), ChartType::Line);
        assert_eq!(ChartFamily::default(), ChartFamily::Line);
    }

    #[test]
    fn test_message_id_ordering_is_creation_order() {
        let ids = [MessageId(1), MessageId(2), MessageId(10)];
        let mut shuffled = vec![ids[2], ids[0], ids[1]];
        shuffled.sort();
        assert_eq!(shuffled, ids);
    }

    #[test]
    fn test_message_id_display() {
        assert_eq!(MessageId(42).to_string(), "42");
    }

    #[test]
    fn test_row_preserves_key_order() {
        let row: Row =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&String> = row.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_execution_result_round_trip() {
        let rows: Vec<Row> = serde_json::from_str(
            r#"[{"region": "north", "total": 12}, {"region": "south", "total": 7}]"#,
        )
        .unwrap();
        let result = ExecutionResult {
            generated_sql: "SELECT region, total FROM sales".to_string(),
            rows,
            chart_type: ChartType::Bar,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ExecutionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.rows.len(), 2);
        assert_eq!(
            back.rows[0].keys().collect::<Vec<_>>(),
            ["region", "total"]
        );
    }

    #[test]
    fn test_message_round_trip() {
        let msg = Message {
            id: MessageId(7),
            author: Author::Assistant,
            text: "SELECT 1".to_string(),
            editable: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, msg.id);
        assert_eq!(back.author, Author::Assistant);
        assert!(back.editable);
    }
}
