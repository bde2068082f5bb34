use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

/// A single cell in a table.
///
/// Raw tables only carry `Text`, `Float`, `Int` and `Missing`; the
/// date variants appear once the cleaner has coerced a column. After
/// validation, `Missing` marks a non-critical cell that failed its
/// coercer and was degraded rather than dropping the row.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Float(f64),
    Int(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Text content, if this cell is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    pub id: u64,
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
        }
    }

    /// Cell for a column, treating an absent column as missing.
    pub fn cell(&self, column: &str) -> &CellValue {
        static MISSING: CellValue = CellValue::Missing;
        self.cells.get(column).unwrap_or(&MISSING)
    }

    /// True when every cell is missing or blank text.
    pub fn is_empty(&self) -> bool {
        self.cells.values().all(|cell| match cell {
            CellValue::Missing => true,
            CellValue::Text(value) => value.trim().is_empty(),
            _ => false,
        })
    }
}

/// Source-fidelity table as produced by an extraction adapter.
///
/// Column names are whatever the source used; casing and whitespace
/// are not guaranteed clean. Immutable once built: every pipeline
/// stage produces a new table value.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RawTable {
    /// Source identifier for logging (path, URL, table name).
    pub source: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RawTable {
    pub fn new(source: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            source: source.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Canonical, typed table ready for load.
///
/// Invariants (enforced by the normalizer, relied on by loaders):
/// every row has every required column populated with a value of the
/// declared type, no two rows are fully identical, row ids are dense
/// and zero-based in first-occurrence order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NormalizedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl NormalizedTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}
