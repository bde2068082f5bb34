use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use mrdc_model::{CellValue, RawTable, Row};

use crate::error::IngestError;

/// Read a JSON file holding an array of flat objects into a raw
/// table.
pub fn read_json_table(path: &Path) -> Result<RawTable, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|error| IngestError::FileRead {
        path: path.to_path_buf(),
        source: error,
    })?;
    let source_name = path.display().to_string();
    let value: Value =
        serde_json::from_str(&content).map_err(|error| IngestError::JsonParse {
            source_name: source_name.clone(),
            message: error.to_string(),
        })?;
    json_rows_to_table(&source_name, &value)
}

/// Convert a parsed JSON array of objects into a raw table.
///
/// Columns are the union of keys in first-appearance order; objects
/// missing a key get a missing cell. Scalars map to text/number
/// cells; nested arrays/objects are not tabular and fail.
pub fn json_rows_to_table(source_name: &str, value: &Value) -> Result<RawTable, IngestError> {
    let Value::Array(items) = value else {
        return Err(IngestError::JsonShape {
            source_name: source_name.to_string(),
        });
    };

    let mut columns: Vec<String> = Vec::new();
    for item in items {
        let Value::Object(object) = item else {
            return Err(IngestError::JsonShape {
                source_name: source_name.to_string(),
            });
        };
        for key in object.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    if columns.is_empty() {
        return Err(IngestError::EmptySource {
            source_name: source_name.to_string(),
        });
    }

    let mut table = RawTable::new(source_name, columns.clone());
    for (idx, item) in items.iter().enumerate() {
        let Value::Object(object) = item else {
            unreachable!("checked above");
        };
        let mut cells: BTreeMap<String, CellValue> = BTreeMap::new();
        for column in &columns {
            let cell = match object.get(column) {
                None | Some(Value::Null) => CellValue::Missing,
                Some(value) => json_cell(source_name, value)?,
            };
            cells.insert(column.clone(), cell);
        }
        table.push_row(Row {
            id: idx as u64,
            cells,
        });
    }
    debug!(source = source_name, rows = table.height(), "json source read");
    Ok(table)
}

fn json_cell(source_name: &str, value: &Value) -> Result<CellValue, IngestError> {
    match value {
        Value::String(text) => Ok(CellValue::Text(text.clone())),
        Value::Bool(flag) => Ok(CellValue::Text(flag.to_string())),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(CellValue::Int(int))
            } else {
                Ok(CellValue::Float(number.as_f64().unwrap_or(f64::NAN)))
            }
        }
        _ => Err(IngestError::JsonShape {
            source_name: source_name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_of_objects_becomes_a_table() {
        let value = json!([
            {"year": "2021", "month": "07", "staff": 12},
            {"year": "2021", "day": "15"}
        ]);
        let table = json_rows_to_table("date_details.json", &value).unwrap();
        assert_eq!(table.columns, vec!["year", "month", "staff", "day"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.rows[0].cell("staff"), &CellValue::Int(12));
        assert!(table.rows[0].cell("day").is_missing());
        assert!(table.rows[1].cell("month").is_missing());
    }

    #[test]
    fn non_array_body_fails() {
        let value = json!({"not": "an array"});
        let error = json_rows_to_table("api", &value).unwrap_err();
        assert!(matches!(error, IngestError::JsonShape { .. }));
    }

    #[test]
    fn nested_values_fail() {
        let value = json!([{"nested": {"a": 1}}]);
        let error = json_rows_to_table("api", &value).unwrap_err();
        assert!(matches!(error, IngestError::JsonShape { .. }));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"[{"a": "1"}, {"a": "2"}]"#).unwrap();
        let table = read_json_table(&path).unwrap();
        assert_eq!(table.height(), 2);
    }
}
