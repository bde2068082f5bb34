use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use mrdc_model::{CellValue, RawTable, Row};

use crate::error::IngestError;

/// Read a CSV file into a raw table.
///
/// Headers are taken verbatim (canonicalization is the cleaner's
/// job). Empty fields ingest as [`CellValue::Missing`]; everything
/// else stays text.
pub fn read_csv_table(path: &Path) -> Result<RawTable, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    let headers = reader
        .headers()
        .map_err(|error| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?
        .clone();
    if headers.is_empty() {
        return Err(IngestError::EmptySource {
            source_name: path.display().to_string(),
        });
    }

    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    let mut table = RawTable::new(path.display().to_string(), columns);

    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|error| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let mut cells: BTreeMap<String, CellValue> = BTreeMap::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            let cell = if field.is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(field.to_string())
            };
            cells.insert(header.to_string(), cell);
        }
        table.push_row(Row {
            id: idx as u64,
            cells,
        });
    }
    debug!(path = %path.display(), rows = table.height(), "csv source read");
    Ok(table)
}
