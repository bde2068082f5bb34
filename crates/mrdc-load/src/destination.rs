use std::path::PathBuf;

use tracing::info;

use mrdc_clean::coerce::format_numeric;
use mrdc_model::{CellValue, NormalizedTable};
use thiserror::Error;

/// Errors raised while persisting a normalized table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("destination {path} is not writable: {source}")]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write table '{table}': {message}")]
    Write { table: String, message: String },

    #[error("failed to load credentials from {path}: {message}")]
    Credentials { path: PathBuf, message: String },
}

/// Contract the pipeline expects from a load adapter.
///
/// Replace semantics: the destination table's prior contents are
/// discarded, never merged.
pub trait Loader {
    fn store(&self, table_name: &str, table: &NormalizedTable) -> Result<(), LoadError>;
}

/// File-based destination: one CSV per target table, truncated on
/// each run.
#[derive(Debug, Clone)]
pub struct CsvDestination {
    dir: PathBuf,
}

impl CsvDestination {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn table_path(&self, table_name: &str) -> PathBuf {
        self.dir.join(format!("{table_name}.csv"))
    }
}

impl Loader for CsvDestination {
    fn store(&self, table_name: &str, table: &NormalizedTable) -> Result<(), LoadError> {
        std::fs::create_dir_all(&self.dir).map_err(|error| LoadError::Unwritable {
            path: self.dir.clone(),
            source: error,
        })?;
        let path = self.table_path(table_name);
        let write_error = |message: String| LoadError::Write {
            table: table_name.to_string(),
            message,
        };

        // csv::Writer truncates, which is exactly the replace
        // semantics the contract demands.
        let mut writer = csv::Writer::from_path(&path)
            .map_err(|error| write_error(error.to_string()))?;
        writer
            .write_record(&table.columns)
            .map_err(|error| write_error(error.to_string()))?;
        for row in &table.rows {
            let record: Vec<String> = table
                .columns
                .iter()
                .map(|column| render_cell(row.cell(column)))
                .collect();
            writer
                .write_record(&record)
                .map_err(|error| write_error(error.to_string()))?;
        }
        writer
            .flush()
            .map_err(|error| write_error(error.to_string()))?;
        info!(table = table_name, path = %path.display(), rows = table.height(), "table stored");
        Ok(())
    }
}

/// Render a typed cell for the destination file.
fn render_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(value) => value.clone(),
        CellValue::Float(value) => format_numeric(*value),
        CellValue::Int(value) => value.to_string(),
        CellValue::Date(value) => value.format("%Y-%m-%d").to_string(),
        CellValue::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        CellValue::Missing => String::new(),
    }
}
