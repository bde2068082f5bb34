use std::fmt;
use std::path::PathBuf;

use mrdc_model::RawTable;

use crate::csv_source::read_csv_table;
use crate::error::IngestError;
use crate::http_source::{HttpOptions, fetch_http_table};
use crate::json_source::read_json_table;

/// Where a raw table comes from.
#[derive(Debug, Clone)]
pub enum SourceDescriptor {
    CsvFile(PathBuf),
    JsonFile(PathBuf),
    HttpJson { url: String, options: HttpOptions },
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::CsvFile(path) => write!(f, "csv:{}", path.display()),
            SourceDescriptor::JsonFile(path) => write!(f, "json:{}", path.display()),
            SourceDescriptor::HttpJson { url, .. } => write!(f, "http:{url}"),
        }
    }
}

/// Contract the pipeline expects from an extraction adapter.
///
/// Implementations fail with a descriptive error when the source is
/// unreachable or the named object does not exist; they never try to
/// repair data.
pub trait Extractor {
    fn fetch(&self, source: &SourceDescriptor) -> Result<RawTable, IngestError>;
}

/// The built-in file/HTTP extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExtractor;

impl Extractor for DefaultExtractor {
    fn fetch(&self, source: &SourceDescriptor) -> Result<RawTable, IngestError> {
        match source {
            SourceDescriptor::CsvFile(path) => read_csv_table(path),
            SourceDescriptor::JsonFile(path) => read_json_table(path),
            SourceDescriptor::HttpJson { url, options } => fetch_http_table(url, options),
        }
    }
}

/// Fetch with the built-in extractor.
pub fn extract(source: &SourceDescriptor) -> Result<RawTable, IngestError> {
    DefaultExtractor.fetch(source)
}
