//! Error types for extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while acquiring a raw table from a source.
///
/// All of these are structural in the pipeline's taxonomy: they abort
/// the dataset run they belong to.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a source file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Malformed JSON content.
    #[error("failed to parse JSON from {source_name}: {message}")]
    JsonParse { source_name: String, message: String },

    /// JSON body was not an array of flat objects.
    #[error("unexpected JSON shape from {source_name}: expected an array of objects")]
    JsonShape { source_name: String },

    /// HTTP request failed or the server answered with an error.
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// The source produced no columns at all.
    #[error("source {source_name} is empty")]
    EmptySource { source_name: String },
}
