//! Extraction adapters.
//!
//! Each adapter turns one external source into a [`RawTable`] without
//! interpreting the data: cells come out as text or numbers exactly
//! as the source presented them, typing happens in `mrdc-clean`.

#![deny(unsafe_code)]

mod csv_source;
mod error;
mod http_source;
mod json_source;
mod source;

pub use csv_source::read_csv_table;
pub use error::IngestError;
pub use http_source::{HttpOptions, fetch_http_table};
pub use json_source::{json_rows_to_table, read_json_table};
pub use source::{DefaultExtractor, Extractor, SourceDescriptor, extract};
