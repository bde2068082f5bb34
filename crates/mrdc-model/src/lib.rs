//! Data model for the retail data centralisation pipeline.
//!
//! Defines the tabular value types flowing through the pipeline
//! ([`RawTable`] in, [`NormalizedTable`] out), the per-kind column
//! contracts ([`DatasetProfile`], [`ColumnSpec`]) and the error
//! taxonomy. Transformation logic lives in `mrdc-clean`; this crate
//! holds only data.

#![deny(unsafe_code)]

mod error;
mod kind;
mod profile;
mod table;

pub use error::{RejectionReason, StructuralError};
pub use kind::DatasetKind;
pub use profile::{ColumnSpec, ColumnType, CoercionRule, CompositeDateTime, DatasetProfile};
pub use table::{CellValue, NormalizedTable, RawTable, Row};
