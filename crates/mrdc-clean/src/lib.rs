//! Cleaning core: value coercers, row validation, deduplication and
//! the profile-driven dataset normalizer.
//!
//! Everything here is pure: each stage takes a table value and
//! produces a new one. Malformed cells and rows are absorbed into the
//! output shape; only structural problems (a required column missing
//! from the source schema) surface as errors.

#![deny(unsafe_code)]

pub mod coerce;
pub mod dedupe;
pub mod normalize;
pub mod validate;

pub use normalize::{NormalizeReport, NormalizedOutput, canonical_column, normalize_table};
pub use validate::validate_row;
