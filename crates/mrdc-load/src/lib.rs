//! Load adapters.
//!
//! A [`Loader`] persists a normalized table under a target name with
//! replace semantics. The shipped destination writes CSV files; the
//! credentials module assembles a database connection URL for
//! destinations that live behind a driver.

#![deny(unsafe_code)]

mod credentials;
mod destination;

pub use credentials::DbCredentials;
pub use destination::{CsvDestination, LoadError, Loader};
