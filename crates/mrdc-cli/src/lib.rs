//! Library surface of the `mrdc` binary: logging setup and the
//! pipeline orchestrator, exposed for integration tests.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
