//! Input/output helpers.
//!
//! - CSV ingest as a row source (`ingest`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
