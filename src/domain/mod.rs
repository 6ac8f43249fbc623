//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw input rows as delivered by a row source (`RawTable`, `RawRow`)
//! - normalized records and their derived schedule (`Record`, `Schedule`, `NextPayment`)
//! - run configuration (`RunConfig`, `SourceSpec`, `SortOrder`, `ExportFormat`)

pub mod types;

pub use types::*;
