//! `interest-schedule` library crate.
//!
//! The binary (`isched`) is a thin wrapper around this library so that:
//!
//! - the calculation core is testable without spawning processes or touching the network
//! - row sources and sinks can be swapped without touching the core

pub mod app;
pub mod calc;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
