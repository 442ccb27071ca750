//! Reporting utilities: formatted terminal output for audits and header
//! maintenance runs.

pub mod format;

pub use format::*;
