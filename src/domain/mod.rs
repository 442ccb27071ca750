//! Domain types used throughout the audit pipeline.
//!
//! This module defines:
//!
//! - the contract frequencies (`Frequency`)
//! - per-series and per-instrument audit results (`SeriesAudit`, `InstrumentAudit`)

pub mod types;

pub use types::*;
