//! `contract-audit` library crate.
//!
//! The binary (`caudit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future batch jobs, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod coverage;
pub mod domain;
pub mod error;
pub mod io;
pub mod period;
pub mod report;
