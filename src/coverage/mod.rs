//! Contract coverage analysis: gap histogram + missing-contract inference.

pub mod gaps;

pub use gaps::*;
