//! Input/output helpers.
//!
//! - data-directory scan + contract filename parsing (`scan`)
//! - CSV header maintenance: rename/purge (`headers`)
//! - vendor column normalization (`normalize`)
//! - audit JSON export (`export`)

pub mod export;
pub mod headers;
pub mod normalize;
pub mod scan;

pub use export::*;
pub use headers::*;
pub use normalize::*;
pub use scan::*;
