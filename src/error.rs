//! Error types for measurement lists
//!
//! Absent measurements are not errors: lookups return `NaN` in-band.
//! Errors only arise at parsing and configuration boundaries.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Measurement list error types
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown backing-store precision selector
    #[error("Invalid measurement list type: {0}\nExpected one of: double, float")]
    InvalidListType(String),

    /// Pool configuration rejected at build time
    #[error("Invalid pool configuration: {0}")]
    InvalidConfig(String),
}
