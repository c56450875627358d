// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

/// Reasons a numeric field of an extent line is rejected.
///
/// These never abort a parse; the offending extent is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtentFieldError {
    #[error("{field} is not an integer: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} must not be negative: {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ExtentFieldError>;
