//! Shared error type for the primitives in this crate.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced while constructing core value types.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid time window {start_hour}h..{end_hour}h: {reason}")]
    InvalidTimeWindow {
        start_hour: f64,
        end_hour:   f64,
        reason:     &'static str,
    },

    #[error("invalid day anchor: {0}")]
    InvalidDayAnchor(String),
}

/// Shorthand result type for `ct-core`.
pub type CoreResult<T> = Result<T, CoreError>;
