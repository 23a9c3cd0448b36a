//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared by the engine crates. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Parse errors carry the offending input verbatim.
//! - Component errors (e.g. the remission ledger) live next to their
//!   component and convert into [`LexecError`] at crate boundaries.

use thiserror::Error;

/// Top-level error type for the standing engine.
#[derive(Error, Debug)]
pub enum LexecError {
    /// A calendar date could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(#[from] DateError),

    /// A record carried a value outside its closed vocabulary.
    #[error("unknown {field} value: {value:?}")]
    UnknownValue {
        /// The record field being parsed.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A derivation step rejected its input.
    #[error("derivation error: {0}")]
    Derivation(String),
}

/// Error while parsing a [`CalendarDate`](crate::CalendarDate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The input is not in `YYYY-MM-DD` form.
    #[error("expected YYYY-MM-DD, got {0:?}")]
    Format(String),

    /// The input has the right shape but names no calendar day.
    #[error("{0:?} is not a calendar day")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalendarDate;

    #[test]
    fn test_date_error_converts() {
        let err: LexecError = CalendarDate::parse("2021-13-01").unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "invalid date: \"2021-13-01\" is not a calendar day"
        );
    }

    #[test]
    fn test_format_error_message() {
        let err = CalendarDate::parse("1/2/2021").unwrap_err();
        assert_eq!(err.to_string(), "expected YYYY-MM-DD, got \"1/2/2021\"");
    }
}
