//! Input validation primitives.
//!
//! Ergonomic helpers that turn a failed precondition into a typed
//! `validation.invalid_argument` error.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None, None))
    } else {
        Ok(trimmed)
    }
}
