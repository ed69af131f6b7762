//! Operator selection of a device from a listing.

use crate::error::{FwError, Result};

/// Parse an operator-entered index into a listing of `count` entries.
///
/// Surrounding whitespace (including the trailing newline of a prompt
/// answer) is ignored.
///
/// # Errors
///
/// Returns [`FwError::InvalidSelection`] if the input is not a number or is
/// not in `0..count`.
pub fn parse_selection(input: &str, count: usize) -> Result<usize> {
    let trimmed = input.trim();
    let invalid = || FwError::InvalidSelection {
        input: trimmed.to_string(),
        count,
    };

    let index: usize = trimmed.parse().map_err(|_| invalid())?;
    if index >= count {
        return Err(invalid());
    }
    Ok(index)
}
