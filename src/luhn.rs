//! Luhn checksum validation and check-digit computation.

use crate::error::{KeyGenError, Result};

/// Returns whether `digits` satisfies the Luhn checksum.
///
/// Fails with [`KeyGenError::InvalidInput`] on an empty string or any
/// character outside `0-9`.
pub fn is_valid(digits: &str) -> Result<bool> {
    if digits.is_empty() {
        return Err(KeyGenError::InvalidInput("empty digit string".to_string()));
    }
    let values = parse_digits(digits)?;
    Ok(luhn_sum(&values, false) % 10 == 0)
}

/// Computes the digit that, appended to `digits`, makes the result Luhn-valid.
///
/// Parity is taken from the end of the string, so this holds for any length:
/// `is_valid(digits ++ check)` is always true.
pub fn compute_check_digit(digits: &str) -> Result<u8> {
    let values = parse_digits(digits)?;
    // The appended digit takes reversed index 0, shifting every body digit by one.
    let sum = luhn_sum(&values, true);
    Ok(((10 - sum % 10) % 10) as u8)
}

fn parse_digits(digits: &str) -> Result<Vec<u8>> {
    digits
        .chars()
        .enumerate()
        .map(|(position, c)| {
            c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                KeyGenError::InvalidInput(format!(
                    "non-digit character {:?} at position {} in {:?}",
                    c, position, digits
                ))
            })
        })
        .collect()
}

fn luhn_sum(values: &[u8], double_even_from_end: bool) -> u32 {
    values
        .iter()
        .rev()
        .enumerate()
        .map(|(index, &digit)| {
            let digit = u32::from(digit);
            if (index % 2 == 1) != double_even_from_end {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum()
}
