//! Input validation utilities.
//!
//! Boundary checks applied before an operation touches any state.

use crate::error::{NursingError, NursingResult};
use crate::input::Prompt;
use ward_types::PainScore;

/// Validates a restock quantity, which must be strictly positive.
///
/// # Errors
///
/// Returns [`NursingError::InvalidRestockQuantity`] for zero, negative, or values too large
/// to order.
pub fn validate_restock_quantity(quantity: i64) -> NursingResult<u32> {
    if quantity <= 0 {
        return Err(NursingError::InvalidRestockQuantity(quantity));
    }
    u32::try_from(quantity).map_err(|_| NursingError::InvalidRestockQuantity(quantity))
}

/// Validates a pain rating against the 0-10 scale. Out-of-range values are rejected, not
/// clamped.
pub fn validate_pain_level(level: i64) -> NursingResult<PainScore> {
    PainScore::new(level).map_err(|_| NursingError::InvalidPainLevel(level))
}

/// True only for `yes`, ignoring case and surrounding whitespace.
pub fn parse_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Parses a numeric answer to `prompt`.
pub fn parse_reading<T>(answer: &str, prompt: Prompt) -> NursingResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    answer.trim().parse::<T>().map_err(|e| {
        NursingError::InvalidInput(format!("{prompt}: '{}' is not a number ({e})", answer.trim()))
    })
}
