//! Password strength policy
//!
//! Character-class requirements expressed as a bit mask, checked in a fixed
//! order so callers always see the first unmet requirement. Whitespace is
//! ignored: it counts toward no class and fails nothing.

use thiserror::Error;

/// Require at least one digit.
pub const REQUIRE_DIGIT: u32 = 1;
/// Require at least one ASCII lowercase letter.
pub const REQUIRE_LOWERCASE: u32 = 1 << 1;
/// Require at least one ASCII uppercase letter.
pub const REQUIRE_UPPERCASE: u32 = 1 << 2;
/// Require at least one special (non-alphanumeric, non-whitespace)
/// character.
pub const REQUIRE_SPECIAL: u32 = 1 << 3;

/// Digits plus both letter cases.
pub const STRATEGY_MIXED_CASE_DIGIT: u32 = REQUIRE_DIGIT | REQUIRE_LOWERCASE | REQUIRE_UPPERCASE;
/// Digits, both letter cases, and a special character.
pub const STRATEGY_MIXED_CASE_DIGIT_SPECIAL: u32 = STRATEGY_MIXED_CASE_DIGIT | REQUIRE_SPECIAL;

/// Shortest accepted password.
pub const MIN_LENGTH: usize = 6;
/// Longest accepted password.
pub const MAX_LENGTH: usize = 32;

/// The first policy requirement a password failed to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    /// Length outside `[MIN_LENGTH, MAX_LENGTH]`.
    #[error("password length must be between {min} and {max} characters")]
    LengthOutOfRange {
        /// Smallest accepted length.
        min: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// No digit present.
    #[error("password must contain at least one digit")]
    MissingDigit,

    /// No lowercase letter present.
    #[error("password must contain at least one lowercase letter")]
    MissingLowercase,

    /// No uppercase letter present.
    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,

    /// No special character present.
    #[error("password must contain at least one special character")]
    MissingSpecial,
}

/// Check `password` against the required character classes.
///
/// `required` is a combination of the `REQUIRE_*` flags; requirements are
/// reported in the order digit, lowercase, uppercase, special.
pub fn validate(password: &str, required: u32) -> Result<(), PolicyViolation> {
    let length = password.chars().count();
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(PolicyViolation::LengthOutOfRange { min: MIN_LENGTH, max: MAX_LENGTH });
    }

    let mut found = 0u32;
    for ch in password.chars() {
        if ch.is_ascii_digit() {
            found |= REQUIRE_DIGIT;
        } else if ch.is_ascii_lowercase() {
            found |= REQUIRE_LOWERCASE;
        } else if ch.is_ascii_uppercase() {
            found |= REQUIRE_UPPERCASE;
        } else if !ch.is_whitespace() {
            found |= REQUIRE_SPECIAL;
        }
    }

    let missing = required & !found;
    if missing & REQUIRE_DIGIT != 0 {
        return Err(PolicyViolation::MissingDigit);
    }
    if missing & REQUIRE_LOWERCASE != 0 {
        return Err(PolicyViolation::MissingLowercase);
    }
    if missing & REQUIRE_UPPERCASE != 0 {
        return Err(PolicyViolation::MissingUppercase);
    }
    if missing & REQUIRE_SPECIAL != 0 {
        return Err(PolicyViolation::MissingSpecial);
    }
    Ok(())
}

/// Whether `password` satisfies the required classes.
pub fn is_valid(password: &str, required: u32) -> bool {
    validate(password, required).is_ok()
}
