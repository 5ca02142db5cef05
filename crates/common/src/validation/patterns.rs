//! Field validation patterns
//!
//! A fixed table of regexes for the field shapes that recur across admin
//! backends: identifier alphabets, bounded integers, decimals, and a handful
//! of well-known formats. Patterns compile once, on first use, into a shared
//! table.
//!
//! Password strength is deliberately not here — character-class policies
//! need lookaround or counting, which a single regex handles poorly; see
//! [`security::password`](crate::security::password).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// A named, precompiled field pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationPattern {
    /// Uppercase letters only (empty allowed).
    Upper,
    /// Uppercase letters with single underscores between runs.
    UpperUnderscore,
    /// Lowercase letters only (empty allowed).
    Lower,
    /// Lowercase letters with single underscores between runs.
    LowerUnderscore,
    /// Letters of either case (empty allowed).
    Alpha,
    /// Letters with single underscores between runs.
    AlphaUnderscore,
    /// Letters and digits (empty allowed).
    Alphanumeric,
    /// Letters and digits with single underscores between runs.
    AlphanumericUnderscore,
    /// 1-digit integer.
    Int1,
    /// Up to 2-digit integer.
    Int2,
    /// Up to 4-digit integer.
    Int4,
    /// Up to 6-digit integer.
    Int6,
    /// Up to 8-digit integer.
    Int8,
    /// Up to 10-digit integer.
    Int10,
    /// Up to 12-digit integer.
    Int12,
    /// Positive decimal, at most 8 integer and 2 fraction digits.
    PositiveDecimal8x2,
    /// Signed decimal, at most 8 integer and 2 fraction digits.
    Decimal8x2,
    /// Dotted-quad IPv4 address.
    Ipv4,
    /// Email address.
    Email,
    /// Mobile phone number (11 digits, leading 1).
    Mobile,
    /// http/https URL.
    Url,
    /// Image filename extension (jpg/jpeg/png/gif/bmp).
    ImageFile,
    /// Video filename extension (mp4/avi/3gp).
    VideoFile,
    /// Username: letter first, then 4-17 letters, digits, or underscores.
    Username,
    /// 6-digit postcode, no leading zero.
    Postcode,
}

impl ValidationPattern {
    /// Every pattern, for table construction and exhaustive tests.
    pub const ALL: &'static [Self] = &[
        Self::Upper,
        Self::UpperUnderscore,
        Self::Lower,
        Self::LowerUnderscore,
        Self::Alpha,
        Self::AlphaUnderscore,
        Self::Alphanumeric,
        Self::AlphanumericUnderscore,
        Self::Int1,
        Self::Int2,
        Self::Int4,
        Self::Int6,
        Self::Int8,
        Self::Int10,
        Self::Int12,
        Self::PositiveDecimal8x2,
        Self::Decimal8x2,
        Self::Ipv4,
        Self::Email,
        Self::Mobile,
        Self::Url,
        Self::ImageFile,
        Self::VideoFile,
        Self::Username,
        Self::Postcode,
    ];

    /// Short label for messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upper => "uppercase letters",
            Self::UpperUnderscore => "uppercase letters and underscores",
            Self::Lower => "lowercase letters",
            Self::LowerUnderscore => "lowercase letters and underscores",
            Self::Alpha => "letters",
            Self::AlphaUnderscore => "letters and underscores",
            Self::Alphanumeric => "letters and digits",
            Self::AlphanumericUnderscore => "letters, digits, and underscores",
            Self::Int1 => "1-digit integer",
            Self::Int2 => "integer up to 2 digits",
            Self::Int4 => "integer up to 4 digits",
            Self::Int6 => "integer up to 6 digits",
            Self::Int8 => "integer up to 8 digits",
            Self::Int10 => "integer up to 10 digits",
            Self::Int12 => "integer up to 12 digits",
            Self::PositiveDecimal8x2 => "positive decimal (8 integer, 2 fraction digits)",
            Self::Decimal8x2 => "decimal (8 integer, 2 fraction digits)",
            Self::Ipv4 => "IPv4 address",
            Self::Email => "email address",
            Self::Mobile => "mobile number",
            Self::Url => "URL",
            Self::ImageFile => "image filename",
            Self::VideoFile => "video filename",
            Self::Username => "username",
            Self::Postcode => "postcode",
        }
    }

    /// Hint shown to users when the pattern rejects a value.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Upper => "only uppercase letters are allowed",
            Self::UpperUnderscore => "only uppercase letters and underscores are allowed",
            Self::Lower => "only lowercase letters are allowed",
            Self::LowerUnderscore => "only lowercase letters and underscores are allowed",
            Self::Alpha => "only letters are allowed",
            Self::AlphaUnderscore => "only letters and underscores are allowed",
            Self::Alphanumeric => "only letters and digits are allowed",
            Self::AlphanumericUnderscore => "only letters, digits, and underscores are allowed",
            Self::Int1 => "a single digit is required",
            Self::Int2 => "an integer of 1-2 digits is required",
            Self::Int4 => "an integer of 1-4 digits is required",
            Self::Int6 => "an integer of 1-6 digits is required",
            Self::Int8 => "an integer of 1-8 digits is required",
            Self::Int10 => "an integer of 1-10 digits is required",
            Self::Int12 => "an integer of 1-12 digits is required",
            Self::PositiveDecimal8x2 => "a positive amount with up to 2 decimal places is required",
            Self::Decimal8x2 => "an amount with up to 2 decimal places is required",
            Self::Ipv4 => "a valid IPv4 address is required",
            Self::Email => "a valid email address is required",
            Self::Mobile => "an 11-digit mobile number is required",
            Self::Url => "a valid http(s) URL is required",
            Self::ImageFile => "only jpg/jpeg/png/gif/bmp files are supported",
            Self::VideoFile => "only mp4/avi/3gp files are supported",
            Self::Username => "5-18 characters, starting with a letter",
            Self::Postcode => "a 6-digit postcode is required",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Self::Upper => r"^[A-Z]*$",
            Self::UpperUnderscore => r"^([A-Z]+_)*[A-Z]+$",
            Self::Lower => r"^[a-z]*$",
            Self::LowerUnderscore => r"^([a-z]+_)*[a-z]+$",
            Self::Alpha => r"^[A-Za-z]*$",
            Self::AlphaUnderscore => r"^([A-Za-z]+_)*[A-Za-z]+$",
            Self::Alphanumeric => r"^[A-Za-z0-9]*$",
            Self::AlphanumericUnderscore => r"^([A-Za-z0-9]+_)*[A-Za-z0-9]+$",
            Self::Int1 => r"^[0-9]{1}$",
            Self::Int2 => r"^[0-9]{1,2}$",
            Self::Int4 => r"^[0-9]{1,4}$",
            Self::Int6 => r"^[0-9]{1,6}$",
            Self::Int8 => r"^[0-9]{1,8}$",
            Self::Int10 => r"^[0-9]{1,10}$",
            Self::Int12 => r"^[0-9]{1,12}$",
            Self::PositiveDecimal8x2 => r"^\d{1,8}(?:\.\d{1,2})?$",
            Self::Decimal8x2 => r"^-?\d{1,8}(?:\.\d{1,2})?$",
            Self::Ipv4 => {
                r"^([1-9]|[1-9]\d|1\d{2}|2[0-4]\d|25[0-5])(\.([0-9]|[1-9]\d|1\d{2}|2[0-4]\d|25[0-5])){3}$"
            }
            Self::Email => {
                r"^[\w!#$%&'*+/=?^_`{|}~-]+(?:\.[\w!#$%&'*+/=?^_`{|}~-]+)*@(?:[\w](?:[\w-]*[\w])?\.)+[\w](?:[\w-]*[\w])?$"
            }
            Self::Mobile => r"^1[3-9]\d{9}$",
            Self::Url => r"^https?://.+$",
            Self::ImageFile => r"(?i)\.(jpg|jpeg|png|gif|bmp)$",
            Self::VideoFile => r"(?i)\.(mp4|avi|3gp)$",
            Self::Username => r"^[a-zA-Z][a-zA-Z0-9_]{4,17}$",
            Self::Postcode => r"^[1-9]\d{5}$",
        }
    }

    /// Whether `value` matches this pattern.
    pub fn matches(&self, value: &str) -> bool {
        COMPILED.get(self).map(|regex| regex.is_match(value)).unwrap_or(false)
    }

    /// Check `value`, describing the failure in terms of `field_name`.
    pub fn validate(&self, field_name: &str, value: &str) -> Result<(), String> {
        if self.matches(value) {
            Ok(())
        } else {
            Err(format!("{field_name}: {}", self.hint()))
        }
    }
}

static COMPILED: Lazy<HashMap<ValidationPattern, Regex>> = Lazy::new(|| {
    ValidationPattern::ALL
        .iter()
        .map(|pattern| {
            let regex =
                Regex::new(pattern.pattern()).expect("built-in validation pattern must compile");
            (*pattern, regex)
        })
        .collect()
});
