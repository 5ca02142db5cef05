//! Random value generation
//!
//! Thin convenience layer over the thread-local RNG for test fixtures,
//! nonces, and display codes. Nothing here is suitable for key material.

use rand::seq::SliceRandom;
use rand::Rng;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const ALPHABETIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn string_from(charset: &[u8], length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(*charset.choose(&mut rng).unwrap_or(&b'0')))
        .collect()
}

/// Random lowercase string of the given length.
pub fn lowercase(length: usize) -> String {
    string_from(LOWERCASE, length)
}

/// Random uppercase string of the given length.
pub fn uppercase(length: usize) -> String {
    string_from(UPPERCASE, length)
}

/// Random digit string of the given length.
pub fn digits(length: usize) -> String {
    string_from(DIGITS, length)
}

/// Random mixed-case alphabetic string of the given length.
pub fn alphabetic(length: usize) -> String {
    string_from(ALPHABETIC, length)
}

/// Random mixed-case alphanumeric string of the given length.
pub fn alphanumeric(length: usize) -> String {
    string_from(ALPHANUMERIC, length)
}

/// Random integer in `[start, end]` inclusive.
pub fn i32_in_range(start: i32, end: i32) -> i32 {
    if start >= end {
        return start;
    }
    rand::thread_rng().gen_range(start..=end)
}

/// Random integer in `[start, end]` inclusive.
pub fn i64_in_range(start: i64, end: i64) -> i64 {
    if start >= end {
        return start;
    }
    rand::thread_rng().gen_range(start..=end)
}

/// Fair coin flip.
pub fn coin_flip() -> bool {
    rand::thread_rng().gen_bool(0.5)
}

/// Random float in `[start, end)`, rounded to `scale` decimal places.
pub fn f64_in_range(start: f64, end: f64, scale: u32) -> f64 {
    if start >= end {
        return start;
    }
    let value: f64 = rand::thread_rng().gen_range(start..end);
    let factor = 10f64.powi(scale as i32);
    (value * factor).round() / factor
}
