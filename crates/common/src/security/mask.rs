//! Data masking
//!
//! Replaces sensitive characters with a placeholder for logs and UI. All
//! positions count characters, so multi-byte text masks cleanly.

/// Mask every character with `*`.
pub fn mask(value: &str) -> String {
    mask_with(value, '*')
}

/// Mask every character with `placeholder`.
pub fn mask_with(value: &str, placeholder: char) -> String {
    std::iter::repeat(placeholder).take(value.chars().count()).collect()
}

/// Keep the first `keep_start` and last `keep_end` characters, masking the
/// middle with `*`.
pub fn mask_partial(value: &str, keep_start: usize, keep_end: usize) -> String {
    mask_partial_with(value, keep_start, keep_end, '*')
}

/// Keep the first `keep_start` and last `keep_end` characters, masking the
/// middle with `placeholder`.
///
/// When the kept ends would cover the whole value, everything is masked —
/// revealing the full value through generous keep windows is the failure
/// mode this guards against.
pub fn mask_partial_with(
    value: &str,
    keep_start: usize,
    keep_end: usize,
    placeholder: char,
) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();

    if keep_start + keep_end >= len {
        return mask_with(value, placeholder);
    }

    let mut out = String::with_capacity(value.len());
    out.extend(&chars[..keep_start]);
    out.extend(std::iter::repeat(placeholder).take(len - keep_start - keep_end));
    out.extend(&chars[len - keep_end..]);
    out
}
