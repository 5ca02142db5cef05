//! String shaping helpers
//!
//! Blank-awareness, truncation, chunking, and case conversion between
//! `snake_case` and `camelCase`. All length arithmetic counts characters,
//! not bytes, so multi-byte input never splits mid-character.

/// Whether the string is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Whether the string contains any non-whitespace character.
pub fn is_not_blank(value: &str) -> bool {
    !is_blank(value)
}

/// Trim, returning `None` when nothing remains.
pub fn trim_to_none(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// The value itself when non-blank, otherwise the default.
pub fn default_if_blank<'a>(value: &'a str, default: &'a str) -> &'a str {
    if is_blank(value) {
        default
    } else {
        value
    }
}

/// Split into chunks of at most `chunk_size` characters.
///
/// A zero chunk size yields no chunks.
pub fn split_by_length(value: &str, chunk_size: usize) -> Vec<String> {
    if chunk_size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = value.chars().collect();
    chars.chunks(chunk_size).map(|chunk| chunk.iter().collect()).collect()
}

/// Trim, then keep at most `max_chars` characters.
pub fn trim_and_truncate(value: &str, max_chars: usize) -> String {
    value.trim().chars().take(max_chars).collect()
}

/// Remove every whitespace character.
pub fn remove_whitespace(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Whether the character count lies in `[min, max]` inclusive.
pub fn is_length_in_range(value: &str, min: usize, max: usize) -> bool {
    let count = value.chars().count();
    count >= min && count <= max
}

/// Convert `snake_case` to `camelCase`.
///
/// Leading underscores are dropped; consecutive underscores collapse.
pub fn to_camel_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut capitalize_next = false;
    for ch in value.chars() {
        if ch == '_' {
            capitalize_next = !out.is_empty();
        } else if capitalize_next {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Convert `camelCase` (or `PascalCase`) to `snake_case`.
pub fn to_snake_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for (index, ch) in value.chars().enumerate() {
        if ch.is_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
