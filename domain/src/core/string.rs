//! String utilities for the domain layer.

/// Shorten `s` to at most `max_chars` characters, appending `…` when cut.
///
/// Counts `char`s rather than bytes so multi-byte text is never split.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = trimmed.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
