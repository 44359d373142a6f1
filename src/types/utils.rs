//! Shared utility functions for text handling and error-tolerant iteration.

use std::fmt::Display;

// =============================================================================
// String Utilities
// =============================================================================

/// Keep at most `max_chars` characters of `content`.
///
/// Counts characters, not bytes, so multi-byte text is never split
/// inside a code point.
pub fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// Redact a secret for display, keeping a short prefix.
pub fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if prefix.is_empty() {
        "[EMPTY]".to_string()
    } else {
        format!("{}…", prefix)
    }
}

// =============================================================================
// Result Filtering
// =============================================================================

/// Filter an iterator of Results, logging errors at warn level before discarding.
///
/// Use this instead of `.filter_map(|r| r.ok())` when dropped items must stay
/// visible in the log.
pub fn log_filter_warn<T, E: Display>(result: Result<T, E>, context: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("{}: {}", context, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_input() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_truncate_chars_exact_budget() {
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        // Each of these is one char but several bytes
        let text = "éèêë";
        assert_eq!(truncate_chars(text, 2), "éè");
        assert_eq!(truncate_chars("안녕하세요", 3), "안녕하");
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("gsk_1234567890"), "gsk_…");
        assert_eq!(redact("ab"), "ab…");
        assert_eq!(redact(""), "[EMPTY]");
    }

    #[test]
    fn test_log_filter_warn() {
        let ok: Result<i32, String> = Ok(1);
        let err: Result<i32, String> = Err("boom".to_string());
        assert_eq!(log_filter_warn(ok, "test"), Some(1));
        assert_eq!(log_filter_warn(err, "test"), None);
    }
}
