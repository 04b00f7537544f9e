// Output formatting: colored terminal report and JSON export.

pub mod json;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Vocabulary terms mix Latin and Hangul, so this counts chars rather than
/// bytes and never splits a multi-byte character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_hangul() {
        assert_eq!(truncate_chars("반도체", 5), "반도체");
        assert_eq!(truncate_chars("인공지능반도체", 4), "인공지능...");
        assert_eq!(truncate_chars("HBM", 3), "HBM");
    }
}
