//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one codepoint outside ASCII.
///
/// # Examples
///
/// ```
/// use i18n4j::utils::contains_non_ascii;
///
/// assert!(contains_non_ascii("你好"));
/// assert!(contains_non_ascii("Welcome 欢迎"));
/// assert!(contains_non_ascii("caf\u{e9}"));
/// assert!(!contains_non_ascii("Hello World"));
/// assert!(!contains_non_ascii(""));
/// ```
pub fn contains_non_ascii(text: &str) -> bool {
    text.chars().any(|c| (c as u32) >= 0x80)
}

/// Build an index of line start byte offsets.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset using binary search.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::utils::*;

    #[test]
    fn test_contains_non_ascii() {
        assert!(contains_non_ascii("你好世界"));
        assert!(contains_non_ascii("Error: 用户不存在"));
        assert!(contains_non_ascii("\u{2014}"));
        assert!(contains_non_ascii("Grüße"));

        assert!(!contains_non_ascii("Hello World"));
        assert!(!contains_non_ascii("123-456"));
        assert!(!contains_non_ascii("!@#$%"));
        assert!(!contains_non_ascii("   "));
    }

    #[test]
    fn test_offset_to_line() {
        let content = "a\nbb\n\nccc";
        let index = build_line_index(content);
        assert_eq!(index, vec![0, 2, 5, 6]);

        assert_eq!(offset_to_line(&index, 0), 1);
        assert_eq!(offset_to_line(&index, 1), 1);
        assert_eq!(offset_to_line(&index, 2), 2);
        assert_eq!(offset_to_line(&index, 4), 2);
        assert_eq!(offset_to_line(&index, 5), 3);
        assert_eq!(offset_to_line(&index, 8), 4);
    }
}
