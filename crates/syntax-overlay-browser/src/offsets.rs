//! UTF-16 ↔ char offset conversion.
//!
//! `HTMLTextAreaElement.selectionStart/End` count UTF-16 code units, while
//! the core works in chars. Astral-plane characters (emoji, some CJK) are
//! two code units but one char.

/// Convert a UTF-16 offset into `text` to a char offset.
///
/// An offset pointing into the middle of a surrogate pair resolves to the
/// char containing it. Offsets past the end clamp to the char length.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (chars, c) in text.chars().enumerate() {
        if units >= utf16_offset {
            return chars;
        }
        units += c.len_utf16();
        if units > utf16_offset {
            return chars;
        }
    }
    text.chars().count()
}

/// Convert a char offset into `text` to a UTF-16 offset.
pub fn char_to_utf16_offset(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_identity() {
        assert_eq!(utf16_to_char_offset("hello", 3), 3);
        assert_eq!(char_to_utf16_offset("hello", 3), 3);
    }

    #[test]
    fn test_astral_chars() {
        // 😀 is one char, two UTF-16 units.
        let text = "a😀b";
        assert_eq!(utf16_to_char_offset(text, 0), 0);
        assert_eq!(utf16_to_char_offset(text, 1), 1);
        assert_eq!(utf16_to_char_offset(text, 3), 2);
        assert_eq!(utf16_to_char_offset(text, 4), 3);
        assert_eq!(char_to_utf16_offset(text, 2), 3);
        assert_eq!(char_to_utf16_offset(text, 3), 4);
    }

    #[test]
    fn test_mid_surrogate_resolves_to_containing_char() {
        assert_eq!(utf16_to_char_offset("a😀b", 2), 1);
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(utf16_to_char_offset("ab", 10), 2);
        assert_eq!(char_to_utf16_offset("ab", 10), 2);
        assert_eq!(utf16_to_char_offset("", 1), 0);
    }

    #[test]
    fn test_bmp_non_ascii() {
        // é is one UTF-16 unit.
        assert_eq!(utf16_to_char_offset("héllo", 2), 2);
        assert_eq!(char_to_utf16_offset("héllo", 2), 2);
    }
}
