//! Tab-key indentation as a pure text edit.

/// Selection within a text surface, in chars.
///
/// `start == end` is a collapsed caret. A reversed pair is allowed and
/// normalised by `ordered`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Same selection with `start <= end`.
    pub fn ordered(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }

    /// Ordered and clamped to a text of `len_chars` chars.
    pub fn clamped(self, len_chars: usize) -> Self {
        let sel = self.ordered();
        Self {
            start: sel.start.min(len_chars),
            end: sel.end.min(len_chars),
        }
    }
}

/// Result of inserting an indent: new text plus where the caret lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentEdit {
    pub text: String,
    pub caret: usize,
}

/// Replace `selection` in `text` with `indent`, caret collapsed right after it.
pub fn insert_indent(text: &str, selection: TextSelection, indent: &str) -> IndentEdit {
    let len_chars = text.chars().count();
    let sel = selection.clamped(len_chars);

    let start_byte = char_to_byte(text, sel.start);
    let end_byte = char_to_byte(text, sel.end);

    let mut out = String::with_capacity(text.len() - (end_byte - start_byte) + indent.len());
    out.push_str(&text[..start_byte]);
    out.push_str(indent);
    out.push_str(&text[end_byte..]);

    IndentEdit {
        text: out,
        caret: sel.start + indent.chars().count(),
    }
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
