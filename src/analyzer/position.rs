//! Char index to byte offset tracking for a text fed one character at a time

/// Address and byte length of a text, used to recognise it between calls
pub(super) type TextKey = (usize, usize);

pub(super) fn text_key(text: &str) -> TextKey {
    (text.as_ptr() as usize, text.len())
}

/// Last char position looked up, and the text it belongs to
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct TextPosition {
    text: Option<TextKey>,
    index: usize,
    byte: usize,
}

impl TextPosition {
    /// Byte offset and character at char `index` of `text`, `None` when out of bounds.
    ///
    /// Walks from the previous position when `text` is the same text, so
    /// consecutive indices cost O(1) each.
    pub(super) fn seek(&mut self, text: &str, index: usize) -> Option<(usize, char)> {
        let key = text_key(text);
        let (mut at, mut byte) = match self.text {
            Some(known) if known == key && text.is_char_boundary(self.byte) => (self.index, self.byte),
            _ => (0, 0),
        };

        while at < index {
            let ch = text[byte..].chars().next()?;
            byte += ch.len_utf8();
            at += 1;
        }
        while at > index {
            let ch = text[..byte].chars().next_back()?;
            byte -= ch.len_utf8();
            at -= 1;
        }

        let ch = text[byte..].chars().next()?;
        *self = Self {
            text: Some(key),
            index,
            byte,
        };
        Some((byte, ch))
    }

    pub(super) fn clear(&mut self) {
        *self = Self::default();
    }
}
