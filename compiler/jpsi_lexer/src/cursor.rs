//! Bounds-checked byte cursor over a source string.
//!
//! Reads past the end return `0`, which no scanning predicate accepts, so
//! loops terminate without explicit end checks.

pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.peek_at(0)
    }

    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.peek_at(1)
    }

    #[inline]
    pub(crate) fn peek_at(&self, n: usize) -> u8 {
        self.bytes.get(self.pos + n).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.advance_n(1);
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    /// Advance past one full UTF-8 character.
    pub(crate) fn advance_char(&mut self) {
        let width = match self.current() {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        self.advance_n(width);
    }

    /// Decode the character at the cursor, if any.
    pub(crate) fn current_char(&self) -> Option<char> {
        let rest = self.bytes.get(self.pos..)?;
        let len = rest.len().min(4);
        // A prefix of up to 4 bytes contains at least one full character
        // when `pos` is on a boundary.
        let prefix = match std::str::from_utf8(&rest[..len]) {
            Ok(s) => s,
            Err(e) => std::str::from_utf8(&rest[..e.valid_up_to()]).ok()?,
        };
        prefix.chars().next()
    }

    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance to the next `\n` (not consuming it) or to the end.
    pub(crate) fn eat_until_newline(&mut self) {
        let rest = &self.bytes[self.pos..];
        let found = memchr::memchr2(b'\n', b'\r', rest);
        self.pos = found.map_or(self.bytes.len(), |off| self.pos + off);
    }

    /// Advance past the next occurrence of `needle`, or to the end.
    ///
    /// Returns whether the needle was found.
    pub(crate) fn eat_past(&mut self, needle: &[u8]) -> bool {
        let rest = &self.bytes[self.pos..];
        if let Some(off) = memchr::memmem::find(rest, needle) {
            self.pos += off + needle.len();
            true
        } else {
            self.pos = self.bytes.len();
            false
        }
    }

    /// Whether the remaining input starts with `prefix`.
    #[inline]
    pub(crate) fn starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(prefix)
    }
}
