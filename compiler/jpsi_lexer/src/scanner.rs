//! The token scanner.
//!
//! Dispatch is on the first byte. Each arm advances the cursor past one
//! token and returns its kind; [`Lexer::next`] wraps the kind with the span
//! it covered. Malformed input never fails: unterminated literals and
//! comments extend to the end of the line or file, and stray bytes become
//! [`ElementType::BadCharacter`] tokens one character wide.

use jpsi_ir::{ElementType, Span};

use crate::cursor::Cursor;
use crate::keywords::reserved_keyword;
use crate::Token;

/// Iterator over the tokens of a source string.
pub struct Lexer<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            cursor: Cursor::new(source),
        }
    }

    fn scan(&mut self) -> ElementType {
        use ElementType as T;
        match self.cursor.current() {
            b' ' | b'\t' | b'\n' | b'\r' | 0x0C => self.whitespace(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.identifier(),
            b'0'..=b'9' => self.number(),
            b'.' if self.cursor.peek().is_ascii_digit() => self.number(),
            b'"' => self.string(),
            b'\'' => self.char_literal(),
            b'/' => self.slash(),
            b'(' => self.single(T::LParenth),
            b')' => self.single(T::RParenth),
            b'{' => self.single(T::LBrace),
            b'}' => self.single(T::RBrace),
            b'[' => self.single(T::LBracket),
            b']' => self.single(T::RBracket),
            b';' => self.single(T::Semicolon),
            b',' => self.single(T::Comma),
            b'@' => self.single(T::At),
            b'~' => self.single(T::Tilde),
            b'?' => self.single(T::Quest),
            // Never fused here; see the crate docs.
            b'>' => self.single(T::Gt),
            b'.' => self.dot(),
            b':' => self.one_or_two(b':', T::Colon, T::DoubleColon),
            b'=' => self.one_or_two(b'=', T::Eq, T::EqEq),
            b'!' => self.one_or_two(b'=', T::Excl, T::Ne),
            b'^' => self.one_or_two(b'=', T::Xor, T::XorEq),
            b'%' => self.one_or_two(b'=', T::Perc, T::PercEq),
            b'*' => self.one_or_two(b'=', T::Asterisk, T::AsteriskEq),
            b'+' => self.doubled_or_assign(b'+', T::Plus, T::PlusPlus, T::PlusEq),
            b'&' => self.doubled_or_assign(b'&', T::And, T::AndAnd, T::AndEq),
            b'|' => self.doubled_or_assign(b'|', T::Or, T::OrOr, T::OrEq),
            b'-' => self.minus(),
            b'<' => self.less(),
            0x80..=0xFF => self.non_ascii(),
            _ => self.single(T::BadCharacter),
        }
    }

    // ─── Trivia ─────────────────────────────────────────────────────────

    fn whitespace(&mut self) -> ElementType {
        self.cursor
            .eat_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C));
        ElementType::WhiteSpace
    }

    fn slash(&mut self) -> ElementType {
        match self.cursor.peek() {
            b'/' => {
                self.cursor.eat_until_newline();
                ElementType::EndOfLineComment
            }
            b'*' => {
                // `/**/` is an empty C-style comment, not a doc comment.
                let is_doc = self.cursor.peek_at(2) == b'*' && self.cursor.peek_at(3) != b'/';
                self.cursor.advance_n(2);
                self.cursor.eat_past(b"*/");
                if is_doc {
                    ElementType::DocComment
                } else {
                    ElementType::CStyleComment
                }
            }
            _ => self.one_or_two(b'=', ElementType::Div, ElementType::DivEq),
        }
    }

    // ─── Identifiers ────────────────────────────────────────────────────

    fn identifier(&mut self) -> ElementType {
        let start = self.cursor.pos();
        self.eat_identifier_rest();
        let word = &self.source[start..self.cursor.pos()];
        reserved_keyword(word).unwrap_or(ElementType::Identifier)
    }

    fn eat_identifier_rest(&mut self) {
        loop {
            match self.cursor.current() {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$' => self.cursor.advance(),
                0x80..=0xFF if self.cursor.current_char().is_some_and(char::is_alphanumeric) => {
                    self.cursor.advance_char();
                }
                _ => break,
            }
        }
    }

    fn non_ascii(&mut self) -> ElementType {
        if self.cursor.current_char().is_some_and(char::is_alphabetic) {
            self.cursor.advance_char();
            self.eat_identifier_rest();
            return ElementType::Identifier;
        }
        if self.cursor.current_char().is_some_and(char::is_whitespace) {
            self.cursor.advance_char();
            return ElementType::WhiteSpace;
        }
        self.cursor.advance_char();
        ElementType::BadCharacter
    }

    // ─── Numeric Literals ───────────────────────────────────────────────

    fn number(&mut self) -> ElementType {
        let first = self.cursor.current();
        if first == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            self.cursor.advance_n(2);
            return self.hex_number();
        }
        if first == b'0' && matches!(self.cursor.peek(), b'b' | b'B') {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|b| matches!(b, b'0' | b'1' | b'_'));
            return self.integer_suffix();
        }

        let mut is_floating = false;
        self.eat_digits();
        if self.cursor.current() == b'.' && self.cursor.peek() != b'.' {
            // `1.` and `1.5` are both doubles; `1..` never occurs in Java.
            is_floating = true;
            self.cursor.advance();
            self.eat_digits();
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            is_floating = true;
            self.eat_exponent();
        }
        match self.cursor.current() {
            b'f' | b'F' => {
                self.cursor.advance();
                ElementType::FloatLiteral
            }
            b'd' | b'D' => {
                self.cursor.advance();
                ElementType::DoubleLiteral
            }
            _ if is_floating => ElementType::DoubleLiteral,
            _ => self.integer_suffix(),
        }
    }

    fn hex_number(&mut self) -> ElementType {
        self.cursor
            .eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
        let mut is_floating = false;
        if self.cursor.current() == b'.' {
            is_floating = true;
            self.cursor.advance();
            self.cursor
                .eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
        }
        if matches!(self.cursor.current(), b'p' | b'P') {
            is_floating = true;
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            self.eat_digits();
        }
        if is_floating {
            if matches!(self.cursor.current(), b'f' | b'F') {
                self.cursor.advance();
                return ElementType::FloatLiteral;
            }
            if matches!(self.cursor.current(), b'd' | b'D') {
                self.cursor.advance();
            }
            return ElementType::DoubleLiteral;
        }
        self.integer_suffix()
    }

    fn integer_suffix(&mut self) -> ElementType {
        if matches!(self.cursor.current(), b'l' | b'L') {
            self.cursor.advance();
            ElementType::LongLiteral
        } else {
            ElementType::IntegerLiteral
        }
    }

    fn eat_digits(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
    }

    fn eat_exponent(&mut self) {
        self.cursor.advance();
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        self.eat_digits();
    }

    // ─── String & Char Literals ─────────────────────────────────────────

    fn string(&mut self) -> ElementType {
        if self.cursor.starts_with(b"\"\"\"") {
            return self.text_block();
        }
        self.cursor.advance();
        self.quoted_body(b'"');
        ElementType::StringLiteral
    }

    fn char_literal(&mut self) -> ElementType {
        self.cursor.advance();
        self.quoted_body(b'\'');
        ElementType::CharacterLiteral
    }

    /// Consume up to and including `quote`; stops before a line break.
    fn quoted_body(&mut self, quote: u8) {
        loop {
            match self.cursor.current() {
                b'\\' => {
                    self.cursor.advance();
                    if !matches!(self.cursor.current(), b'\n' | b'\r') {
                        self.cursor.advance_char();
                    }
                }
                b if b == quote => {
                    self.cursor.advance();
                    return;
                }
                b'\n' | b'\r' => return,
                _ if self.cursor.is_eof() => return,
                _ => self.cursor.advance_char(),
            }
        }
    }

    fn text_block(&mut self) -> ElementType {
        self.cursor.advance_n(3);
        loop {
            match self.cursor.current() {
                b'\\' => {
                    self.cursor.advance();
                    self.cursor.advance_char();
                }
                b'"' if self.cursor.starts_with(b"\"\"\"") => {
                    self.cursor.advance_n(3);
                    break;
                }
                _ if self.cursor.is_eof() => break,
                _ => self.cursor.advance_char(),
            }
        }
        ElementType::TextBlockLiteral
    }

    // ─── Operators ──────────────────────────────────────────────────────

    fn single(&mut self, kind: ElementType) -> ElementType {
        self.cursor.advance_char();
        kind
    }

    fn one_or_two(&mut self, second: u8, one: ElementType, two: ElementType) -> ElementType {
        if self.cursor.peek() == second {
            self.cursor.advance_n(2);
            two
        } else {
            self.cursor.advance();
            one
        }
    }

    fn doubled_or_assign(
        &mut self,
        byte: u8,
        one: ElementType,
        doubled: ElementType,
        assign: ElementType,
    ) -> ElementType {
        match self.cursor.peek() {
            b if b == byte => {
                self.cursor.advance_n(2);
                doubled
            }
            b'=' => {
                self.cursor.advance_n(2);
                assign
            }
            _ => {
                self.cursor.advance();
                one
            }
        }
    }

    fn minus(&mut self) -> ElementType {
        if self.cursor.peek() == b'>' {
            self.cursor.advance_n(2);
            return ElementType::Arrow;
        }
        self.doubled_or_assign(
            b'-',
            ElementType::Minus,
            ElementType::MinusMinus,
            ElementType::MinusEq,
        )
    }

    fn less(&mut self) -> ElementType {
        match (self.cursor.peek(), self.cursor.peek_at(2)) {
            (b'<', b'=') => {
                self.cursor.advance_n(3);
                ElementType::LtLtEq
            }
            (b'<', _) => {
                self.cursor.advance_n(2);
                ElementType::LtLt
            }
            (b'=', _) => {
                self.cursor.advance_n(2);
                ElementType::Le
            }
            _ => {
                self.cursor.advance();
                ElementType::Lt
            }
        }
    }

    fn dot(&mut self) -> ElementType {
        if self.cursor.peek() == b'.' && self.cursor.peek_at(2) == b'.' {
            self.cursor.advance_n(3);
            ElementType::Ellipsis
        } else {
            self.cursor.advance();
            ElementType::Dot
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.pos();
        let kind = self.scan();
        let end = self.cursor.pos();
        debug_assert!(end > start, "lexer made no progress at {start}");
        let span = Span::try_from_range(start..end).ok()?;
        Some(Token { kind, span })
    }
}

#[cfg(test)]
mod tests;
