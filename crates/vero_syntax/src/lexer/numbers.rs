//! Numeric literal scanning.

use super::{Lexer, Mark, TokenKind};

impl<'a> Lexer<'a> {
    /// Scan an integer or decimal literal. The first character (digit or `-`) is already consumed.
    ///
    /// A `.` only continues the number when a digit follows, so `1.` lexes as `1` then `.`.
    pub(super) fn scan_number(&mut self, start: Mark) {
        self.consume_digits();

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        self.add_token(TokenKind::Number, start);
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }
}
