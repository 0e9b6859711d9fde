//! String literal and `{{NAME}}` reference scanning.

use super::{Lexer, Mark, Token, TokenKind, is_ident_continue};

impl<'a> Lexer<'a> {
    /// Scan a quoted string whose opening `quote` has already been consumed.
    ///
    /// The token value is the unescaped contents. Supported escapes: `\n`, `\t`, `\\`, `\"`,
    /// `\'`; any other escaped character is kept as written.
    pub(super) fn scan_string(&mut self, start: Mark, quote: char) {
        let mut value = String::new();

        loop {
            match self.advance() {
                None => {
                    self.error("Unterminated string literal", start);
                    return;
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(other) => value.push(other),
                    None => {
                        self.error("Unterminated string literal", start);
                        return;
                    }
                },
                Some(c) => value.push(c),
            }
        }

        let span = self.span_from(start);
        self.tokens.push(Token::new(TokenKind::String, value, span));
    }

    /// Scan `{{ NAME }}` after the opening `{{` has been consumed.
    pub(super) fn scan_env_var(&mut self, start: Mark) {
        self.skip_spaces();

        let name_start = self.current_pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let name = self.source[name_start..self.current_pos].to_string();

        self.skip_spaces();

        if name.is_empty() || !(self.match_char('}') && self.match_char('}')) {
            self.error("Malformed environment variable reference, expected {{NAME}}", start);
            return;
        }

        let span = self.span_from(start);
        self.tokens.push(Token::new(TokenKind::EnvVar, name, span));
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }
    }
}
