/// Parser helper methods.
///
/// Token cursor, matching, error recording and synchronization. Productions call these instead
/// of indexing `tokens` directly.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser`.
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Token `n` positions ahead of the current one (`lookahead(1)` is the next token).
    fn lookahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn previous(&self) -> &Token {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .unwrap_or(&self.eof)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Consume the current token. Stays put at end of input.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    // ========================================================================
    // Matching
    // ========================================================================

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_word(&self, id: WordId) -> bool {
        self.peek().is_word(id)
    }

    /// Identifier, or a statement verb standing in for a name.
    fn check_name(&self) -> bool {
        is_name_token(self.peek())
    }

    fn lookahead_keyword(&self, n: usize, id: KeywordId) -> bool {
        self.lookahead(n).is_some_and(|t| t.kind.is_keyword(id))
    }

    fn lookahead_punct(&self, n: usize, id: PunctuationId) -> bool {
        self.lookahead(n).is_some_and(|t| t.kind.is_punctuation(id))
    }

    fn lookahead_word(&self, n: usize, id: WordId) -> bool {
        self.lookahead(n).is_some_and(|t| t.is_word(id))
    }

    fn lookahead_kind(&self, n: usize, kind: TokenKind) -> bool {
        self.lookahead(n).is_some_and(|t| t.kind == kind)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_word(&mut self, id: WordId) -> bool {
        if self.check_word(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Required tokens
    // ========================================================================

    /// Consume a token of `kind`, or record an error and return a placeholder of that kind with
    /// an empty value.
    fn consume(&mut self, kind: TokenKind, message: &str) -> Token {
        if self.check_kind(kind) {
            return self.advance().clone();
        }
        let span = self.peek().span;
        let error = ParseError::expected(format!("{message}, found {}", self.peek().describe()), span);
        self.error(error);
        Token::new(kind, "", span)
    }

    fn consume_keyword(&mut self, id: KeywordId, message: &str) {
        self.consume(TokenKind::Keyword(id), message);
    }

    fn consume_op(&mut self, id: OperatorId, message: &str) {
        self.consume(TokenKind::Operator(id), message);
    }

    fn consume_punct(&mut self, id: PunctuationId, message: &str) {
        self.consume(TokenKind::Punctuation(id), message);
    }

    fn consume_string(&mut self, message: &str) -> String {
        self.consume(TokenKind::String, message).value
    }

    /// Consume a contextual word, recording an error when it is missing.
    fn consume_word(&mut self, id: WordId, message: &str) {
        if !self.match_word(id) {
            let error = self.expected(message);
            self.error(error);
        }
    }

    /// Consume a name, recording an error and returning an empty name when missing.
    fn consume_name(&mut self, message: &str) -> Ident {
        if self.check_name() {
            return self.advance().value.clone();
        }
        let error = self.expected(message);
        self.error(error);
        Ident::new()
    }

    /// Consume a name or fail the production.
    fn expect_name(&mut self, message: &str) -> PResult<Ident> {
        if self.check_name() {
            Ok(self.advance().value.clone())
        } else {
            Err(self.malformed(message))
        }
    }

    /// Consume a contextual word or fail the production.
    fn expect_word(&mut self, id: WordId, message: &str) -> PResult<()> {
        if self.match_word(id) {
            Ok(())
        } else {
            Err(self.malformed(message))
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn expected(&self, message: &str) -> ParseError {
        ParseError::expected(format!("{message}, found {}", self.peek().describe()), self.peek().span)
    }

    fn unexpected(&self, message: &str) -> ParseError {
        ParseError::unexpected(format!("{message}, found {}", self.peek().describe()), self.peek().span)
    }

    fn malformed(&self, message: &str) -> ParseError {
        ParseError::malformed(format!("{message}, found {}", self.peek().describe()), self.peek().span)
    }

    /// Record a non-fatal error. Suppressed while recovering from an earlier one.
    fn error(&mut self, error: ParseError) {
        if !self.panic_mode {
            self.errors.push(error);
        }
    }

    /// A declaration or member was recognized; errors are reported again.
    fn end_panic(&mut self) {
        self.panic_mode = false;
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    fn at_top_level_keyword(&self) -> bool {
        matches!(
            self.peek().keyword_id(),
            Some(KeywordId::Page | KeywordId::PageActions | KeywordId::Feature | KeywordId::Fixture)
        )
    }

    /// End of a declaration body: `}`, end of input, or the start of the next declaration.
    fn at_member_end(&self) -> bool {
        self.is_at_end() || self.check_punct(PunctuationId::RBrace) || self.at_top_level_keyword()
    }

    /// Skip tokens until a declaration keyword, `SCENARIO`, `}` or end of input.
    ///
    /// The current token is not skipped first, so a production that fails on `}` leaves it in
    /// place for the declaration loop.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.at_top_level_keyword()
                || self.check_keyword(KeywordId::Scenario)
                || self.check_punct(PunctuationId::RBrace)
            {
                return;
            }
            self.advance();
        }
    }

    /// Run `parse` one nesting level deeper, failing once the configured depth is reached.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(ParseError::malformed(
                format!("Nesting exceeds the maximum depth of {}", self.config.max_nesting_depth),
                self.peek().span,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Bindings
    // ========================================================================

    fn bind(&mut self, name: &str) {
        if !name.is_empty() {
            self.bindings.insert(name.to_string());
        }
    }

    fn take_bindings(&mut self) -> Vec<Ident> {
        std::mem::take(&mut self.bindings).into_iter().collect()
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous().span)
    }
}

/// Identifier, or a statement keyword reused as a name (`FIELD select = ...`).
fn is_name_token(token: &Token) -> bool {
    match token.kind {
        TokenKind::Identifier => true,
        TokenKind::Keyword(id) => vero_core::lang::keywords::category(id) == KeywordCategory::Statement,
        _ => false,
    }
}
