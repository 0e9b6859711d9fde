/// Expression parsing.
///
/// Literals, `{{NAME}}` references and `name` / `Page.name` variable references. There is no
/// operator precedence here: comparisons live in `IF` conditions and `WHERE` clauses.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser`.
/// - `expression` records nothing on failure, so callers may try it speculatively and restore
///   `pos` afterwards.
impl<'a> Parser<'a> {
    fn at_expression_start(&self) -> bool {
        starts_expression(self.peek())
    }

    fn expression(&mut self) -> PResult<Expression> {
        let token = self.peek();
        let expression = match token.kind {
            TokenKind::String => Expression::StringLiteral(token.value.clone()),
            TokenKind::Number => Expression::NumberLiteral(self.number_value()?),
            TokenKind::Keyword(KeywordId::True) => Expression::BooleanLiteral(true),
            TokenKind::Keyword(KeywordId::False) => Expression::BooleanLiteral(false),
            TokenKind::EnvVar => Expression::EnvVarReference {
                name: token.value.clone(),
            },
            _ if is_name_token(token) => {
                let name = token.value.clone();
                if self.lookahead_punct(1, PunctuationId::Dot) && self.lookahead(2).is_some_and(is_name_token) {
                    self.advance();
                    self.advance();
                    let member = self.advance().value.clone();
                    return Ok(Expression::VariableReference {
                        page: Some(name),
                        name: member,
                    });
                }
                Expression::VariableReference { page: None, name }
            }
            _ => return Err(self.unexpected("Expected an expression")),
        };
        self.advance();
        Ok(expression)
    }

    /// Value of the current number token.
    fn number_value(&self) -> PResult<f64> {
        self.peek()
            .value
            .parse::<f64>()
            .map_err(|_| self.malformed("Invalid number literal"))
    }

    /// Consume a whole number (`NTH 2`, `LIMIT 10`).
    fn integer_literal(&mut self, message: &str) -> PResult<i64> {
        if !self.check_kind(TokenKind::Number) {
            return Err(self.malformed(message));
        }
        let value = self.number_value()?;
        if value.fract() != 0.0 || !value.is_finite() {
            return Err(self.malformed("Expected a whole number"));
        }
        self.advance();
        Ok(value as i64)
    }

    /// Comparison operator at the current token, without consuming it.
    fn comparison_operator_at_current(&self) -> Option<ComparisonOperator> {
        let operator = match self.peek().operator_id()? {
            OperatorId::Assign | OperatorId::EqEq => ComparisonOperator::Eq,
            OperatorId::NotEq => ComparisonOperator::NotEq,
            OperatorId::Gt => ComparisonOperator::Gt,
            OperatorId::Lt => ComparisonOperator::Lt,
            OperatorId::GtEq => ComparisonOperator::GtEq,
            OperatorId::LtEq => ComparisonOperator::LtEq,
        };
        Some(operator)
    }

    /// `VISIBLE`, `HIDDEN`, ...
    fn element_state(&mut self) -> PResult<ElementState> {
        let state = match self.peek().kind {
            TokenKind::Identifier => states::from_str(&self.peek().value),
            _ => None,
        };
        match state {
            Some(state) => {
                self.advance();
                Ok(state)
            }
            None => Err(self.malformed("Expected an element state (VISIBLE, HIDDEN, ENABLED, ...)")),
        }
    }

    /// `CONTAINS | EQUALS | MATCHES`
    fn text_match(&mut self) -> PResult<TextMatch> {
        let condition = match self.peek().keyword_id() {
            Some(KeywordId::Contains) => TextMatch::Contains,
            Some(KeywordId::Equals) => TextMatch::Equals,
            Some(KeywordId::Matches) => TextMatch::Matches,
            _ => return Err(self.malformed("Expected CONTAINS, EQUALS or MATCHES")),
        };
        self.advance();
        Ok(condition)
    }

    fn lookahead_text_match(&self, n: usize) -> bool {
        matches!(
            self.lookahead(n).and_then(Token::keyword_id),
            Some(KeywordId::Contains | KeywordId::Equals | KeywordId::Matches)
        )
    }
}

fn starts_expression(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::String
            | TokenKind::Number
            | TokenKind::EnvVar
            | TokenKind::Keyword(KeywordId::True | KeywordId::False)
    ) || is_name_token(token)
}
