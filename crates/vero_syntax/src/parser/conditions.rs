/// `WHERE` clause parsing.
///
/// Precedence, loosest first: `OR`, `AND`, prefix `NOT`, then a primary comparison or a
/// parenthesized condition. `a = 1 OR b = 2 AND c = 3` groups as `a = 1 OR (b = 2 AND c = 3)`.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser`.
impl<'a> Parser<'a> {
    fn data_condition(&mut self) -> PResult<DataCondition> {
        self.nested(|p| p.or_condition())
    }

    fn or_condition(&mut self) -> PResult<DataCondition> {
        let mut left = self.and_condition()?;
        while self.match_keyword(KeywordId::Or) {
            let right = self.and_condition()?;
            left = DataCondition::Or {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn and_condition(&mut self) -> PResult<DataCondition> {
        let mut left = self.not_condition()?;
        while self.match_keyword(KeywordId::And) {
            let right = self.not_condition()?;
            left = DataCondition::And {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn not_condition(&mut self) -> PResult<DataCondition> {
        if self.match_keyword(KeywordId::Not) {
            let condition = self.nested(|p| p.not_condition())?;
            return Ok(negate(condition));
        }
        self.primary_condition()
    }

    fn primary_condition(&mut self) -> PResult<DataCondition> {
        if self.match_punct(PunctuationId::LParen) {
            let inner = self.nested(|p| p.or_condition())?;
            self.consume_punct(PunctuationId::RParen, "Expected ')' to close condition");
            return Ok(inner);
        }

        let column = self.column_name()?;

        if self.match_keyword(KeywordId::In) {
            let values = self.value_list()?;
            return Ok(DataCondition::comparison(column, ComparisonOperator::In, ConditionValue::List(values)));
        }
        if self.check_keyword(KeywordId::Not) && self.lookahead_keyword(1, KeywordId::In) {
            self.advance();
            self.advance();
            let values = self.value_list()?;
            return Ok(negate(DataCondition::comparison(
                column,
                ComparisonOperator::In,
                ConditionValue::List(values),
            )));
        }
        if self.match_keyword(KeywordId::Is) {
            let negated = self.match_keyword(KeywordId::Not);
            if self.match_word(WordId::Empty) {
                let operator = if negated {
                    ComparisonOperator::IsNotEmpty
                } else {
                    ComparisonOperator::IsEmpty
                };
                return Ok(DataCondition::comparison(column, operator, ConditionValue::None));
            }
            if self.match_word(WordId::Null) {
                let condition = DataCondition::comparison(column, ComparisonOperator::IsNull, ConditionValue::None);
                return Ok(if negated { negate(condition) } else { condition });
            }
            return Err(self.malformed("Expected EMPTY or NULL after IS"));
        }

        let operator = if self.match_keyword(KeywordId::Contains) {
            ComparisonOperator::Contains
        } else if self.match_keyword(KeywordId::Starts) {
            self.consume_keyword(KeywordId::With, "Expected WITH after STARTS");
            ComparisonOperator::StartsWith
        } else if self.match_keyword(KeywordId::Ends) {
            self.consume_keyword(KeywordId::With, "Expected WITH after ENDS");
            ComparisonOperator::EndsWith
        } else if self.match_keyword(KeywordId::Matches) {
            ComparisonOperator::Matches
        } else if let Some(operator) = self.comparison_operator_at_current() {
            self.advance();
            operator
        } else {
            return Err(self.malformed(&format!("Expected a comparison after column '{column}'")));
        };
        let value = self.expression()?;
        Ok(DataCondition::comparison(column, operator, ConditionValue::Single(value)))
    }

    /// `[v, ...]`
    fn value_list(&mut self) -> PResult<Vec<Expression>> {
        self.consume_punct(PunctuationId::LBracket, "Expected '[' to open the value list");
        let mut values = Vec::new();
        while !self.check_punct(PunctuationId::RBracket) && !self.is_at_end() {
            values.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.consume_punct(PunctuationId::RBracket, "Expected ']' to close the value list");
        Ok(values)
    }

    /// Column names may reuse any keyword except clause words, word operators and literals.
    fn column_name(&mut self) -> PResult<Ident> {
        let token = self.peek();
        let usable = match token.kind {
            TokenKind::Identifier => true,
            TokenKind::Keyword(_) => !matches!(
                token.kind.keyword_category(),
                Some(KeywordCategory::Clause | KeywordCategory::Operator | KeywordCategory::Literal)
            ),
            _ => false,
        };
        if !usable {
            return Err(self.malformed("Expected a column name"));
        }
        Ok(self.advance().value.clone())
    }
}

fn negate(condition: DataCondition) -> DataCondition {
    DataCondition::Not {
        condition: Box::new(condition),
    }
}
