/// Utility-expression parsing (`SET x = TRIM name THEN CONVERT ...`).
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser`.
/// - Function names are identifiers resolved through `vero_core::lang::functions`; a name only
///   starts a utility call when its required continuation follows, so variables called `day`
///   or `length` still parse as plain references.
impl<'a> Parser<'a> {
    fn utility_function_at_current(&self) -> Option<UtilityFunctionId> {
        match self.peek().kind {
            TokenKind::Identifier => functions::from_str(&self.peek().value),
            _ => None,
        }
    }

    fn at_utility_start(&self) -> bool {
        let Some(function) = self.utility_function_at_current() else {
            return false;
        };
        match function {
            UtilityFunctionId::Today | UtilityFunctionId::Now => true,
            UtilityFunctionId::Year
            | UtilityFunctionId::Month
            | UtilityFunctionId::Day
            | UtilityFunctionId::Length => self.lookahead_keyword(1, KeywordId::Of),
            UtilityFunctionId::Random => self.lookahead_word(1, WordId::Number),
            UtilityFunctionId::Generate => {
                self.lookahead_kind(1, TokenKind::String) || self.lookahead_word(1, WordId::Uuid)
            }
            _ => self.lookahead(1).is_some_and(starts_expression),
        }
    }

    /// `<call> [THEN <utility-expression>]`
    fn utility_expression(&mut self) -> PResult<UtilityExpression> {
        let first = self.utility_call()?;
        if self.match_keyword(KeywordId::Then) {
            let second = self.nested(|p| p.utility_expression())?;
            return Ok(UtilityExpression::Chained {
                first: Box::new(first),
                second: Box::new(second),
            });
        }
        Ok(first)
    }

    fn utility_call(&mut self) -> PResult<UtilityExpression> {
        let Some(function) = self.utility_function_at_current() else {
            return Err(self.malformed("Expected a utility function"));
        };
        self.advance();

        let expression = match function {
            UtilityFunctionId::Trim => UtilityExpression::Trim {
                value: self.expression()?,
            },
            UtilityFunctionId::Convert => {
                let value = self.expression()?;
                self.consume_keyword(KeywordId::To, "Expected TO after CONVERT value");
                UtilityExpression::Convert {
                    value,
                    target: self.conversion_target()?,
                }
            }
            UtilityFunctionId::Extract => {
                let value = self.expression()?;
                self.consume_keyword(KeywordId::From, "Expected FROM after EXTRACT value");
                let start = self.expression()?;
                self.consume_keyword(KeywordId::To, "Expected TO after EXTRACT start");
                UtilityExpression::Extract {
                    value,
                    start,
                    end: self.expression()?,
                }
            }
            UtilityFunctionId::Replace => {
                let value = self.expression()?;
                let search = self.expression()?;
                self.consume_keyword(KeywordId::With, "Expected WITH after REPLACE search");
                UtilityExpression::Replace {
                    value,
                    search,
                    replacement: self.expression()?,
                }
            }
            UtilityFunctionId::Split => {
                let value = self.expression()?;
                self.consume_keyword(KeywordId::By, "Expected BY after SPLIT value");
                UtilityExpression::Split {
                    value,
                    delimiter: self.expression()?,
                }
            }
            UtilityFunctionId::Join => {
                let value = self.expression()?;
                self.consume_keyword(KeywordId::With, "Expected WITH after JOIN value");
                UtilityExpression::Join {
                    value,
                    delimiter: self.expression()?,
                }
            }
            UtilityFunctionId::Length => {
                self.consume_keyword(KeywordId::Of, "Expected OF after LENGTH");
                UtilityExpression::Length {
                    value: self.expression()?,
                }
            }
            UtilityFunctionId::Pad => {
                let value = self.expression()?;
                self.consume_keyword(KeywordId::To, "Expected TO after PAD value");
                let length = self.expression()?;
                self.consume_keyword(KeywordId::With, "Expected WITH after PAD length");
                UtilityExpression::Pad {
                    value,
                    length,
                    character: self.expression()?,
                }
            }
            UtilityFunctionId::Today => UtilityExpression::Today,
            UtilityFunctionId::Now => UtilityExpression::Now,
            UtilityFunctionId::Add => {
                let amount = self.expression()?;
                let unit = self.date_unit()?;
                self.consume_keyword(KeywordId::To, "Expected TO after ADD amount");
                UtilityExpression::AddDate {
                    amount,
                    unit,
                    date: self.utility_argument()?,
                }
            }
            UtilityFunctionId::Subtract => {
                let amount = self.expression()?;
                let unit = self.date_unit()?;
                self.consume_keyword(KeywordId::From, "Expected FROM after SUBTRACT amount");
                UtilityExpression::SubtractDate {
                    amount,
                    unit,
                    date: self.utility_argument()?,
                }
            }
            UtilityFunctionId::Format => {
                let value = self.utility_argument()?;
                self.consume_keyword(KeywordId::As, "Expected AS after FORMAT value");
                UtilityExpression::Format {
                    value,
                    format: self.format_spec()?,
                }
            }
            UtilityFunctionId::Year | UtilityFunctionId::Month | UtilityFunctionId::Day => {
                let part = match function {
                    UtilityFunctionId::Year => DatePart::Year,
                    UtilityFunctionId::Month => DatePart::Month,
                    _ => DatePart::Day,
                };
                self.consume_keyword(KeywordId::Of, "Expected OF after date part");
                UtilityExpression::DatePart {
                    part,
                    date: self.utility_argument()?,
                }
            }
            UtilityFunctionId::Round => {
                let value = self.expression()?;
                let mode = if self.match_word(WordId::Up) {
                    RoundMode::Up
                } else if self.match_word(WordId::Down) {
                    RoundMode::Down
                } else {
                    RoundMode::Nearest
                };
                let decimals = if self.match_keyword(KeywordId::To) {
                    let places = self.expression()?;
                    self.consume_word(WordId::Decimals, "Expected DECIMALS after ROUND precision");
                    Some(places)
                } else {
                    None
                };
                UtilityExpression::Round { value, mode, decimals }
            }
            UtilityFunctionId::Absolute => UtilityExpression::Absolute {
                value: self.expression()?,
            },
            UtilityFunctionId::Generate => {
                let pattern = if self.check_kind(TokenKind::String) {
                    GeneratePattern::Pattern(self.advance().value.clone())
                } else {
                    self.expect_word(WordId::Uuid, "Expected a pattern string or UUID after GENERATE")?;
                    GeneratePattern::Uuid
                };
                UtilityExpression::Generate { pattern }
            }
            UtilityFunctionId::Random => {
                self.consume_word(WordId::Number, "Expected NUMBER after RANDOM");
                self.consume_keyword(KeywordId::From, "Expected FROM after RANDOM NUMBER");
                let min = self.expression()?;
                self.consume_keyword(KeywordId::To, "Expected TO after RANDOM NUMBER minimum");
                UtilityExpression::RandomNumber {
                    min,
                    max: self.expression()?,
                }
            }
        };
        Ok(expression)
    }

    /// A date or number operand: `TODAY`, `NOW`, another unchained utility call, or an expression.
    fn utility_argument(&mut self) -> PResult<UtilityArgument> {
        if self.at_utility_start() {
            let call = self.nested(|p| p.utility_call())?;
            return Ok(UtilityArgument::Utility(Box::new(call)));
        }
        Ok(UtilityArgument::Expression(self.expression()?))
    }

    fn conversion_target(&mut self) -> PResult<ConversionTarget> {
        let target = match self.peek().word_id() {
            Some(WordId::Uppercase) => ConversionTarget::Uppercase,
            Some(WordId::Lowercase) => ConversionTarget::Lowercase,
            Some(WordId::Number) => ConversionTarget::Number,
            Some(WordId::Text) => ConversionTarget::Text,
            _ => return Err(self.malformed("Expected UPPERCASE, LOWERCASE, NUMBER or TEXT after CONVERT ... TO")),
        };
        self.advance();
        Ok(target)
    }

    /// `"pattern"` | `CURRENCY ["code"]` | `PERCENT`
    fn format_spec(&mut self) -> PResult<FormatSpec> {
        if self.check_kind(TokenKind::String) {
            return Ok(FormatSpec::Pattern(self.advance().value.clone()));
        }
        if self.match_word(WordId::Currency) {
            let code = if self.check_kind(TokenKind::String) {
                Some(self.advance().value.clone())
            } else {
                None
            };
            return Ok(FormatSpec::Currency(code));
        }
        if self.match_word(WordId::Percent) {
            return Ok(FormatSpec::Percent);
        }
        Err(self.malformed("Expected a pattern string, CURRENCY or PERCENT after FORMAT ... AS"))
    }

    fn date_unit(&mut self) -> PResult<DateUnit> {
        let unit = match self.peek().kind {
            TokenKind::Identifier => units::date_unit(&self.peek().value),
            _ => None,
        };
        let Some(unit) = unit else {
            return Err(self.malformed("Expected a date unit (DAYS, WEEKS, MONTHS, YEARS, HOURS, MINUTES, SECONDS)"));
        };
        self.advance();
        Ok(unit)
    }
}
