/// Statement parsing.
///
/// One production per leading keyword, plus the blocks that hold them.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser`.
impl<'a> Parser<'a> {
    /// A statement block ends at `}`, end of input, or a token that can only start a declaration.
    fn at_block_end(&self) -> bool {
        self.at_member_end() || self.check_keyword(KeywordId::Scenario)
    }

    /// `{ statement* }`, pushing each statement into `out` as soon as it is parsed.
    fn block_into(&mut self, out: &mut Block) -> PResult<()> {
        let opened = self.check_punct(PunctuationId::LBrace);
        self.consume_punct(PunctuationId::LBrace, "Expected '{' to open block");
        if opened {
            self.open_blocks += 1;
        }
        self.nested(|p| {
            while !p.at_block_end() {
                out.push(p.statement()?);
            }
            Ok(())
        })?;
        self.consume_punct(PunctuationId::RBrace, "Expected '}' to close block");
        if opened {
            self.open_blocks = self.open_blocks.saturating_sub(1);
        }
        Ok(())
    }

    fn block(&mut self) -> PResult<Block> {
        let mut statements = Vec::new();
        self.block_into(&mut statements)?;
        Ok(statements)
    }

    fn statement(&mut self) -> PResult<Spanned<Statement>> {
        let start = self.peek().span;
        let Some(keyword) = self.peek().keyword_id() else {
            return Err(self.unexpected("Expected a statement"));
        };

        let statement = match keyword {
            KeywordId::Open => self.open_statement()?,
            KeywordId::Click => {
                self.advance();
                Statement::Click { target: self.target()? }
            }
            KeywordId::Double => {
                self.advance();
                self.consume_keyword(KeywordId::Click, "Expected CLICK after DOUBLE");
                Statement::DoubleClick { target: self.target()? }
            }
            KeywordId::Right => {
                self.advance();
                self.consume_keyword(KeywordId::Click, "Expected CLICK after RIGHT");
                Statement::RightClick { target: self.target()? }
            }
            KeywordId::Fill => {
                self.advance();
                let target = self.target()?;
                self.consume_keyword(KeywordId::With, "Expected WITH after FILL target");
                Statement::Fill {
                    target,
                    value: self.expression()?,
                }
            }
            KeywordId::Check => {
                self.advance();
                Statement::Check { target: self.target()? }
            }
            KeywordId::Uncheck => {
                self.advance();
                Statement::Uncheck { target: self.target()? }
            }
            KeywordId::Select => {
                self.advance();
                let option = self.expression()?;
                self.consume_keyword(KeywordId::From, "Expected FROM after SELECT option");
                Statement::Select {
                    option,
                    target: self.target()?,
                }
            }
            KeywordId::Hover => {
                self.advance();
                Statement::Hover { target: self.target()? }
            }
            KeywordId::Clear => {
                self.advance();
                Statement::Clear { target: self.target()? }
            }
            KeywordId::Focus => {
                self.advance();
                Statement::Focus { target: self.target()? }
            }
            KeywordId::Press => {
                self.advance();
                Statement::Press { key: self.expression()? }
            }
            KeywordId::Scroll => self.scroll_statement()?,
            KeywordId::Upload => self.upload_statement()?,
            KeywordId::Drag => {
                self.advance();
                let source = self.target()?;
                self.consume_keyword(KeywordId::To, "Expected TO after DRAG source");
                Statement::Drag {
                    source,
                    destination: self.target()?,
                }
            }
            KeywordId::Refresh => {
                self.advance();
                Statement::Refresh
            }
            KeywordId::Go => {
                self.advance();
                if self.match_word(WordId::Back) {
                    Statement::GoBack
                } else if self.match_word(WordId::Forward) {
                    Statement::GoForward
                } else {
                    return Err(self.malformed("Expected BACK or FORWARD after GO"));
                }
            }
            KeywordId::Switch => {
                self.advance();
                self.consume_keyword(KeywordId::To, "Expected TO after SWITCH");
                self.expect_word(WordId::Tab, "Expected TAB after SWITCH TO")?;
                Statement::SwitchTab { tab: self.expression()? }
            }
            KeywordId::Close => {
                self.advance();
                self.expect_word(WordId::Tab, "Expected TAB after CLOSE")?;
                Statement::CloseTab
            }
            KeywordId::Wait => self.wait_statement()?,
            KeywordId::Take => {
                self.advance();
                self.expect_word(WordId::Screenshot, "Expected SCREENSHOT after TAKE")?;
                let (target, filename) = self.screenshot_clauses()?;
                Statement::TakeScreenshot { target, filename }
            }
            KeywordId::Log => {
                self.advance();
                Statement::Log {
                    message: self.expression()?,
                }
            }
            KeywordId::Fail => {
                self.advance();
                Statement::Fail {
                    message: self.expression()?,
                }
            }
            KeywordId::Perform => self.perform_statement()?,
            KeywordId::Set => self.set_statement()?,
            KeywordId::Get => self.get_statement()?,
            KeywordId::Verify => self.verify_statement()?,
            KeywordId::Accept => {
                self.advance();
                self.expect_word(WordId::Dialog, "Expected DIALOG after ACCEPT")?;
                let response = if self.match_keyword(KeywordId::With) {
                    Some(self.expression()?)
                } else {
                    None
                };
                Statement::AcceptDialog { response }
            }
            KeywordId::Dismiss => {
                self.advance();
                self.expect_word(WordId::Dialog, "Expected DIALOG after DISMISS")?;
                Statement::DismissDialog
            }
            KeywordId::If => self.if_statement()?,
            KeywordId::Try => self.try_statement()?,
            KeywordId::Repeat => self.repeat_statement()?,
            KeywordId::For => self.for_each_statement()?,
            KeywordId::Row | KeywordId::Rows | KeywordId::Count => self.data_statement(keyword)?,
            KeywordId::Api => self.api_statement()?,
            KeywordId::Mock => self.mock_statement()?,
            _ => return Err(self.unexpected("Expected a statement")),
        };

        Ok(Spanned::new(statement, self.span_from(start)))
    }

    // ========================================================================
    // Navigation and interaction
    // ========================================================================

    /// `OPEN <expr> [IN NEW TAB]`
    fn open_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let url = self.expression()?;
        if self.match_keyword(KeywordId::In) {
            self.expect_word(WordId::New, "Expected NEW TAB after IN")?;
            self.expect_word(WordId::Tab, "Expected TAB after IN NEW")?;
            return Ok(Statement::OpenInNewTab { url });
        }
        Ok(Statement::Open { url })
    }

    /// `SCROLL TO <target>` | `SCROLL UP|DOWN|LEFT|RIGHT`
    fn scroll_statement(&mut self) -> PResult<Statement> {
        self.advance();
        if self.match_keyword(KeywordId::To) {
            return Ok(Statement::Scroll {
                to: ScrollTarget::Element(self.target()?),
            });
        }
        // `RIGHT` is a keyword, so directions are resolved by spelling rather than token kind.
        let direction = match self.peek().kind {
            TokenKind::Identifier | TokenKind::Keyword(_) => words::scroll_direction(&self.peek().value),
            _ => None,
        };
        let Some(direction) = direction else {
            return Err(self.malformed("Expected TO or a direction (UP, DOWN, LEFT, RIGHT) after SCROLL"));
        };
        self.advance();
        Ok(Statement::Scroll {
            to: ScrollTarget::Direction(direction),
        })
    }

    /// `UPLOAD <expr> (, <expr>)* TO <target>`
    fn upload_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let mut files = vec![self.expression()?];
        while self.match_punct(PunctuationId::Comma) {
            files.push(self.expression()?);
        }
        self.consume_keyword(KeywordId::To, "Expected TO after upload files");
        Ok(Statement::Upload {
            files,
            target: self.target()?,
        })
    }

    /// `WAIT <expr> [unit]` or `WAIT FOR ...`
    fn wait_statement(&mut self) -> PResult<Statement> {
        self.advance();
        if !self.match_keyword(KeywordId::For) {
            let duration = self.expression()?;
            let unit = match self.peek().kind {
                TokenKind::Identifier => units::time_unit(&self.peek().value),
                _ => None,
            };
            if unit.is_some() {
                self.advance();
            }
            return Ok(Statement::Wait {
                duration,
                unit: unit.unwrap_or(TimeUnit::Seconds),
            });
        }

        if self.match_word(WordId::Navigation) {
            return Ok(Statement::WaitForNavigation);
        }
        if self.match_word(WordId::Network) {
            self.expect_word(WordId::Idle, "Expected IDLE after WAIT FOR NETWORK")?;
            return Ok(Statement::WaitForNetworkIdle);
        }
        if self.check_word(WordId::Url) && self.lookahead_text_match(1) {
            self.advance();
            let condition = self.text_match()?;
            return Ok(Statement::WaitForUrl {
                condition,
                value: self.expression()?,
            });
        }

        let target = self.target()?;
        let state = if self.match_keyword(KeywordId::Is) {
            Some(self.element_state()?)
        } else {
            None
        };
        Ok(Statement::WaitForElement { target, state })
    }

    /// `[OF <target>] [AS <expr>]` after `TAKE SCREENSHOT` / `VERIFY SCREENSHOT`.
    fn screenshot_clauses(&mut self) -> PResult<(Option<TargetNode>, Option<Expression>)> {
        let target = if self.match_keyword(KeywordId::Of) {
            Some(self.target()?)
        } else {
            None
        };
        let name = if self.match_keyword(KeywordId::As) {
            Some(self.expression()?)
        } else {
            None
        };
        Ok((target, name))
    }

    // ========================================================================
    // Actions and variables
    // ========================================================================

    /// `PERFORM [Page.]action [WITH <expr> (, <expr>)*]`
    fn perform_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let first = self.expect_name("Expected action name after PERFORM")?;
        let (page, action) = if self.match_punct(PunctuationId::Dot) {
            (Some(first), self.expect_name("Expected action name after '.'")?)
        } else {
            (None, first)
        };
        let mut arguments = Vec::new();
        if self.match_keyword(KeywordId::With) {
            arguments.push(self.expression()?);
            while self.match_punct(PunctuationId::Comma) {
                arguments.push(self.expression()?);
            }
        }
        Ok(Statement::Perform {
            page,
            action,
            arguments,
        })
    }

    /// `SET name = <utility-expression | expression>`
    fn set_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let name = self.consume_name("Expected variable name after SET");
        self.bind(&name);
        self.consume_op(OperatorId::Assign, "Expected '=' after variable name");
        let value = if self.at_utility_start() {
            SetValue::Utility(self.utility_expression()?)
        } else {
            SetValue::Expression(self.expression()?)
        };
        Ok(Statement::Set { name, value })
    }

    /// `GET TEXT|VALUE|COUNT|ATTRIBUTE "a" OF <target> AS name`
    fn get_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let property = if self.match_word(WordId::Text) {
            ElementProperty::Text
        } else if self.match_word(WordId::Value) {
            ElementProperty::Value
        } else if self.match_keyword(KeywordId::Count) {
            ElementProperty::Count
        } else if self.match_word(WordId::Attribute) {
            ElementProperty::Attribute(self.consume_string("Expected attribute name string"))
        } else {
            return Err(self.malformed("Expected TEXT, VALUE, COUNT or ATTRIBUTE after GET"));
        };
        self.consume_keyword(KeywordId::Of, "Expected OF after GET property");
        let target = self.target()?;
        self.consume_keyword(KeywordId::As, "Expected AS after GET target");
        let name = self.consume_name("Expected variable name after AS");
        self.bind(&name);
        Ok(Statement::Get { property, target, name })
    }

    // ========================================================================
    // Assertions
    // ========================================================================

    fn verify_statement(&mut self) -> PResult<Statement> {
        self.advance();

        // Page-level checks win over variables and fields with the same spelling.
        if self.check_word(WordId::Url) && self.lookahead_text_match(1) {
            self.advance();
            let condition = self.text_match()?;
            return Ok(Statement::VerifyUrl {
                condition,
                value: self.expression()?,
            });
        }
        if self.check_word(WordId::Title) && self.lookahead_text_match(1) {
            self.advance();
            let condition = self.text_match()?;
            return Ok(Statement::VerifyTitle {
                condition,
                value: self.expression()?,
            });
        }
        if self.check_word(WordId::Response)
            && (self.lookahead_word(1, WordId::Status) || self.lookahead_word(1, WordId::Body))
        {
            self.advance();
            return self.verify_response();
        }
        if self.check_word(WordId::Screenshot) && !self.lookahead_punct(1, PunctuationId::Dot) {
            self.advance();
            let (target, name) = self.screenshot_clauses()?;
            return Ok(Statement::VerifyScreenshot { target, name });
        }

        if self.check_kind(TokenKind::Identifier) {
            let name = self.advance().value.clone();
            if let Some(check) = self.variable_check()? {
                return Ok(Statement::VerifyVariable { name, check });
            }
            self.pos -= 1;
        }

        let target = self.assertion_target()?;
        if self.match_keyword(KeywordId::Is) {
            let negated = self.match_keyword(KeywordId::Not);
            let state = self.element_state()?;
            return Ok(Statement::VerifyState { target, negated, state });
        }

        let negated = self.match_keyword(KeywordId::Not);
        let assertion = if self.match_keyword(KeywordId::Contains) {
            ContentAssertion::Contains {
                value: self.expression()?,
            }
        } else if self.match_word(WordId::Has) {
            self.content_assertion()?
        } else {
            return Err(self.malformed("Expected IS, CONTAINS or HAS after the verified element"));
        };
        Ok(Statement::VerifyContent {
            target,
            negated,
            assertion,
        })
    }

    /// `IS TRUE|FALSE`, `CONTAINS <expr>` or `EQUALS <expr>` after a variable name.
    fn variable_check(&mut self) -> PResult<Option<VariableCheck>> {
        if self.check_keyword(KeywordId::Is) {
            if self.lookahead_keyword(1, KeywordId::True) {
                self.advance();
                self.advance();
                return Ok(Some(VariableCheck::IsTrue));
            }
            if self.lookahead_keyword(1, KeywordId::False) {
                self.advance();
                self.advance();
                return Ok(Some(VariableCheck::IsFalse));
            }
            return Ok(None);
        }
        if self.match_keyword(KeywordId::Contains) {
            return Ok(Some(VariableCheck::Contains(self.expression()?)));
        }
        if self.match_keyword(KeywordId::Equals) {
            return Ok(Some(VariableCheck::Equals(self.expression()?)));
        }
        Ok(None)
    }

    /// `TEXT|VALUE|COUNT|CLASS <expr>` or `ATTRIBUTE <expr> [EQUALS <expr>]` after `HAS`.
    fn content_assertion(&mut self) -> PResult<ContentAssertion> {
        if self.match_word(WordId::Text) {
            return Ok(ContentAssertion::HasText {
                value: self.expression()?,
            });
        }
        if self.match_word(WordId::Value) {
            return Ok(ContentAssertion::HasValue {
                value: self.expression()?,
            });
        }
        if self.match_keyword(KeywordId::Count) {
            return Ok(ContentAssertion::HasCount {
                value: self.expression()?,
            });
        }
        if self.match_word(WordId::Class) {
            return Ok(ContentAssertion::HasClass {
                value: self.expression()?,
            });
        }
        if self.match_word(WordId::Attribute) {
            let name = self.expression()?;
            let value = if self.match_keyword(KeywordId::Equals) {
                Some(self.expression()?)
            } else {
                None
            };
            return Ok(ContentAssertion::HasAttribute { name, value });
        }
        Err(self.malformed("Expected TEXT, VALUE, COUNT, CLASS or ATTRIBUTE after HAS"))
    }

    /// `STATUS [EQUALS] <expr>` | `BODY CONTAINS <expr>` after `VERIFY RESPONSE`.
    fn verify_response(&mut self) -> PResult<Statement> {
        let check = if self.match_word(WordId::Status) {
            self.match_keyword(KeywordId::Equals);
            ResponseCheck::Status(self.expression()?)
        } else {
            self.expect_word(WordId::Body, "Expected STATUS or BODY after RESPONSE")?;
            self.consume_keyword(KeywordId::Contains, "Expected CONTAINS after RESPONSE BODY");
            ResponseCheck::BodyContains(self.expression()?)
        };
        Ok(Statement::VerifyResponse { check })
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `IF <condition> { ... } [ELSE IF ... | ELSE { ... }]`
    fn if_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let condition = self.boolean_expression()?;
        let then_branch = self.block()?;

        let else_branch = if self.match_keyword(KeywordId::Else) {
            if self.check_keyword(KeywordId::If) {
                let start = self.peek().span;
                let nested = self.nested(|p| p.if_statement())?;
                Some(vec![Spanned::new(nested, self.span_from(start))])
            } else {
                Some(self.block()?)
            }
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `name` (truthy), `<expr> <op> <expr>`, or `<target> IS [NOT] <state>`.
    fn boolean_expression(&mut self) -> PResult<BooleanExpression> {
        if self.check_kind(TokenKind::Identifier) && self.lookahead_punct(1, PunctuationId::LBrace) {
            let name = self.advance().value.clone();
            return Ok(BooleanExpression::VariableTruthy { name });
        }

        if self.at_expression_start() {
            let saved = self.pos;
            if let Ok(left) = self.expression() {
                if let Some(operator) = self.comparison_operator_at_current() {
                    self.advance();
                    let right = self.expression()?;
                    return Ok(BooleanExpression::Comparison { left, operator, right });
                }
            }
            self.pos = saved;
        }

        let target = self.target()?;
        if !self.match_keyword(KeywordId::Is) {
            return Err(self.malformed("Expected IS after the condition target"));
        }
        let negated = self.match_keyword(KeywordId::Not);
        let state = self.element_state()?;
        Ok(BooleanExpression::ElementState { target, negated, state })
    }

    /// `TRY { ... } CATCH { ... }`
    fn try_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let try_block = self.block()?;
        let catch_block = if self.match_keyword(KeywordId::Catch) {
            self.block()?
        } else {
            let error = self.expected("Expected CATCH after TRY block");
            self.error(error);
            Vec::new()
        };
        Ok(Statement::TryCatch { try_block, catch_block })
    }

    /// `REPEAT <expr> TIMES { ... }`
    fn repeat_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let count = self.expression()?;
        self.consume_word(WordId::Times, "Expected TIMES after repeat count");
        Ok(Statement::Repeat {
            count,
            body: self.block()?,
        })
    }

    /// `FOR EACH item IN <expr> { ... }`
    fn for_each_statement(&mut self) -> PResult<Statement> {
        self.advance();
        self.consume_word(WordId::Each, "Expected EACH after FOR");
        let item = self.consume_name("Expected loop variable name");
        self.bind(&item);
        self.consume_keyword(KeywordId::In, "Expected IN after loop variable");
        let collection = self.expression()?;
        Ok(Statement::ForEach {
            item,
            collection,
            body: self.block()?,
        })
    }

    // ========================================================================
    // Data queries
    // ========================================================================

    /// `ROW|ROWS|COUNT name FROM [Project.]Table [WHERE ...] [ORDER BY ...] [LIMIT n] [OFFSET n]`
    fn data_statement(&mut self, keyword: KeywordId) -> PResult<Statement> {
        self.advance();
        let variable = self.consume_name("Expected variable name");
        self.bind(&variable);
        self.consume_keyword(KeywordId::From, "Expected FROM after variable name");
        let query = self.data_query(keyword == KeywordId::Rows)?;

        Ok(match keyword {
            KeywordId::Row => Statement::Row { variable, query },
            KeywordId::Rows => Statement::Rows { variable, query },
            _ => Statement::Count { variable, query },
        })
    }

    fn data_query(&mut self, allows_paging: bool) -> PResult<DataQuery> {
        let first = self.consume_name("Expected table name");
        let table = if self.match_punct(PunctuationId::Dot) {
            TableRef {
                table_name: self.consume_name("Expected table name after '.'"),
                project: Some(first),
            }
        } else {
            TableRef {
                table_name: first,
                project: None,
            }
        };

        let where_clause = if self.match_keyword(KeywordId::Where) {
            Some(self.data_condition()?)
        } else {
            None
        };

        let mut order_by = Vec::new();
        if self.match_keyword(KeywordId::Order) {
            self.consume_keyword(KeywordId::By, "Expected BY after ORDER");
            loop {
                let column = self.column_name()?;
                let direction = if self.match_word(WordId::Desc) {
                    SortDirection::Desc
                } else {
                    self.match_word(WordId::Asc);
                    SortDirection::Asc
                };
                order_by.push(OrderByClause { column, direction });
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }

        let limit = self.paging_clause(KeywordId::Limit, allows_paging)?;
        let offset = self.paging_clause(KeywordId::Offset, allows_paging)?;

        Ok(DataQuery {
            table,
            where_clause,
            order_by,
            limit,
            offset,
        })
    }

    /// `LIMIT n` / `OFFSET n`. Outside `ROWS` the clause is reported and dropped.
    fn paging_clause(&mut self, keyword: KeywordId, allowed: bool) -> PResult<Option<i64>> {
        if !self.check_keyword(keyword) {
            return Ok(None);
        }
        let clause = self.advance().clone();
        let name = clause.value.to_ascii_uppercase();
        let value = self.integer_literal(&format!("Expected a number after {name}"))?;
        if allowed {
            return Ok(Some(value));
        }
        self.error(ParseError::malformed(
            format!("{name} is only allowed on ROWS queries"),
            self.span_from(clause.span),
        ));
        Ok(None)
    }
}
