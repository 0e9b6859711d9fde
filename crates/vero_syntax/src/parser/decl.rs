/// Declaration parsing.
///
/// Top-level declarations and their members: pages, page actions, features (with hooks,
/// fixture uses and scenarios) and fixtures.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser`.
/// - Every declaration node is pushed into `self.program` right after its header, and member
///   loops write into it by index. Nodes owning statement blocks are pushed before a block
///   error propagates, so partial declarations survive recovery.
impl<'a> Parser<'a> {
    fn declaration(&mut self) -> PResult<()> {
        self.open_blocks = 0;
        match self.peek().kind {
            TokenKind::Keyword(KeywordId::Page) => {
                self.end_panic();
                self.page_declaration()
            }
            TokenKind::Keyword(KeywordId::PageActions) => {
                self.end_panic();
                self.page_actions_declaration()
            }
            TokenKind::Keyword(KeywordId::Feature) => {
                self.end_panic();
                self.feature_declaration(Vec::new())
            }
            TokenKind::Keyword(KeywordId::Fixture) => {
                self.end_panic();
                self.fixture_declaration()
            }
            TokenKind::Punctuation(PunctuationId::At) => {
                self.end_panic();
                let markers = self.annotation_names();
                if !self.check_keyword(KeywordId::Feature) {
                    return Err(self.unexpected("Expected FEATURE after annotations"));
                }
                self.feature_declaration(markers)
            }
            TokenKind::Keyword(KeywordId::Scenario) => Err(self.unexpected("SCENARIO must be declared inside a FEATURE")),
            _ => Err(self.unexpected("Expected PAGE, PAGEACTIONS, FEATURE or FIXTURE")),
        }
    }

    /// Consume the closing `}` of a declaration body.
    fn close_declaration(&mut self, message: &str) {
        self.consume_punct(PunctuationId::RBrace, message);
        self.open = None;
    }

    // ========================================================================
    // Annotations
    // ========================================================================

    /// Read `@name` markers.
    fn annotation_names(&mut self) -> Vec<Ident> {
        let mut names = Vec::new();
        while self.match_punct(PunctuationId::At) {
            let name = self.consume_name("Expected annotation name after '@'");
            if !name.is_empty() {
                names.push(name);
            }
        }
        names
    }

    // ========================================================================
    // PAGE
    // ========================================================================

    fn page_declaration(&mut self) -> PResult<()> {
        let line = self.advance().line();
        let name = self.consume_name("Expected page name");

        let mut url_patterns = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            while !self.check_punct(PunctuationId::RParen) && !self.is_at_end() {
                if !self.check_kind(TokenKind::String) {
                    let error = self.expected("Expected URL pattern string");
                    self.error(error);
                    break;
                }
                url_patterns.push(self.advance().value.clone());
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            self.consume_punct(PunctuationId::RParen, "Expected ')' after URL patterns");
        }
        self.consume_punct(PunctuationId::LBrace, "Expected '{' after page name");

        tracing::trace!(name = %name, line, "page");
        self.program.pages.push(PageNode {
            name,
            url_patterns,
            fields: Vec::new(),
            variables: Vec::new(),
            actions: Vec::new(),
            line,
        });
        let index = self.program.pages.len() - 1;
        self.open = Some(OpenDeclaration::Page(index));
        self.finish_page(index)
    }

    fn finish_page(&mut self, index: usize) -> PResult<()> {
        while !self.at_member_end() {
            self.page_member(index)?;
        }
        self.close_declaration("Expected '}' to close PAGE");
        Ok(())
    }

    fn page_member(&mut self, index: usize) -> PResult<()> {
        if self.match_keyword(KeywordId::Field) {
            self.end_panic();
            let field = self.field_declaration()?;
            self.program.pages[index].fields.push(field);
        } else if let Some(var_type) = self.variable_type_at_current() {
            self.end_panic();
            let variable = self.variable_declaration(var_type)?;
            self.program.pages[index].variables.push(variable);
        } else if self.at_action_definition() {
            self.end_panic();
            let (action, result) = self.action_definition();
            self.program.pages[index].actions.push(action);
            result?;
        } else {
            return Err(self.unexpected("Expected FIELD, a variable or an action definition in PAGE body"));
        }
        Ok(())
    }

    /// `FIELD name = <selector>`; the `FIELD` keyword is already consumed.
    fn field_declaration(&mut self) -> PResult<FieldNode> {
        let line = self.previous().line();
        let name = self.consume_name("Expected field name");
        self.consume_op(OperatorId::Assign, "Expected '=' after field name");
        let selector = self.selector()?;
        Ok(FieldNode { name, selector, line })
    }

    /// `TEXT|NUMBER|FLAG name = ...` starts here.
    fn variable_type_at_current(&self) -> Option<VariableType> {
        let var_type = match self.peek().word_id()? {
            WordId::Text => VariableType::Text,
            WordId::Number => VariableType::Number,
            WordId::Flag => VariableType::Flag,
            _ => return None,
        };
        let is_declaration = self.lookahead(1).is_some_and(is_name_token)
            && self.lookahead(2).is_some_and(|t| t.kind.is_operator(OperatorId::Assign));
        is_declaration.then_some(var_type)
    }

    fn variable_declaration(&mut self, var_type: VariableType) -> PResult<VariableNode> {
        let line = self.advance().line();
        let name = self.consume_name("Expected variable name");
        self.consume_op(OperatorId::Assign, "Expected '=' after variable name");
        let value = self.expression()?;
        Ok(VariableNode {
            name,
            var_type,
            value,
            line,
        })
    }

    fn at_action_definition(&self) -> bool {
        self.check_name()
            && (self.lookahead_punct(1, PunctuationId::LBrace) || self.lookahead_keyword(1, KeywordId::With))
    }

    /// `name [WITH p1, p2] { ... }`
    ///
    /// Returns the node even when its body failed, paired with the body's result.
    fn action_definition(&mut self) -> (ActionDefinitionNode, PResult<()>) {
        let line = self.peek().line();
        let name = self.consume_name("Expected action name");

        self.bindings.clear();
        let mut parameters = Vec::new();
        if self.match_keyword(KeywordId::With) {
            loop {
                let parameter = self.consume_name("Expected parameter name");
                self.bind(&parameter);
                parameters.push(parameter);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }

        let mut statements = Vec::new();
        let result = self.block_into(&mut statements);
        let node = ActionDefinitionNode {
            name,
            parameters,
            statements,
            variables: self.take_bindings(),
            line,
        };
        (node, result)
    }

    // ========================================================================
    // PAGEACTIONS
    // ========================================================================

    fn page_actions_declaration(&mut self) -> PResult<()> {
        let line = self.advance().line();
        let name = self.consume_name("Expected page actions name");
        self.consume_keyword(KeywordId::For, "Expected FOR after page actions name");
        let for_page = self.consume_name("Expected page name after FOR");
        self.consume_punct(PunctuationId::LBrace, "Expected '{' after page actions header");

        tracing::trace!(name = %name, for_page = %for_page, line, "page actions");
        self.program.page_actions.push(PageActionsNode {
            name,
            for_page,
            actions: Vec::new(),
            line,
        });
        let index = self.program.page_actions.len() - 1;
        self.open = Some(OpenDeclaration::PageActions(index));
        self.finish_page_actions(index)
    }

    fn finish_page_actions(&mut self, index: usize) -> PResult<()> {
        while !self.at_member_end() {
            if !self.at_action_definition() {
                return Err(self.unexpected("Expected an action definition in PAGEACTIONS body"));
            }
            self.end_panic();
            let (action, result) = self.action_definition();
            self.program.page_actions[index].actions.push(action);
            result?;
        }
        self.close_declaration("Expected '}' to close PAGEACTIONS");
        Ok(())
    }

    // ========================================================================
    // FEATURE
    // ========================================================================

    fn feature_declaration(&mut self, markers: Vec<Ident>) -> PResult<()> {
        let line = self.advance().line();
        let name = self.consume_name("Expected feature name");
        self.consume_punct(PunctuationId::LBrace, "Expected '{' after feature name");

        let (known, tags) = split_annotations(markers, true);
        tracing::trace!(name = %name, line, "feature");
        self.program.features.push(FeatureNode {
            name,
            annotations: known,
            tags,
            fixtures: Vec::new(),
            hooks: Vec::new(),
            scenarios: Vec::new(),
            line,
        });
        let index = self.program.features.len() - 1;
        self.open = Some(OpenDeclaration::Feature(index));
        self.finish_feature(index)
    }

    fn finish_feature(&mut self, index: usize) -> PResult<()> {
        while !self.at_member_end() {
            self.feature_member(index)?;
        }
        self.close_declaration("Expected '}' to close FEATURE");
        Ok(())
    }

    fn feature_member(&mut self, index: usize) -> PResult<()> {
        match self.peek().kind {
            TokenKind::Keyword(KeywordId::Use) => {
                self.end_panic();
                self.use_statement(index);
                Ok(())
            }
            TokenKind::Keyword(KeywordId::Before | KeywordId::After) => {
                self.end_panic();
                self.hook(index)
            }
            TokenKind::Keyword(KeywordId::Scenario) | TokenKind::Punctuation(PunctuationId::At) => {
                self.end_panic();
                self.scenario(index)
            }
            _ => Err(self.unexpected("Expected SCENARIO, USE FIXTURE, BEFORE or AFTER in FEATURE body")),
        }
    }

    /// `USE FIXTURE name [WITH opt = value, ...]`, or the removed `USE <Page>` form.
    fn use_statement(&mut self, index: usize) {
        let use_span = self.advance().span;
        if self.match_keyword(KeywordId::Fixture) {
            let name = self.consume_name("Expected fixture name after USE FIXTURE");
            let mut options = Vec::new();
            if self.match_keyword(KeywordId::With) {
                loop {
                    let option = self.consume_name("Expected fixture option name");
                    self.consume_op(OperatorId::Assign, "Expected '=' after fixture option name");
                    match self.expression() {
                        Ok(value) => options.push(FixtureOptionValue { name: option, value }),
                        Err(error) => {
                            self.error(error);
                            break;
                        }
                    }
                    if !self.match_punct(PunctuationId::Comma) {
                        break;
                    }
                }
            }
            self.program.features[index].fixtures.push(FixtureUseNode {
                name,
                options,
                line: use_span.line,
            });
            return;
        }

        let page = self.consume_name("Expected FIXTURE after USE");
        let span = self.span_from(use_span);
        tracing::debug!(page = %page, line = span.line, "removed USE <page> form");
        self.error(
            ParseError::migration("`USE <page>` has been removed; pages are resolved automatically", span)
                .with_help("delete this line and reference fields as `Page.field`"),
        );
    }

    /// `BEFORE|AFTER EACH|ALL { ... }`
    fn hook(&mut self, index: usize) -> PResult<()> {
        let keyword = self.advance().clone();
        let before = keyword.kind.is_keyword(KeywordId::Before);
        let kind = if self.match_word(WordId::Each) {
            if before { HookKind::BeforeEach } else { HookKind::AfterEach }
        } else if self.match_word(WordId::All) {
            if before { HookKind::BeforeAll } else { HookKind::AfterAll }
        } else {
            return Err(self.malformed(&format!("Expected EACH or ALL after {}", keyword.value.to_ascii_uppercase())));
        };

        let mut statements = Vec::new();
        let result = self.block_into(&mut statements);
        self.bindings.clear();
        self.program.features[index].hooks.push(HookNode {
            kind,
            statements,
            line: keyword.line(),
        });
        result
    }

    /// `[@annotation]* SCENARIO ("Name" | Name) [@tag]* { ... }`
    fn scenario(&mut self, index: usize) -> PResult<()> {
        let mut markers = self.annotation_names();
        if !self.check_keyword(KeywordId::Scenario) {
            return Err(self.unexpected("Expected SCENARIO after annotations"));
        }
        let line = self.advance().line();
        let name = if self.check_kind(TokenKind::String) || self.check_name() {
            self.advance().value.clone()
        } else {
            let error = self.expected("Expected scenario name");
            self.error(error);
            String::new()
        };
        markers.extend(self.annotation_names());
        let (known, tags) = split_annotations(markers, false);

        self.bindings.clear();
        let mut statements = Vec::new();
        let result = self.block_into(&mut statements);
        let variables = self.take_bindings();
        self.program.features[index].scenarios.push(ScenarioNode {
            name,
            annotations: known,
            tags,
            statements,
            variables,
            line,
        });
        result
    }

    // ========================================================================
    // FIXTURE
    // ========================================================================

    fn fixture_declaration(&mut self) -> PResult<()> {
        let line = self.advance().line();
        let name = self.consume_name("Expected fixture name");
        self.consume_punct(PunctuationId::LBrace, "Expected '{' after fixture name");

        tracing::trace!(name = %name, line, "fixture");
        self.program.fixtures.push(FixtureNode {
            name,
            scope: FixtureScope::default(),
            auto: false,
            dependencies: Vec::new(),
            options: Vec::new(),
            setup: Vec::new(),
            teardown: Vec::new(),
            line,
        });
        let index = self.program.fixtures.len() - 1;
        self.open = Some(OpenDeclaration::Fixture(index));
        self.finish_fixture(index)
    }

    fn finish_fixture(&mut self, index: usize) -> PResult<()> {
        while !self.at_member_end() {
            self.fixture_member(index)?;
        }
        self.close_declaration("Expected '}' to close FIXTURE");
        Ok(())
    }

    fn fixture_member(&mut self, index: usize) -> PResult<()> {
        let Some(word) = self.peek().word_id() else {
            return Err(self.unexpected("Expected SCOPE, DEPENDS, AUTO, OPTION, SETUP or TEARDOWN in FIXTURE body"));
        };
        match word {
            WordId::Scope => {
                self.end_panic();
                self.advance();
                let scope = if self.match_word(WordId::Test) {
                    FixtureScope::Test
                } else if self.match_word(WordId::Worker) {
                    FixtureScope::Worker
                } else {
                    return Err(self.malformed("Expected TEST or WORKER after SCOPE"));
                };
                self.program.fixtures[index].scope = scope;
            }
            WordId::Depends => {
                self.end_panic();
                self.advance();
                self.consume_word(WordId::On, "Expected ON after DEPENDS");
                loop {
                    let dependency = self.consume_name("Expected fixture name");
                    if !dependency.is_empty() {
                        self.program.fixtures[index].dependencies.push(dependency);
                    }
                    if !self.match_punct(PunctuationId::Comma) {
                        break;
                    }
                }
            }
            WordId::Auto => {
                self.end_panic();
                self.advance();
                self.program.fixtures[index].auto = true;
            }
            WordId::Option => {
                self.end_panic();
                self.advance();
                let name = self.consume_name("Expected option name");
                self.expect_word(WordId::Default, "Expected DEFAULT after option name")?;
                let default = self.expression()?;
                self.program.fixtures[index].options.push(FixtureOptionNode { name, default });
            }
            WordId::Setup | WordId::Teardown => {
                self.end_panic();
                self.advance();
                let mut statements = Vec::new();
                let result = self.block_into(&mut statements);
                self.bindings.clear();
                let fixture = &mut self.program.fixtures[index];
                if word == WordId::Setup {
                    fixture.setup.extend(statements);
                } else {
                    fixture.teardown.extend(statements);
                }
                result?;
            }
            _ => {
                return Err(self.unexpected("Expected SCOPE, DEPENDS, AUTO, OPTION, SETUP or TEARDOWN in FIXTURE body"));
            }
        }
        Ok(())
    }
}

/// Split `@name` markers into known annotations and free-form tags.
///
/// At feature level only `@serial`, `@skip` and `@only` are annotations; everything else is a tag.
fn split_annotations(markers: Vec<Ident>, feature_level: bool) -> (Vec<Annotation>, Vec<Ident>) {
    let mut known = Vec::new();
    let mut tags = Vec::new();
    for marker in markers {
        match annotations::from_str(&marker) {
            Some(annotation) if !feature_level || annotations::applies_to_feature(annotation) => known.push(annotation),
            _ => tags.push(marker),
        }
    }
    (known, tags)
}
