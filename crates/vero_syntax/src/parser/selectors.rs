/// Selector and target parsing.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser`.
/// - Selector type words are identifiers resolved through `vero_core::lang::selectors`.
impl<'a> Parser<'a> {
    fn selector_type_at_current(&self) -> Option<SelectorType> {
        match self.peek().kind {
            TokenKind::Identifier => selectors::from_str(&self.peek().value),
            _ => None,
        }
    }

    /// `<selector> <modifier>*`
    fn selector(&mut self) -> PResult<SelectorNode> {
        self.selector_with(true)
    }

    fn selector_with(&mut self, allow_has: bool) -> PResult<SelectorNode> {
        let mut node = self.base_selector()?;
        self.selector_modifiers(&mut node.modifiers, allow_has)?;
        Ok(node)
    }

    /// `"text"` | `TEXT EXACT "x"` | `ROLE "x" [NAME "y"]` | `<TYPE> "x"`
    fn base_selector(&mut self) -> PResult<SelectorNode> {
        if self.check_kind(TokenKind::String) {
            let value = self.advance().value.clone();
            return Ok(SelectorNode::new(SelectorType::Auto, value));
        }

        let Some(mut selector_type) = self.selector_type_at_current() else {
            return Err(self.malformed("Expected a selector (a string or BUTTON, CSS, TEXT, ...)"));
        };
        self.advance();
        if selector_type == SelectorType::Text && self.match_word(WordId::Exact) {
            selector_type = SelectorType::TextExact;
        }

        let value = self.consume_string("Expected selector value string");
        let mut node = SelectorNode::new(selector_type, value);
        if selector_type == SelectorType::Role && self.match_word(WordId::Name) {
            node.name_param = Some(self.consume_string("Expected accessible name string after NAME"));
        }
        Ok(node)
    }

    fn at_selector_modifier(&self, allow_has: bool) -> bool {
        let Some(word) = self.peek().word_id() else {
            // `WITH` is reserved, so `WITH TEXT "x"` starts with a keyword token.
            return self.check_keyword(KeywordId::With) && self.text_filter_follows();
        };
        match word {
            WordId::First | WordId::Last | WordId::Nth => true,
            WordId::Without => self.text_filter_follows(),
            WordId::Has => allow_has,
            _ => false,
        }
    }

    /// `TEXT "..."` follows the current `WITH` / `WITHOUT`.
    fn text_filter_follows(&self) -> bool {
        self.lookahead_word(1, WordId::Text) && self.lookahead_kind(2, TokenKind::String)
    }

    /// Read modifiers in source order until a token that is not a modifier.
    fn selector_modifiers(&mut self, modifiers: &mut Vec<SelectorModifier>, allow_has: bool) -> PResult<()> {
        let limit = self.config.max_selector_modifiers;
        while self.at_selector_modifier(allow_has) {
            if modifiers.len() >= limit {
                return Err(self.malformed(&format!("Too many selector modifiers (the limit is {limit})")));
            }
            let modifier = self.selector_modifier()?;
            modifiers.push(modifier);
        }
        Ok(())
    }

    fn selector_modifier(&mut self) -> PResult<SelectorModifier> {
        if self.match_word(WordId::First) {
            return Ok(SelectorModifier::First);
        }
        if self.match_word(WordId::Last) {
            return Ok(SelectorModifier::Last);
        }
        if self.match_word(WordId::Nth) {
            return Ok(SelectorModifier::Nth(self.integer_literal("Expected an index after NTH")?));
        }
        if self.match_keyword(KeywordId::With) {
            self.advance();
            return Ok(SelectorModifier::WithText(self.consume_string("Expected text after WITH TEXT")));
        }
        if self.match_word(WordId::Without) {
            self.advance();
            return Ok(SelectorModifier::WithoutText(self.consume_string("Expected text after WITHOUT TEXT")));
        }

        self.expect_word(WordId::Has, "Expected a selector modifier")?;
        let negated = self.match_keyword(KeywordId::Not);
        let inner = Box::new(self.nested(|p| p.selector_with(true))?);
        Ok(if negated {
            SelectorModifier::HasNot(inner)
        } else {
            SelectorModifier::Has(inner)
        })
    }

    /// The element a statement acts on.
    fn target(&mut self) -> PResult<TargetNode> {
        self.target_with(true)
    }

    /// Target without the `HAS` modifier, for assertion position where `HAS TEXT` is the check.
    fn assertion_target(&mut self) -> PResult<TargetNode> {
        self.target_with(false)
    }

    fn target_with(&mut self, allow_has: bool) -> PResult<TargetNode> {
        if self.check_kind(TokenKind::String) {
            let text = self.advance().value.clone();
            if !self.at_selector_modifier(allow_has) {
                return Ok(TargetNode::Text(text));
            }
            let mut node = SelectorNode::new(SelectorType::Auto, text);
            self.selector_modifiers(&mut node.modifiers, allow_has)?;
            return Ok(TargetNode::Selector(node));
        }

        if self.at_typed_selector() {
            return Ok(TargetNode::Selector(self.selector_with(allow_has)?));
        }

        if self.check_name() {
            let first = self.advance().value.clone();
            if self.match_punct(PunctuationId::Dot) {
                let field = self.expect_name("Expected field name after '.'")?;
                return Ok(TargetNode::Field {
                    page: Some(first),
                    field,
                });
            }
            return Ok(TargetNode::Field { page: None, field: first });
        }

        // Strings and identifiers were handled above, so no bare selector can start here.
        Err(self.malformed("Expected a target (a string, a selector or a field reference)"))
    }

    /// A selector type word followed by its value string (`BUTTON "Save"`, `TEXT EXACT "Save"`).
    fn at_typed_selector(&self) -> bool {
        match self.selector_type_at_current() {
            Some(SelectorType::Text) if self.lookahead_word(1, WordId::Exact) => {
                self.lookahead_kind(2, TokenKind::String)
            }
            Some(_) => self.lookahead_kind(1, TokenKind::String),
            None => false,
        }
    }
}
