/// `API` and `MOCK API` statements.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser`.
/// - `GET` is a statement keyword, so HTTP methods are resolved by spelling.
impl<'a> Parser<'a> {
    fn http_method_at_current(&self) -> Option<HttpMethod> {
        match self.peek().kind {
            TokenKind::Identifier | TokenKind::Keyword(_) => http::from_str(&self.peek().value),
            _ => None,
        }
    }

    /// `API <METHOD> <expr> [WITH (BODY|HEADERS) <expr> (AND ...)*] [AS name]`
    fn api_statement(&mut self) -> PResult<Statement> {
        self.advance();
        let Some(method) = self.http_method_at_current() else {
            return Err(self.malformed("Expected an HTTP method (GET, POST, PUT, PATCH, DELETE) after API"));
        };
        self.advance();
        let url = self.expression()?;

        let mut body = None;
        let mut headers = None;
        if self.match_keyword(KeywordId::With) {
            loop {
                if self.match_word(WordId::Body) {
                    body = Some(self.expression()?);
                } else if self.match_word(WordId::Headers) {
                    headers = Some(self.expression()?);
                } else {
                    return Err(self.malformed("Expected BODY or HEADERS"));
                }
                if !self.match_keyword(KeywordId::And) {
                    break;
                }
            }
        }

        let response_variable = if self.match_keyword(KeywordId::As) {
            let name = self.consume_name("Expected response variable name after AS");
            self.bind(&name);
            Some(name)
        } else {
            None
        };

        Ok(Statement::ApiRequest {
            method,
            url,
            body,
            headers,
            response_variable,
        })
    }

    /// `MOCK API [<METHOD>] <expr> WITH (STATUS|BODY|HEADERS) <expr> (AND ...)*`
    fn mock_statement(&mut self) -> PResult<Statement> {
        self.advance();
        self.consume_keyword(KeywordId::Api, "Expected API after MOCK");
        let method = self.http_method_at_current();
        if method.is_some() {
            self.advance();
        }
        let url = self.expression()?;

        let mut status = None;
        let mut body = None;
        let mut headers = None;
        if self.match_keyword(KeywordId::With) {
            loop {
                if self.match_word(WordId::Status) {
                    status = Some(self.expression()?);
                } else if self.match_word(WordId::Body) {
                    body = Some(self.expression()?);
                } else if self.match_word(WordId::Headers) {
                    headers = Some(self.expression()?);
                } else {
                    return Err(self.malformed("Expected STATUS, BODY or HEADERS"));
                }
                if !self.match_keyword(KeywordId::And) {
                    break;
                }
            }
        } else {
            let error = self.expected("Expected WITH after the mocked URL");
            self.error(error);
        }

        Ok(Statement::MockApi {
            method,
            url,
            status,
            body,
            headers,
        })
    }
}
