/// Parse a token stream into an AST [`Program`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `vero_syntax::lexer`. A missing trailing `Eof` token is
///   tolerated.
///
/// ## Returns
/// The AST together with every collected error. Never panics.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseResult {
    Parser::new(tokens).parse()
}

/// Parse with explicit limits (modifier cap, nesting depth).
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_with_config(tokens: &[Token], config: &ParserConfig) -> ParseResult {
    Parser::with_config(tokens, *config).parse()
}
