/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and the declaration loop that drives recovery.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type PResult<T> = Result<T, ParseError>;

/// Declaration whose member loop is still running, by index into the matching `Program` list.
///
/// When an error escapes a member, the declaration loop uses this to continue filling the same
/// node after synchronizing on a `}` instead of starting over at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenDeclaration {
    Page(usize),
    PageActions(usize),
    Feature(usize),
    Fixture(usize),
}

/// Parser state.
///
/// ## Notes
/// - Declarations are pushed into `program` as soon as their header is parsed, so a later
///   error never discards them.
/// - `open_blocks` counts statement blocks whose `{` was consumed but whose `}` was not. An
///   error leaves it at the nesting level it escaped from, so recovery can tell a nested `}`
///   from the one closing the declaration.
/// - `bindings` collects names introduced inside the current scenario or action body; it is
///   drained into the node's `variables` list when the body ends.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Returned by `peek` once `pos` runs past the slice.
    eof: Token,
    config: ParserConfig,
    program: Program,
    errors: Vec<ParseError>,
    panic_mode: bool,
    depth: usize,
    open: Option<OpenDeclaration>,
    open_blocks: usize,
    bindings: BTreeSet<Ident>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream with default limits.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `vero_syntax::lexer` (or any other producer that
    ///   follows the same token contract).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Create a new parser with explicit limits.
    pub fn with_config(tokens: &'a [Token], config: ParserConfig) -> Self {
        let end = tokens
            .last()
            .map(|t| Span::new(t.span.end, t.span.end, t.span.line, t.span.column))
            .unwrap_or_default();
        Self {
            tokens,
            pos: 0,
            eof: Token::eof(end),
            config,
            program: Program::default(),
            errors: Vec::new(),
            panic_mode: false,
            depth: 0,
            open: None,
            open_blocks: 0,
            bindings: BTreeSet::new(),
        }
    }

    /// Parse the entire token stream.
    ///
    /// Always returns the AST; every problem found along the way is in `errors`.
    pub fn parse(mut self) -> ParseResult {
        while !self.is_at_end() {
            let before = (self.pos, self.open);
            self.depth = 0;

            let result = match self.open {
                Some(open) => self.resume(open),
                None => self.declaration(),
            };
            if let Err(err) = result {
                self.error(err);
                self.recover();
            }

            // Every iteration either consumes a token or closes a declaration.
            if (self.pos, self.open) == before && !self.is_at_end() {
                self.advance();
            }
        }

        ParseResult {
            ast: self.program,
            errors: self.errors,
        }
    }

    /// Continue the member loop of a declaration interrupted by an error.
    fn resume(&mut self, open: OpenDeclaration) -> PResult<()> {
        // Statement blocks abandoned by the error are skipped before the member loop continues.
        if self.open_blocks > 0 {
            self.recover();
            if self.open_blocks > 0 || self.open != Some(open) {
                return Ok(());
            }
        }
        match open {
            OpenDeclaration::Page(index) => self.finish_page(index),
            OpenDeclaration::PageActions(index) => self.finish_page_actions(index),
            OpenDeclaration::Feature(index) => self.finish_feature(index),
            OpenDeclaration::Fixture(index) => self.finish_fixture(index),
        }
    }

    /// Skip to a safe point after an aborted production and decide what resumes.
    fn recover(&mut self) {
        self.panic_mode = true;
        self.synchronize();

        let resumes_feature = self.check_keyword(KeywordId::Scenario)
            && matches!(self.open, Some(OpenDeclaration::Feature(_)));

        if self.check_punct(PunctuationId::RBrace) {
            self.advance();
            if self.open_blocks > 0 {
                // A statement block closed; the open declaration keeps its members.
                self.open_blocks -= 1;
            } else {
                // The declaration's own closing brace.
                self.open = None;
            }
        } else {
            self.open_blocks = 0;
            if !resumes_feature {
                self.open = None;
            }
        }

        tracing::debug!(
            line = self.peek().line(),
            resume = ?self.open,
            "recovered from syntax error"
        );
    }
}
