#![no_main]

use libfuzzer_sys::fuzz_target;
use vero_syntax::config::ParserConfig;
use vero_syntax::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Lossy lexing keeps the tokens around lexical errors, so the parser sees every input
        let (tokens, _) = lexer::lex_lossy(s);
        let result = parser::parse(&tokens);
        // Tight limits walk the depth and modifier guards
        let strict = parser::parse_with_config(&tokens, &ParserConfig::new().with_max_nesting_depth(4));
        assert!(strict.ast.declaration_count() <= tokens.len());
        assert!(result.ast.declaration_count() <= tokens.len());
    }
});
