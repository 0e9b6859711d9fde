//! Property-based tests for the Vero parser
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use vero::config::ParserConfig;
use vero::{analyze_source, lexer, parser};

// =============================================================================
// Strategies
// =============================================================================

/// Fragments that exercise every production, glued together in random order.
fn fragment_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "PAGE", "PAGEACTIONS", "FEATURE", "FIXTURE", "SCENARIO", "FIELD", "USE", "BEFORE", "EACH", "{", "}", "(",
        ")", "[", "]", ",", ".", "=", ">=", "@", "@skip", "CLICK", "FILL", "WITH", "TEXT", "VERIFY", "IS", "NOT",
        "VISIBLE", "HAS", "IF", "ELSE", "TRY", "CATCH", "ROWS", "ROW", "FROM", "WHERE", "AND", "OR", "LIMIT", "SET",
        "TRIM", "THEN", "TODAY", "ADD", "DAYS", "TO", "API", "MOCK", "GET", "\"text\"", "42", "3.5", "{{ENV}}", "name",
        "url", "CONTAINS", "FIRST", "NTH", "BUTTON", "ROLE", "NAME",
    ])
}

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..60).prop_map(|parts| parts.join(" "))
}

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,8}".prop_filter("Not a keyword", |s| lexer::keyword_id(s).is_none())
}

/// A well-formed scenario with `n` CLICK statements.
fn scenario_strategy() -> impl Strategy<Value = (String, usize)> {
    (ident_strategy(), prop::collection::vec(ident_strategy(), 0..12)).prop_map(|(feature, targets)| {
        let body: Vec<String> = targets.iter().map(|t| format!("CLICK {t}")).collect();
        let source = format!("FEATURE {feature} {{\n  SCENARIO \"s\" {{\n    {}\n  }}\n}}\n", body.join("\n    "));
        (source, targets.len())
    })
}

proptest! {
    /// Property: parsing never panics, whatever the token order
    #[test]
    fn parser_is_total_on_token_soup(source in token_soup()) {
        let result = analyze_source(&source, &ParserConfig::default());
        // Every error points inside (or just past) the source.
        for error in &result.errors {
            prop_assert!(error.span.offset() <= source.len());
        }
    }

    /// Property: parsing never panics on arbitrary text
    #[test]
    fn parser_is_total_on_arbitrary_text(source in "\\PC{0,200}") {
        let _ = analyze_source(&source, &ParserConfig::default());
    }

    /// Property: the same tokens always give the same result
    #[test]
    fn parser_is_deterministic(source in token_soup()) {
        let (tokens, _) = lexer::lex_lossy(&source);
        prop_assert_eq!(parser::parse(&tokens), parser::parse(&tokens));
    }

    /// Property: tight limits produce errors, never panics or hangs
    #[test]
    fn tight_limits_stay_total(source in token_soup(), depth in 0usize..4, modifiers in 0usize..3) {
        let config = ParserConfig::new().with_max_nesting_depth(depth).with_max_selector_modifiers(modifiers);
        let _ = analyze_source(&source, &config);
    }

    /// Property: well-formed scenarios keep every statement
    #[test]
    fn generated_scenarios_parse_cleanly((source, count) in scenario_strategy()) {
        let result = analyze_source(&source, &ParserConfig::default());
        prop_assert!(result.errors.is_empty(), "{:?}", result.errors);
        prop_assert_eq!(result.ast.features[0].scenarios[0].statements.len(), count);
    }
}
