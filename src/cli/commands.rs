//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, Report};
use vero_syntax::config::ParserConfig;
use vero_syntax::diagnostics::{ParseError, ParseResult};
use vero_syntax::{lexer, parser};

use super::{CliError, CliResult, ExitCode, OutputFormat};

/// Maximum source file size (16 MB)
///
/// Files larger than this are rejected before lexing.
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(path: &Path) -> CliResult<String> {
    let display = path.display();
    let metadata = fs::metadata(path).map_err(|e| CliError::failure(format!("Cannot access file '{display}': {e}")))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{display}' is too large ({} bytes, max {MAX_SOURCE_SIZE} bytes)",
            metadata.len()
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{display}': {e}")))
}

/// Lex and parse `source`, merging lexical errors in front of the syntax errors.
///
/// Lexing is lossy here so a stray character does not hide every syntax error after it.
pub fn analyze_source(source: &str, config: &ParserConfig) -> ParseResult {
    let (tokens, mut errors) = lexer::lex_lossy(source);
    let mut result = parser::parse_with_config(&tokens, config);
    errors.append(&mut result.errors);
    result.errors = errors;
    result
}

/// Render diagnostics against their source text, one miette report per error.
pub fn render_diagnostics(file_name: &str, source: &str, errors: &[ParseError]) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    for error in errors {
        let report = Report::new(error.clone()).with_source_code(NamedSource::new(file_name, source.to_string()));
        if handler.render_report(&mut out, &*report).is_err() {
            out.push_str(&format!("{file_name}:{}:{}: {}\n", error.line, error.column, error.message));
        }
    }
    out
}

/// Tokenize and display tokens.
pub fn lex_file(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let tokens = lexer::lex(&source)
        .map_err(|errs| CliError::failure(render_diagnostics(&path.to_string_lossy(), &source, &errs).trim_end()))?;

    for tok in &tokens {
        println!("{:>4}:{:<4} {:?} {:?}", tok.line(), tok.column(), tok.kind, tok.value);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the AST.
///
/// The (possibly partial) AST is printed even when errors were found; the diagnostics then go
/// to stderr and the command fails.
pub fn parse_file(path: &Path, config: &ParserConfig, format: OutputFormat) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let result = analyze_source(&source, config);

    match format {
        OutputFormat::Debug => println!("{:#?}", result.ast),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result.ast)
                .map_err(|e| CliError::failure(format!("Error serializing AST: {e}")))?;
            println!("{json}");
        }
    }

    if result.has_errors() {
        let rendered = render_diagnostics(&path.to_string_lossy(), &source, &result.errors);
        return Err(CliError::failure(rendered.trim_end()));
    }
    Ok(ExitCode::SUCCESS)
}

/// Check every file and report all diagnostics; fails if any file has errors.
pub fn check_files<P: AsRef<Path>>(paths: &[P], config: &ParserConfig) -> CliResult<ExitCode> {
    let mut failed = 0usize;
    for path in paths {
        let path = path.as_ref();
        let name = path.to_string_lossy();
        let source = read_source(path)?;
        let result = analyze_source(&source, config);

        if result.has_errors() {
            failed += 1;
            tracing::info!(file = %name, errors = result.errors.len(), "syntax errors");
            eprint!("{}", render_diagnostics(&name, &source, &result.errors));
        } else {
            println!("✓ {name}: {} declarations", result.ast.declaration_count());
        }
    }

    if failed > 0 {
        return Err(CliError::failure(format!("{failed} of {} files failed to parse", paths.len())));
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_source_keeps_lexical_errors_first() {
        let result = analyze_source("PAGE Login { FIELD a = \"A\" } $ FEATURE { }", &ParserConfig::default());
        assert!(result.errors.len() >= 2, "{:#?}", result.errors);
        assert_eq!(result.errors[0].kind, vero_syntax::diagnostics::ParseErrorKind::Lexical);
        assert_eq!(result.ast.pages.len(), 1);
    }

    #[test]
    fn test_render_diagnostics_names_file_and_message() {
        let source = "PAGE { }";
        let result = analyze_source(source, &ParserConfig::default());
        let rendered = render_diagnostics("login.vero", source, &result.errors);
        assert!(rendered.contains("login.vero"), "{rendered}");
        assert!(rendered.contains("Expected page name"), "{rendered}");
    }

    #[test]
    fn test_render_nothing_for_clean_source() {
        assert_eq!(render_diagnostics("a.vero", "", &[]), "");
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("definitely/not/here.vero")).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.starts_with("Cannot access file"));
    }
}
