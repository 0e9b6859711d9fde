//! CLI module for the Vero toolchain
//!
//! ## Commands
//!
//! - `parse <file> [--format debug|json]` - Parse a file and print its AST
//! - `check <file>...` - Report syntax diagnostics for one or more files
//! - `--lex <file>` / `--parse <file>` - Debug dumps of the token stream / AST
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use vero_syntax::config::ParserConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Parser frontend for the Vero test-automation language
#[derive(Parser, Debug)]
#[command(name = "vero")]
#[command(version = VERSION)]
#[command(about = "Parser frontend for the Vero test-automation language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Parse only and print the AST (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,

    /// Maximum number of modifiers on a single selector
    #[arg(long = "max-modifiers", value_name = "N", global = true)]
    pub max_modifiers: Option<usize>,

    /// Maximum nesting depth of blocks, conditions and utility chains
    #[arg(long = "max-depth", value_name = "N", global = true)]
    pub max_depth: Option<usize>,
}

impl Cli {
    /// Parser limits after applying command-line overrides.
    pub fn parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::default();
        if let Some(limit) = self.max_modifiers {
            config = config.with_max_selector_modifiers(limit);
        }
        if let Some(depth) = self.max_depth {
            config = config.with_max_nesting_depth(depth);
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file and print its AST
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output format for the AST
        #[arg(long, value_enum, default_value_t = OutputFormat::Debug)]
        format: OutputFormat,
    },

    /// Report syntax diagnostics without printing the AST
    Check {
        /// Source files to check
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

/// How `vero parse` prints the AST.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rust `Debug` pretty-print
    Debug,
    /// JSON, for code generators written in other languages
    Json,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.parser_config();
    tracing::debug!(?config, "parser limits");

    // Handle debug flags first
    if let Some(file) = &cli.lex_file {
        return commands::lex_file(file);
    }
    if let Some(file) = &cli.parse_file {
        return commands::parse_file(file, &config, OutputFormat::Debug);
    }

    match cli.command {
        Some(Command::Parse { file, format }) => commands::parse_file(&file, &config, format),
        Some(Command::Check { files }) => commands::check_files(&files, &config),
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_files(&[file], &config)
            } else {
                Err(CliError::failure("Error: no input file (try `vero --help`)"))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_subcommand() {
        let cli = Cli::try_parse_from(["vero", "parse", "login.vero", "--format", "json"]).unwrap();
        if let Some(Command::Parse { file, format }) = cli.command {
            assert_eq!(file, PathBuf::from("login.vero"));
            assert_eq!(format, OutputFormat::Json);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_cli_parse_defaults_to_debug_format() {
        let cli = Cli::try_parse_from(["vero", "parse", "login.vero"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Parse {
                format: OutputFormat::Debug,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_check_takes_many_files() {
        let cli = Cli::try_parse_from(["vero", "check", "a.vero", "b.vero"]).unwrap();
        if let Some(Command::Check { files }) = cli.command {
            assert_eq!(files.len(), 2);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_check_requires_a_file() {
        assert!(Cli::try_parse_from(["vero", "check"]).is_err());
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["vero", "--lex", "test.vero"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["vero", "--parse", "test.vero"]).unwrap();
        assert!(cli.parse_file.is_some());

        assert!(Cli::try_parse_from(["vero", "test.vero", "--lex", "other.vero"]).is_err());
    }

    #[test]
    fn test_limit_flags_override_config() {
        let cli = Cli::try_parse_from(["vero", "check", "a.vero", "--max-modifiers", "5", "--max-depth", "8"]).unwrap();
        let config = cli.parser_config();
        assert_eq!(config.max_selector_modifiers, 5);
        assert_eq!(config.max_nesting_depth, 8);

        let cli = Cli::try_parse_from(["vero", "a.vero"]).unwrap();
        assert_eq!(cli.parser_config(), ParserConfig::default());
    }
}
