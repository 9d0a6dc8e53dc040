//! Compile search queries to filter documents

use super::CliError;
use crate::{Lexer, ParseError, ParseOptions, Parser, parse_json};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The search query to compile
    pub query: String,
    /// Field configuration
    pub options: ParseOptions,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't build the filter
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query compiled; `null` when it produced no filter
    Success(serde_json::Value),
}

/// Execute a searchbox check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if !options.syntax_only {
        let output = parse_json(&options.query, &options.options)?;
        return Ok(CheckResult::Success(output));
    }

    let trimmed = options.query.trim();
    if trimmed.is_empty() {
        return Ok(CheckResult::SyntaxValid);
    }

    let (tokens, errors) = Lexer::new(trimmed).tokenize();
    if let Some(error) = errors.first() {
        let error = ParseError::new(error.to_string(), options.query.as_str());
        return Err(CliError::Parse(error.into()));
    }

    Parser::new(tokens)
        .with_max_depth(options.options.max_depth)
        .parse()?;
    Ok(CheckResult::SyntaxValid)
}
