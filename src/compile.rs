use tracing::debug;

use crate::error::{ParseError, SearchError};
use crate::filter::Filter;
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::output::to_json;
use crate::parser::Parser;
use crate::validate::has_valid_values;
use crate::visitor::FilterVisitor;

/// Compiles a search-box query into a filter.
///
/// Returns `Ok(None)` when the query is blank, or when every term dropped out
/// because its value did not fit its field's type.
///
/// # Errors
///
/// - [`SearchError::Parse`] when the query is malformed: unbalanced
///   parentheses, a dangling `AND`/`OR`, a missing value.
/// - [`SearchError::NoSearchableFields`] when a field-less term meets no
///   searchable field that accepts it.
///
/// # Examples
///
/// ```
/// use searchbox::{FieldOptions, FieldType, ParseOptions, parse};
/// use searchbox::output::to_json;
/// use serde_json::json;
///
/// let options = ParseOptions::new().with_field("id", FieldOptions::new(FieldType::Number));
///
/// let filter = parse("id:1,2,3 OR status:active", &options).unwrap().unwrap();
/// assert_eq!(
///     to_json(&filter),
///     json!({ "$or": [{ "id": { "$in": [1, 2, 3] } }, { "status": "active" }] })
/// );
///
/// assert_eq!(parse("   ", &options).unwrap(), None);
/// ```
pub fn parse(query: &str, options: &ParseOptions) -> Result<Option<Filter>, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        debug!("blank query, no filter");
        return Ok(None);
    }

    let (tokens, lex_errors) = Lexer::new(trimmed).tokenize();
    if let Some(error) = lex_errors.first() {
        debug!(query, errors = lex_errors.len(), "lexing failed");
        return Err(ParseError::new(error.to_string(), query).into());
    }
    debug!(query, tokens = tokens.len(), "lexed");

    let cst = Parser::new(tokens)
        .with_max_depth(options.max_depth)
        .parse()
        .map_err(|error| {
            debug!(query, %error, "parsing failed");
            ParseError::new(error.to_string(), query)
        })?;

    let filter = FilterVisitor::new(options).visit_query(&cst)?;
    let filter = filter.filter(|f| has_valid_values(Some(f)));
    debug!(query, produced = filter.is_some(), "compiled");

    Ok(filter)
}

/// [`parse`] for callers holding an optional query; `None` compiles to `None`.
pub fn parse_optional(
    query: Option<&str>,
    options: &ParseOptions,
) -> Result<Option<Filter>, SearchError> {
    match query {
        Some(query) => parse(query, options),
        None => Ok(None),
    }
}

/// [`parse`] straight to the wire document, `null` when there is no filter.
pub fn parse_json(query: &str, options: &ParseOptions) -> Result<serde_json::Value, SearchError> {
    Ok(parse(query, options)?
        .map(|filter| to_json(&filter))
        .unwrap_or(serde_json::Value::Null))
}
