use thiserror::Error;

/// The query could not be tokenized or does not follow the grammar.
///
/// Carries the first error found and the query exactly as the caller passed
/// it, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub query: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>, query: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
            query: query.into(),
        }
    }
}

/// A field-less term was used, but no searchable field accepts its value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Global search term \"{term}\" requires at least one field with searchable: true")]
pub struct NoSearchableFieldsError {
    /// The term as typed.
    pub term: String,
}

impl NoSearchableFieldsError {
    pub fn new(term: impl Into<String>) -> Self {
        NoSearchableFieldsError { term: term.into() }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Any failure of [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    NoSearchableFields(#[from] NoSearchableFieldsError),
}
