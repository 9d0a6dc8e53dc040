//! Field configuration supplied with every parse call.
//!
//! Options are read-only for the duration of a call. They can be built in code
//! or deserialized from JSON:
//!
//! ```
//! use searchbox::{FieldType, ParseOptions};
//!
//! let options = ParseOptions::from_json(r#"{
//!     "fields": {
//!         "title": { "type": "string", "fulltext": true, "searchable": true },
//!         "count": { "type": "number" }
//!     },
//!     "aliases": { "n": "count" }
//! }"#).unwrap();
//!
//! assert_eq!(options.field("count").map(|f| f.field_type), Some(FieldType::Number));
//! assert_eq!(options.resolve_alias("n"), "count");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
}

/// Configuration of one filterable field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldOptions {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Equality on an array field becomes `$contains`.
    #[serde(default)]
    pub array: bool,

    /// Global (field-less) terms are matched against searchable fields.
    #[serde(default)]
    pub searchable: bool,

    /// Equality on a string field becomes `$fulltext`. Ignored for other types.
    #[serde(default)]
    pub fulltext: bool,
}

impl FieldOptions {
    pub fn new(field_type: FieldType) -> Self {
        FieldOptions {
            field_type,
            array: false,
            searchable: false,
            fulltext: false,
        }
    }

    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn fulltext(mut self) -> Self {
        self.fulltext = true;
        self
    }

    pub fn is_fulltext_string(&self) -> bool {
        self.fulltext && self.field_type == FieldType::String
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field '{field}' is fulltext but has type {field_type:?}; fulltext requires a string field")]
    FulltextOnNonString { field: String, field_type: FieldType },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParseOptions {
    /// Declaration order is kept; global terms visit searchable fields in it.
    #[serde(default)]
    pub fields: IndexMap<String, FieldOptions>,

    /// Maps a field lexeme, as typed, to a configured field name.
    #[serde(default)]
    pub aliases: IndexMap<String, String>,

    /// Reserved. Accepted and carried, but not applied to date coercion.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Maximum nesting of parentheses and negations; unlimited when `None`.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.fields.insert(name.into(), options);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>, field: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), field.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Deserializes and validates options.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: ParseOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        for (name, field) in &self.fields {
            if field.fulltext && field.field_type != FieldType::String {
                return Err(OptionsError::FulltextOnNonString {
                    field: name.clone(),
                    field_type: field.field_type,
                });
            }
        }
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&FieldOptions> {
        self.fields.get(name)
    }

    /// Aliases apply to the whole lexeme, never to single path segments.
    pub fn resolve_alias<'a>(&'a self, field: &'a str) -> &'a str {
        self.aliases.get(field).map_or(field, String::as_str)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = (&str, &FieldOptions)> {
        self.fields
            .iter()
            .filter(|(_, options)| options.searchable)
            .map(|(name, options)| (name.as_str(), options))
    }
}
