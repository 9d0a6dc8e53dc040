//! Search syntax reference for the searchbox CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Comparisons,
    Logic,
    Values,
    Wildcards,
    Global,
    Options,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "comparisons" | "comparison" | "compare" => Some(Self::Comparisons),
            "logic" | "boolean" | "connectives" => Some(Self::Logic),
            "values" | "value" | "types" => Some(Self::Values),
            "wildcards" | "wildcard" | "like" => Some(Self::Wildcards),
            "global" | "search" => Some(Self::Global),
            "options" | "config" | "fields" => Some(Self::Options),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SEARCHBOX DOCUMENTATION

searchbox compiles the text users type into a search box into a MongoDB-style
filter document. Terms are field:value pairs, comparisons, or bare words that
are matched against every searchable field.

DOCUMENTATION CATEGORIES

  syntax            Terms, fields, dotted paths, grouping
  comparisons       Equality, multi-value equality, :< :<= :> :>=
  logic             AND, OR, NOT and implicit AND
  values            Numbers, dates, booleans, null, quoted strings
  wildcards         Prefix and suffix matching with *
  global            Field-less terms and searchable fields
  options           Field configuration file format

QUICK REFERENCE

  status:active             Equality
  id:1,2,3                  Any of ($in)
  count:>5                  Comparison
  user.name:john            Nested field
  name:abc*                 Starts with ($like "abc%")
  a:1 b:2                   Both (implicit AND)
  a:1 OR b:2                Either
  -status:archived          Not
  (a:1 OR b:2) c:3          Grouping
  "hello world"             Global term

Run 'searchbox doc <category>' for details.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Comparisons) => Ok(COMPARISONS_DOC),
        Some(DocCategory::Logic) => Ok(LOGIC_DOC),
        Some(DocCategory::Values) => Ok(VALUES_DOC),
        Some(DocCategory::Wildcards) => Ok(WILDCARDS_DOC),
        Some(DocCategory::Global) => Ok(GLOBAL_DOC),
        Some(DocCategory::Options) => Ok(OPTIONS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Terms and Fields

FIELD TERMS
  field:value
    Match records whose field equals the value.

    Example:
      Query:  status:active
      Filter: {"status": "active"}

    Constraints:
      - Field names start with a letter, then letters, digits or underscores
      - Whitespace around ':' is allowed: status : active

NESTED FIELDS
  parent.child:value
    Dotted paths address nested documents.

    Example:
      Query:  user.name:john
      Filter: {"user": {"name": "john"}}

GROUPING
  ( query )
    Parentheses override precedence.

    Example:
      Query:  (a:1 OR b:2) c:3
      Filter: {"$and": [{"c": 3}, {"$or": [{"a": 1}, {"b": 2}]}]}

    Constraints:
      - Every '(' needs a matching ')'
"#;

const COMPARISONS_DOC: &str = r#"COMPARISONS - Equality and Ordering

EQUALITY
  field:value           {"field": value}
  field:v1,v2,v3        {"field": {"$in": [v1, v2, v3]}}

ORDERING
  field:<value          {"field": {"$lt": value}}
  field:<=value         {"field": {"$lte": value}}
  field:>value          {"field": {"$gt": value}}
  field:>=value         {"field": {"$gte": value}}

  Examples:
    count:>5
    created:>=2024-01-01

  Constraints:
    - Ordering takes exactly one value
    - When the field has a configured type and the value does not fit it,
      the term is left out of the filter instead of failing
"#;

const LOGIC_DOC: &str = r#"LOGIC - AND, OR, NOT

IMPLICIT AND
  a:1 b:2               {"a": 1, "b": 2}
  a:1 a:2               {"$and": [{"a": 1}, {"a": 2}]}

    Terms on different fields merge into one object. Repeated fields and
    nested logic follow it in an $and list.

EXPLICIT AND / OR
  a:1 AND b:2           same as a:1 b:2
  a:1 OR b:2            {"$or": [{"a": 1}, {"b": 2}]}
  a:1 OR b:2 c:3        {"$or": [{"a": 1}, {"b": 2, "c": 3}]}

    AND binds tighter than OR. Keywords: AND, and, OR, or.

NOT
  -status:archived      {"$not": {"status": "archived"}}
  NOT (a:1 OR b:2)      {"$not": {"$or": [{"a": 1}, {"b": 2}]}}

    NOT applies to the term or group right after it. Keywords: -, NOT, not.

  Constraints:
    - A query cannot start or end with AND / OR
    - Keywords are only keywords as whole words: 'android' is a word
"#;

const VALUES_DOC: &str = r#"VALUES - Literal Types

  Without field configuration, the value type follows how it is written:

  null                  null
  true, false           booleans
  42, +1.5, .5          numbers ('-' before a value means NOT)
  2024-01-01            date (UTC midnight); also 2024-01, 2024-032, 2024-W05
  2024-01-01T10:00:00Z  date-time, with optional offset (+02:00)
  "Joe Bloggs"          string, quotes removed (single quotes work too)
  getting-started       string

  With field configuration, the value is converted to the field's type:

  string                the text as typed, quotes removed
  number                must be a finite number
  boolean               'true' is true, anything else is false
  date                  must be a valid ISO-8601 date

  Constraints:
    - Quoted strings have no escape sequences
    - null is accepted for every type
"#;

const WILDCARDS_DOC: &str = r#"WILDCARDS - Prefix and Suffix Matching

  name:abc*             {"name": {"$like": "abc%"}}    starts with
  name:*abc             {"name": {"$like": "%abc"}}    ends with

  Constraints:
    - Only for a single string value longer than one character
    - A lone '*' is an ordinary value
"#;

const GLOBAL_DOC: &str = r#"GLOBAL - Field-less Terms

  hello
    A bare value is matched against every field configured with
    "searchable": true, combined with $or.

    Example (title fulltext, tags array, both searchable):
      Query:  hello
      Filter: {"$or": [{"title": {"$fulltext": "hello"}},
                       {"tags": {"$contains": ["hello"]}}]}

  Constraints:
    - Fields are tried in the order they are declared
    - Fields whose type does not accept the value are skipped
    - It is an error when no searchable field exists, or none accepts the value
"#;

const OPTIONS_DOC: &str = r#"OPTIONS - Field Configuration

  Pass a JSON file with --options, or inline JSON with --options-json.

  {
    "fields": {
      "title":   { "type": "string", "fulltext": true, "searchable": true },
      "tags":    { "type": "string", "array": true, "searchable": true },
      "count":   { "type": "number" },
      "created": { "type": "date" }
    },
    "aliases": { "n": "count" },
    "max_depth": 32
  }

  type          string | number | boolean | date
  array         equality becomes $contains (default false)
  searchable    used by global terms (default false)
  fulltext      string equality becomes $fulltext (default false)
  aliases       map a field name as typed to a configured field
  timezone      accepted, currently not applied
  max_depth     maximum nesting of parentheses and NOT
"#;
