//! Rendering of compiled filters into the MongoDB-style wire document.
//!
//! This is the contract with whatever executes the filter downstream:
//!
//! - **Field conditions** are objects keyed by path segment; a dotted path
//!   nests (`user.name:john` → `{"user": {"name": "john"}}`)
//! - **Equality** is the bare value; `$eq` is implicit
//! - **Operators** are single-key objects: `$gt`, `$gte`, `$lt`, `$lte` hold a
//!   value, `$in` and `$contains` a list, `$like` and `$fulltext` a string
//! - **Combinators** are `{"$and": [..]}`, `{"$or": [..]}` and `{"$not": {..}}`
//! - **Dates** are ISO-8601 UTC strings with milliseconds
//!
//! Object keys come out sorted (serde_json's default map), so the output is
//! deterministic.
//!
//! # Examples
//!
//! ```
//! use searchbox::{ParseOptions, parse};
//! use searchbox::output::{to_json, to_json_string};
//!
//! let filter = parse("count:>5 user.name:john", &ParseOptions::default())
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(
//!     to_json(&filter),
//!     serde_json::json!({ "count": { "$gt": 5 }, "user": { "name": "john" } })
//! );
//! assert_eq!(to_json_string(&filter), r#"{"count":{"$gt":5},"user":{"name":"john"}}"#);
//! ```

use serde::{Serialize, Serializer};
use serde_json::{Map, Value as Json};

use crate::filter::{Condition, FieldEntry, FieldMap, Filter};
use crate::value::Scalar;

pub fn to_json(filter: &Filter) -> Json {
    match filter {
        Filter::Fields(map) => fields_to_json(map),
        Filter::And(filters) => combinator("$and", filters),
        Filter::Or(filters) => combinator("$or", filters),
        Filter::Not(inner) => single("$not", to_json(inner)),
    }
}

/// Compact JSON text.
pub fn to_json_string(filter: &Filter) -> String {
    to_json(filter).to_string()
}

/// JSON text with 2-space indentation.
pub fn to_json_pretty(filter: &Filter) -> String {
    format!("{:#}", to_json(filter))
}

fn combinator(key: &str, filters: &[Filter]) -> Json {
    single(key, Json::Array(filters.iter().map(to_json).collect()))
}

fn single(key: &str, value: Json) -> Json {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Json::Object(map)
}

fn fields_to_json(fields: &FieldMap) -> Json {
    Json::Object(
        fields
            .iter()
            .map(|(key, entry)| {
                let value = match entry {
                    FieldEntry::Condition(condition) => condition_to_json(condition),
                    FieldEntry::Nested(nested) => fields_to_json(nested),
                };
                (key.to_string(), value)
            })
            .collect(),
    )
}

fn condition_to_json(condition: &Condition) -> Json {
    let operand = match condition {
        Condition::Equals(value) => return value.to_json(),
        Condition::Compare(_, value) => value.to_json(),
        Condition::In(values) | Condition::Contains(values) => list(values),
        Condition::Like(pattern) => Json::String(pattern.clone()),
        Condition::Fulltext(text) => Json::String(text.clone()),
    };

    match condition.operator() {
        Some(operator) => single(operator, operand),
        None => operand,
    }
}

fn list(values: &[Scalar]) -> Json {
    Json::Array(values.iter().map(Scalar::to_json).collect())
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self).serialize(serializer)
    }
}
