//! The compiled filter: a closed sum type that renders to a MongoDB-style
//! document (see [`crate::output`]).

use crate::cst::Comparator;
use crate::value::Scalar;

/// Condition placed at a field path.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Implicit `$eq`: rendered as the bare value
    Equals(Scalar),
    /// `$lt`, `$lte`, `$gt`, `$gte`
    Compare(Comparator, Scalar),
    /// `$in`: any of the listed values
    In(Vec<Scalar>),
    /// `$contains`: array field holding the listed values
    Contains(Vec<Scalar>),
    /// `$like`: SQL-style pattern, `%` as wildcard
    Like(String),
    /// `$fulltext`: full-text match on a string field
    Fulltext(String),
}

impl Condition {
    /// Operator key, `None` for plain equality.
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Condition::Equals(_) => None,
            Condition::Compare(comparator, _) => Some(comparator.operator()),
            Condition::In(_) => Some("$in"),
            Condition::Contains(_) => Some("$contains"),
            Condition::Like(_) => Some("$like"),
            Condition::Fulltext(_) => Some("$fulltext"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldEntry {
    Condition(Condition),
    Nested(FieldMap),
}

/// Field conditions keyed by path segment, in insertion order.
///
/// A dotted path nests: `user.name` holding `v` is `{ user: { name: v } }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldEntry)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the nested map for a dotted `path`, intermediate objects included.
    pub fn at_path(path: &str, condition: Condition) -> Self {
        let mut segments = path.rsplit('.');
        let last = segments.next().unwrap_or(path);

        let mut map = FieldMap {
            entries: vec![(last.to_string(), FieldEntry::Condition(condition))],
        };
        for segment in segments {
            map = FieldMap {
                entries: vec![(segment.to_string(), FieldEntry::Nested(map))],
            };
        }
        map
    }

    pub fn get(&self, key: &str) -> Option<&FieldEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, entry)| entry)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldEntry)> {
        self.entries.iter().map(|(k, entry)| (k.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends the entries of `other`. Callers check for key collisions first.
    fn absorb(&mut self, other: FieldMap) {
        self.entries.extend(other.entries);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// One or more field conditions, all of which must hold
    Fields(FieldMap),
    /// `$and`
    And(Vec<Filter>),
    /// `$or`
    Or(Vec<Filter>),
    /// `$not`
    Not(Box<Filter>),
}

impl Filter {
    pub fn field(path: &str, condition: Condition) -> Self {
        Filter::Fields(FieldMap::at_path(path, condition))
    }

    pub fn not(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// `$and`, `$or` or `$not` at the top level.
    pub fn is_logical(&self) -> bool {
        !matches!(self, Filter::Fields(_))
    }

    /// Combines AND-ed conditions with as little `$and` nesting as possible.
    ///
    /// Field conditions are folded into one map while their top-level keys
    /// stay distinct. Logical filters and colliding conditions are kept apart,
    /// in order, after the merged map.
    pub fn merge_and(conditions: Vec<Filter>) -> Filter {
        let mut merged = FieldMap::new();
        let mut unmerged = Vec::new();

        for condition in conditions {
            match condition {
                Filter::Fields(map) if !map.keys().any(|k| merged.contains_key(k)) => {
                    merged.absorb(map);
                }
                other => unmerged.push(other),
            }
        }

        if unmerged.is_empty() {
            return Filter::Fields(merged);
        }

        if !merged.is_empty() {
            unmerged.insert(0, Filter::Fields(merged));
        }
        Filter::And(unmerged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(path: &str, value: i64) -> Filter {
        Filter::field(path, Condition::Equals(Scalar::Integer(value)))
    }

    #[test]
    fn dotted_path_nests() {
        let map = FieldMap::at_path("user.profile.name", Condition::Equals(Scalar::Null));
        let Some(FieldEntry::Nested(profile)) = map.get("user") else {
            panic!("expected nested user");
        };
        let Some(FieldEntry::Nested(name)) = profile.get("profile") else {
            panic!("expected nested profile");
        };
        assert_eq!(
            name.get("name"),
            Some(&FieldEntry::Condition(Condition::Equals(Scalar::Null)))
        );
    }

    #[test]
    fn independent_keys_merge() {
        let merged = Filter::merge_and(vec![eq("a", 1), eq("b", 2)]);
        let Filter::Fields(map) = merged else {
            panic!("expected merged fields");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn colliding_keys_stay_apart() {
        let merged = Filter::merge_and(vec![eq("a", 1), eq("b", 2), eq("a", 3)]);
        let mut expected_first = FieldMap::at_path("a", Condition::Equals(Scalar::Integer(1)));
        expected_first.absorb(FieldMap::at_path("b", Condition::Equals(Scalar::Integer(2))));
        assert_eq!(
            merged,
            Filter::And(vec![Filter::Fields(expected_first), eq("a", 3)])
        );
    }

    #[test]
    fn nested_paths_collide_on_root_segment() {
        let merged = Filter::merge_and(vec![eq("user.id", 1), eq("user.age", 2)]);
        assert_eq!(merged, Filter::And(vec![eq("user.id", 1), eq("user.age", 2)]));
    }

    #[test]
    fn logical_filters_never_merge() {
        let negated = Filter::not(eq("b", 2));
        let merged = Filter::merge_and(vec![negated.clone(), eq("a", 1)]);
        assert_eq!(merged, Filter::And(vec![eq("a", 1), negated.clone()]));

        let only_logical = Filter::merge_and(vec![negated.clone(), negated.clone()]);
        assert_eq!(only_logical, Filter::And(vec![negated.clone(), negated]));
    }
}
