use crate::filter::{Condition, FieldEntry, FieldMap, Filter};

/// Checks that a compiled filter is not a hollow shell such as `{}`,
/// `{ $or: [] }` or `{ id: { $in: [] } }`.
///
/// `None` (nothing compiled) is never valid. Scalars, including `null` and
/// dates, always are. A list is valid when one of its elements is, an object
/// when it has a key and one of its values is valid.
pub fn has_valid_values(filter: Option<&Filter>) -> bool {
    filter.is_some_and(filter_is_valid)
}

fn filter_is_valid(filter: &Filter) -> bool {
    match filter {
        Filter::Fields(map) => map_is_valid(map),
        Filter::And(filters) | Filter::Or(filters) => filters.iter().any(filter_is_valid),
        Filter::Not(inner) => filter_is_valid(inner),
    }
}

fn map_is_valid(map: &FieldMap) -> bool {
    !map.is_empty()
        && map.iter().any(|(_, entry)| match entry {
            FieldEntry::Condition(condition) => condition_is_valid(condition),
            FieldEntry::Nested(nested) => map_is_valid(nested),
        })
}

fn condition_is_valid(condition: &Condition) -> bool {
    match condition {
        Condition::In(values) | Condition::Contains(values) => !values.is_empty(),
        Condition::Equals(_)
        | Condition::Compare(..)
        | Condition::Like(_)
        | Condition::Fulltext(_) => true,
    }
}
