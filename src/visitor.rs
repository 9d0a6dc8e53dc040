use tracing::trace;

use crate::cst::{
    AndQuery, AtomicQuery, EqualFieldTerm, FieldNode, GlobalTerm, NotQuery, OrQuery,
    OtherFieldTerm, Query, SubQuery, Term, ValueNode,
};
use crate::error::NoSearchableFieldsError;
use crate::filter::{Condition, Filter};
use crate::options::{FieldOptions, FieldType, ParseOptions};
use crate::value::{Scalar, coerce};

/// Turns a CST into a [`Filter`], applying field configuration.
///
/// Every `visit_*` method returns `Ok(None)` when its subtree contributes no
/// condition, for instance a comparison whose value does not coerce to the
/// field's type.
pub struct FilterVisitor<'o> {
    options: &'o ParseOptions,
}

type VisitResult = Result<Option<Filter>, NoSearchableFieldsError>;

impl<'o> FilterVisitor<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        FilterVisitor { options }
    }

    pub fn visit_query(&self, query: &Query) -> VisitResult {
        self.visit_or_query(&query.or_query)
    }

    fn visit_or_query(&self, or_query: &OrQuery) -> VisitResult {
        let mut filters = or_query
            .and_queries
            .iter()
            .filter_map(|and_query| self.visit_and_query(and_query).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Filter::Or(filters)),
        })
    }

    fn visit_and_query(&self, and_query: &AndQuery) -> VisitResult {
        let mut filters = and_query
            .atomic_queries
            .iter()
            .filter_map(|atomic| self.visit_atomic_query(atomic).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Filter::merge_and(filters)),
        })
    }

    fn visit_atomic_query(&self, atomic: &AtomicQuery) -> VisitResult {
        match atomic {
            AtomicQuery::Sub(sub) => self.visit_sub_query(sub),
            AtomicQuery::Not(not) => self.visit_not_query(not),
            AtomicQuery::Term(term) => self.visit_term(term),
        }
    }

    fn visit_sub_query(&self, sub: &SubQuery) -> VisitResult {
        self.visit_query(&sub.query)
    }

    /// A negated term that contributes nothing is dropped, not negated.
    fn visit_not_query(&self, not: &NotQuery) -> VisitResult {
        Ok(self.visit_atomic_query(&not.atomic_query)?.map(Filter::not))
    }

    fn visit_term(&self, term: &Term) -> VisitResult {
        match term {
            Term::EqualField(term) => Ok(self.visit_equal_field_term(term)),
            Term::OtherField(term) => Ok(self.visit_other_field_term(term)),
            Term::Global(term) => self.visit_global_term(term).map(Some),
        }
    }

    /// Resolves the field name through the aliases, and its options.
    fn visit_field<'a>(&'a self, field: &'a FieldNode) -> (&'a str, Option<&'a FieldOptions>) {
        let name = self.options.resolve_alias(field.path());
        (name, self.options.field(name))
    }

    fn visit_value(&self, value: &ValueNode, field_type: Option<FieldType>) -> Option<Scalar> {
        coerce(&value.token, field_type)
    }

    fn visit_global_term(&self, term: &GlobalTerm) -> Result<Filter, NoSearchableFieldsError> {
        let raw = term.value.raw();

        let mut searchable = self.options.searchable_fields().peekable();
        if searchable.peek().is_none() {
            return Err(NoSearchableFieldsError::new(raw));
        }

        let filters: Vec<Filter> = searchable
            .filter_map(|(name, options)| {
                let value = self.visit_value(&term.value, Some(options.field_type));
                if value.is_none() {
                    trace!(field = name, term = raw, "global term does not coerce, field skipped");
                }
                let value = value?;

                let condition = if options.array {
                    Condition::Contains(vec![value])
                } else if options.is_fulltext_string() {
                    match value {
                        Scalar::String(s) => Condition::Fulltext(s),
                        other => Condition::Equals(other),
                    }
                } else {
                    Condition::Equals(value)
                };
                Some(Filter::field(name, condition))
            })
            .collect();

        if filters.is_empty() {
            return Err(NoSearchableFieldsError::new(raw));
        }
        Ok(Filter::Or(filters))
    }

    fn visit_equal_field_term(&self, term: &EqualFieldTerm) -> Option<Filter> {
        let (path, options) = self.visit_field(&term.field);
        let field_type = options.map(|o| o.field_type);

        let multiple = term.values.len() > 1;
        let mut values: Vec<Scalar> = term
            .values
            .iter()
            .filter_map(|value| self.visit_value(value, field_type))
            .collect();

        if values.is_empty() {
            trace!(field = path, "no value coerces, equality dropped");
            return None;
        }

        if options.is_some_and(|o| o.array) {
            return Some(Filter::field(path, Condition::Contains(values)));
        }

        if multiple {
            return Some(Filter::field(path, Condition::In(values)));
        }

        let value = values.remove(0);
        let condition = match value {
            Scalar::String(s) if s.len() > 1 && s.starts_with('*') => {
                Condition::Like(format!("%{}", &s[1..]))
            }
            Scalar::String(s) if s.len() > 1 && s.ends_with('*') => {
                Condition::Like(format!("{}%", &s[..s.len() - 1]))
            }
            Scalar::String(s) if options.is_some_and(FieldOptions::is_fulltext_string) => {
                Condition::Fulltext(s)
            }
            other => Condition::Equals(other),
        };
        Some(Filter::field(path, condition))
    }

    fn visit_other_field_term(&self, term: &OtherFieldTerm) -> Option<Filter> {
        let (path, options) = self.visit_field(&term.field);

        let Some(value) = self.visit_value(&term.value, options.map(|o| o.field_type)) else {
            trace!(field = path, value = term.value.raw(), "comparison value does not coerce, dropped");
            return None;
        };

        Some(Filter::field(path, Condition::Compare(term.comparator, value)))
    }
}
