use crate::cst::{Comparator, Token};

/// Root of the tree: `query := orQuery`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub or_query: OrQuery,
}

/// `andQuery (OR andQuery)*`
///
/// `connectives` holds the `OR` tokens between the branches, so it is always
/// one shorter than `and_queries`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrQuery {
    pub and_queries: Vec<AndQuery>,
    pub connectives: Vec<Token>,
}

/// `atomicQuery (AND? atomicQuery)*`
///
/// Only explicit `AND` tokens are recorded in `connectives`; juxtaposed terms
/// leave no trace there.
#[derive(Debug, Clone, PartialEq)]
pub struct AndQuery {
    pub atomic_queries: Vec<AtomicQuery>,
    pub connectives: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AtomicQuery {
    Sub(SubQuery),
    Not(NotQuery),
    Term(Term),
}

/// Parenthesized query
///
/// # Example
/// ```text
/// (status:active OR status:pending)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SubQuery {
    pub open: Token,
    pub query: Box<Query>,
    pub close: Token,
}

/// Negated atomic query
///
/// # Examples
/// ```text
/// -status:archived
/// NOT (a:1 OR b:2)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NotQuery {
    pub not: Token,
    pub atomic_query: Box<AtomicQuery>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    EqualField(EqualFieldTerm),
    OtherField(OtherFieldTerm),
    Global(GlobalTerm),
}

/// `field ':' value (',' value)*`
///
/// # Examples
/// ```text
/// status:active
/// id:1,2,3
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EqualFieldTerm {
    pub field: FieldNode,
    pub equal: Token,
    /// Never empty.
    pub values: Vec<ValueNode>,
}

/// `field comparator value`
///
/// # Example
/// ```text
/// count:>=5
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OtherFieldTerm {
    pub field: FieldNode,
    pub comparator: Comparator,
    pub comparator_token: Token,
    pub value: ValueNode,
}

/// A value without a field prefix, matched against every searchable field.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalTerm {
    pub value: ValueNode,
}

/// Field name, plain (`status`) or dotted (`user.name`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub token: Token,
}

impl FieldNode {
    pub fn path(&self) -> &str {
        &self.token.lexeme
    }
}

/// Any token of the value category.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    pub token: Token,
}

impl ValueNode {
    /// Source text of the value, quotes included.
    pub fn raw(&self) -> &str {
        &self.token.lexeme
    }
}
