//! # Search Syntax - Concrete Syntax Tree
//!
//! This module defines the tokens and the Concrete Syntax Tree (CST) for the
//! search-box query syntax: the `field:value` language users type into a
//! search box, in the style of Gmail, GitHub or Shopify admin search.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer, and their categories
//! - **[nodes]** - One node type per grammar rule, produced by the parser
//! - **[operators]** - Comparators and the filter operators they map to
//!
//! ## Quick Start
//!
//! ```text
//! status:active -archived:true (priority:>=3 OR owner:me) "release notes"
//! ```
//!
//! This query keeps active, non-archived records that are either high priority
//! or owned by `me`, and that mention "release notes" in a searchable field.
//!
//! ## Grammar
//!
//! Precedence from lowest to highest: `OR`, `AND` (explicit or implied by
//! juxtaposition), `NOT` / `-`, parentheses.
//!
//! ```text
//! query          := orQuery
//! orQuery        := andQuery (OR andQuery)*
//! andQuery       := atomicQuery (AND? atomicQuery)*
//! atomicQuery    := subQuery | notQuery | term
//! subQuery       := '(' query ')'
//! notQuery       := NOT atomicQuery
//! term           := equalFieldTerm | otherFieldTerm | globalTerm
//! equalFieldTerm := field ':' value (',' value)*
//! otherFieldTerm := field (':<' | ':<=' | ':>' | ':>=') value
//! globalTerm     := value
//! ```
//!
//! ## Examples
//!
//! ### Field equality
//!
//! ```text
//! status:active
//! user.name:john
//! id:1,2,3
//! ```
//!
//! ### Comparisons
//!
//! ```text
//! count:>5
//! created:>=2024-01-01
//! ```
//!
//! ### Wildcards
//!
//! ```text
//! name:abc*      // starts with
//! name:*abc      // ends with
//! ```
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use nodes::{
    AndQuery, AtomicQuery, EqualFieldTerm, FieldNode, GlobalTerm, NotQuery, OrQuery,
    OtherFieldTerm, Query, SubQuery, Term, ValueNode,
};
pub use operators::Comparator;
pub use tokens::{Token, TokenKind};
