use crate::cst::TokenKind;

/// Ordering comparators of an `otherFieldTerm`.
///
/// Equality (`:`) is not a `Comparator`: it has its own grammar rule because
/// it accepts several values and wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Less than (`:<`)
    LessThan,
    /// Less than or equal (`:<=`)
    LessEqual,
    /// Greater than (`:>`)
    GreaterThan,
    /// Greater than or equal (`:>=`)
    GreaterEqual,
}

impl Comparator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Lt => Some(Comparator::LessThan),
            TokenKind::Lte => Some(Comparator::LessEqual),
            TokenKind::Gt => Some(Comparator::GreaterThan),
            TokenKind::Gte => Some(Comparator::GreaterEqual),
            _ => None,
        }
    }

    /// Operator key in the filter document.
    pub fn operator(self) -> &'static str {
        match self {
            Comparator::LessThan => "$lt",
            Comparator::LessEqual => "$lte",
            Comparator::GreaterThan => "$gt",
            Comparator::GreaterEqual => "$gte",
        }
    }
}
