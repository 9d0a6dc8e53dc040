use thiserror::Error;

use crate::cst::{
    AndQuery, AtomicQuery, Comparator, EqualFieldTerm, FieldNode, GlobalTerm, NotQuery, OrQuery,
    OtherFieldTerm, Query, SubQuery, Term, Token, TokenKind, ValueNode,
};

/// A token sequence the grammar does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Expecting {expected} but found {found} at line {line}, column {column}")]
    Unexpected {
        expected: &'static str,
        found: String,
        offset: usize,
        line: usize,
        column: usize,
    },

    #[error("Expecting {expected} but reached the end of input")]
    UnexpectedEnd { expected: &'static str },

    #[error("Redundant input, expecting end of input but found {found} at line {line}, column {column}")]
    RedundantInput {
        found: String,
        offset: usize,
        line: usize,
        column: usize,
    },

    #[error("Nesting deeper than {max_depth} level(s) at line {line}, column {column}")]
    TooDeep {
        max_depth: usize,
        offset: usize,
        line: usize,
        column: usize,
    },
}

/// Recursive-descent parser over the tokens of a single query.
///
/// All parse state (tokens, cursor, depth) lives in the value, so every call
/// to [`crate::parse`] works on its own parser.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    max_depth: Option<usize>,
}

impl Parser {
    /// `tokens` must not contain the `Eof` token.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    /// Consumes the current token. Callers have checked that one exists.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        self.position += 1;
        token
    }

    fn unexpected(&self, expected: &'static str) -> SyntaxError {
        match self.current() {
            Some(token) => SyntaxError::Unexpected {
                expected,
                found: token.to_string(),
                offset: token.offset,
                line: token.line,
                column: token.column,
            },
            None => SyntaxError::UnexpectedEnd { expected },
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        match (self.max_depth, self.current()) {
            (Some(max_depth), Some(token)) if self.depth > max_depth => Err(SyntaxError::TooDeep {
                max_depth,
                offset: token.offset,
                line: token.line,
                column: token.column,
            }),
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parses the whole input; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Query, SyntaxError> {
        let query = self.parse_query()?;

        match self.current() {
            None => Ok(query),
            Some(token) => Err(SyntaxError::RedundantInput {
                found: token.to_string(),
                offset: token.offset,
                line: token.line,
                column: token.column,
            }),
        }
    }

    fn parse_query(&mut self) -> Result<Query, SyntaxError> {
        Ok(Query {
            or_query: self.parse_or_query()?,
        })
    }

    fn parse_or_query(&mut self) -> Result<OrQuery, SyntaxError> {
        let mut and_queries = vec![self.parse_and_query()?];
        let mut connectives = vec![];

        while self.check(TokenKind::Or) {
            connectives.push(self.advance());
            and_queries.push(self.parse_and_query()?);
        }

        Ok(OrQuery {
            and_queries,
            connectives,
        })
    }

    fn parse_and_query(&mut self) -> Result<AndQuery, SyntaxError> {
        let mut atomic_queries = vec![self.parse_atomic_query()?];
        let mut connectives = vec![];

        loop {
            if self.check(TokenKind::And) {
                connectives.push(self.advance());
            } else if !self.starts_atomic_query() {
                break;
            }
            atomic_queries.push(self.parse_atomic_query()?);
        }

        Ok(AndQuery {
            atomic_queries,
            connectives,
        })
    }

    fn starts_atomic_query(&self) -> bool {
        self.current().is_some_and(|t| {
            matches!(t.kind, TokenKind::LeftParen | TokenKind::Not)
                || t.kind.is_field()
                || t.kind.is_value()
        })
    }

    fn parse_atomic_query(&mut self) -> Result<AtomicQuery, SyntaxError> {
        match self.current().map(|t| t.kind) {
            Some(TokenKind::LeftParen) => Ok(AtomicQuery::Sub(self.parse_sub_query()?)),
            Some(TokenKind::Not) => Ok(AtomicQuery::Not(self.parse_not_query()?)),
            _ => Ok(AtomicQuery::Term(self.parse_term()?)),
        }
    }

    fn parse_sub_query(&mut self) -> Result<SubQuery, SyntaxError> {
        let open = self.expect(TokenKind::LeftParen, "'('")?;
        self.enter()?;
        let query = self.parse_query()?;
        self.leave();
        let close = self.expect(TokenKind::RightParen, "')'")?;

        Ok(SubQuery {
            open,
            query: Box::new(query),
            close,
        })
    }

    fn parse_not_query(&mut self) -> Result<NotQuery, SyntaxError> {
        let not = self.expect(TokenKind::Not, "NOT")?;
        self.enter()?;
        let atomic_query = self.parse_atomic_query()?;
        self.leave();

        Ok(NotQuery {
            not,
            atomic_query: Box::new(atomic_query),
        })
    }

    /// Alternatives in order: equality, comparison, global value.
    /// A field followed by a comparator decides the first two.
    fn parse_term(&mut self) -> Result<Term, SyntaxError> {
        let Some(first) = self.current().map(|t| t.kind) else {
            return Err(self.unexpected("a search term"));
        };
        let next = self.peek(1).map(|t| t.kind);

        if first.is_field() {
            match next {
                Some(TokenKind::Equal) => return Ok(Term::EqualField(self.parse_equal_field_term()?)),
                Some(kind) if kind.is_comparator() => {
                    return Ok(Term::OtherField(self.parse_other_field_term()?));
                }
                _ => {}
            }
        }

        if first.is_value() {
            return Ok(Term::Global(self.parse_global_term()?));
        }

        if first.is_field() {
            // A dotted path on its own: only valid in front of a comparator.
            self.advance();
            return Err(self.unexpected("a comparator after the field"));
        }

        Err(self.unexpected("a search term"))
    }

    fn parse_equal_field_term(&mut self) -> Result<EqualFieldTerm, SyntaxError> {
        let field = self.parse_field()?;
        let equal = self.expect(TokenKind::Equal, "':'")?;

        let mut values = vec![self.parse_value()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            values.push(self.parse_value()?);
        }

        Ok(EqualFieldTerm {
            field,
            equal,
            values,
        })
    }

    fn parse_other_field_term(&mut self) -> Result<OtherFieldTerm, SyntaxError> {
        let field = self.parse_field()?;

        let comparator = self
            .current()
            .and_then(|t| Comparator::from_token_kind(t.kind))
            .ok_or_else(|| self.unexpected("one of ':<', ':<=', ':>', ':>='"))?;
        let comparator_token = self.advance();

        let value = self.parse_value()?;

        Ok(OtherFieldTerm {
            field,
            comparator,
            comparator_token,
            value,
        })
    }

    fn parse_global_term(&mut self) -> Result<GlobalTerm, SyntaxError> {
        Ok(GlobalTerm {
            value: self.parse_value()?,
        })
    }

    fn parse_field(&mut self) -> Result<FieldNode, SyntaxError> {
        if self.current().is_some_and(|t| t.kind.is_field()) {
            Ok(FieldNode {
                token: self.advance(),
            })
        } else {
            Err(self.unexpected("a field name"))
        }
    }

    fn parse_value(&mut self) -> Result<ValueNode, SyntaxError> {
        if self.current().is_some_and(|t| t.kind.is_value()) {
            Ok(ValueNode {
                token: self.advance(),
            })
        } else {
            Err(self.unexpected("a value"))
        }
    }
}
