use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::trace;

use crate::cst::{Token, TokenKind};

/// Token patterns in the order they are tried, each with the kinds that take
/// over when they match a strictly longer lexeme at the same offset.
const PATTERNS: &[(TokenKind, &str, &[TokenKind])] = &[
    (TokenKind::Gte, r":>=", &[]),
    (TokenKind::Gt, r":>", &[]),
    (TokenKind::Lte, r":<=", &[]),
    (TokenKind::Lt, r":<", &[]),
    (TokenKind::Equal, r":", &[]),
    (TokenKind::And, r"and|AND", KEYWORD_ALTERNATIVES),
    (TokenKind::Or, r"or|OR", KEYWORD_ALTERNATIVES),
    (TokenKind::Not, r"-|not|NOT", KEYWORD_ALTERNATIVES),
    (TokenKind::LeftParen, r"\(", &[]),
    (TokenKind::RightParen, r"\)", &[]),
    (TokenKind::Comma, r",", &[]),
    (
        TokenKind::NestedField,
        r"[a-zA-Z][a-zA-Z0-9_]*(\.[a-zA-Z][a-zA-Z0-9_]*)+",
        &[TokenKind::UnquotedLiteral],
    ),
    (TokenKind::Null, r"null", KEYWORD_ALTERNATIVES),
    (TokenKind::True, r"true", KEYWORD_ALTERNATIVES),
    (TokenKind::False, r"false", KEYWORD_ALTERNATIVES),
    (TokenKind::Number, r"[+-]?([0-9]*\.)?[0-9]+", &[TokenKind::Date]),
    (TokenKind::Date, DATE_PATTERN, &[]),
    (TokenKind::QuotedString, r#"".*?"|'.*?'"#, &[]),
    (
        TokenKind::Identifier,
        r"[a-zA-Z][a-zA-Z0-9_]*",
        &[TokenKind::UnquotedLiteral],
    ),
    (TokenKind::UnquotedLiteral, r"[^\s:(),]+", &[]),
];

const KEYWORD_ALTERNATIVES: &[TokenKind] = &[TokenKind::Identifier];

/// ISO-8601 dates: calendar (`YYYY-MM[-DD]`, `YYYYMMDD`), ordinal
/// (`YYYY[-]DDD`) and week (`YYYY[-]Www[[-]D]`), optionally followed by a
/// basic or extended time and a `Z` or `±HH[[:]MM]` offset.
///
/// Alternatives are tried leftmost-first, so the longer forms come first.
const DATE_PATTERN: &str = concat!(
    r"[+-]?[0-9]{4}(",
    r"(0[1-9]|1[0-2])(0[1-9]|[12][0-9]|3[01])",
    r"|-?(00[1-9]|0[1-9][0-9]|[12][0-9]{2}|3([0-5][0-9]|6[0-6]))",
    r"|-(0[1-9]|1[0-2])(-(0[1-9]|[12][0-9]|3[01]))?",
    r"|-?W(0[1-9]|[1-4][0-9]|5[0-3])(-?[1-7])?",
    r")?",
    r"(T([01][0-9]|2[0-3])(:?[0-5][0-9](:?[0-5][0-9]([.,][0-9]+)?)?)?",
    r"([zZ]|[+-]([01][0-9]|2[0-3])(:?[0-5][0-9])?)?)?",
);

struct CompiledPattern {
    kind: TokenKind,
    regex: Regex,
    longer_alternatives: &'static [TokenKind],
}

impl CompiledPattern {
    /// Length in bytes of the match anchored at the start of `rest`.
    fn match_len(&self, rest: &str) -> Option<usize> {
        self.regex
            .find(rest)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

static COMPILED: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| {
    PATTERNS
        .iter()
        .map(|&(kind, pattern, longer_alternatives)| CompiledPattern {
            kind,
            // The table is static; a bad pattern is a programming error.
            regex: Regex::new(&format!("^(?:{pattern})")).expect("invalid token pattern"),
            longer_alternatives,
        })
        .collect()
});

fn compiled(kind: TokenKind) -> Option<&'static CompiledPattern> {
    COMPILED.iter().find(|p| p.kind == kind)
}

/// Input the pattern table could not classify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unexpected character '{character}' at line {line}, column {column}, skipped {skipped} character(s)"
)]
pub struct LexError {
    pub character: char,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub skipped: usize,
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Moves past `len` bytes, keeping line and column in step.
    fn advance(&mut self, len: usize) {
        for ch in self.input[self.position..self.position + len].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += len;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance(ch.len_utf8());
            } else {
                break;
            }
        }
    }

    /// Maximal munch with keyword fallback: the first pattern that matches
    /// wins provisionally, then the longest of its alternatives replaces it
    /// when that one matches a strictly longer lexeme. Only one level of
    /// replacement applies: `android` falls back from `And` to `Identifier`,
    /// but does not go on to `UnquotedLiteral` in `android-app`.
    fn match_at(&self) -> Option<(TokenKind, usize)> {
        let rest = self.rest();
        let (pattern, len) = COMPILED
            .iter()
            .find_map(|p| p.match_len(rest).map(|len| (p, len)))?;

        let longer = pattern
            .longer_alternatives
            .iter()
            .filter_map(|k| compiled(*k))
            .filter_map(|alternative| alternative.match_len(rest).map(|l| (alternative.kind, l)))
            .fold(None, |best: Option<(TokenKind, usize)>, (kind, alt_len)| {
                let best_len = best.map_or(len, |(_, l)| l);
                if alt_len > best_len { Some((kind, alt_len)) } else { best }
            });

        Some(longer.unwrap_or((pattern.kind, len)))
    }

    /// Returns the next non-whitespace token, or an `Eof` token at the end.
    ///
    /// On error the lexer has already skipped past the unclassifiable input,
    /// so calling `next_token` again resumes lexing.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let (offset, line, column) = (self.position, self.line, self.column);
        let Some(character) = self.current_char() else {
            return Ok(Token::new(TokenKind::Eof, "", offset, line, column));
        };

        match self.match_at() {
            Some((kind, len)) => {
                let lexeme = &self.input[offset..offset + len];
                self.advance(len);
                trace!(kind = %kind, lexeme, offset, "token");
                Ok(Token::new(kind, lexeme, offset, line, column))
            }
            None => {
                let mut skipped = 0;
                while let Some(ch) = self.current_char() {
                    if ch.is_whitespace() || (skipped > 0 && self.match_at().is_some()) {
                        break;
                    }
                    self.advance(ch.len_utf8());
                    skipped += 1;
                }
                Err(LexError {
                    character,
                    offset,
                    line,
                    column,
                    skipped,
                })
            }
        }
    }

    /// Lexes the whole input. Errors are collected rather than returned early,
    /// and the `Eof` token is not included.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        loop {
            match self.next_token() {
                Ok(token) if token.is_eof() => break,
                Ok(token) => tokens.push(token),
                Err(error) => errors.push(error),
            }
        }

        (tokens, errors)
    }
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<TokenKind> {
    let (tokens, errors) = Lexer::new(input).tokenize();
    assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);
    tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_comparators_longest_first() {
    assert_eq!(
        kinds("a:>=1 b:>2 c:<=3 d:<4 e:5"),
        vec![
            TokenKind::Identifier,
            TokenKind::Gte,
            TokenKind::Number,
            TokenKind::Identifier,
            TokenKind::Gt,
            TokenKind::Number,
            TokenKind::Identifier,
            TokenKind::Lte,
            TokenKind::Number,
            TokenKind::Identifier,
            TokenKind::Lt,
            TokenKind::Number,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Number,
        ]
    );
}

#[test]
fn test_keyword_prefix_falls_back() {
    assert_eq!(kinds("android"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("nullable"), vec![TokenKind::Identifier]);
    assert_eq!(
        kinds("android-app"),
        vec![TokenKind::Identifier, TokenKind::Not, TokenKind::Identifier]
    );
    assert_eq!(
        kinds("order.id"),
        vec![TokenKind::Identifier, TokenKind::UnquotedLiteral]
    );
}

#[test]
fn test_number_promoted_to_date() {
    assert_eq!(kinds("2022-01-01"), vec![TokenKind::Date]);
    assert_eq!(kinds("2022"), vec![TokenKind::Number]);
    assert_eq!(kinds("2022-01"), vec![TokenKind::Date]);
    assert_eq!(kinds("123abc"), vec![TokenKind::Number, TokenKind::Identifier]);
}

#[test]
fn test_positions() {
    let (tokens, _) = Lexer::new("a:1\n  b:2").tokenize();
    let b = &tokens[3];
    assert_eq!(b.lexeme, "b");
    assert_eq!(b.offset, 6);
    assert_eq!((b.line, b.column), (2, 3));
}
