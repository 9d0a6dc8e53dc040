use std::fmt;

/// Kind of a lexical token.
///
/// Some kinds also belong to a *category* that the grammar accepts as a whole:
/// see [`TokenKind::is_field`], [`TokenKind::is_value`] and
/// [`TokenKind::is_comparator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Connectives
    /// Logical AND, explicit form
    ///
    /// # Examples
    /// ```text
    /// status:active AND count:>5
    /// status:active and count:>5
    /// ```
    And,

    /// Logical OR
    ///
    /// # Examples
    /// ```text
    /// status:active OR status:pending
    /// ```
    Or,

    /// Negation of the following atomic query
    ///
    /// # Examples
    /// ```text
    /// -status:archived
    /// NOT status:archived
    /// not (a:1 OR b:2)
    /// ```
    Not,

    // Delimiters
    /// Left parenthesis for grouping
    LeftParen,

    /// Right parenthesis
    RightParen,

    /// Separates the values of a multi-value equality (`id:1,2,3`)
    Comma,

    // Comparators
    /// Equality (`:`)
    Equal,

    /// Less than (`:<`)
    Lt,

    /// Less than or equal (`:<=`)
    Lte,

    /// Greater than (`:>`)
    Gt,

    /// Greater than or equal (`:>=`)
    Gte,

    // Fields
    /// Dotted field path
    ///
    /// # Examples
    /// ```text
    /// user.name
    /// post.author.id
    /// ```
    NestedField,

    // Values
    /// `null` literal
    Null,

    /// `true` literal
    True,

    /// `false` literal
    False,

    /// Integer or decimal number with an optional sign
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1.5
    /// .5
    /// ```
    Number,

    /// ISO-8601 date or date-time
    ///
    /// # Examples
    /// ```text
    /// 2022-01-01
    /// 2022-01-01T12:34:56
    /// 2022-01-01T12:34:56.789+08:00
    /// ```
    Date,

    /// String enclosed in double or single quotes, no escape processing
    ///
    /// # Examples
    /// ```text
    /// "Joe Bloggs"
    /// 'hello world'
    /// ```
    QuotedString,

    /// Plain word: usable both as a field name and as a value
    ///
    /// Must start with an ASCII letter, followed by letters, digits, or underscores.
    Identifier,

    /// Any other run of characters that is not whitespace, `:`, `(`, `)` or `,`
    ///
    /// # Examples
    /// ```text
    /// getting-started
    /// abc*
    /// 1.2.3
    /// ```
    UnquotedLiteral,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Kinds accepted where the grammar expects a field name.
    pub fn is_field(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::NestedField)
    }

    /// Kinds accepted where the grammar expects a value.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Number
                | TokenKind::Date
                | TokenKind::QuotedString
                | TokenKind::Identifier
                | TokenKind::UnquotedLiteral
        )
    }

    /// Kinds that sit between a field and its value.
    pub fn is_comparator(self) -> bool {
        matches!(
            self,
            TokenKind::Equal | TokenKind::Lt | TokenKind::Lte | TokenKind::Gt | TokenKind::Gte
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::Comma => "Comma",
            TokenKind::Equal => "Equal",
            TokenKind::Lt => "LessThan",
            TokenKind::Lte => "LessThanOrEqual",
            TokenKind::Gt => "GreaterThan",
            TokenKind::Gte => "GreaterThanOrEqual",
            TokenKind::NestedField => "NestedField",
            TokenKind::Null => "Null",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Number => "Number",
            TokenKind::Date => "Date",
            TokenKind::QuotedString => "QuotedString",
            TokenKind::Identifier => "Identifier",
            TokenKind::UnquotedLiteral => "UnquotedLiteral",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its source text and location.
///
/// `offset` is a byte offset into the lexed input; `line` and `column` are
/// 1-based and count characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        offset: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            offset,
            line,
            column,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            f.write_str("end of input")
        } else {
            write!(f, "'{}'", self.lexeme)
        }
    }
}
