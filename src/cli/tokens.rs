//! Token listing for debugging how a query is lexed

use crate::{LexError, Lexer, Token};

/// Tokens of a query along with anything the lexer had to skip.
#[derive(Debug)]
pub struct TokenListing {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl TokenListing {
    /// One line per token: kind, byte offset and lexeme, aligned in columns.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            out.push_str(&format!(
                "{:<16} {:>4}  {}\n",
                token.kind.name(),
                token.offset,
                token.lexeme
            ));
        }
        for error in &self.errors {
            out.push_str(&format!("error: {error}\n"));
        }
        out
    }
}

pub fn list_tokens(query: &str) -> TokenListing {
    let (tokens, errors) = Lexer::new(query).tokenize();
    TokenListing { tokens, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_per_token() {
        let listing = list_tokens("count:>=5");
        assert!(listing.errors.is_empty());
        let rendered = listing.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(":>="));
        assert!(lines[2].ends_with(" 5"));
    }
}
