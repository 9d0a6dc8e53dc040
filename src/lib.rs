pub mod cli;
pub mod compile;
pub mod cst;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod options;
pub mod output;
pub mod parser;
pub mod validate;
pub mod value;
pub mod visitor;

pub use compile::{parse, parse_json, parse_optional};
pub use cst::{Query, Token, TokenKind};
pub use error::{NoSearchableFieldsError, ParseError, SearchError};
pub use filter::{Condition, FieldEntry, FieldMap, Filter};
pub use lexer::{LexError, Lexer};
pub use options::{FieldOptions, FieldType, OptionsError, ParseOptions};
pub use output::{to_json, to_json_pretty, to_json_string};
pub use parser::{Parser, SyntaxError};
pub use validate::has_valid_values;
pub use value::Scalar;
pub use visitor::FilterVisitor;
