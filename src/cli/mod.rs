//! CLI support for searchbox
//!
//! Provides programmatic access to the searchbox CLI for embedding in other
//! tools, such as admin consoles that want to preview a query's filter.

mod check;
mod config;
mod docs;
mod tokens;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use config::load_options;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use tokens::{TokenListing, list_tokens};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{OptionsError, SearchError, SyntaxError};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] SearchError),
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("Invalid options: {0}")]
    Options(#[from] OptionsError),
    #[error("Could not read options file {path}: {source}")]
    OptionsFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
    #[error("Unknown category: '{0}'\nRun 'searchbox docs' to see available categories.")]
    UnknownCategory(String),
}
