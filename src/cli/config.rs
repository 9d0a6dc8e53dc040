//! Field configuration for the CLI

use std::fs;
use std::path::Path;

use tracing::debug;

use super::CliError;
use crate::ParseOptions;

/// Loads field options from a JSON file or an inline JSON string.
///
/// Inline JSON wins when both are given; neither means no field
/// configuration at all.
pub fn load_options(path: Option<&Path>, inline: Option<&str>) -> Result<ParseOptions, CliError> {
    if let Some(json) = inline {
        debug!("using inline options");
        return Ok(ParseOptions::from_json(json)?);
    }

    let Some(path) = path else {
        return Ok(ParseOptions::default());
    };

    debug!(path = %path.display(), "loading options file");
    let raw = fs::read_to_string(path).map_err(|source| CliError::OptionsFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ParseOptions::from_json(&raw)?)
}
