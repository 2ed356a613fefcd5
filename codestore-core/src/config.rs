//! Code store configuration parsed from TOML.

use std::str::FromStr;

use miette::SourceSpan;
use serde::{Deserialize, Serialize};

use crate::{Error, Indent, Result};

/// Default filename used in error reports.
pub const DEFAULT_FILENAME: &str = "codestore.toml";

/// Settings for a code store.
///
/// Every key is optional:
///
/// ```toml
/// indentation = 2
/// tabs = false
/// width = 120
/// max_level = 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Spaces per indentation level. Ignored when `tabs` is set.
    pub indentation: u8,
    /// Indent with tab characters instead of spaces.
    pub tabs: bool,
    /// Maximum width of the generated code, used by separator lines.
    pub width: usize,
    /// Upper bound for the indentation level.
    pub max_level: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            indentation: 2,
            tabs: false,
            width: 120,
            max_level: 64,
        }
    }
}

impl StoreConfig {
    /// Create a config with the given indentation width and line width.
    pub fn new(indentation: u8, width: usize) -> Self {
        Self {
            indentation,
            width,
            ..Self::default()
        }
    }

    /// The indentation unit described by this config.
    pub fn indent(&self) -> Indent {
        if self.tabs {
            Indent::Tab
        } else {
            Indent::Spaces(self.indentation)
        }
    }

    /// Parse a config from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: StoreConfig =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        config.validate(content, filename)?;
        Ok(config)
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        if !self.tabs && !(1..=16).contains(&self.indentation) {
            return Err(invalid_key(
                "indentation",
                "indentation must be between 1 and 16 spaces",
                src,
                filename,
            ));
        }
        if self.width < 8 {
            return Err(invalid_key(
                "width",
                "width must be at least 8 columns",
                src,
                filename,
            ));
        }
        if self.max_level == 0 {
            return Err(invalid_key(
                "max_level",
                "max_level must be at least 1",
                src,
                filename,
            ));
        }
        Ok(())
    }
}

impl FromStr for StoreConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, DEFAULT_FILENAME)
    }
}

fn invalid_key(key: &str, message: &str, src: &str, filename: &str) -> Box<Error> {
    match find_key_span(src, key) {
        Some(span) => Error::validation_at(message, src, filename, span),
        None => Error::validation(message, src, filename),
    }
}

/// Locate `key` at the start of a line, as written in `key = value`.
fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='))
        {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, key.len())));
        }
        offset += line.len();
    }
    None
}
