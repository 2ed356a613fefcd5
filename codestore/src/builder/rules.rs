//! Line classification rules.

use super::IndentMode;

/// Classifies trimmed lines into indentation modes.
///
/// Implementations may keep lexical state between lines; the engine feeds
/// every physical line through [`classify`](Self::classify) exactly once and
/// in order.
pub trait IndentationRules {
    /// Classify one line. `line` has its surrounding whitespace removed.
    fn classify(&mut self, line: &str) -> IndentMode;

    /// Terminator of a literal span that is still open, if any.
    fn pending_terminator(&self) -> Option<&str> {
        None
    }

    /// Prefix of a single-line comment, used for separator lines.
    fn comment_prefix(&self) -> &str {
        "//"
    }
}

/// Brace-only rules for curly-brace languages.
///
/// A trailing `{` indents the following lines and a leading `}` dedents the
/// line itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceRules;

impl IndentationRules for BraceRules {
    fn classify(&mut self, line: &str) -> IndentMode {
        let mut mode = IndentMode::empty();
        if line.ends_with('{') {
            mode |= IndentMode::INCREMENT_AFTER;
        }
        if line.starts_with('}') {
            mode |= IndentMode::DECREMENT_BEFORE;
        }
        mode
    }
}
