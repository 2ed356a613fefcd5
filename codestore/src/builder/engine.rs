//! Indentation tracking for appended lines.

use tracing::{trace, warn};

use super::{IndentMode, IndentationRules, RenderedLine};

/// Default upper bound for the indentation level.
pub const DEFAULT_MAX_LEVEL: usize = 64;

/// Applies classified indentation modes to a running level.
///
/// Decrements take effect before the line is rendered and increments after,
/// so `}` lines up with the line that opened the block.
#[derive(Debug, Clone)]
pub struct IndentationEngine<R> {
    rules: R,
    level: usize,
    max_level: usize,
}

impl<R: IndentationRules> IndentationEngine<R> {
    pub fn new(rules: R) -> Self {
        Self {
            rules,
            level: 0,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Set the upper bound for the indentation level.
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Classify one physical line and render it at the right level.
    ///
    /// An unmatched closing line clamps the level at zero instead of failing.
    pub fn on_append(&mut self, raw: &str) -> RenderedLine {
        let line = raw.trim();
        let mode = self.rules.classify(line);
        trace!(line, ?mode, level = self.level, "classified line");

        if mode.contains(IndentMode::INSIDE_LITERAL) {
            return RenderedLine::verbatim(raw, self.level);
        }

        self.decrease(mode.decrement_before(), line);
        let rendered = RenderedLine::new(line, self.level);

        if mode.contains(IndentMode::INCREMENT_AFTER) {
            self.increase(line);
        }
        if mode.contains(IndentMode::DECREMENT_AFTER) {
            self.decrease(1, line);
        }

        rendered
    }

    /// Current indentation level.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Terminator of a literal span that is still open, if any.
    pub fn pending_terminator(&self) -> Option<&str> {
        self.rules.pending_terminator()
    }

    fn increase(&mut self, line: &str) {
        if self.level >= self.max_level {
            warn!(line, max_level = self.max_level, "indentation level clamped");
            return;
        }
        self.level += 1;
    }

    fn decrease(&mut self, by: usize, line: &str) {
        if by > self.level {
            warn!(line, level = self.level, "unmatched closing line, indentation clamped at zero");
        }
        self.level = self.level.saturating_sub(by);
    }
}
