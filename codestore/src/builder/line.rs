use codestore_core::Indent;

/// One logical line of the document and the level it was emitted at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    text: String,
    level: usize,
    verbatim: bool,
}

impl RenderedLine {
    /// A line rendered with `level` indent units in front of it.
    pub fn new(text: impl Into<String>, level: usize) -> Self {
        Self {
            text: text.into(),
            level,
            verbatim: false,
        }
    }

    /// A line copied byte for byte, e.g. inside a heredoc.
    pub fn verbatim(text: impl Into<String>, level: usize) -> Self {
        Self {
            text: text.into(),
            level,
            verbatim: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Indentation level in effect when the line was appended.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_verbatim(&self) -> bool {
        self.verbatim
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Write the line, without a line terminator, to `buffer`.
    ///
    /// Empty lines get no indentation so the output has no trailing
    /// whitespace.
    pub fn render_into(&self, indent: Indent, buffer: &mut String) {
        if !self.verbatim && !self.text.is_empty() {
            indent.write_to(buffer, self.level);
        }
        buffer.push_str(&self.text);
    }

    pub fn render(&self, indent: Indent) -> String {
        let mut buffer = String::new();
        self.render_into(indent, &mut buffer);
        buffer
    }
}
