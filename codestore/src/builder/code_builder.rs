//! Code builder that indents appended lines automatically.

use codestore_core::{Error, Indent, Result, StoreConfig};
use tracing::debug;

use super::{BraceRules, IndentationEngine, IndentationRules, PhpRules, RenderedLine};

/// Line buffer that derives indentation from the lines themselves.
///
/// Lines are appended without leading whitespace; the builder decides the
/// level of each line from its content using the [`IndentationRules`] `R`.
///
/// # Example
///
/// ```
/// use codestore::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::php(2, 120);
/// builder
///     .append("function hello()")
///     .append("{")
///     .append("echo 'Hello, world!';")
///     .append("}");
///
/// let code = builder.code().unwrap();
/// assert_eq!(code, "function hello()\n{\n  echo 'Hello, world!';\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder<R = PhpRules> {
    engine: IndentationEngine<R>,
    indent: Indent,
    width: usize,
    lines: Vec<RenderedLine>,
    /// Line number where the currently open literal span started.
    literal_start: Option<usize>,
}

impl CodeBuilder<PhpRules> {
    /// Create a builder for PHP with `indentation` spaces per level and
    /// `width` columns per line.
    pub fn php(indentation: u8, width: usize) -> Self {
        Self::new(PhpRules::new(), Indent::Spaces(indentation), width)
    }
}

impl CodeBuilder<BraceRules> {
    /// Create a builder that only tracks curly braces.
    pub fn braces(indent: Indent, width: usize) -> Self {
        Self::new(BraceRules, indent, width)
    }
}

impl<R: IndentationRules> CodeBuilder<R> {
    pub fn new(rules: R, indent: Indent, width: usize) -> Self {
        Self {
            engine: IndentationEngine::new(rules),
            indent,
            width,
            lines: Vec::new(),
            literal_start: None,
        }
    }

    /// Create a builder from a parsed [`StoreConfig`].
    pub fn from_config(rules: R, config: &StoreConfig) -> Self {
        let mut builder = Self::new(rules, config.indent(), config.width);
        builder.engine = builder.engine.with_max_level(config.max_level);
        builder
    }

    /// Append one or more lines of code.
    ///
    /// Text containing newlines is split and every line is indented on its
    /// own. An empty string appends a blank line.
    pub fn append(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            self.push_line("");
            return self;
        }
        for line in text.lines() {
            self.push_line(line);
        }
        self
    }

    /// Append each item as with [`append`](Self::append).
    pub fn append_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.append(line.as_ref());
        }
        self
    }

    /// Append a comment line of dashes filling the line up to the width.
    ///
    /// Nothing is appended while a literal span is open.
    pub fn append_separator(&mut self) -> &mut Self {
        if let Some(terminator) = self.engine.pending_terminator() {
            debug!(terminator, "separator skipped inside literal span");
            return self;
        }
        let level = self.engine.level();
        let prefix = self.engine.rules().comment_prefix();
        let used = prefix.len() + level * self.indent.columns();
        let text = format!("{prefix}{}", "-".repeat(self.width.saturating_sub(used)));
        self.lines.push(RenderedLine::new(text, level));
        self
    }

    /// Append text to the last line without reclassifying it.
    pub fn append_to_last_line(&mut self, text: &str) -> &mut Self {
        match self.lines.last_mut() {
            Some(last) => last.push_str(text),
            None => {
                self.append(text);
            }
        }
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.engine.level()
    }

    /// Lines appended so far.
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn indent(&self) -> Indent {
        self.indent
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Assemble the generated code, one `\n`-terminated line per entry.
    ///
    /// Fails if a literal span is still open, since the output would be
    /// truncated.
    #[tracing::instrument(level = "debug", skip_all, fields(lines = self.lines.len()))]
    pub fn code(&self) -> Result<String> {
        if let Some(terminator) = self.engine.pending_terminator() {
            let line = self.literal_start.unwrap_or(self.lines.len());
            return Err(Error::unterminated_literal(terminator, line));
        }

        let mut buffer = String::new();
        for line in &self.lines {
            line.render_into(self.indent, &mut buffer);
            buffer.push('\n');
        }
        Ok(buffer)
    }

    fn push_line(&mut self, line: &str) {
        let rendered = self.engine.on_append(line);
        self.lines.push(rendered);

        match (self.literal_start, self.engine.pending_terminator()) {
            (None, Some(_)) => self.literal_start = Some(self.lines.len()),
            (Some(_), None) => self.literal_start = None,
            _ => {}
        }
    }
}

impl Default for CodeBuilder<PhpRules> {
    fn default() -> Self {
        Self::from_config(PhpRules::new(), &StoreConfig::default())
    }
}
