//! Indentation rules for generated PHP code.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::{IndentMode, IndentationRules, NestingStack};

/// Matches an assignment that opens a heredoc or nowdoc, capturing its label.
static LITERAL_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"=\s*<<<\s*["']?([A-Za-z_][A-Za-z0-9_]*)["']?$"#).expect("valid regex")
});

/// Lexical mode of the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum LexicalMode {
    #[default]
    Normal,
    /// Inside a heredoc; the span ends at the line `<terminator>;`.
    InLiteral { terminator: String },
}

/// Rules for PHP: braces, `switch` statements and heredoc literals.
///
/// `case` and `default` labels indent their clause; `break;`, `continue;`,
/// `return ...;` and `throw ...;` end it. A `default` clause is usually not
/// terminated, so the closing brace of its `switch` drops two levels at once.
/// To tell that brace apart from the brace of a nested block, every open
/// `switch` and `default` keeps a count of the braces opened since it started:
///
/// - a trailing `{` increments the innermost counter of both stacks,
/// - a leading `}` seen while the innermost `default` counter is zero closes
///   the block holding that `default`: the entry is popped, the line
///   double-decrements and the brace is debited from the enclosing `default`,
/// - any other leading `}` decrements the counters, and double-decrements
///   when it closes a `switch` whose last clause was never ended,
/// - a clause only ends by a statement written directly in the `switch`
///   block, and ending it ends an open `default` clause too.
///
/// A label met while the previous clause is still open (fallthrough, or a
/// clause ended in a way that is not recognised) lines up with that clause's
/// label instead of nesting deeper.
///
/// Lines between `$x = <<<EOT` and `EOT;` are copied verbatim, the opening and
/// closing lines included.
///
/// Classification is textual: a `{` at the end of a string literal, or a
/// `case` label sharing its line with code, is not understood.
#[derive(Debug, Clone, Default)]
pub struct PhpRules {
    mode: LexicalMode,
    switch_depth: NestingStack<u32>,
    default_depth: NestingStack<u32>,
    /// Whether the current clause of each open `switch` is still open.
    clause_open: NestingStack<bool>,
}

impl PhpRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a heredoc span is open.
    pub fn in_literal(&self) -> bool {
        matches!(self.mode, LexicalMode::InLiteral { .. })
    }

    /// Brace counters of the open `switch` statements, outermost first.
    pub fn switch_depth(&self) -> &NestingStack<u32> {
        &self.switch_depth
    }

    /// Brace counters of the open `default` clauses, outermost first.
    pub fn default_depth(&self) -> &NestingStack<u32> {
        &self.default_depth
    }

    fn classify_keywords(&mut self, line: &str) -> IndentMode {
        if is_switch(line) {
            self.switch_depth.open();
            self.clause_open.push(false);
            return IndentMode::empty();
        }
        if self.switch_depth.is_empty() {
            return IndentMode::empty();
        }

        if is_case_label(line) {
            self.open_clause()
        } else if is_default_label(line) {
            self.default_depth.open();
            self.open_clause()
        } else if is_clause_end(line) {
            self.close_clause()
        } else {
            IndentMode::empty()
        }
    }

    fn open_clause(&mut self) -> IndentMode {
        match self.clause_open.top_mut() {
            // Line up with the label of the clause still open.
            Some(open) if *open => IndentMode::DECREMENT_BEFORE | IndentMode::INCREMENT_AFTER,
            Some(open) => {
                *open = true;
                IndentMode::INCREMENT_AFTER
            }
            None => IndentMode::INCREMENT_AFTER,
        }
    }

    fn close_clause(&mut self) -> IndentMode {
        // Only a statement directly inside the switch block ends a clause.
        if self.switch_depth.top() != Some(&1) {
            return IndentMode::empty();
        }
        match self.clause_open.top_mut() {
            Some(open) if *open => {
                *open = false;
                if self.default_depth.top() == Some(&0) {
                    self.default_depth.pop();
                }
                IndentMode::DECREMENT_AFTER
            }
            // Unreachable code after the clause already ended.
            _ => IndentMode::empty(),
        }
    }

    fn classify_braces(&mut self, line: &str) -> IndentMode {
        let mut mode = IndentMode::empty();
        if line.starts_with('}') {
            mode |= self.close_brace();
        }
        if line.ends_with('{') {
            self.switch_depth.increment_top();
            self.default_depth.increment_top();
            mode |= IndentMode::INCREMENT_AFTER;
        }
        mode
    }

    fn close_brace(&mut self) -> IndentMode {
        let closes_default = self.default_depth.top() == Some(&0);
        if closes_default {
            self.default_depth.pop();
        }
        // With a default popped, the brace was opened inside the enclosing one.
        self.default_depth.decrement_top();

        let switch_closed = match self.switch_depth.top_mut() {
            Some(top) if *top > 0 => {
                *top -= 1;
                *top == 0
            }
            _ => false,
        };
        let mut clause_left_open = false;
        if switch_closed {
            self.switch_depth.pop();
            clause_left_open = self.clause_open.pop().unwrap_or(false);
        }

        if closes_default || clause_left_open {
            IndentMode::DECREMENT_BEFORE_DOUBLE
        } else {
            IndentMode::DECREMENT_BEFORE
        }
    }
}

impl IndentationRules for PhpRules {
    fn classify(&mut self, line: &str) -> IndentMode {
        if let LexicalMode::InLiteral { terminator } = &self.mode {
            if line.strip_suffix(';') == Some(terminator.as_str()) {
                trace!(terminator = %terminator, "literal span closed");
                self.mode = LexicalMode::Normal;
            }
            return IndentMode::INSIDE_LITERAL;
        }

        if let Some(captures) = LITERAL_OPENER.captures(line) {
            let terminator = captures[1].to_string();
            trace!(terminator = %terminator, "literal span opened");
            self.mode = LexicalMode::InLiteral { terminator };
            return IndentMode::INSIDE_LITERAL;
        }

        let mut mode = self.classify_keywords(line);
        mode |= self.classify_braces(line);
        mode
    }

    fn pending_terminator(&self) -> Option<&str> {
        match &self.mode {
            LexicalMode::InLiteral { terminator } => Some(terminator),
            LexicalMode::Normal => None,
        }
    }
}

fn is_switch(line: &str) -> bool {
    line.strip_prefix("switch")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_whitespace() || c == '('))
}

fn is_case_label(line: &str) -> bool {
    line.ends_with(':')
        && line.strip_prefix("case").is_some_and(|rest| {
            rest.starts_with(|c: char| c.is_whitespace() || matches!(c, '(' | '\'' | '"'))
        })
}

fn is_default_label(line: &str) -> bool {
    line.strip_prefix("default")
        .is_some_and(|rest| rest.trim_start() == ":")
}

/// `break`, `continue` and their numbered forms, `return` and `throw`.
fn is_clause_end(line: &str) -> bool {
    is_jump(line, "break") || is_jump(line, "continue") || is_exit(line)
}

fn is_jump(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .and_then(|rest| rest.strip_suffix(';'))
        .is_some_and(|levels| {
            (levels.is_empty() || levels.starts_with(char::is_whitespace))
                && levels.trim().chars().all(|c| c.is_ascii_digit())
        })
}

fn is_exit(line: &str) -> bool {
    if !line.ends_with(';') {
        return false;
    }
    ["return", "throw"].iter().any(|keyword| {
        line.strip_prefix(*keyword).is_some_and(|rest| {
            rest.starts_with(|c: char| c.is_whitespace() || matches!(c, ';' | '(' | '$'))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(rules: &mut PhpRules, lines: &[&str]) -> Vec<IndentMode> {
        lines.iter().map(|line| rules.classify(line)).collect()
    }

    #[test]
    fn test_keyword_predicates() {
        assert!(is_switch("switch ($i)"));
        assert!(is_switch("switch($i) {"));
        assert!(!is_switch("switchMode();"));

        assert!(is_case_label("case 1:"));
        assert!(is_case_label("case 'one':"));
        assert!(is_case_label("case(1):"));
        assert!(!is_case_label("case Hearts;"));
        assert!(!is_case_label("cases:"));

        assert!(is_default_label("default:"));
        assert!(is_default_label("default :"));
        assert!(!is_default_label("default => 0,"));

        assert!(is_clause_end("break;"));
        assert!(is_clause_end("break 2;"));
        assert!(is_clause_end("continue;"));
        assert!(is_clause_end("continue 2;"));
        assert!(is_clause_end("return;"));
        assert!(is_clause_end("return $x + 1;"));
        assert!(is_clause_end("return($x);"));
        assert!(is_clause_end("throw new \\RuntimeException('x');"));
        assert!(!is_clause_end("breakpoint();"));
        assert!(!is_clause_end("continueWith();"));
        assert!(!is_clause_end("returnValue();"));
        assert!(!is_clause_end("return ["));
        assert!(!is_clause_end("if ($x) return 1;"));
    }

    #[test]
    fn test_case_and_break() {
        let mut rules = PhpRules::new();
        let modes = classify_all(
            &mut rules,
            &["switch ($i)", "{", "case 1:", "echo 1;", "break;", "}"],
        );
        assert_eq!(
            modes,
            vec![
                IndentMode::empty(),
                IndentMode::INCREMENT_AFTER,
                IndentMode::INCREMENT_AFTER,
                IndentMode::empty(),
                IndentMode::DECREMENT_AFTER,
                IndentMode::DECREMENT_BEFORE,
            ]
        );
        assert!(rules.switch_depth().is_empty());
    }

    #[test]
    fn test_labels_outside_switch_are_neutral() {
        let mut rules = PhpRules::new();
        assert_eq!(rules.classify("case 1:"), IndentMode::empty());
        assert_eq!(rules.classify("default:"), IndentMode::empty());
        assert_eq!(rules.classify("break;"), IndentMode::empty());
    }

    #[test]
    fn test_default_closed_by_switch_brace() {
        let mut rules = PhpRules::new();
        classify_all(&mut rules, &["switch ($i)", "{", "default:"]);
        assert_eq!(rules.default_depth().as_slice(), &[0]);

        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE_DOUBLE);
        assert!(rules.default_depth().is_empty());
        assert!(rules.switch_depth().is_empty());
    }

    #[test]
    fn test_nested_block_inside_default() {
        let mut rules = PhpRules::new();
        classify_all(&mut rules, &["switch ($i)", "{", "default:", "if ($x) {"]);
        assert_eq!(rules.default_depth().as_slice(), &[1]);

        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE);
        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE_DOUBLE);
    }

    #[test]
    fn test_nested_switch_inside_default() {
        let mut rules = PhpRules::new();
        classify_all(
            &mut rules,
            &["switch ($i)", "{", "default:", "switch ($j)", "{", "default:"],
        );
        assert_eq!(rules.switch_depth().as_slice(), &[1, 1]);
        assert_eq!(rules.default_depth().as_slice(), &[1, 0]);

        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE_DOUBLE);
        assert_eq!(rules.default_depth().as_slice(), &[0]);
        assert_eq!(rules.switch_depth().as_slice(), &[1]);

        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE_DOUBLE);
        assert!(rules.default_depth().is_empty());
        assert!(rules.switch_depth().is_empty());
    }

    #[test]
    fn test_break_ends_default_clause() {
        let mut rules = PhpRules::new();
        classify_all(&mut rules, &["switch ($i) {", "default:", "echo 1;"]);
        assert_eq!(rules.classify("break;"), IndentMode::DECREMENT_AFTER);
        assert!(rules.default_depth().is_empty());
        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE);
    }

    #[test]
    fn test_break_in_nested_loop_is_neutral() {
        let mut rules = PhpRules::new();
        classify_all(
            &mut rules,
            &["switch ($i) {", "case 1:", "foreach ($xs as $x) {"],
        );
        assert_eq!(rules.classify("break;"), IndentMode::empty());
        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE);
        assert_eq!(rules.classify("break;"), IndentMode::DECREMENT_AFTER);
    }

    #[test]
    fn test_continue_and_return_end_clauses() {
        let mut rules = PhpRules::new();
        classify_all(&mut rules, &["switch ($i) {", "case 1:"]);
        assert_eq!(rules.classify("continue;"), IndentMode::DECREMENT_AFTER);
        assert_eq!(rules.classify("case 2:"), IndentMode::INCREMENT_AFTER);
        assert_eq!(rules.classify("return 2;"), IndentMode::DECREMENT_AFTER);
        assert_eq!(rules.classify("default:"), IndentMode::INCREMENT_AFTER);
        assert_eq!(rules.classify("throw new Exception();"), IndentMode::DECREMENT_AFTER);
        assert!(rules.default_depth().is_empty());
        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE);
        assert!(rules.switch_depth().is_empty());
    }

    #[test]
    fn test_return_in_nested_block_is_neutral() {
        let mut rules = PhpRules::new();
        classify_all(&mut rules, &["switch ($i) {", "case 1:", "if ($x) {"]);
        assert_eq!(rules.classify("return 1;"), IndentMode::empty());
        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE);
        assert_eq!(rules.classify("return 2;"), IndentMode::DECREMENT_AFTER);
    }

    #[test]
    fn test_break_after_return_is_neutral() {
        let mut rules = PhpRules::new();
        classify_all(&mut rules, &["switch ($i) {", "case 1:", "return 1;"]);
        assert_eq!(rules.classify("break;"), IndentMode::empty());
        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE);
    }

    #[test]
    fn test_fallthrough_labels_line_up() {
        let mut rules = PhpRules::new();
        classify_all(&mut rules, &["switch ($i) {", "case 1:"]);
        assert_eq!(
            rules.classify("case 2:"),
            IndentMode::DECREMENT_BEFORE | IndentMode::INCREMENT_AFTER
        );
        assert_eq!(rules.classify("echo 2;"), IndentMode::empty());
    }

    #[test]
    fn test_unended_case_closed_by_switch_brace() {
        let mut rules = PhpRules::new();
        classify_all(&mut rules, &["switch ($i) {", "case 1:", "echo 1;"]);
        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE_DOUBLE);
        assert!(rules.switch_depth().is_empty());
    }

    #[test]
    fn test_heredoc_span() {
        let mut rules = PhpRules::new();
        assert_eq!(rules.classify("$sql = <<<SQL"), IndentMode::INSIDE_LITERAL);
        assert!(rules.in_literal());
        assert_eq!(rules.pending_terminator(), Some("SQL"));

        assert_eq!(rules.classify("select {"), IndentMode::INSIDE_LITERAL);
        assert_eq!(rules.classify("}"), IndentMode::INSIDE_LITERAL);
        assert_eq!(rules.classify("SQL"), IndentMode::INSIDE_LITERAL);
        assert!(rules.in_literal());

        assert_eq!(rules.classify("SQL;"), IndentMode::INSIDE_LITERAL);
        assert!(!rules.in_literal());
        assert_eq!(rules.classify("}"), IndentMode::DECREMENT_BEFORE);
    }

    #[test]
    fn test_nowdoc_span() {
        let mut rules = PhpRules::new();
        assert_eq!(rules.classify("$text = <<< 'EOT'"), IndentMode::INSIDE_LITERAL);
        assert_eq!(rules.pending_terminator(), Some("EOT"));
        assert_eq!(rules.classify("EOT;"), IndentMode::INSIDE_LITERAL);
        assert_eq!(rules.pending_terminator(), None);
    }

    #[test]
    fn test_heredoc_without_assignment_is_ignored() {
        let mut rules = PhpRules::new();
        assert_eq!(rules.classify("return <<<EOT"), IndentMode::empty());
        assert!(!rules.in_literal());
    }

    #[test]
    fn test_brace_inside_string_is_misread() {
        // Known limitation: a string ending in `{` looks like a block opener.
        let mut rules = PhpRules::new();
        assert_eq!(rules.classify("echo '{"), IndentMode::INCREMENT_AFTER);
    }
}
