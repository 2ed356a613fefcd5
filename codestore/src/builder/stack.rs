/// One entry per currently open construct of a kind.
///
/// The classifier keeps two of these: one for `switch` statements and one for
/// `default` clauses. Each entry counts the braces opened since its construct
/// began and not yet closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestingStack<T> {
    entries: Vec<T>,
}

impl<T> NestingStack<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.entries.last_mut()
    }

    /// Current nesting depth.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }
}

impl<T> Default for NestingStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl NestingStack<u32> {
    /// Open a construct with no braces counted yet.
    pub fn open(&mut self) {
        self.push(0);
    }

    /// Count an opening brace against the innermost construct, if any.
    pub fn increment_top(&mut self) {
        if let Some(top) = self.top_mut() {
            *top += 1;
        }
    }

    /// Count a closing brace against the innermost construct, if any.
    pub fn decrement_top(&mut self) {
        if let Some(top) = self.top_mut() {
            *top = top.saturating_sub(1);
        }
    }
}
