//! Indentation mode flags produced by line classification.

use bitflags::bitflags;

bitflags! {
    /// How one line affects the current and the following indentation level.
    ///
    /// A line may carry several flags, e.g. `} else {` is both
    /// `DECREMENT_BEFORE` and `INCREMENT_AFTER`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct IndentMode: u8 {
        /// Raise the level starting with the next line.
        const INCREMENT_AFTER = 1 << 0;
        /// Lower the level by one before rendering this line.
        const DECREMENT_BEFORE = 1 << 1;
        /// Lower the level by two before rendering this line.
        const DECREMENT_BEFORE_DOUBLE = 1 << 2;
        /// Lower the level starting with the next line.
        const DECREMENT_AFTER = 1 << 3;
        /// Copy the line verbatim and leave the level untouched.
        const INSIDE_LITERAL = 1 << 4;
    }
}

impl IndentMode {
    /// Number of levels to remove before the line is rendered.
    pub fn decrement_before(self) -> usize {
        if self.contains(Self::DECREMENT_BEFORE_DOUBLE) {
            2
        } else if self.contains(Self::DECREMENT_BEFORE) {
            1
        } else {
            0
        }
    }
}
