//! Indentation configuration for generated code.

use std::borrow::Cow;

/// Display width assumed for one tab character when measuring line widths.
pub const TAB_COLUMNS: usize = 4;

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation (PHP code stores).
    pub const PHP: Self = Self::Spaces(2);

    /// String representation of one indent level.
    pub fn unit(&self) -> Cow<'static, str> {
        match self {
            Self::Spaces(2) => Cow::Borrowed("  "),
            Self::Spaces(4) => Cow::Borrowed("    "),
            Self::Spaces(n) => Cow::Owned(" ".repeat(usize::from(*n))),
            Self::Tab => Cow::Borrowed("\t"),
        }
    }

    /// Number of display columns taken by one indent level.
    pub fn columns(&self) -> usize {
        match self {
            Self::Spaces(n) => usize::from(*n),
            Self::Tab => TAB_COLUMNS,
        }
    }

    /// Append `level` indent units to `buffer`.
    pub fn write_to(&self, buffer: &mut String, level: usize) {
        let unit = self.unit();
        for _ in 0..level {
            buffer.push_str(&unit);
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::PHP
    }
}
